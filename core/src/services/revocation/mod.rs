//! Revocation list policy on top of a `RevocationRepository`.

mod service;

pub use service::RevocationService;
