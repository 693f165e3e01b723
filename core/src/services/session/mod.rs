//! Session termination.

mod logout;

pub use logout::{LogoutOutcome, LogoutPolicy, LogoutService, LogoutState};
