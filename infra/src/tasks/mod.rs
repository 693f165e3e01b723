//! Background maintenance tasks

mod revocation_sweep;

pub use revocation_sweep::{RevocationSweepConfig, RevocationSweeper, SweepResult};
