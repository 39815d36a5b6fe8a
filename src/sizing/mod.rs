//! Solar-plus-storage sizing: request types and the pure sizing formula.

pub mod engine;
pub mod types;

pub use engine::{AdjustedLoad, adjust_for_losses, compute, round1};
pub use types::{SizingConfiguration, SizingInputs, SizingResult};
