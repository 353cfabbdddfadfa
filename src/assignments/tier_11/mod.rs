//! Tier 11: Throne of the Four Winds and Blackwing Descent

pub mod alakir;
pub mod chimaeron;
pub mod conclave;

pub use alakir::{AlAkir, Marker};
pub use chimaeron::{Chimaeron, Slot};
pub use conclave::{Conclave, Platform};
