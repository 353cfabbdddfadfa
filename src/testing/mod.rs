//! Testing utilities and mock implementations
//!
//! In-memory stand-ins for the spreadsheet and the Raid-Helper API so
//! encounter runs can be exercised without network access.

pub mod mocks;

pub use mocks::*;
