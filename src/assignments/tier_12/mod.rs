//! Tier 12: Firelands

pub mod bethtilac;
pub mod shannox;

pub use bethtilac::Bethtilac;
pub use shannox::Shannox;
