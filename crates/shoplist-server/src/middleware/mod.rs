pub mod cors;
pub mod identity;
