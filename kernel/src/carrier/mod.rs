//! Carrier module: the value types and pure enumeration of the chain space.
//!
//! `catalog` ← `option` ← `chain` ← `expand` ← `sequence`

pub mod catalog;
pub mod chain;
pub mod expand;
pub mod option;
pub mod sequence;
