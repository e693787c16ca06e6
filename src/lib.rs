//! Tilefall (workspace facade crate).
//!
//! Exposes `tilefall::{types, core, driver}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use tilefall_core as core;
pub use tilefall_driver as driver;
pub use tilefall_types as types;
