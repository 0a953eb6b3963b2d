//! Person records of a family tree and the snapshots they travel in.

pub mod date;
mod record;
mod ser;

pub use record::*;
pub use ser::{DataError, Snapshot};
