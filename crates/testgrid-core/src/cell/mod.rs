//! Cell-related types
//!
//! - [`CellValue`] - The value held by a cell that exists
//! - [`CellKind`] - The declared kind of that value
//! - [`CellAddress`] - A cell's location (e.g., "A1")

mod address;
mod value;

pub use address::CellAddress;
pub use value::{CellKind, CellValue};
