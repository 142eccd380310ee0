//! Prelude module - common imports for testgrid users
//!
//! ```rust
//! use testgrid::prelude::*;
//! ```

pub use crate::{
    // Writing
    append_row,
    write_header,
    WriterOptions,

    // Model
    CellValue,
    Row,
    Workbook,
    WorkbookExt,
    Worksheet,

    // Reading
    DataSheet,
    Record,
    Value,

    // Error types
    Error,
    Result,
};
