//! # testgrid-xlsx
//!
//! XLSX (Office Open XML) reader and writer for the testgrid workbook model.
//!
//! Only cell contents are handled. Styles, comments, drawings and other parts
//! of an existing package are not carried over when a workbook is written
//! back out.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
