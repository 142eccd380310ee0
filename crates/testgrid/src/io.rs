//! Loading and atomically saving workbook files

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use testgrid_core::Workbook;
use testgrid_xlsx::{XlsxError, XlsxReader, XlsxWriter};

use crate::error::{Error, Result};

/// Read a workbook, sorting failures into not-found, format and I/O errors.
pub(crate) fn open_workbook(path: &Path) -> Result<Workbook> {
    XlsxReader::read_file(path).map_err(|err| match err {
        XlsxError::Io(e) if e.kind() == io::ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        XlsxError::Io(e) => Error::Read {
            path: path.to_path_buf(),
            source: e,
        },
        other => Error::Format {
            path: path.to_path_buf(),
            source: other,
        },
    })
}

fn parent_dir_or_dot(path: &Path) -> &Path {
    // `Path::parent` is `Some("")` for a bare file name
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Serialize `workbook` and replace `path` with it.
///
/// The package is built in memory, written to a temp file beside `path`,
/// synced, then renamed into place. On any error the previous file is left
/// as it was and the temp file is removed.
pub(crate) fn save_workbook(workbook: &Workbook, path: &Path) -> Result<()> {
    let write_err = |source: XlsxError| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let bytes = XlsxWriter::to_bytes(workbook).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(parent_dir_or_dot(path))
        .map_err(|e| write_err(e.into()))?;
    tmp.write_all(&bytes).map_err(|e| write_err(e.into()))?;
    tmp.flush().map_err(|e| write_err(e.into()))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| write_err(e.into()))?;
    tmp.persist(path)
        .map_err(|e| write_err(e.error.into()))?;

    log::debug!("saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
