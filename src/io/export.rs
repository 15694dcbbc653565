use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::series::{HourlyRecord, SeriesKind};

/// Exports a series to a CSV file at the given path, overwriting it.
///
/// Writes the header of `kind` followed by one row per record. Produces
/// identical bytes for identical records.
///
/// # Arguments
///
/// * `records` - Complete series in output order
/// * `kind` - Which series this is; fixes the header and precision
/// * `path` - Output file path
/// * `create_parent_dirs` - Create missing parent directories first
///
/// # Errors
///
/// Returns [`Error::Io`] if a directory or the file cannot be created or
/// written.
pub fn export_series(
    records: &[HourlyRecord],
    kind: SeriesKind,
    path: &Path,
    create_parent_dirs: bool,
) -> Result<()> {
    if create_parent_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            debug!(dir = %parent.display(), "ensured output directory");
        }
    }

    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    write_series(records, kind, BufWriter::new(file)).map_err(io_err)
}

/// Writes a series as CSV to any writer.
///
/// Values are printed with the fixed precision of `kind`, trailing zeros
/// included.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_series(
    records: &[HourlyRecord],
    kind: SeriesKind,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    let p = kind.decimals();

    wtr.write_record(kind.header())?;
    for r in records {
        wtr.write_record(&[
            r.month.to_string(),
            r.day.to_string(),
            r.hour.to_string(),
            format!("{:.p$}", r.value),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
