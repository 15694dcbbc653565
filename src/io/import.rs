use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::series::{HourlyRecord, SeriesKind};

/// Reads a series CSV file written by [`super::export::export_series`].
///
/// # Errors
///
/// Returns [`Error::Csv`] if the file cannot be opened or a row does not
/// parse, and [`Error::Series`] if the header does not belong to `kind`.
pub fn import_series(path: &Path, kind: SeriesKind) -> Result<Vec<HourlyRecord>> {
    let rdr = csv::Reader::from_path(path).map_err(|source| Error::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(rdr, kind, path)
}

/// Reads a series CSV from any reader.
///
/// # Errors
///
/// Same as [`import_series`].
pub fn read_series(reader: impl Read, kind: SeriesKind) -> Result<Vec<HourlyRecord>> {
    read_records(csv::Reader::from_reader(reader), kind, Path::new("<reader>"))
}

fn read_records<R: Read>(
    mut rdr: csv::Reader<R>,
    kind: SeriesKind,
    origin: &Path,
) -> Result<Vec<HourlyRecord>> {
    let csv_err = |source| Error::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let headers = rdr.headers().map_err(csv_err)?;
    if !headers.iter().eq(kind.header()) {
        return Err(Error::Series {
            row: 0,
            message: format!(
                "header {:?} is not a {kind} series (expected {:?})",
                headers.iter().collect::<Vec<_>>(),
                kind.header()
            ),
        });
    }

    let mut records = Vec::new();
    for row in rdr.deserialize::<(u32, u32, u32, f64)>() {
        let (month, day, hour, value) = row.map_err(csv_err)?;
        records.push(HourlyRecord {
            month,
            day,
            hour,
            value,
        });
    }
    Ok(records)
}
