//! CSV record reader for per-seed trace files.
//!
//! Files carry a header with at least `x` and `y` columns (usually `time,x,y`).
//! Rows whose `x` or `y` does not parse as a number are skipped silently.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use super::RawSample;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct Record {
    x: f64,
    y: f64,
}

/// Read raw samples from CSV text.
///
/// Header errors and I/O failures are returned; malformed data rows are not.
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<RawSample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    // Surface a broken header (or unreadable input) instead of treating it as zero rows.
    rdr.headers()?;

    let mut samples = Vec::new();
    let mut skipped = 0usize;
    for row in rdr.deserialize::<Record>() {
        match row {
            Ok(rec) => samples.push(RawSample::new(rec.x, rec.y)),
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!("skipped {skipped} malformed records");
    }
    Ok(samples)
}

/// Read raw samples from a CSV file on disk.
pub fn read_samples_path(path: impl AsRef<Path>) -> Result<Vec<RawSample>> {
    let file = File::open(path.as_ref())?;
    read_samples(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_time_x_y() {
        let text = "time,x,y\n0.0,1.5,10\n0.1,2.5,-170\n";
        let samples = read_samples(text.as_bytes()).unwrap();
        assert_eq!(
            samples,
            vec![RawSample::new(1.5, 10.0), RawSample::new(2.5, -170.0)]
        );
    }

    #[test]
    fn skips_malformed_rows() {
        let text = "time,x,y\n0.0,1,2\n0.1,oops,3\n0.2,4,\n0.3, 5 , 6 \n";
        let samples = read_samples(text.as_bytes()).unwrap();
        assert_eq!(samples, vec![RawSample::new(1.0, 2.0), RawSample::new(5.0, 6.0)]);
    }

    #[test]
    fn column_order_follows_header() {
        let text = "y,time,x\n7,0.0,3\n";
        let samples = read_samples(text.as_bytes()).unwrap();
        assert_eq!(samples, vec![RawSample::new(3.0, 7.0)]);
    }

    #[test]
    fn header_only_yields_nothing() {
        let samples = read_samples("time,x,y\n".as_bytes()).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = read_samples_path("/definitely/not/here.csv");
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
