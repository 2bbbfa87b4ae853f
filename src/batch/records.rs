//! Intermediate CSV files between stages.

use super::write_output;
use crate::error::PipelineResult;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Write rows with a header line
pub fn write_records<T: Serialize>(path: &Path, rows: &[T]) -> PipelineResult<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())?;
    write_output(path, &bytes)?;
    debug!("Wrote {} records to {:?}", rows.len(), path);
    Ok(())
}

/// Read all rows of a file written by [`write_records`]
pub fn read_records<T: DeserializeOwned>(path: &Path) -> PipelineResult<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()?;
    debug!("Read {} records from {:?}", rows.len(), path);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{DealId, DealRecord, NotedRow};

    #[test]
    fn test_records_survive_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("temp_auctions.csv");
        let rows = vec![
            DealRecord::new(DealId::new(1), "1C - 1D(waiting, 0-7)", "Note: \"classic\""),
            DealRecord::new(DealId::new(1).with_alternate(2), "1C - 1H", ""),
        ];

        write_records(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("deal,auction,notes\n"));
        assert!(text.contains("1-2,"));

        let back: Vec<DealRecord> = read_records(&path).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_invalid_deal_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "deal,auction,bid_notes,notes\nx,1C,,\n").unwrap();
        assert!(read_records::<NotedRow>(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_records::<DealRecord>(&dir.path().join("none.csv")).is_err());
    }
}
