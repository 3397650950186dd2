//! CSV staging for the lookup file.

use std::net::IpAddr;

use anyhow::{anyhow, Result};
use serde::Serialize;
use tempfile::NamedTempFile;

/// One row of the lookup file
#[derive(Debug, Serialize)]
struct LookupRecord<'a> {
    ip: String,
    hostname: &'a str,
}

/// Lookup file staged in a temp file until upload
///
/// The header row is written up front, so an all-miss sweep still uploads
/// a well-formed (if empty) lookup file.
pub struct CsvReport {
    writer: csv::Writer<NamedTempFile>,
}

impl CsvReport {
    pub fn new() -> Result<Self> {
        let file = NamedTempFile::new()?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(["ip", "hostname"])?;

        Ok(Self { writer })
    }

    /// Append one `(ip, hostname)` row
    pub fn record(&mut self, addr: IpAddr, hostname: &str) -> Result<()> {
        self.writer.serialize(LookupRecord {
            ip: addr.to_string(),
            hostname,
        })?;
        Ok(())
    }

    /// Flush and hand back the staged file
    pub fn finish(self) -> Result<NamedTempFile> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow!("flushing lookup file: {e}"))
    }
}
