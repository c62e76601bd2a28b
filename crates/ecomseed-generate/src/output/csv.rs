use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use ecomseed_core::Record;

/// Write records as CSV under the table's catalog header.
///
/// The header is written even when `rows` is empty. Returns the number of
/// bytes written.
pub fn write_table_csv<R: Record + Serialize>(path: &Path, rows: &[R]) -> Result<u64, csv::Error> {
    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(R::TABLE.columns())?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    let mut counting = writer.into_inner().map_err(|err| err.into_error())?;
    counting.flush()?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use ecomseed_core::{Shipment, TableName};

    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ecomseed_output_{name}_{}",
            uuid::Uuid::new_v4()
        ));
        std::fs::create_dir_all(&dir).expect("create dir");
        dir.join(format!("{name}.csv"))
    }

    #[test]
    fn empty_table_still_gets_a_header() {
        let path = temp_path("shipments");
        let rows: Vec<Shipment> = Vec::new();
        let bytes = write_table_csv(&path, &rows).expect("write");

        let contents = std::fs::read_to_string(&path).expect("read back");
        let header = TableName::Shipments.columns().join(",");
        assert_eq!(contents, format!("{header}\n"));
        assert_eq!(bytes, contents.len() as u64);
    }
}
