//! Persistence listeners.
//!
//! Each output file gets one `RecordWriter` registered as a listener
//! on its source service. The file handle is opened once in append
//! mode and held for the writer's lifetime; every record is written as
//! `<timestamp>, <record>` and flushed immediately. Persistence is
//! best effort: a failed write drops the record and logs.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::error;

use crate::application::bus::Listener;
use crate::infrastructure::clock::SharedClock;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub struct RecordWriter<V> {
    file: File,
    path: PathBuf,
    clock: SharedClock,
    _record: PhantomData<V>,
}

impl<V: Display> RecordWriter<V> {
    pub fn create(path: impl AsRef<Path>, clock: SharedClock) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            file,
            path,
            clock,
            _record: PhantomData,
        })
    }

    fn write_record(&mut self, record: &V) {
        let stamp = self.clock.now().format(TIMESTAMP_FORMAT);
        let outcome = writeln!(self.file, "{}, {}", stamp, record).and_then(|_| self.file.flush());
        if let Err(err) = outcome {
            error!(path = %self.path.display(), %err, "dropping record after failed write");
        }
    }
}

impl<V: Display> Listener<V> for RecordWriter<V> {
    fn on_add(&mut self, record: &V) {
        self.write_record(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::ManualClock;
    use bondflow_core::{BondCatalog, Price};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::rc::Rc;

    #[test]
    fn test_appends_timestamped_lines_and_flushes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gui.txt");
        let clock = Rc::new(ManualClock::starting_at(
            Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap(),
        ));

        let bond = BondCatalog::with_defaults().bond("91282CFX4").unwrap().clone();
        let price = Price::new(bond, dec!(99.5), dec!(0.03125));

        let mut writer: RecordWriter<Price> = RecordWriter::create(&path, clock).unwrap();
        writer.on_add(&price);
        writer.on_add(&price);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "2023-06-01 12:00:00.000000, CUSIP: 91282CFX4, Mid: 99.5, Spread: 0.03125"
        );
    }
}
