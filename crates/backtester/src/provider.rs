// In crates/backtester/src/provider.rs

use core_types::{Error, IndicatorProvider, IndicatorSnapshot, Result};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// An in-memory series of snapshots, replayed front to back.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSeries {
    snapshots: VecDeque<IndicatorSnapshot>,
}

impl SnapshotSeries {
    pub fn new(snapshots: impl IntoIterator<Item = IndicatorSnapshot>) -> Self {
        Self {
            snapshots: snapshots.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl IndicatorProvider for SnapshotSeries {
    fn next_snapshot(&mut self) -> Result<Option<IndicatorSnapshot>> {
        Ok(self.snapshots.pop_front())
    }
}

/// Reads snapshots exported by the host, one JSON object per line.
///
/// Blank lines are skipped. A line that does not parse stops the replay with
/// an error naming its 1-based line number.
pub struct JsonLinesProvider<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl JsonLinesProvider<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLinesProvider<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> IndicatorProvider for JsonLinesProvider<R> {
    fn next_snapshot(&mut self) -> Result<Option<IndicatorSnapshot>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = self.buf.trim();
            if trimmed.is_empty() {
                continue;
            }

            return serde_json::from_str(trimmed)
                .map(Some)
                .map_err(|e| Error::MalformedSnapshot {
                    line: self.line,
                    reason: e.to_string(),
                });
        }
    }
}
