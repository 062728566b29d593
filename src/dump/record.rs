//! Line-by-line record decoding

use crate::errors::{Error, Result};
use crate::memory::constants::ROOT_KIND;
use crate::memory::{Address, Geometry, Record};
use serde::Deserialize;
use std::io::BufRead;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct RawFlags {
    #[serde(default)]
    pinned: bool,
}

/// The subset of a dump line that matters here
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "type")]
    kind: String,
    address: Option<String>,
    object_id: Option<u64>,
    #[serde(default)]
    flags: Option<RawFlags>,
}

/// Parse a `0x`-prefixed hexadecimal address
pub fn parse_address(text: &str) -> Option<Address> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))?;
    if digits.is_empty() {
        return None;
    }
    Address::from_str_radix(digits, 16).ok()
}

/// Iterator over the heap objects of a dump
///
/// Yields one `Result` per heap-resident record. Root references and blank
/// lines produce nothing. The first error should end iteration; the stream
/// itself keeps going if polled again.
pub struct RecordStream<R> {
    reader: R,
    geometry: Geometry,
    line: usize,
    buf: String,
    roots_skipped: usize,
}

impl<R: BufRead> RecordStream<R> {
    pub fn new(reader: R, geometry: Geometry) -> Self {
        RecordStream {
            reader,
            geometry,
            line: 0,
            buf: String::new(),
            roots_skipped: 0,
        }
    }

    /// Lines read so far
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Root references dropped so far
    pub fn roots_skipped(&self) -> usize {
        self.roots_skipped
    }

    fn decode(&self, text: &str) -> Result<Option<Record>> {
        let raw: RawRecord = serde_json::from_str(text).map_err(|source| Error::Decode {
            line: self.line,
            source,
        })?;

        if raw.kind == ROOT_KIND {
            return Ok(None);
        }

        let address = match (raw.address, raw.object_id) {
            (Some(hex), _) => parse_address(&hex).ok_or(Error::BadAddress {
                line: self.line,
                value: hex,
            })?,
            (None, Some(id)) => self.geometry.id_to_address(id),
            (None, None) => return Err(Error::MissingAddress { line: self.line }),
        };

        let pinned = raw.flags.map(|f| f.pinned).unwrap_or(false);

        Ok(Some(Record {
            address,
            pinned,
            kind: raw.kind,
        }))
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(source) => {
                    return Some(Err(Error::Read {
                        line: self.line + 1,
                        source,
                    }))
                }
            }

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }

            match self.decode(text) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {
                    self.roots_skipped += 1;
                    debug!("line {}: skipped root reference", self.line);
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
