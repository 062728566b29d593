//! Heap dump decoding
//!
//! A dump is newline-delimited JSON, one object per line:
//!
//! ```text
//! {"type":"ROOT", "root":"vm", "references":["0x7f3a1c0b2e28"]}
//! {"address":"0x7f3a1c0b2e28", "type":"STRING", "flags":{"pinned":true}}
//! {"address":"0x7f3a1c0b2e50", "type":"OBJECT", "memsize":40}
//! ```
//!
//! [`RecordStream`] turns each line into a [`Record`](crate::memory::Record),
//! skipping blank lines and root references. Every other field is ignored.

pub mod record;

pub use record::{parse_address, RecordStream};
