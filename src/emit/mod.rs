// src/emit/mod.rs

//! Metric sinks.
//!
//! The collector hands every parsed line to an [`Emitter`]. Tests and
//! embedders can collect into a `Vec<Record>`; the `chronystat` binary uses
//! [`LineProtocolEmitter`] to write Influx line protocol to stdout.

pub mod line_protocol;

use crate::chrony::record::Record;

pub use line_protocol::LineProtocolEmitter;

/// Receives one record per successfully parsed chronyc line.
pub trait Emitter {
    fn record(&mut self, record: Record);
}

impl Emitter for Vec<Record> {
    fn record(&mut self, record: Record) {
        self.push(record);
    }
}
