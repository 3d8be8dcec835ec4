// src/emit/line_protocol.rs

//! Influx line protocol writer.
//!
//! `chronyc,clockId=chrony,command=tracking leapStatus="Normal",stratum=1i,...`
//!
//! Tags and fields come out in name order (both are `BTreeMap`s). No
//! timestamp is written; the receiving pipeline stamps points on arrival.
//! Non-finite floats have no line-protocol form and are left out; a record
//! left with no fields is not written at all.

use std::io::Write;

use tracing::{debug, warn};

use crate::chrony::record::{FieldValue, Record};
use crate::emit::Emitter;

pub struct LineProtocolEmitter<W: Write> {
    out: W,
}

impl<W: Write> LineProtocolEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Emitter for LineProtocolEmitter<W> {
    fn record(&mut self, record: Record) {
        let Some(line) = format_line(&record) else {
            debug!(tags = ?record.tags, "skipping record without finite fields");
            return;
        };
        if let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            warn!(error = %e, "failed to write record");
        }
    }
}

/// Render a record as a single line-protocol point (without newline).
///
/// Returns `None` when no field survives.
pub fn format_line(record: &Record) -> Option<String> {
    let mut line = escape_key(record.measurement, false);

    for (key, value) in &record.tags {
        // Empty tag values are not allowed in line protocol.
        if value.is_empty() {
            continue;
        }
        line.push(',');
        line.push_str(&escape_key(key, true));
        line.push('=');
        line.push_str(&escape_key(value, true));
    }

    let fields: Vec<String> = record
        .fields
        .iter()
        .filter_map(|(key, value)| {
            format_value(value).map(|v| format!("{}={v}", escape_key(key, true)))
        })
        .collect();
    if fields.is_empty() {
        return None;
    }
    line.push(' ');
    line.push_str(&fields.join(","));
    Some(line)
}

fn format_value(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Int(v) => Some(format!("{v}i")),
        FieldValue::Float(v) if v.is_finite() => Some(format!("{v}")),
        FieldValue::Float(_) => None,
        FieldValue::Str(s) => Some(format!(
            "\"{}\"",
            s.replace('\\', "\\\\").replace('"', "\\\"")
        )),
    }
}

fn escape_key(s: &str, escape_equals: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            ',' | ' ' => {
                out.push('\\');
                out.push(c);
            }
            '=' if escape_equals => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
