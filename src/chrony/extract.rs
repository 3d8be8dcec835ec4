// src/chrony/extract.rs

//! Per-subcommand field extractors for chronyc's CSV output (`chronyc -c`).
//!
//! chronyc prints no header in CSV mode, so every extractor is positional:
//! field N always means the same thing for a given subcommand. Each extractor
//! is pure and either returns the full typed field-set plus its tags, or a
//! [`ParseError`]. It never returns a partial result.
//!
//! The `command` tag is not set here; the sequencer adds it.

use thiserror::Error;

use crate::chrony::record::{FieldSet, FieldValue, TagSet};
use crate::types::Subcommand;

/// Tag identifying the local chronyd for single-line subcommands.
pub const LOCAL_CLOCK_ID: &str = "chrony";

/// Why a single CSV line could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The line does not have the shape of this subcommand's output.
    #[error("got {got} instead of {expected} fields in {command} line")]
    FieldCount {
        command: Subcommand,
        expected: usize,
        got: usize,
    },

    /// The shape matched but one field did not convert to its type.
    #[error("{command} field {index} ({name}) = {value:?}: {reason}")]
    Format {
        command: Subcommand,
        index: usize,
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl ParseError {
    pub fn is_field_count(&self) -> bool {
        matches!(self, ParseError::FieldCount { .. })
    }
}

/// Fields and tags extracted from one line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    pub fields: FieldSet,
    pub tags: TagSet,
}

impl Extracted {
    fn put(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.fields.insert(name.to_string(), value.into());
    }

    fn tag(&mut self, name: &str, value: &str) {
        self.tags.insert(name.to_string(), value.to_string());
    }
}

/// Positional view over one split line, checked against the expected arity.
struct Columns<'a> {
    command: Subcommand,
    raw: &'a [&'a str],
}

impl<'a> Columns<'a> {
    fn new(command: Subcommand, raw: &'a [&'a str]) -> Result<Self, ParseError> {
        let expected = command.expected_field_count();
        if raw.len() != expected {
            return Err(ParseError::FieldCount {
                command,
                expected,
                got: raw.len(),
            });
        }
        Ok(Self { command, raw })
    }

    fn text(&self, index: usize) -> &'a str {
        self.raw[index]
    }

    fn int(&self, index: usize, name: &'static str) -> Result<i64, ParseError> {
        self.radix(index, name, 10)
    }

    fn octal(&self, index: usize, name: &'static str) -> Result<i64, ParseError> {
        self.radix(index, name, 8)
    }

    fn radix(&self, index: usize, name: &'static str, radix: u32) -> Result<i64, ParseError> {
        i64::from_str_radix(self.raw[index], radix)
            .map_err(|e| self.format_error(index, name, e.to_string()))
    }

    fn float(&self, index: usize, name: &'static str) -> Result<f64, ParseError> {
        self.raw[index]
            .parse::<f64>()
            .map_err(|e| self.format_error(index, name, e.to_string()))
    }

    fn format_error(&self, index: usize, name: &'static str, reason: String) -> ParseError {
        ParseError::Format {
            command: self.command,
            index,
            name,
            value: self.raw[index].to_string(),
            reason,
        }
    }
}

/// Source mode column of `sources`: server, peer, or reference clock.
pub fn clock_mode_code(symbol: &str) -> Option<i64> {
    match symbol {
        "^" => Some(0),
        "=" => Some(1),
        "#" => Some(2),
        " " => Some(-1),
        _ => None,
    }
}

/// Source state column of `sources`.
pub fn clock_state_code(symbol: &str) -> Option<i64> {
    match symbol {
        "*" => Some(0),
        "?" => Some(1),
        "x" => Some(2),
        "~" => Some(3),
        "+" => Some(4),
        "-" => Some(5),
        " " => Some(-1),
        _ => None,
    }
}

pub fn tracking(raw: &[&str]) -> Result<Extracted, ParseError> {
    let cols = Columns::new(Subcommand::Tracking, raw)?;
    let mut out = Extracted::default();

    out.put("refIdHex", cols.text(0));
    out.put("refId", cols.text(1));
    out.put("stratum", cols.int(2, "stratum")?);
    out.put("refTime", cols.float(3, "refTime")?);
    out.put("systemTimeOffset", cols.float(4, "systemTimeOffset")?);
    out.put("lastOffset", cols.float(5, "lastOffset")?);
    out.put("rmsOffset", cols.float(6, "rmsOffset")?);
    out.put("frequency", cols.float(7, "frequency")?);
    out.put("freqResidual", cols.float(8, "freqResidual")?);
    out.put("freqSkew", cols.float(9, "freqSkew")?);
    out.put("rootDelay", cols.float(10, "rootDelay")?);
    out.put("rootDispersion", cols.float(11, "rootDispersion")?);
    out.put("updateInterval", cols.float(12, "updateInterval")?);
    out.put("leapStatus", cols.text(13));

    out.tag("clockId", LOCAL_CLOCK_ID);
    Ok(out)
}

pub fn server_stats(raw: &[&str]) -> Result<Extracted, ParseError> {
    let cols = Columns::new(Subcommand::ServerStats, raw)?;
    let mut out = Extracted::default();

    const COUNTERS: [&str; 5] = [
        "ntpPacketsReceived",
        "ntpPacketsDropped",
        "commandPacketsReceived",
        "commandPacketsDropped",
        "clientLogRecordsDropped",
    ];
    for (index, name) in COUNTERS.into_iter().enumerate() {
        out.put(name, cols.int(index, name)?);
    }

    out.tag("clockId", LOCAL_CLOCK_ID);
    Ok(out)
}

pub fn sources(raw: &[&str]) -> Result<Extracted, ParseError> {
    let cols = Columns::new(Subcommand::Sources, raw)?;
    let mut out = Extracted::default();

    let mode = clock_mode_code(cols.text(0)).ok_or_else(|| {
        cols.format_error(0, "clockMode", "unknown clock mode".to_string())
    })?;
    let state = clock_state_code(cols.text(1)).ok_or_else(|| {
        cols.format_error(1, "clockState", "unknown clock state".to_string())
    })?;
    out.put("clockMode", mode);
    out.put("clockState", state);
    out.put("stratum", cols.int(3, "stratum")?);
    out.put("poll", cols.int(4, "poll")?);
    // chronyc prints the reachability register in octal.
    out.put("reach", cols.octal(5, "reach")?);
    out.put("lastRx", cols.int(6, "lastRx")?);
    out.put("offset", cols.float(7, "offset")?);
    out.put("rawOffset", cols.float(8, "rawOffset")?);
    out.put("errorMargin", cols.float(9, "errorMargin")?);

    out.tag("clockId", cols.text(2));
    Ok(out)
}

pub fn source_stats(raw: &[&str]) -> Result<Extracted, ParseError> {
    let cols = Columns::new(Subcommand::SourceStats, raw)?;
    let mut out = Extracted::default();

    out.put("np", cols.int(1, "np")?);
    out.put("nr", cols.int(2, "nr")?);
    out.put("span", cols.int(3, "span")?);
    out.put("frequency", cols.float(4, "frequency")?);
    out.put("freqSkew", cols.float(5, "freqSkew")?);
    out.put("offset", cols.float(6, "offset")?);
    out.put("stdDev", cols.float(7, "stdDev")?);

    out.tag("clockId", cols.text(0));
    Ok(out)
}

/// Column kinds of an `ntpdata` line, in order.
enum Kind {
    Text,
    Int,
    Float,
}

const NTPDATA_COLUMNS: [(&str, Kind); 33] = [
    ("remoteAddress", Kind::Text),
    ("remoteAddressHex", Kind::Text),
    ("remotePort", Kind::Int),
    ("localAddress", Kind::Text),
    ("localAddressHex", Kind::Text),
    ("leapStatus", Kind::Text),
    ("version", Kind::Int),
    ("clockModeStr", Kind::Text),
    ("stratum", Kind::Int),
    ("pollInterval", Kind::Int),
    ("pollIntervalSec", Kind::Float),
    ("precision", Kind::Int),
    ("precisionSec", Kind::Float),
    ("rootDelay", Kind::Float),
    ("rootDispersion", Kind::Float),
    ("refIdHex", Kind::Text),
    ("refId", Kind::Text),
    ("refTime", Kind::Float),
    ("offset", Kind::Float),
    ("peerDelay", Kind::Float),
    ("peerDispersion", Kind::Float),
    ("responseTime", Kind::Float),
    ("jitterAsymmetry", Kind::Float),
    ("ntpTestsA", Kind::Text),
    ("ntpTestsB", Kind::Text),
    ("ntpTestsC", Kind::Text),
    ("interleaved", Kind::Text),
    ("authenticated", Kind::Text),
    ("txTimestamping", Kind::Text),
    ("rxTimestamping", Kind::Text),
    ("totalTX", Kind::Int),
    ("totalRX", Kind::Int),
    ("totalValidRX", Kind::Int),
];

pub fn ntp_data(raw: &[&str]) -> Result<Extracted, ParseError> {
    let cols = Columns::new(Subcommand::NtpData, raw)?;
    let mut out = Extracted::default();

    for (index, (name, kind)) in NTPDATA_COLUMNS.iter().enumerate() {
        let value = match kind {
            Kind::Text => FieldValue::from(cols.text(index)),
            Kind::Int => FieldValue::Int(cols.int(index, *name)?),
            Kind::Float => FieldValue::Float(cols.float(index, *name)?),
        };
        out.fields.insert((*name).to_string(), value);
    }

    out.tag("clockId", cols.text(0));
    out.tag("clockIdHex", cols.text(1));
    Ok(out)
}
