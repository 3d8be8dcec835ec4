use std::fmt;
use std::str::FromStr;

use crate::chrony::extract::{self, Extracted, ParseError};

/// One query mode of `chronyc`.
///
/// Each variant knows how many comma-separated fields its CSV line carries,
/// whether chronyc prints exactly one line for it, and how to turn such a
/// line into typed fields and tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subcommand {
    Tracking,
    ServerStats,
    Sources,
    SourceStats,
    NtpData,
}

impl Subcommand {
    pub const ALL: [Subcommand; 5] = [
        Subcommand::Tracking,
        Subcommand::ServerStats,
        Subcommand::Sources,
        Subcommand::SourceStats,
        Subcommand::NtpData,
    ];

    /// Name as passed on the chronyc command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Subcommand::Tracking => "tracking",
            Subcommand::ServerStats => "serverstats",
            Subcommand::Sources => "sources",
            Subcommand::SourceStats => "sourcestats",
            Subcommand::NtpData => "ntpdata",
        }
    }

    /// Number of fields in one CSV line of this subcommand.
    pub fn expected_field_count(self) -> usize {
        match self {
            Subcommand::Tracking => 14,
            Subcommand::ServerStats => 5,
            Subcommand::Sources => 10,
            Subcommand::SourceStats => 8,
            Subcommand::NtpData => 33,
        }
    }

    /// `tracking` and `serverstats` always print exactly one line. The others
    /// print one line per source, which may be none at all.
    pub fn is_single_line(self) -> bool {
        matches!(self, Subcommand::Tracking | Subcommand::ServerStats)
    }

    /// Run this subcommand's field extractor over one split line.
    pub fn extract(self, fields: &[&str]) -> Result<Extracted, ParseError> {
        match self {
            Subcommand::Tracking => extract::tracking(fields),
            Subcommand::ServerStats => extract::server_stats(fields),
            Subcommand::Sources => extract::sources(fields),
            Subcommand::SourceStats => extract::source_stats(fields),
            Subcommand::NtpData => extract::ntp_data(fields),
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names must match chronyc's own spelling exactly; they end up on its
/// command line.
impl FromStr for Subcommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tracking" => Ok(Subcommand::Tracking),
            "serverstats" => Ok(Subcommand::ServerStats),
            "sources" => Ok(Subcommand::Sources),
            "sourcestats" => Ok(Subcommand::SourceStats),
            "ntpdata" => Ok(Subcommand::NtpData),
            other => Err(format!(
                "unknown chronyc command: {other} (expected one of tracking, serverstats, sources, sourcestats, ntpdata)"
            )),
        }
    }
}

/// Default command list when the config does not name one.
pub fn default_commands() -> Vec<Subcommand> {
    vec![
        Subcommand::Tracking,
        Subcommand::Sources,
        Subcommand::SourceStats,
    ]
}
