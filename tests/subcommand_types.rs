// tests/subcommand_types.rs

use std::str::FromStr;

use chronystat::logging::parse_level_str;
use chronystat::types::{Subcommand, default_commands};

#[test]
fn arity_and_shape_per_subcommand() {
    let expected = [
        (Subcommand::Tracking, 14, true),
        (Subcommand::ServerStats, 5, true),
        (Subcommand::Sources, 10, false),
        (Subcommand::SourceStats, 8, false),
        (Subcommand::NtpData, 33, false),
    ];
    for (command, count, single) in expected {
        assert_eq!(command.expected_field_count(), count, "{command}");
        assert_eq!(command.is_single_line(), single, "{command}");
    }
}

#[test]
fn names_round_trip_through_from_str() {
    for command in Subcommand::ALL {
        assert_eq!(Subcommand::from_str(command.as_str()), Ok(command));
        assert_eq!(command.to_string(), command.as_str());
    }
    assert!(Subcommand::from_str("clients").is_err());
}

#[test]
fn names_are_matched_exactly() {
    assert!(Subcommand::from_str("Tracking").is_err());
    assert!(Subcommand::from_str(" tracking ").is_err());
    assert!(Subcommand::from_str("SOURCES").is_err());
}

#[test]
fn default_command_list() {
    assert_eq!(
        default_commands(),
        vec![Subcommand::Tracking, Subcommand::Sources, Subcommand::SourceStats]
    );
}

#[test]
fn log_level_names() {
    assert_eq!(parse_level_str(" Warning "), Some(tracing::Level::WARN));
    assert_eq!(parse_level_str("trace"), Some(tracing::Level::TRACE));
    assert_eq!(parse_level_str("loud"), None);
}
