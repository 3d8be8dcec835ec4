// tests/extractor_properties.rs

use proptest::prelude::*;

use chronystat::chrony::sequencer::{LineOutcome, Sequencer};
use chronystat::chrony::ParseError;
use chronystat::types::Subcommand;

fn subcommand() -> impl Strategy<Value = Subcommand> {
    prop::sample::select(Subcommand::ALL.to_vec())
}

proptest! {
    #[test]
    fn wrong_field_count_is_always_a_field_count_error(
        command in subcommand(),
        fields in proptest::collection::vec("[0-9a-zA-Z.+*^ -]{0,6}", 0..40),
    ) {
        prop_assume!(fields.len() != command.expected_field_count());
        let raw: Vec<&str> = fields.iter().map(String::as_str).collect();

        match command.extract(&raw) {
            Err(ParseError::FieldCount { expected, got, .. }) => {
                prop_assert_eq!(expected, command.expected_field_count());
                prop_assert_eq!(got, raw.len());
            }
            other => prop_assert!(false, "expected FieldCount, got {:?}", other),
        }
    }

    #[test]
    fn feeding_any_line_terminates_and_never_grows_pending(
        commands in proptest::sample::subsequence(Subcommand::ALL.to_vec(), 0..=5),
        line in "[0-9a-z,.]{0,80}",
    ) {
        let mut sequencer = Sequencer::new(&commands);
        let before = sequencer.pending().count();

        let outcome = sequencer.feed(&line);

        prop_assert!(sequencer.pending().count() <= before);
        if let Ok(LineOutcome::Unclaimed) = outcome {
            prop_assert_eq!(sequencer.pending().count(), 0);
            prop_assert!(sequencer.current().is_none());
        }
    }
}
