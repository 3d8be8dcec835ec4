// tests/collector_fake_executor.rs

use std::path::Path;
use std::time::Duration;

use chronystat::chrony::invoker::{DEFAULT_TIMEOUT, build_invocation, invoke};
use chronystat::chrony::{FieldValue, Record, SequenceError};
use chronystat::errors::ChronyError;
use chronystat::exec::CommandOutput;
use chronystat::types::Subcommand::{self, *};
use chronystat_test_utils::builders::SettingsBuilder;
use chronystat_test_utils::fake_executor::{FakeExecutor, FakeResponse};
use chronystat_test_utils::fixtures::{self, output};
use chronystat_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn invocation_puts_flags_before_commands() {
    let inv = build_invocation(Path::new("/usr/bin/chronyc"), false, &[Tracking, Sources]);

    assert_eq!(inv.program, "/usr/bin/chronyc");
    assert_eq!(inv.args, vec!["-c", "-m", "tracking", "sources"]);
    assert_eq!(inv.to_string(), "/usr/bin/chronyc -c -m tracking sources");
}

#[test]
fn sudo_invocation_runs_chronyc_non_interactively() {
    let inv = build_invocation(Path::new("/usr/bin/chronyc"), true, &[ServerStats, NtpData]);

    assert_eq!(
        inv.argv(),
        vec!["sudo", "-n", "/usr/bin/chronyc", "-c", "-m", "serverstats", "ntpdata"]
    );
}

#[tokio::test]
async fn gather_tracking_and_serverstats() -> TestResult {
    init_tracing();

    let executor = FakeExecutor::with_output(&output(&[fixtures::TRACKING, fixtures::SERVERSTATS]));
    let invocations = executor.invocations();
    let collector = SettingsBuilder::new()
        .commands(&[Tracking, ServerStats])
        .collector(executor);

    let mut records: Vec<Record> = Vec::new();
    let summary = collector.gather(&mut records).await?;

    assert_eq!(summary.emitted, 2);
    assert_eq!(records[0].tag("command"), Some("tracking"));
    assert_eq!(records[0].field("refId"), Some(&FieldValue::Str("PPS".into())));
    assert_eq!(records[0].field("rootDispersion"), Some(&FieldValue::Float(0.000010123)));
    assert_eq!(records[1].tag("command"), Some("serverstats"));
    assert_eq!(records[1].field("clientLogRecordsDropped"), Some(&FieldValue::Int(231)));

    let seen = invocations.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].argv(), vec!["chronyc", "-c", "-m", "tracking", "serverstats"]);

    Ok(())
}

#[tokio::test]
async fn missing_chronyc_fails_before_running_anything() {
    let executor = FakeExecutor::with_output("");
    let probe = executor.clone();
    let collector = SettingsBuilder::new()
        .command(Tracking)
        .without_chronyc()
        .collector(executor);

    let mut records: Vec<Record> = Vec::new();
    let err = collector.gather(&mut records).await.unwrap_err();

    assert!(matches!(err, ChronyError::ToolNotFound));
    assert!(err.to_string().contains("chronyc not found"));
    assert_eq!(probe.run_count(), 0);
    assert!(matches!(collector.invocation(), Err(ChronyError::ToolNotFound)));
}

#[tokio::test]
async fn empty_chronyc_path_counts_as_missing() {
    let executor = FakeExecutor::with_output("");
    let result = invoke(&executor, Some(Path::new("")), false, &[Tracking], DEFAULT_TIMEOUT).await;

    assert!(matches!(result, Err(ChronyError::ToolNotFound)));
    assert_eq!(executor.run_count(), 0);
}

#[tokio::test]
async fn non_zero_exit_reports_argv_and_output() {
    let executor = FakeExecutor::failing("506 Cannot talk to daemon\n", 1);
    let collector = SettingsBuilder::new()
        .command(Tracking)
        .chronyc_path("/usr/sbin/chronyc")
        .use_sudo(true)
        .collector(executor);

    let mut records: Vec<Record> = Vec::new();
    let err = collector.gather(&mut records).await.unwrap_err();

    match err {
        ChronyError::Execution { argv, reason, output } => {
            assert_eq!(argv, "sudo -n /usr/sbin/chronyc -c -m tracking");
            assert_eq!(reason, "exit status 1");
            assert!(output.contains("Cannot talk to daemon"));
        }
        other => panic!("expected Execution error, got {other:?}"),
    }
    assert!(records.is_empty());
}

#[tokio::test]
async fn timeout_fails_the_cycle_without_records() {
    let executor = FakeExecutor::timing_out();
    let collector = SettingsBuilder::new()
        .command(Tracking)
        .collector(executor)
        .with_timeout(Duration::from_millis(50));

    let mut records: Vec<Record> = Vec::new();
    let err = collector.gather(&mut records).await.unwrap_err();

    match err {
        ChronyError::Execution { argv, reason, .. } => {
            assert_eq!(argv, "chronyc -c -m tracking");
            assert!(reason.contains("timed out"));
        }
        other => panic!("expected Execution error, got {other:?}"),
    }
    assert!(records.is_empty());
}

#[tokio::test]
async fn sequencing_failure_surfaces_as_chrony_error() {
    let executor = FakeExecutor::with_output("");
    let collector = SettingsBuilder::new()
        .commands(&[Sources, Tracking])
        .collector(executor);

    let mut records: Vec<Record> = Vec::new();
    let err = collector.gather(&mut records).await.unwrap_err();

    assert!(matches!(
        err,
        ChronyError::Sequence(SequenceError::InsufficientOutput { ref remaining })
            if remaining == &vec![Subcommand::Tracking]
    ));
}

#[tokio::test]
async fn successive_cycles_are_independent() -> TestResult {
    let executor = FakeExecutor::scripted(vec![
        FakeResponse::Output(CommandOutput::success("garbage\n")),
        FakeResponse::Output(CommandOutput::success(output(&[fixtures::TRACKING]))),
    ]);
    let collector = SettingsBuilder::new().command(Tracking).collector(executor);

    let mut records: Vec<Record> = Vec::new();
    assert!(collector.gather(&mut records).await.is_err());
    assert!(records.is_empty());

    collector.gather(&mut records).await?;
    assert_eq!(records.len(), 1);

    Ok(())
}
