// tests/runtime_fake_executor.rs

use std::time::Duration;

use chronystat::chrony::Record;
use chronystat::engine::{Runtime, RuntimeOptions};
use chronystat::exec::CommandOutput;
use chronystat::types::Subcommand;
use chronystat_test_utils::builders::SettingsBuilder;
use chronystat_test_utils::fake_executor::{FakeExecutor, FakeResponse};
use chronystat_test_utils::fixtures::{self, output};
use chronystat_test_utils::init_tracing;

#[tokio::test(start_paused = true)]
async fn failed_cycle_does_not_stop_later_cycles() {
    init_tracing();

    let executor = FakeExecutor::scripted(vec![
        FakeResponse::Output(CommandOutput::success(output(&[fixtures::TRACKING]))),
        FakeResponse::Output(CommandOutput::failed("506 Cannot talk to daemon", 1)),
        FakeResponse::Output(CommandOutput::success(output(&[fixtures::TRACKING]))),
    ]);
    let probe = executor.clone();
    let collector = SettingsBuilder::new()
        .command(Subcommand::Tracking)
        .collector(executor);

    let options = RuntimeOptions {
        interval: Duration::from_secs(10),
        max_cycles: Some(3),
    };
    let runtime = Runtime::new(collector, options);

    let mut records: Vec<Record> = Vec::new();
    let stats = runtime.run(&mut records, std::future::pending()).await;

    assert_eq!(stats.cycles, 3);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.records, 2);
    assert_eq!(records.len(), 2);
    assert_eq!(probe.run_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_loop() {
    let executor = FakeExecutor::with_output(&output(&[fixtures::SERVERSTATS]));
    let probe = executor.clone();
    let collector = SettingsBuilder::new()
        .command(Subcommand::ServerStats)
        .collector(executor);

    let options = RuntimeOptions {
        interval: Duration::from_secs(10),
        max_cycles: None,
    };
    let runtime = Runtime::new(collector, options);

    let mut records: Vec<Record> = Vec::new();
    // Ticks fire at 0s, 10s and 20s; shutdown at 25s.
    let shutdown = tokio::time::sleep(Duration::from_secs(25));
    let stats = runtime.run(&mut records, shutdown).await;

    assert_eq!(stats.cycles, 3);
    assert_eq!(stats.failed, 0);
    assert_eq!(probe.run_count(), 3);
}
