// src/lib.rs

pub mod chrony;
pub mod cli;
pub mod config;
pub mod emit;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::io;

use anyhow::Result;
use tracing::{debug, info};

use crate::chrony::Collector;
use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::config::loader::load_or_default;
use crate::emit::LineProtocolEmitter;
use crate::engine::{Runtime, RuntimeOptions};
use crate::exec::TokioExecutor;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (plus CLI overrides)
/// - the collector with the real process executor
/// - a line-protocol emitter on stdout
/// - the periodic runtime, or a single cycle with `--once`
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let mut cfg = load_or_default(args.config.as_deref())?;
    if args.use_sudo {
        cfg.collector.use_sudo = true;
    }

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let collector = Collector::new(cfg.collector.clone(), TokioExecutor);
    let mut emitter = LineProtocolEmitter::new(io::stdout());

    if args.once {
        let summary = collector.gather(&mut emitter).await?;
        debug!(?summary, "single collection cycle complete");
        return Ok(());
    }

    let options = RuntimeOptions {
        interval: cfg.interval,
        max_cycles: None,
    };
    let runtime = Runtime::new(collector, options);

    // Ctrl-C → graceful shutdown.
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    let stats = runtime.run(&mut emitter, shutdown).await;
    info!(?stats, "chronystat finished");
    Ok(())
}

/// Simple dry-run output: print the resolved settings and invocation.
fn print_dry_run(cfg: &ConfigFile) {
    let collector = &cfg.collector;

    println!("chronystat dry-run");
    println!("  interval = {:?}", cfg.interval);
    println!("  use_sudo = {}", collector.use_sudo);
    match collector.chronyc_path {
        Some(ref path) => println!("  chronyc = {}", path.display()),
        None => println!("  chronyc = <not found>"),
    }
    println!();

    println!("commands ({}):", collector.commands.len());
    for command in &collector.commands {
        let shape = if command.is_single_line() {
            "single line"
        } else {
            "list"
        };
        println!(
            "  - {command} ({shape}, {} fields)",
            command.expected_field_count()
        );
    }
    println!();

    match Collector::new(collector.clone(), TokioExecutor).invocation() {
        Ok(invocation) => println!("would run: {invocation}"),
        Err(e) => println!("would fail: {e}"),
    }

    debug!("dry-run complete (no execution)");
}
