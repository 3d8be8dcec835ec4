// src/engine/runtime.rs

use std::fmt;
use std::future::Future;

use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::chrony::Collector;
use crate::emit::Emitter;
use crate::exec::CommandExecutor;

use super::{RuntimeOptions, RuntimeStats};

/// Drives collection cycles on a timer.
///
/// A failed cycle is logged once and does not stop the loop; the next tick
/// starts an independent cycle.
pub struct Runtime<E: CommandExecutor> {
    collector: Collector<E>,
    options: RuntimeOptions,
}

impl<E: CommandExecutor> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("collector", &self.collector)
            .field("options", &self.options)
            .finish()
    }
}

impl<E: CommandExecutor> Runtime<E> {
    pub fn new(collector: Collector<E>, options: RuntimeOptions) -> Self {
        Self { collector, options }
    }

    /// Main loop.
    ///
    /// - Ticks every `options.interval` (the first tick is immediate).
    /// - Runs one collection cycle per tick, emitting into `emitter`.
    /// - Returns when `shutdown` resolves or `max_cycles` is reached.
    pub async fn run<S>(self, emitter: &mut dyn Emitter, shutdown: S) -> RuntimeStats
    where
        S: Future<Output = ()>,
    {
        info!(interval = ?self.options.interval, "chronystat runtime started");

        let mut ticker = interval(self.options.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut stats = RuntimeStats::default();

        tokio::pin!(shutdown);

        loop {
            if self
                .options
                .max_cycles
                .is_some_and(|max| stats.cycles >= max)
            {
                info!(cycles = stats.cycles, "cycle limit reached; stopping runtime");
                break;
            }

            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested; stopping runtime");
                    break;
                }
                _ = ticker.tick() => {}
            }

            stats.cycles += 1;
            match self.collector.gather(emitter).await {
                Ok(summary) => stats.records += summary.emitted as u64,
                Err(err) => {
                    stats.failed += 1;
                    error!(cycle = stats.cycles, error = %err, "collection cycle failed");
                }
            }
        }

        info!(
            cycles = stats.cycles,
            failed = stats.failed,
            records = stats.records,
            "runtime exiting"
        );
        stats
    }
}
