use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chronystat::exec::{CommandExecutor, CommandOutput, ExecError, Invocation};

/// What the fake returns for one `run` call.
#[derive(Debug)]
pub enum FakeResponse {
    Output(CommandOutput),
    TimedOut,
}

/// A fake executor that:
/// - records every invocation it was asked to run
/// - answers with scripted responses, in order; the last one repeats.
#[derive(Clone)]
pub struct FakeExecutor {
    responses: Arc<Mutex<VecDeque<FakeResponse>>>,
    last: Arc<Mutex<Option<CommandOutput>>>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl FakeExecutor {
    /// Always succeed with `stdout`.
    pub fn with_output(stdout: &str) -> Self {
        Self::scripted(vec![FakeResponse::Output(CommandOutput::success(stdout))])
    }

    /// Always exit with `exit_code`, printing `output`.
    pub fn failing(output: &str, exit_code: i32) -> Self {
        Self::scripted(vec![FakeResponse::Output(CommandOutput::failed(
            output, exit_code,
        ))])
    }

    pub fn timing_out() -> Self {
        Self::scripted(vec![FakeResponse::TimedOut])
    }

    pub fn scripted(responses: Vec<FakeResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            last: Arc::new(Mutex::new(None)),
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded invocations, shared with clones.
    pub fn invocations(&self) -> Arc<Mutex<Vec<Invocation>>> {
        Arc::clone(&self.invocations)
    }

    pub fn run_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    fn next_response(&self) -> FakeResponse {
        let mut responses = self.responses.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        match responses.pop_front() {
            Some(FakeResponse::Output(out)) if responses.is_empty() => {
                *last = Some(out.clone());
                FakeResponse::Output(out)
            }
            Some(resp) => resp,
            None => match last.as_ref() {
                Some(out) => FakeResponse::Output(out.clone()),
                None => FakeResponse::TimedOut,
            },
        }
    }
}

impl CommandExecutor for FakeExecutor {
    fn run<'a>(
        &'a self,
        invocation: &'a Invocation,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, ExecError>> + Send + 'a>> {
        self.invocations.lock().unwrap().push(invocation.clone());
        let response = self.next_response();

        Box::pin(async move {
            match response {
                FakeResponse::Output(out) => Ok(out),
                FakeResponse::TimedOut => Err(ExecError::TimedOut(timeout)),
            }
        })
    }
}
