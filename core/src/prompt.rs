//! Asks the operator for the port to connect to.

use std::io::{self, BufRead, BufReader};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use colored::Colorize;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::invoker::flush_std_streams;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptOutcome {
    Port(String),
    /// The operator interrupted the prompt or closed input.
    Cancelled,
}

#[async_trait]
pub trait Prompt: Send + Sync {
    async fn port(&self, default: &str) -> PromptOutcome;
}

type SharedReader = Arc<Mutex<Box<dyn BufRead + Send>>>;

/// Line-based prompt over any reader, stdin in production.
///
/// The blocking read happens on its own thread, so cancellation returns at once and
/// never waits for the operator to press enter.
pub struct LinePrompt {
    reader: SharedReader,
    cancel: CancellationToken,
    delay: Duration,
}

impl LinePrompt {
    pub fn new(reader: impl BufRead + Send + 'static, cancel: CancellationToken, delay: Duration) -> Self {
        let reader: Box<dyn BufRead + Send> = Box::new(reader);
        Self {
            reader: Arc::new(Mutex::new(reader)),
            cancel,
            delay,
        }
    }

    pub fn stdin(cancel: CancellationToken, delay: Duration) -> Self {
        Self::new(BufReader::new(io::stdin()), cancel, delay)
    }

    fn read_line(&self) -> oneshot::Receiver<Option<String>> {
        let (tx, rx) = oneshot::channel();
        let reader = self.reader.clone();

        thread::spawn(move || {
            let mut line = String::new();
            let read = match reader.lock() {
                Ok(mut reader) => reader.read_line(&mut line),
                Err(_) => Ok(0),
            };
            let line = match read {
                Ok(0) => None,
                Ok(_) => Some(line),
                Err(e) => {
                    debug!("failed to read operator input: {e}");
                    None
                }
            };
            let _ = tx.send(line);
        });

        rx
    }
}

#[async_trait]
impl Prompt for LinePrompt {
    async fn port(&self, default: &str) -> PromptOutcome {
        tokio::time::sleep(self.delay).await;
        flush_std_streams();

        print!("{} ", format!("Enter connect port (default {default}):").bold());
        flush_std_streams();

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => PromptOutcome::Cancelled,
            line = self.read_line() => match line {
                Ok(Some(line)) => PromptOutcome::Port(port_or_default(&line, default)),
                _ => PromptOutcome::Cancelled,
            },
        }
    }
}

/// Trims operator input and substitutes the default for a blank line.
pub fn port_or_default(input: &str, default: &str) -> String {
    match input.trim() {
        "" => default.to_string(),
        port => port.to_string(),
    }
}
