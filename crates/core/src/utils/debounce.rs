//! Timer-based debounce
//!
//! Used for search-as-you-type: every [`Debouncer::call`] restarts the quiet
//! window and only the last value seen when the window elapses reaches the
//! callback.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};
use tracing::debug;

enum Command<T> {
    Call(T),
    Flush,
    Cancel,
}

/// Debounces values onto a callback running on a background task.
///
/// Must be created inside a tokio runtime. Dropping the debouncer discards
/// any pending value.
pub struct Debouncer<T: Send + 'static> {
    delay: Duration,
    tx: mpsc::UnboundedSender<Command<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, mut callback: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command<T>>();

        tokio::spawn(async move {
            let mut pending: Option<T> = None;
            let timer = sleep(delay);
            tokio::pin!(timer);

            loop {
                tokio::select! {
                    command = rx.recv() => match command {
                        Some(Command::Call(value)) => {
                            pending = Some(value);
                            timer.as_mut().reset(Instant::now() + delay);
                        }
                        Some(Command::Flush) => {
                            if let Some(value) = pending.take() {
                                callback(value);
                            }
                        }
                        Some(Command::Cancel) => pending = None,
                        None => break,
                    },
                    () = &mut timer, if pending.is_some() => {
                        if let Some(value) = pending.take() {
                            callback(value);
                        }
                    }
                }
            }
        });

        Self { delay, tx }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Submit a value, restarting the quiet window
    pub fn call(&self, value: T) {
        self.send(Command::Call(value));
    }

    /// Deliver the pending value now, if any
    pub fn flush(&self) {
        self.send(Command::Flush);
    }

    /// Discard the pending value, if any
    pub fn cancel(&self) {
        self.send(Command::Cancel);
    }

    fn send(&self, command: Command<T>) {
        if self.tx.send(command).is_err() {
            debug!("Debounce task has stopped; dropping command");
        }
    }
}
