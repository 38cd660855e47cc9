use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use word_scramble_types::RoundToken;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Sends one tick per second for a single round. Starting a new round or
/// stopping aborts the previous task, and every tick carries its round's
/// token so anything already queued can be recognised as stale.
pub struct Countdown {
    sender: mpsc::UnboundedSender<RoundToken>,
    task: Option<(RoundToken, JoinHandle<()>)>,
}

impl Countdown {
    pub fn new(sender: mpsc::UnboundedSender<RoundToken>) -> Self {
        Self { sender, task: None }
    }

    pub fn start(&mut self, token: RoundToken) {
        self.stop();

        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if sender.send(token).is_err() {
                    break;
                }
            }
        });

        debug!("Countdown started for round {}", token);
        self.task = Some((token, handle));
    }

    pub fn stop(&mut self) {
        if let Some((token, handle)) = self.task.take() {
            handle.abort();
            debug!("Countdown stopped for round {}", token);
        }
    }

    /// Round the running countdown belongs to.
    pub fn token(&self) -> Option<RoundToken> {
        self.task.as_ref().map(|(token, _)| *token)
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.stop();
    }
}
