//! Ctrl+C handling while an answer is streaming

use futures::stream::StreamExt;
use ragline_core::CancelHandle;
use signal_hook::consts::SIGINT;
use signal_hook_tokio::{Handle, Signals};
use std::io;
use tokio::task::JoinHandle;

/// Cancels a session on SIGINT for as long as it is alive
pub struct SignalHandler {
    signals: Handle,
    task_handle: JoinHandle<()>,
}

impl SignalHandler {
    /// Start cancelling `session` on Ctrl+C. A second Ctrl+C exits the
    /// process.
    pub fn start(session: CancelHandle) -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT])?;
        let handle = signals.handle();

        let task_handle = tokio::spawn(async move {
            while let Some(signal) = signals.next().await {
                if signal != SIGINT {
                    continue;
                }
                if session.is_cancelled() {
                    eprintln!("\nGoodbye!");
                    std::process::exit(130);
                }
                tracing::debug!("SIGINT received, cancelling session");
                eprintln!("\n🛑 Cancelling... (Ctrl+C again to quit)");
                session.cancel();
            }
        });

        Ok(Self {
            signals: handle,
            task_handle,
        })
    }
}

impl Drop for SignalHandler {
    fn drop(&mut self) {
        self.signals.close();
        self.task_handle.abort();
    }
}
