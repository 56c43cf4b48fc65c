//! Ctrl+C handling for polling loops

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;
use tokio::time::sleep;
use tracing::info;

/// Running flag shared between a polling loop and the signal handler
#[derive(Clone)]
pub struct ShutdownManager {
    running: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Spawn a Ctrl+C handler that triggers shutdown
    pub fn spawn_signal_handler(&self) {
        let manager = self.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("Received shutdown signal (Ctrl+C)");
                manager.trigger();
            }
        });
    }

    /// Stop the loop and wake any pending sleep
    pub fn trigger(&self) {
        self.running.store(false, Ordering::Release);
        self.notify.notify_waiters();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Sleep for `duration` or until shutdown; returns whether still running
    pub async fn sleep(&self, duration: Duration) -> bool {
        let notified = self.notify.notified();
        if !self.is_running() {
            return false;
        }

        tokio::select! {
            _ = sleep(duration) => {}
            _ = notified => {}
        }
        self.is_running()
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sleep_runs_to_completion() {
        let shutdown = ShutdownManager::new();
        assert!(shutdown.sleep(Duration::from_millis(10)).await);
    }

    #[tokio::test]
    async fn test_trigger_wakes_sleep() {
        let shutdown = ShutdownManager::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(20)).await;
            trigger.trigger();
        });

        let still_running = tokio::time::timeout(
            Duration::from_secs(5),
            shutdown.sleep(Duration::from_secs(3600)),
        )
        .await
        .unwrap();
        assert!(!still_running);
    }

    #[tokio::test]
    async fn test_sleep_after_trigger_returns_immediately() {
        let shutdown = ShutdownManager::new();
        shutdown.trigger();
        assert!(!shutdown.is_running());
        assert!(!shutdown.sleep(Duration::from_secs(3600)).await);
    }
}
