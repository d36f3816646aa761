use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::lock;

struct PendingTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Timers {
    next_generation: u64,
    pending: HashMap<String, PendingTimer>,
}

/// Per-key debounce: only the last action scheduled for a key during a
/// quiet period runs.
///
/// Cancelling only ever affects timers that have not fired yet. Once an
/// action starts it runs to completion even if the same key is scheduled
/// again. Must be used from within a tokio runtime.
#[derive(Clone, Default)]
pub struct DebounceScheduler {
    timers: Arc<Mutex<Timers>>,
}

impl DebounceScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending action for `key` with `action`, to run after
    /// `delay` with no further `schedule` calls for that key.
    pub fn schedule<Fut>(&self, key: &str, delay: Duration, action: Fut)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut timers = lock(&self.timers);
        timers.next_generation += 1;
        let generation = timers.next_generation;

        if let Some(previous) = timers.pending.remove(key) {
            previous.handle.abort();
            debug!("Debounce [{}] superseded pending timer {}", key, previous.generation);
        }

        let registry = Arc::clone(&self.timers);
        let owned_key = key.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            // An abort can race with the wake-up; only the registered
            // generation may fire.
            {
                let mut timers = lock(&registry);
                match timers.pending.get(&owned_key) {
                    Some(timer) if timer.generation == generation => {
                        timers.pending.remove(&owned_key);
                    }
                    _ => return,
                }
            }

            action.await;
        });

        timers.pending.insert(key.to_string(), PendingTimer { generation, handle });
    }

    /// Drop the pending action for `key`. Returns whether one was pending.
    pub fn cancel(&self, key: &str) -> bool {
        match lock(&self.timers).pending.remove(key) {
            Some(timer) => {
                timer.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) -> usize {
        let mut timers = lock(&self.timers);
        let count = timers.pending.len();
        for (_, timer) in timers.pending.drain() {
            timer.handle.abort();
        }
        count
    }

    pub fn is_pending(&self, key: &str) -> bool {
        lock(&self.timers).pending.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn record(log: &Arc<Mutex<Vec<String>>>, text: &str) -> impl Future<Output = ()> + Send + 'static {
        let log = Arc::clone(log);
        let text = text.to_string();
        async move {
            log.lock().unwrap().push(text);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_call() {
        let scheduler = DebounceScheduler::new();
        let log = recorder();
        let delay = Duration::from_millis(300);

        for text in ["ne", "new", "new y", "new yo"] {
            scheduler.schedule("departure", delay, record(&log, text));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(log.lock().unwrap().is_empty());
        assert!(scheduler.is_pending("departure"));

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(*log.lock().unwrap(), vec!["new yo".to_string()]);
        assert!(!scheduler.is_pending("departure"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_quiet_periods_each_fire() {
        let scheduler = DebounceScheduler::new();
        let log = recorder();
        let delay = Duration::from_millis(300);

        scheduler.schedule("arrival", delay, record(&log, "lo"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        scheduler.schedule("arrival", delay, record(&log, "lon"));
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*log.lock().unwrap(), vec!["lo".to_string(), "lon".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_do_not_interfere() {
        let scheduler = DebounceScheduler::new();
        let log = recorder();
        let delay = Duration::from_millis(300);

        scheduler.schedule("departure", delay, record(&log, "jfk"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        scheduler.schedule("arrival", delay, record(&log, "lax"));
        tokio::time::sleep(Duration::from_millis(500)).await;

        let mut fired = log.lock().unwrap().clone();
        fired.sort();
        assert_eq!(fired, vec!["jfk".to_string(), "lax".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let scheduler = DebounceScheduler::new();
        let log = recorder();

        scheduler.schedule("departure", Duration::from_millis(300), record(&log, "par"));
        scheduler.schedule("arrival", Duration::from_millis(300), record(&log, "dub"));
        assert!(scheduler.cancel("departure"));
        assert!(!scheduler.cancel("departure"));
        assert_eq!(scheduler.cancel_all(), 1);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_action_survives_reschedule() {
        let scheduler = DebounceScheduler::new();
        let log = recorder();

        let slow_log = Arc::clone(&log);
        scheduler.schedule("departure", Duration::from_millis(300), async move {
            tokio::time::sleep(Duration::from_millis(1_000)).await;
            slow_log.lock().unwrap().push("slow".to_string());
        });

        // First action is now in flight; a new schedule must not abort it.
        tokio::time::sleep(Duration::from_millis(350)).await;
        scheduler.schedule("departure", Duration::from_millis(300), record(&log, "fast"));
        tokio::time::sleep(Duration::from_millis(2_000)).await;

        assert_eq!(*log.lock().unwrap(), vec!["fast".to_string(), "slow".to_string()]);
    }
}
