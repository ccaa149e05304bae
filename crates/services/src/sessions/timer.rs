use std::ops::ControlFlow;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Countdown granularity.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owns at most one periodic tick task.
///
/// Starting again aborts the previous task first. Dropping the ticker aborts it too.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Ticker {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    /// Spawn a task calling `on_tick` once per period, first call one period from now.
    ///
    /// The task stops when `on_tick` returns `ControlFlow::Break`. Must be called
    /// from within a tokio runtime.
    pub fn start<F>(&mut self, mut on_tick: F)
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        self.cancel();

        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    break;
                }
            }
        }));
    }

    /// Abort the running task, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting(counter: &Arc<AtomicU32>, stop_at: u32) -> impl FnMut() -> ControlFlow<()> + Send + 'static {
        let counter = Arc::clone(counter);
        move || {
            let seen = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if seen >= stop_at {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_until_break() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut ticker = Ticker::default();
        ticker.start(counting(&counter, 3));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(!ticker.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_replaces_previous_task() {
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));
        let mut ticker = Ticker::default();

        ticker.start(counting(&first, u32::MAX));
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        ticker.start(counting(&second, u32::MAX));
        tokio::time::sleep(Duration::from_millis(3_200)).await;

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 3);
        assert!(ticker.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticking() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut ticker = Ticker::default();
        ticker.start(counting(&counter, u32::MAX));

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        ticker.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(!ticker.is_active());
    }
}
