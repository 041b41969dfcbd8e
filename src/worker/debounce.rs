//! Trailing-edge debouncing of async actions.
//!
//! A [`Debounced`] wraps an async action. Each [`Debounced::trigger`] cancels
//! the timer of the previous trigger if it has not fired yet and arms a new
//! one, so only the last trigger inside a quiet window runs. Actions that have
//! already started are never cancelled: when a timer fires, the action is
//! spawned as its own task and outlives any later trigger.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::task::JoinHandle;

type Action<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Debounced async action taking arguments of type `T`.
///
/// Must be used from within a tokio runtime.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use recipe_client::worker::debounce::Debounced;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let search = Debounced::new(Duration::from_millis(300), |term: String| async move {
///     println!("searching for {term}");
/// });
/// search.trigger("chi".to_string());
/// search.trigger("chicken".to_string());
/// assert!(search.is_pending());
/// # }
/// ```
pub struct Debounced<T> {
    delay: Duration,
    action: Action<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debounced<T> {
    /// Wraps `action` so it runs `delay` after the last trigger.
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            action: Arc::new(move |args| -> BoxFuture<'static, ()> { Box::pin(action(args)) }),
            pending: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules the action with `args`, replacing any timer not yet fired.
    pub fn trigger(&self, args: T) {
        let action = Arc::clone(&self.action);
        let delay = self.delay;

        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detached: aborting this timer must not reach the running action.
            tokio::spawn(action(args));
        });

        if let Some(previous) = self.lock().replace(timer) {
            previous.abort();
        }
    }

    /// Drops the pending timer, if any. Returns whether one was live.
    pub fn cancel(&self) -> bool {
        match self.lock().take() {
            Some(timer) if !timer.is_finished() => {
                timer.abort();
                true
            }
            _ => false,
        }
    }

    /// True while a timer is armed and has not fired.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock()
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            timer.abort();
        }
    }
}

impl<T> std::fmt::Debug for Debounced<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, Debounced<u32>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let debounced = Debounced::new(Duration::from_millis(500), move |n: u32| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(n);
            }
        });
        (calls, debounced)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_triggers_runs_once_with_last_args() {
        let (calls, debounced) = recorder();
        for n in 1..=5 {
            debounced.trigger(n);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(*calls.lock().unwrap(), vec![5]);
        assert!(!debounced.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_triggers_each_run() {
        let (calls, debounced) = recorder();
        debounced.trigger(1);
        tokio::time::sleep(Duration::from_millis(700)).await;
        debounced.trigger(2);
        tokio::time::sleep(Duration::from_millis(700)).await;
        assert_eq!(*calls.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_timer() {
        let (calls, debounced) = recorder();
        debounced.trigger(7);
        assert!(debounced.is_pending());
        assert!(debounced.cancel());
        assert!(!debounced.cancel());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn later_trigger_does_not_abort_running_action() {
        let finished = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&finished);
        let debounced = Debounced::new(Duration::from_millis(100), move |n: u32| {
            let sink = Arc::clone(&sink);
            async move {
                tokio::time::sleep(Duration::from_millis(1000)).await;
                sink.lock().unwrap().push(n);
            }
        });

        debounced.trigger(1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        debounced.trigger(2);
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(*finished.lock().unwrap(), vec![1, 2]);
    }
}
