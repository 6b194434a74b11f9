//! Debounced autosave — a cancellable one-shot timer.
//!
//! Each edit reschedules the pending save; only the most recent timer
//! fires, after a quiescence window with no further edits. Cancelling (or
//! dropping) the debouncer discards the pending save entirely, matching the
//! source behaviour of discarding unsaved edits on navigation.

use std::{future::Future, time::Duration};

use tokio::task::JoinHandle;

/// Default quiescence window before a scheduled save fires.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_secs(2);

pub struct Debouncer {
  delay:   Duration,
  pending: Option<JoinHandle<()>>,
}

impl Debouncer {
  pub fn new(delay: Duration) -> Self {
    Self {
      delay,
      pending: None,
    }
  }

  /// Schedule `action` to run after the quiescence window, cancelling any
  /// previously scheduled action.
  pub fn schedule<F, Fut>(&mut self, action: F)
  where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
  {
    self.cancel();
    let delay = self.delay;
    self.pending = Some(tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      action().await;
    }));
  }

  /// Discard the pending save, if any.
  pub fn cancel(&mut self) {
    if let Some(handle) = self.pending.take() {
      handle.abort();
    }
  }
}

impl Drop for Debouncer {
  fn drop(&mut self) { self.cancel(); }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
  };

  use super::*;

  #[tokio::test(flavor = "multi_thread")]
  async fn only_the_most_recent_schedule_fires() {
    let fired = Arc::new(Mutex::new(Vec::new()));
    let mut debouncer = Debouncer::new(Duration::from_millis(100));

    let log = fired.clone();
    debouncer.schedule(move || async move {
      log.lock().unwrap().push("first");
    });

    // Reschedule well before the first timer can fire.
    tokio::time::sleep(Duration::from_millis(20)).await;
    let log = fired.clone();
    debouncer.schedule(move || async move {
      log.lock().unwrap().push("second");
    });

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(*fired.lock().unwrap(), vec!["second"]);
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn cancel_discards_the_pending_save() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut debouncer = Debouncer::new(Duration::from_millis(50));

    let count_inner = count.clone();
    debouncer.schedule(move || async move {
      count_inner.fetch_add(1, Ordering::SeqCst);
    });
    debouncer.cancel();

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn drop_discards_the_pending_save() {
    let count = Arc::new(AtomicUsize::new(0));
    {
      let mut debouncer = Debouncer::new(Duration::from_millis(50));
      let count_inner = count.clone();
      debouncer.schedule(move || async move {
        count_inner.fetch_add(1, Ordering::SeqCst);
      });
      // Debouncer dropped here with the timer still pending.
    }

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn save_fires_after_quiescence() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut debouncer = Debouncer::new(Duration::from_millis(30));

    let count_inner = count.clone();
    debouncer.schedule(move || async move {
      count_inner.fetch_add(1, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
  }
}
