//! # Tick Source
//!
//! Drives a running session at 1 Hz of wall-clock time.
//!
//! One `Ticker` exists per in-progress timer. It owns a single thread that
//! sleeps a second, takes the session lock, and calls `tick()` — so no two
//! ticks are ever in flight for the same session. The thread stops on its
//! own when the session leaves `Running` (pause, completion, reconfigure)
//! and `cancel` joins it, which makes cancellation synchronous: once
//! `cancel` returns, no further tick can mutate the session.
//!
//! The state machine itself stays independently testable; tests inject
//! synthetic `tick()` calls instead of waiting on this thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::domain::session::Session;

/// Periodic driver for one running session.
pub struct Ticker {
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn the tick thread. The session should already be running;
    /// otherwise the thread exits after its first wakeup.
    pub fn spawn(session: Arc<Mutex<Session>>) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let handle = thread::spawn(move || loop {
            thread::sleep(Duration::from_secs(1));
            if flag.load(Ordering::SeqCst) {
                break;
            }
            let Ok(mut session) = session.lock() else {
                break;
            };
            if !session.is_running() {
                break;
            }
            session.tick();
            if !session.is_running() {
                debug!("Countdown finished, tick source stopping");
                break;
            }
        });
        Self {
            cancelled,
            handle: Some(handle),
        }
    }

    /// Stop ticking. Blocks until the tick thread has exited, so the
    /// session cannot be mutated by this ticker after the call returns.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
