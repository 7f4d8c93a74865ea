// ── State poller ──
//
// Cancellable periodic task layered on the controller. Two states,
// Stopped and Running; each cycle fetches the door state and then
// waits the configured interval measured from the END of the cycle, so
// a slow request delays the next poll instead of piling up concurrent
// ones. Cancellation is cooperative and checked only at cycle
// boundaries: stopping never aborts an in-flight fetch.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::controller::DoorController;

struct PollHandle {
    cancel: CancellationToken,
    // Detached on stop; kept so tests can observe task shutdown.
    _task: JoinHandle<()>,
}

/// Periodic door-state poller.
///
/// `start` and `stop` are both idempotent: a redundant `start` leaves
/// the running chain untouched (it never spawns a second one), and a
/// redundant `stop` is a no-op. Results are observable through the
/// controller's last-state watch channel.
pub struct StatePoller {
    controller: DoorController,
    interval: Duration,
    running: Mutex<Option<PollHandle>>,
}

impl StatePoller {
    /// Create a poller over `controller`, using the poll interval from
    /// its configuration.
    pub fn new(controller: DoorController) -> Self {
        let interval = controller.config().poll_interval;
        Self {
            controller,
            interval,
            running: Mutex::new(None),
        }
    }

    /// Transition Stopped -> Running. No-op if already Running.
    pub async fn start(&self) {
        let mut guard = self.running.lock().await;
        if guard.is_some() {
            debug!("poller already running");
            return;
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_task(
            self.controller.clone(),
            self.interval,
            cancel.clone(),
        ));

        *guard = Some(PollHandle {
            cancel,
            _task: task,
        });
        debug!("state polling started");
    }

    /// Transition Running -> Stopped. No-op if already Stopped.
    ///
    /// Prevents the next cycle from being scheduled; an in-flight fetch
    /// runs to completion.
    pub async fn stop(&self) {
        let mut guard = self.running.lock().await;
        if let Some(handle) = guard.take() {
            handle.cancel.cancel();
            debug!("state polling stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.running.lock().await.is_some()
    }
}

/// One cycle: wait the interval, then fetch state. The wait comes
/// first so `start` schedules the initial fetch one interval out, and
/// every later wait is measured from the end of the previous fetch.
async fn poll_task(controller: DoorController, interval: Duration, cancel: CancellationToken) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(interval) => {}
        }

        if let Err(e) = controller.state().await {
            warn!(error = %e, "state poll failed");
        }
    }
    debug!("poll task exited");
}
