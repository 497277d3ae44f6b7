//! Cancellable periodic drain timer.
//!
//! The original experiment ran its discharge on an interval that was torn
//! down and recreated whenever a rate-affecting input changed. Here that is
//! an explicit handle: a background thread that emits one `DrainTick` per
//! period, carrying the decrement captured at arm time. The scheduler owns at
//! most one live timer; arming a new one cancels the previous one first, and
//! dropping either stops the thread.

use crate::drain::DrainRate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// One scheduled decrement, in percent of capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrainTick {
    pub percent: f64,
}

/// A running periodic timer. Cancelling joins the thread, so no tick can
/// arrive after `cancel` returns.
#[derive(Debug)]
pub struct DrainTimer {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl DrainTimer {
    /// Spawn a timer emitting `percent_per_tick` every `period` until
    /// cancelled or until the receiving side hangs up.
    pub fn spawn(period: Duration, percent_per_tick: f64, ticks: Sender<DrainTick>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            loop {
                // Sleep in short slices so cancellation stays prompt even
                // with a long period.
                let mut slept = Duration::ZERO;
                while slept < period {
                    if flag.load(Ordering::Relaxed) {
                        return;
                    }
                    let slice = (period - slept).min(Duration::from_millis(10));
                    thread::sleep(slice);
                    slept += slice;
                }
                if flag.load(Ordering::Relaxed) {
                    return;
                }
                if ticks
                    .send(DrainTick {
                        percent: percent_per_tick,
                    })
                    .is_err()
                {
                    return;
                }
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stop the timer and wait for its thread to exit.
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for DrainTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Holder of "the current decrement timer".
///
/// Whenever switch state, draw, burnout, or battery count changes, callers
/// re-arm with the freshly computed rate; `rearm` always cancels the previous
/// timer before spawning, so at most one timer is ever active.
#[derive(Debug)]
pub struct DrainScheduler {
    period: Duration,
    active: Option<DrainTimer>,
}

impl DrainScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            active: None,
        }
    }

    /// Replace the current timer. `None` leaves the process idle.
    pub fn rearm(&mut self, rate: Option<DrainRate>, ticks: Sender<DrainTick>) {
        self.disarm();
        if let Some(rate) = rate {
            debug!(
                percent_per_tick = rate.percent_per_tick(),
                "drain timer armed"
            );
            self.active = Some(DrainTimer::spawn(
                self.period,
                rate.percent_per_tick(),
                ticks,
            ));
        }
    }

    /// Stop any running timer.
    pub fn disarm(&mut self) {
        if let Some(mut timer) = self.active.take() {
            debug!("drain timer disarmed");
            timer.cancel();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for DrainScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn timer_delivers_ticks_with_captured_rate() {
        let (tx, rx) = mpsc::channel();
        let _timer = DrainTimer::spawn(Duration::from_millis(10), 0.25, tx);
        let tick = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("expected a tick");
        assert_eq!(tick.percent, 0.25);
    }

    #[test]
    fn cancel_stops_ticks_and_closes_channel() {
        let (tx, rx) = mpsc::channel();
        let mut timer = DrainTimer::spawn(Duration::from_millis(10), 1.0, tx);
        let _ = rx.recv_timeout(Duration::from_secs(5));
        timer.cancel();
        // The sender is dropped with the thread; draining the channel must
        // terminate in a disconnect.
        while rx.try_recv().is_ok() {}
        assert!(matches!(
            rx.recv_timeout(Duration::from_millis(100)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }

    #[test]
    fn scheduler_keeps_at_most_one_timer() {
        let rate_slow = DrainRate::new(100.0, 1).unwrap();
        let rate_fast = DrainRate::new(800.0, 1).unwrap();
        let mut scheduler = DrainScheduler::new(Duration::from_millis(10));

        let (tx, rx) = mpsc::channel();
        scheduler.rearm(Some(rate_slow), tx.clone());
        assert!(scheduler.is_armed());

        // Re-arming replaces the old timer; after the swap every new tick
        // carries the fresh rate.
        scheduler.rearm(Some(rate_fast), tx);
        while rx.try_recv().is_ok() {}
        let tick = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("expected a tick from the replacement timer");
        assert_eq!(tick.percent, rate_fast.percent_per_tick());

        scheduler.rearm(None, mpsc::channel().0);
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn scheduler_disarms_on_drop() {
        let (tx, rx) = mpsc::channel();
        {
            let mut scheduler = DrainScheduler::new(Duration::from_millis(10));
            scheduler.rearm(Some(DrainRate::new(100.0, 1).unwrap()), tx);
        }
        // Scheduler gone, thread joined, sender dropped.
        while rx.try_recv().is_ok() {}
        assert!(matches!(
            rx.recv_timeout(Duration::from_millis(100)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }
}
