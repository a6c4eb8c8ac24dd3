//! Cancellable one-shot timers.
//!
//! The store never sleeps. It asks a [`Timers`] implementation to deliver a
//! message after a delay and keeps the returned [`TimerHandle`] so it can
//! cancel the timer before rescheduling.
//!
//! # Invariants
//!
//! 1. **One-shot**: a scheduled message is delivered at most once.
//! 2. **Cancel wins before delivery**: after `cancel(h)` returns `true`, the
//!    message for `h` is never delivered. A `false` from [`ThreadTimers`]
//!    means the deadline won and the message is on the channel.
//! 3. **Deadline order**: [`ManualTimers::advance`] returns due messages
//!    ordered by deadline, ties broken by scheduling order.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Cancel unknown handle | Already fired or cancelled | Returns `false` |
//! | Receiver gone | `ThreadTimers` dropped mid-flight | Pending timers cancelled, message discarded |

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, mpsc};
use std::thread;

use web_time::{Duration, Instant};

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Schedules messages for later delivery.
pub trait Timers<M> {
    /// Deliver `msg` once `delay` has elapsed.
    fn schedule_after(&mut self, delay: Duration, msg: M) -> TimerHandle;

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled before.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

// ---------------------------------------------------------------------------
// ManualTimers
// ---------------------------------------------------------------------------

struct Pending<M> {
    handle: TimerHandle,
    deadline: Duration,
    msg: M,
}

/// Deterministic timers on a virtual clock.
///
/// Time only moves when [`advance`](Self::advance) is called.
///
/// ```
/// use visuplate_runtime::timer::{ManualTimers, Timers};
/// use web_time::Duration;
///
/// let mut timers = ManualTimers::new();
/// timers.schedule_after(Duration::from_millis(300), "settle");
/// assert!(timers.advance(Duration::from_millis(299)).is_empty());
/// assert_eq!(timers.advance(Duration::from_millis(1)), vec!["settle"]);
/// ```
pub struct ManualTimers<M> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<M>>,
}

impl<M> ManualTimers<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time since construction.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Move the clock forward and return every message that came due.
    pub fn advance(&mut self, by: Duration) -> Vec<M> {
        self.now = self.now.saturating_add(by);
        let now = self.now;

        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.pending.len());
        for pending in self.pending.drain(..) {
            if pending.deadline <= now {
                due.push(pending);
            } else {
                waiting.push(pending);
            }
        }
        self.pending = waiting;

        // Handles are issued in scheduling order.
        due.sort_by_key(|p| (p.deadline, p.handle));
        due.into_iter().map(|p| p.msg).collect()
    }
}

impl<M> Default for ManualTimers<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Timers<M> for ManualTimers<M> {
    fn schedule_after(&mut self, delay: Duration, msg: M) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            deadline: self.now.saturating_add(delay),
            msg,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }
}

impl<M> fmt::Debug for ManualTimers<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTimers")
            .field("now", &self.now)
            .field("pending", &self.pending.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ThreadTimers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Waiting,
    Cancelled,
    Fired,
}

/// Shared between a [`ThreadTimers`] entry and its thread. Whichever of
/// cancel and deadline takes the lock first decides the outcome.
struct TimerSlot {
    state: Mutex<SlotState>,
    wake: Condvar,
}

impl TimerSlot {
    fn new() -> Self {
        Self {
            state: Mutex::new(SlotState::Waiting),
            wake: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_waiting(&self) -> bool {
        *self.lock() == SlotState::Waiting
    }

    /// Returns `true` if the timer had not fired yet.
    fn cancel(&self) -> bool {
        let mut state = self.lock();
        if *state != SlotState::Waiting {
            return false;
        }
        *state = SlotState::Cancelled;
        self.wake.notify_all();
        true
    }

    /// Block until `deadline` or a cancel. Returns `true` when the deadline
    /// came first; the slot is then marked fired.
    fn wait_until_cancelled_or(&self, deadline: Instant) -> bool {
        let mut state = self.lock();
        loop {
            if *state != SlotState::Waiting {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                *state = SlotState::Fired;
                return true;
            }
            state = match self.wake.wait_timeout(state, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }
}

struct RunningTimer {
    slot: Arc<TimerSlot>,
    thread: thread::JoinHandle<()>,
}

impl RunningTimer {
    fn is_done(&self) -> bool {
        self.thread.is_finished()
    }
}

impl Drop for RunningTimer {
    fn drop(&mut self) {
        self.slot.cancel();
    }
}

/// Wall-clock timers, one background thread per pending timer.
///
/// Due messages arrive on an internal channel; the host drains them with
/// [`drain`](Self::drain) or [`recv_timeout`](Self::recv_timeout) and feeds
/// them back into the store.
pub struct ThreadTimers<M: Send + 'static> {
    next_id: u64,
    running: HashMap<TimerHandle, RunningTimer>,
    sender: mpsc::Sender<M>,
    receiver: mpsc::Receiver<M>,
}

impl<M: Send + 'static> ThreadTimers<M> {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            next_id: 0,
            running: HashMap::new(),
            sender,
            receiver,
        }
    }

    /// Messages delivered so far, without blocking.
    pub fn drain(&mut self) -> Vec<M> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.receiver.try_recv() {
            messages.push(msg);
        }
        self.reap();
        messages
    }

    /// Wait up to `timeout` for the next delivered message.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<M> {
        let msg = self.receiver.recv_timeout(timeout).ok();
        self.reap();
        msg
    }

    /// Number of timers that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.running
            .values()
            .filter(|timer| timer.slot.is_waiting())
            .count()
    }

    fn reap(&mut self) {
        self.running.retain(|_, timer| !timer.is_done());
    }

    fn spawn(
        slot: Arc<TimerSlot>,
        sender: mpsc::Sender<M>,
        deadline: Instant,
        msg: M,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            if slot.wait_until_cancelled_or(deadline) {
                // The receiver may be gone if the timers were dropped.
                let _ = sender.send(msg);
            }
        })
    }
}

impl<M: Send + 'static> Default for ThreadTimers<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Send + 'static> Timers<M> for ThreadTimers<M> {
    fn schedule_after(&mut self, delay: Duration, msg: M) -> TimerHandle {
        self.reap();
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        let slot = Arc::new(TimerSlot::new());
        let deadline = Instant::now() + delay;
        let thread = Self::spawn(Arc::clone(&slot), self.sender.clone(), deadline, msg);
        tracing::trace!(
            target: "visuplate.timer",
            %handle,
            delay_ms = delay.as_millis() as u64,
            "timer scheduled"
        );
        self.running.insert(
            handle,
            RunningTimer { slot, thread },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.running.remove(&handle) {
            Some(timer) => timer.slot.cancel(),
            None => false,
        }
    }
}

impl<M: Send + 'static> fmt::Debug for ThreadTimers<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadTimers")
            .field("running", &self.running.len())
            .finish()
    }
}
