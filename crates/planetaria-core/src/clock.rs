/// Handle for a scheduled one-shot timer. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending {
    handle: TimerHandle,
    remaining: f32,
}

/// One-shot delayed-callback scheduler.
///
/// Game code schedules a delay, keeps the handle, and polls
/// [`Scheduler::consume_fired`] on later frames. No closures are captured,
/// so a timer can never apply stale state: whoever holds the handle decides
/// what the elapse means at the moment it is observed.
///
/// `tick` runs at the start of each frame, before scene update, so a timer
/// scheduled during an update is guaranteed to fire on a later frame —
/// never synchronously with the frame that scheduled it.
#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    pending: Vec<Pending>,
    fired: Vec<TimerHandle>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a one-shot timer that fires after `delay_secs` of ticked time.
    pub fn schedule(&mut self, delay_secs: f32) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push(Pending {
            handle,
            remaining: delay_secs.max(0.0),
        });
        handle
    }

    /// Positively cancel a timer: it is removed whether still counting down
    /// or already fired but not yet consumed.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|p| p.handle != handle);
        self.fired.retain(|&h| h != handle);
    }

    /// Advance all pending timers, moving elapsed ones to the fired set.
    pub fn tick(&mut self, dt: f32) {
        let mut i = 0;
        while i < self.pending.len() {
            self.pending[i].remaining -= dt;
            if self.pending[i].remaining <= 0.0 {
                let p = self.pending.swap_remove(i);
                self.fired.push(p.handle);
            } else {
                i += 1;
            }
        }
    }

    /// Report whether the timer has fired, clearing it if so. Returns false
    /// for still-pending, cancelled, or unknown handles.
    pub fn consume_fired(&mut self, handle: TimerHandle) -> bool {
        if let Some(pos) = self.fired.iter().position(|&h| h == handle) {
            self.fired.swap_remove(pos);
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Number of timers still counting down.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_delay() {
        let mut sched = Scheduler::new();
        let h = sched.schedule(0.1);
        sched.tick(0.05);
        assert!(!sched.consume_fired(h));
        sched.tick(0.05);
        assert!(sched.consume_fired(h));
        // Consumed exactly once.
        assert!(!sched.consume_fired(h));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut sched = Scheduler::new();
        let h = sched.schedule(0.1);
        sched.cancel(h);
        sched.tick(1.0);
        assert!(!sched.consume_fired(h));
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn cancel_clears_fired_but_unconsumed() {
        // The stray-callback hazard: a timer elapses, then the owner
        // re-enters a timed state and cancels before polling. The old
        // elapse must not leak through.
        let mut sched = Scheduler::new();
        let h = sched.schedule(0.05);
        sched.tick(0.1);
        sched.cancel(h);
        assert!(!sched.consume_fired(h));
    }

    #[test]
    fn zero_delay_fires_on_next_tick_not_immediately() {
        let mut sched = Scheduler::new();
        let h = sched.schedule(0.0);
        assert!(!sched.consume_fired(h));
        sched.tick(0.016);
        assert!(sched.consume_fired(h));
    }

    #[test]
    fn is_pending_tracks_the_timer_lifecycle() {
        let mut sched = Scheduler::new();
        let h = sched.schedule(0.1);
        assert!(sched.is_pending(h));

        sched.tick(0.2);
        assert!(!sched.is_pending(h), "fired timers are no longer pending");
        assert!(sched.consume_fired(h));

        let h = sched.schedule(0.1);
        sched.cancel(h);
        assert!(!sched.is_pending(h));
    }

    #[test]
    fn handles_are_unique() {
        let mut sched = Scheduler::new();
        let a = sched.schedule(1.0);
        let b = sched.schedule(1.0);
        assert_ne!(a, b);
        sched.cancel(a);
        sched.tick(2.0);
        assert!(!sched.consume_fired(a));
        assert!(sched.consume_fired(b));
    }

    #[test]
    fn independent_timers_fire_independently() {
        let mut sched = Scheduler::new();
        let short = sched.schedule(0.1);
        let long = sched.schedule(0.2);
        sched.tick(0.15);
        assert!(sched.consume_fired(short));
        assert!(!sched.consume_fired(long));
        sched.tick(0.1);
        assert!(sched.consume_fired(long));
    }
}
