use std::time::{Duration, Instant};

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Debounce period after the last printer name edit elapsed
    SaveName,
    /// Saved/error indicator display time elapsed
    ClearNameStatus,
    /// Advance the welcome-step feature slider
    NextFeature,
}

/// Owned handle to a scheduled timer, used to cancel it
#[derive(Debug, PartialEq, Eq)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct PendingTimer {
    id: u64,
    deadline: Instant,
    kind: TimerKind,
}

/// Timer queue driven by the event loop.
///
/// Time is passed in rather than read, so the wizard can be stepped with
/// synthetic instants in tests.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<PendingTimer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, kind: TimerKind) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(PendingTimer {
            id,
            deadline: now + delay,
            kind,
        });
        tracing::debug!(target: "pairing_wizard::timer", "Scheduled {:?} in {:?}", kind, delay);
        TimerHandle(id)
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != handle.0);
        before != self.pending.len()
    }

    pub fn is_pending(&self, handle: &TimerHandle) -> bool {
        self.pending.iter().any(|t| t.id == handle.0)
    }

    /// Earliest deadline, for the event loop's wake-up
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|t| t.deadline).min()
    }

    /// Remove and return every timer due at `now`, in firing order
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerHandle, TimerKind)> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.deadline <= now);
        self.pending = rest;

        due.sort_by_key(|t| (t.deadline, t.id));
        due.into_iter()
            .map(|t| (TimerHandle(t.id), t.kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_when_due() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        timers.schedule(start, Duration::from_millis(100), TimerKind::SaveName);

        assert!(timers.take_due(start + Duration::from_millis(99)).is_empty());
        let due = timers.take_due(start + Duration::from_millis(100));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].1, TimerKind::SaveName);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(start, Duration::from_millis(10), TimerKind::SaveName);
        let probe = TimerHandle(handle.0);

        assert!(timers.is_pending(&probe));
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(probe));
        assert!(timers.take_due(start + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_due_order_by_deadline() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        timers.schedule(start, Duration::from_millis(30), TimerKind::NextFeature);
        timers.schedule(start, Duration::from_millis(10), TimerKind::ClearNameStatus);
        timers.schedule(start, Duration::from_millis(20), TimerKind::SaveName);

        assert_eq!(timers.next_deadline(), Some(start + Duration::from_millis(10)));

        let kinds: Vec<_> = timers
            .take_due(start + Duration::from_millis(50))
            .into_iter()
            .map(|(_, kind)| kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TimerKind::ClearNameStatus,
                TimerKind::SaveName,
                TimerKind::NextFeature
            ]
        );
    }
}
