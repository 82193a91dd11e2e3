// Last-writer-wins debounce. Every schedule issues a new sequence number; a
// ticket only fires while its number is still the latest one.

use std::time::{Duration, Instant};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Handle for one scheduled render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket {
    seq: u64,
    due: Instant,
}

impl RenderTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn due(&self) -> Instant {
        self.due
    }
}

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    seq: u64,
    pending: Option<RenderTicket>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            seq: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start (or restart) the delay. Any earlier ticket is superseded.
    pub fn schedule(&mut self, now: Instant) -> RenderTicket {
        self.seq += 1;
        let ticket = RenderTicket {
            seq: self.seq,
            due: now + self.delay,
        };
        self.pending = Some(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.pending.is_some_and(|p| p.seq == ticket.seq)
    }

    /// A host timer fired for `ticket`. Returns true (and clears the pending
    /// slot) only if the ticket has not been superseded.
    pub fn fire(&mut self, ticket: RenderTicket) -> bool {
        if self.is_current(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Event-loop driven alternative to `fire`: true once the pending
    /// ticket's deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(ticket) if now >= ticket.due => self.fire(ticket),
            _ => false,
        }
    }

    pub fn pending(&self) -> Option<RenderTicket> {
        self.pending
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|t| t.due)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn newer_schedule_supersedes_older_ticket() {
        let t0 = Instant::now();
        let mut d = Debouncer::default();
        let first = d.schedule(t0);
        let second = d.schedule(t0 + ms(100));

        assert!(second.seq() > first.seq());
        assert!(!d.fire(first));
        assert!(d.fire(second));
        // A ticket fires at most once.
        assert!(!d.fire(second));
    }

    #[test]
    fn poll_waits_for_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::default();
        d.schedule(t0);
        d.schedule(t0 + ms(300));

        assert!(!d.poll(t0 + ms(500)));
        assert!(!d.poll(t0 + ms(799)));
        assert!(d.poll(t0 + ms(800)));
        assert!(!d.poll(t0 + ms(2000)));
    }

    #[test]
    fn cancel_drops_pending() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(50));
        let ticket = d.schedule(t0);
        d.cancel();
        assert!(d.next_deadline().is_none());
        assert!(!d.fire(ticket));
        assert!(!d.poll(t0 + ms(100)));
    }

    #[test]
    fn deadline_tracks_latest_schedule() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(250));
        d.schedule(t0);
        d.schedule(t0 + ms(10));
        assert_eq!(d.next_deadline(), Some(t0 + ms(260)));
    }
}
