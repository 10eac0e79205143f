/// Deadline scheduler for phase transitions.
///
/// Actions fire from `take_due` in deadline order. `cancel_all` drops every
/// pending action, which is how a new phase or a power-off invalidates the
/// transitions queued by the previous one.
#[derive(Debug, Clone)]
pub struct PhaseTimers<A> {
    pending: Vec<(f64, A)>,
}

impl<A> Default for PhaseTimers<A> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<A> PhaseTimers<A> {
    pub fn schedule(&mut self, at: f64, action: A) {
        self.pending.push((at, action));
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn take_due(&mut self, now: f64) -> Vec<A> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = pending;
        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter().map(|(_, action)| action).collect()
    }
}
