/// Keeps a failed edge down for a fixed number of turns.
#[derive(Debug, Clone)]
pub struct Outage {
    active: bool,
    just_applied: bool,
    turns: u32,
    remaining: u32,
}

impl Outage {
    pub fn new(turns: u32) -> Self {
        Self {
            active: false,
            just_applied: false,
            turns: turns.max(1),
            remaining: 0,
        }
    }

    /// `false` if an outage is already running.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.active = true;
        self.just_applied = true;
        self.remaining = self.turns;
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_just_applied(&self) -> bool {
        self.just_applied
    }

    pub fn remaining_turns(&self) -> u32 {
        self.remaining
    }

    /// Ends the outage early, without a repair.
    pub fn cancel(&mut self) {
        self.active = false;
        self.just_applied = false;
        self.remaining = 0;
    }

    /// Called once per turn. Returns `true` on the turn the outage ends.
    pub fn tick(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        if self.just_applied {
            self.just_applied = false;
            return false;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.cancel();
            return true;
        }
        false
    }
}
