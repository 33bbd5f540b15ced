//! Activity gate for periodic sketch uploads
//!
//! Activity opens the gate, the send timer checks it, the idle timer closes
//! it. Uploads therefore run only while the sketch keeps changing.

#[derive(Debug, Clone, Default)]
pub struct ActivityGate {
    active: bool,
    sends: u64,
}

impl ActivityGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change of the input
    pub fn mark_activity(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Called on every send tick; true when an upload is due
    pub fn take_send(&mut self) -> bool {
        if self.active {
            self.sends += 1;
        }
        self.active
    }

    /// Called on every idle tick
    pub fn expire(&mut self) {
        self.active = false;
    }

    /// Number of uploads granted so far
    pub fn sends(&self) -> u64 {
        self.sends
    }
}
