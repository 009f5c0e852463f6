/// Progress of one controller's most recent remote call.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub enum Phase {
    #[default]
    Idle,
    InFlight,
    Committed,
    RolledBack,
}

impl Phase {
    #[must_use]
    pub fn is_in_flight(self) -> bool {
        self == Phase::InFlight
    }

    /// Moves to [`Phase::InFlight`]. Returns `false` if a call is already outstanding.
    pub fn begin(&mut self) -> bool {
        if self.is_in_flight() {
            return false;
        }
        *self = Phase::InFlight;
        true
    }

    /// Rolls back a call that was given up before it settled.
    pub fn abandon(&mut self) {
        if self.is_in_flight() {
            *self = Phase::RolledBack;
        }
    }

    pub fn settle<T, E>(&mut self, result: &Result<T, E>) {
        *self = if result.is_ok() {
            Phase::Committed
        } else {
            Phase::RolledBack
        };
    }
}
