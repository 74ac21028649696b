use std::fmt;

/// Upload progress snapshot: how many bytes of the file were handed to the
/// transport so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub sent: u64,
    pub total: u64,
}

impl Progress {
    #[must_use]
    pub fn new(sent: u64, total: u64) -> Self {
        Self {
            sent: sent.min(total),
            total,
        }
    }

    /// Sent share in `[0, 1]`. An empty body is complete from the start.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.sent as f64 / self.total as f64
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.sent == self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.fraction() * 100.0)
    }
}
