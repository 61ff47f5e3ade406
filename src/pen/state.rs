//! Pen tilt states

use core::fmt;

/// Where the pen tip is, as far as the actuator knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PenState {
    /// Nothing about tilt or carriage position is trusted.
    #[default]
    Unknown,
    /// Tilted fully up; clear of everything.
    RaisedAllTheWay,
    /// Lifted just off the surface, ready to write.
    Ready,
    /// Tip on the surface, confirmed by the contact sensor.
    Writing,
}

impl PenState {
    /// States in which the carriage may be traversed.
    pub fn can_traverse(self) -> bool {
        matches!(self, Self::Ready | Self::Writing)
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::RaisedAllTheWay => "RaisedAllTheWay",
            Self::Ready => "Ready",
            Self::Writing => "Writing",
        }
    }
}

impl fmt::Display for PenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
