#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// The trigonometric mode of a context. This decides which squared trigonometric function is
/// rewritten in terms of the other when normalizing powers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
#[repr(u8)]
pub enum TrigMode {
    /// Leave `sin(x)^2` and `cos(x)^2` as they are.
    #[default]
    Mixed,

    /// Rewrite even powers of `sin(x)` in terms of `cos(x)`: `sin(x)^2 = 1 - cos(x)^2`.
    Cosine,

    /// Rewrite even powers of `cos(x)` in terms of `sin(x)`: `cos(x)^2 = 1 - sin(x)^2`.
    Sine,
}

impl std::fmt::Display for TrigMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrigMode::Mixed => write!(f, "mixed"),
            TrigMode::Cosine => write!(f, "cosine"),
            TrigMode::Sine => write!(f, "sine"),
        }
    }
}
