use cas_error::Error;
use crate::error::Interrupted;
use crate::trig_mode::TrigMode;
use std::sync::{atomic::{AtomicBool, Ordering}, Arc};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default number of sort-and-combine passes the term combiner runs before giving up on
/// reaching a fixed point.
pub const MAX_COMBINE_PASSES: usize = 10;

/// A token used to cooperatively cancel a running computation.
///
/// The token is cheap to clone, and all clones share the same flag. Any thread holding a clone can
/// call [`Interrupt::request`]; the computation notices the request at its next check point and
/// fails with [`Interrupted`].
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    /// Creates a new token with no pending request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that computations using this token stop.
    pub fn request(&self) {
        debug!("interrupt requested");
        self.0.store(true, Ordering::SeqCst);
    }

    /// Clears a pending request, so the token can be reused for a new computation.
    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Returns true if an interrupt has been requested.
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The evaluation modes used by every simplification operation.
///
/// A context is read-only while an operation runs. Operations that need a temporarily different
/// mode (for example, matching a rewrite pattern without expansion) derive a modified copy with
/// the `with_*` methods instead of mutating a shared value.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ctxt {
    /// Whether products are distributed over sums and integer powers of sums are expanded.
    pub expanding: bool,

    /// Whether numeric results should be computed as floats.
    pub evaluating_floats: bool,

    /// Whether a polar form is being computed. When set, `e^(i*pi*...)` is not converted back to
    /// rectangular form.
    pub evaluating_polar: bool,

    /// The trigonometric mode of the context.
    pub trig_mode: TrigMode,

    /// Whether symbols are assumed to take real values.
    pub assume_real_variables: bool,

    /// Whether powers of complex numbers that would have to be expressed with `arctan` are left
    /// unevaluated.
    pub avoid_arctan_powers: bool,

    /// The maximum number of sort-and-combine passes the term combiner runs.
    pub max_combine_passes: usize,

    /// The token used to cancel computations running with this context.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub interrupt: Interrupt,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self {
            expanding: true,
            evaluating_floats: false,
            evaluating_polar: false,
            trig_mode: TrigMode::default(),
            assume_real_variables: true,
            avoid_arctan_powers: true,
            max_combine_passes: MAX_COMBINE_PASSES,
            interrupt: Interrupt::default(),
        }
    }
}

impl Ctxt {
    /// Returns a copy of this context with expansion turned on or off.
    pub fn with_expanding(&self, expanding: bool) -> Self {
        Self { expanding, ..self.clone() }
    }

    /// Returns a copy of this context with float evaluation turned on or off.
    pub fn with_evaluating_floats(&self, evaluating_floats: bool) -> Self {
        Self { evaluating_floats, ..self.clone() }
    }

    /// Returns a copy of this context with polar evaluation turned on or off.
    pub fn with_evaluating_polar(&self, evaluating_polar: bool) -> Self {
        Self { evaluating_polar, ..self.clone() }
    }

    /// Returns a copy of this context with the given trigonometric mode.
    pub fn with_trig_mode(&self, trig_mode: TrigMode) -> Self {
        Self { trig_mode, ..self.clone() }
    }

    /// Returns a copy of this context that does or does not assume symbols are real.
    pub fn with_assume_real_variables(&self, assume_real_variables: bool) -> Self {
        Self { assume_real_variables, ..self.clone() }
    }

    /// Returns a copy of this context with the given pass bound for the term combiner.
    pub fn with_max_combine_passes(&self, max_combine_passes: usize) -> Self {
        Self { max_combine_passes, ..self.clone() }
    }

    /// Returns an error if an interrupt has been requested for this context.
    pub fn check_interrupt(&self) -> Result<(), Error> {
        if self.interrupt.is_requested() {
            Err(Error::unspanned(Interrupted))
        } else {
            Ok(())
        }
    }
}
