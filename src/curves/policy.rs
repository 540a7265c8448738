//! Tangent policies chosen by curve semantics.

use super::keyframe::TangentMode;

/// What a curve represents, which decides how its keys interpolate.
///
/// | Kind | Rule |
/// |---|---|
/// | `Count` | every key Constant/Constant (step function) |
/// | `Clock` | value < 0.5: Constant/Linear, otherwise Linear/Constant |
/// | `Note` | value > 0.5: Constant/Linear, otherwise Linear/Constant |
/// | `Controller` | every key Constant/Constant |
///
/// The rule looks only at a key's own value, never at its neighbors.
///
/// # Examples
///
/// ```
/// use midicurve::curves::{CurveKind, TangentMode};
///
/// assert_eq!(
///     CurveKind::Clock.tangent_modes(1.0),
///     (TangentMode::Linear, TangentMode::Constant)
/// );
/// assert_eq!(
///     CurveKind::Note.tangent_modes(0.5),
///     (TangentMode::Linear, TangentMode::Constant)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// Beat and bar counters
    Count,
    /// Beat and bar pulses
    Clock,
    /// Gated note velocity
    Note,
    /// Continuous controller value
    Controller,
}

impl CurveKind {
    /// Returns the `(left, right)` tangent modes for a key holding `value`.
    pub fn tangent_modes(&self, value: f64) -> (TangentMode, TangentMode) {
        use TangentMode::{Constant, Linear};

        match self {
            CurveKind::Count | CurveKind::Controller => (Constant, Constant),
            CurveKind::Clock => {
                if value < 0.5 {
                    (Constant, Linear)
                } else {
                    (Linear, Constant)
                }
            }
            CurveKind::Note => {
                if value > 0.5 {
                    (Constant, Linear)
                } else {
                    (Linear, Constant)
                }
            }
        }
    }
}
