//! Keyframe samples and their tangent modes.

/// Interpolation rule on one side of a keyframe.
///
/// A curve segment between two keys is held (stepped) when the left key's
/// right mode or the right key's left mode is [`TangentMode::Constant`];
/// otherwise the segment ramps linearly between the two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TangentMode {
    /// Hold the current value until the next key, then jump
    Constant,

    /// Ramp toward the neighboring key
    #[default]
    Linear,
}

/// A single `(time, value)` sample of a curve with a tangent mode per side.
///
/// # Examples
///
/// ```
/// use midicurve::curves::{Keyframe, TangentMode};
///
/// let key = Keyframe::new(1.5, 0.25);
/// assert_eq!(key.time, 1.5);
/// assert_eq!(key.left_tangent, TangentMode::Linear);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    /// Time of the sample in seconds
    pub time: f64,
    /// Value of the sample
    pub value: f64,
    /// Interpolation toward the previous key
    pub left_tangent: TangentMode,
    /// Interpolation toward the next key
    pub right_tangent: TangentMode,
}

impl Keyframe {
    /// Creates a keyframe with linear tangents on both sides.
    pub fn new(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            left_tangent: TangentMode::Linear,
            right_tangent: TangentMode::Linear,
        }
    }

    /// Sets both tangent modes at once.
    pub fn set_tangents(&mut self, left: TangentMode, right: TangentMode) {
        self.left_tangent = left;
        self.right_tangent = right;
    }

    /// Returns `(left, right)` tangent modes.
    pub fn tangents(&self) -> (TangentMode, TangentMode) {
        (self.left_tangent, self.right_tangent)
    }
}

/// Approximate float equality used to coalesce keys landing on the same instant.
///
/// The comparison is relative to the larger magnitude of the two operands with a
/// small absolute floor, so it stays meaningful both near zero and for long
/// timelines.
///
/// # Examples
///
/// ```
/// use midicurve::curves::approximately;
///
/// assert!(approximately(1.0, 1.0 + 1e-9, 1e-6));
/// assert!(!approximately(1.0, 1.001, 1e-6));
/// ```
pub fn approximately(a: f64, b: f64, tolerance: f64) -> bool {
    let scale = a.abs().max(b.abs());
    (b - a).abs() < (tolerance * scale).max(f64::EPSILON * 8.0)
}
