//! Time-ordered keyframe curves.

use super::keyframe::{Keyframe, TangentMode, approximately};
use super::policy::CurveKind;

/// An ordered, growable sequence of keyframes.
///
/// Keys are kept sorted by time. Two keys may share (nearly) the same time,
/// which is how the converter draws sharp discontinuities: an "off" key a
/// quantum before an "on" key.
///
/// # Examples
///
/// ```
/// use midicurve::curves::{KeyframeCurve, TangentMode};
///
/// let mut curve = KeyframeCurve::new();
/// curve.add_key(0.0, 0.0);
/// curve.add_key(1.0, 1.0);
///
/// // Linear tangents ramp between keys
/// assert_eq!(curve.evaluate(0.5), Some(0.5));
///
/// // A constant right tangent holds the value until the next key
/// curve.set_tangent_modes(0, TangentMode::Linear, TangentMode::Constant);
/// assert_eq!(curve.evaluate(0.5), Some(0.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")
)]
pub struct KeyframeCurve {
    /// Invariant: sorted by non-decreasing time
    keys: Vec<Keyframe>,
}

impl KeyframeCurve {
    /// Creates an empty curve.
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Inserts a key at `time` and returns its index.
    ///
    /// Keys arriving in time order are appended. A key with the same time as
    /// existing keys is placed after them.
    pub fn add_key(&mut self, time: f64, value: f64) -> usize {
        let index = self.keys.partition_point(|key| key.time <= time);
        self.keys.insert(index, Keyframe::new(time, value));
        log::trace!("key #{index} at {time:.6} = {value}");
        index
    }

    /// Replaces the last key's value if its time is within `tolerance` of
    /// `time`, otherwise adds a new key. Returns the index written.
    ///
    /// The replaced key keeps its original time and tangent modes.
    ///
    /// # Examples
    ///
    /// ```
    /// use midicurve::curves::KeyframeCurve;
    ///
    /// let mut curve = KeyframeCurve::new();
    /// curve.set_or_add_key(2.0, 10.0, 1e-6);
    /// curve.set_or_add_key(2.0 + 1e-9, 20.0, 1e-6);
    /// assert_eq!(curve.len(), 1);
    /// assert_eq!(curve.key(0).unwrap().value, 20.0);
    /// ```
    pub fn set_or_add_key(&mut self, time: f64, value: f64, tolerance: f64) -> usize {
        match self.keys.last_mut() {
            Some(last) if approximately(last.time, time, tolerance) => {
                log::trace!("coalesced key at {:.6}: {} -> {value}", last.time, last.value);
                last.value = value;
                self.keys.len() - 1
            }
            _ => self.add_key(time, value),
        }
    }

    /// Returns the key at `index`.
    pub fn key(&self, index: usize) -> Option<&Keyframe> {
        self.keys.get(index)
    }

    /// Returns a mutable reference to the key at `index`.
    ///
    /// Changing the key's time may break the ordering invariant; only the
    /// value and tangent modes should be edited through this.
    pub fn key_mut(&mut self, index: usize) -> Option<&mut Keyframe> {
        self.keys.get_mut(index)
    }

    /// Returns the last key, if any.
    pub fn last(&self) -> Option<&Keyframe> {
        self.keys.last()
    }

    /// All keys in time order.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Number of keys in the curve.
    ///
    /// # Examples
    ///
    /// ```
    /// use midicurve::curves::KeyframeCurve;
    ///
    /// let mut curve = KeyframeCurve::new();
    /// assert_eq!(curve.len(), 0);
    /// curve.add_key(0.0, 1.0);
    /// assert_eq!(curve.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the curve has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Time span between the first and last key (zero for fewer than two keys).
    pub fn duration(&self) -> f64 {
        match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }

    /// Sets the tangent modes of the key at `index`.
    ///
    /// Returns `false` if there is no such key.
    pub fn set_tangent_modes(
        &mut self,
        index: usize,
        left: TangentMode,
        right: TangentMode,
    ) -> bool {
        match self.keys.get_mut(index) {
            Some(key) => {
                key.set_tangents(left, right);
                true
            }
            None => false,
        }
    }

    /// Applies the tangent policy of `kind` to every key.
    pub fn apply(&mut self, kind: CurveKind) {
        for key in &mut self.keys {
            let (left, right) = kind.tangent_modes(key.value);
            key.set_tangents(left, right);
        }
    }

    /// Samples the curve at `time`.
    ///
    /// Returns `None` for an empty curve or a NaN `time`. Times before the
    /// first key or after the last key clamp to the first or last value.
    pub fn evaluate(&self, time: f64) -> Option<f64> {
        if time.is_nan() {
            return None;
        }
        let first = self.keys.first()?;
        let last = self.keys.last()?;
        if time <= first.time {
            return Some(first.value);
        }
        if time >= last.time {
            return Some(last.value);
        }

        // 1 <= index < len because first.time < time < last.time
        let index = self.keys.partition_point(|key| key.time <= time);
        let from = self.keys.get(index.checked_sub(1)?)?;
        let to = self.keys.get(index)?;

        if from.right_tangent == TangentMode::Constant || to.left_tangent == TangentMode::Constant
        {
            return Some(from.value);
        }

        let span = to.time - from.time;
        if span <= 0.0 {
            return Some(to.value);
        }
        let t = (time - from.time) / span;
        Some(from.value + (to.value - from.value) * t)
    }

    /// Iterates over the keys in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe> {
        self.keys.iter()
    }
}

impl<'a> IntoIterator for &'a KeyframeCurve {
    type Item = &'a Keyframe;
    type IntoIter = std::slice::Iter<'a, Keyframe>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// Sorts the keys by time, keeping the relative order of equal times.
impl From<Vec<Keyframe>> for KeyframeCurve {
    fn from(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }
}

impl From<KeyframeCurve> for Vec<Keyframe> {
    fn from(curve: KeyframeCurve) -> Self {
        curve.keys
    }
}

impl FromIterator<(f64, f64)> for KeyframeCurve {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut curve = Self::new();
        for (time, value) in iter {
            curve.add_key(time, value);
        }
        curve
    }
}
