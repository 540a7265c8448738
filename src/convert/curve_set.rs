//! The finished output of a conversion.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::curves::KeyframeCurve;
use crate::midi::ChannelKey;

/// Finished curves keyed by channel.
///
/// The four beat and bar curves are always present (possibly empty); note and
/// controller curves exist only for indices that received at least one event.
/// Iteration follows [`ChannelKey`] order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CurveSet {
    curves: BTreeMap<ChannelKey, KeyframeCurve>,
}

impl CurveSet {
    pub(crate) fn insert(&mut self, key: ChannelKey, curve: KeyframeCurve) {
        self.curves.insert(key, curve);
    }

    /// Returns the curve for `key`, if that channel was recorded.
    ///
    /// # Examples
    ///
    /// ```
    /// use midicurve::{ChannelKey, MidiConverter};
    ///
    /// let mut converter = MidiConverter::with_tempo(120.0, 0.01)?;
    /// converter.step(0.0, &[])?;
    /// let curves = converter.finalize()?;
    ///
    /// assert_eq!(curves.get(ChannelKey::BeatCount).unwrap().len(), 1);
    /// assert!(curves.get(ChannelKey::Note(60)).is_none());
    /// # Ok::<(), midicurve::ConvertError>(())
    /// ```
    pub fn get(&self, key: ChannelKey) -> Option<&KeyframeCurve> {
        self.curves.get(&key)
    }

    /// Looks a curve up by its channel name, e.g. `"Note[60]"`.
    ///
    /// Returns `None` for unknown names as well as for absent channels.
    pub fn get_by_name(&self, name: &str) -> Option<&KeyframeCurve> {
        let key = name.parse::<ChannelKey>().ok()?;
        self.get(key)
    }

    /// Returns true if a curve exists for `key`.
    pub fn contains(&self, key: ChannelKey) -> bool {
        self.curves.contains_key(&key)
    }

    /// Channel keys in order.
    pub fn channels(&self) -> impl Iterator<Item = ChannelKey> + '_ {
        self.curves.keys().copied()
    }

    /// Iterates over `(channel, curve)` pairs in channel order.
    pub fn iter(&self) -> btree_map::Iter<'_, ChannelKey, KeyframeCurve> {
        self.curves.iter()
    }

    /// Number of curves, including empty beat and bar curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Returns true if the set holds no curves at all.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Total number of keyframes across every curve.
    pub fn key_count(&self) -> usize {
        self.curves.values().map(KeyframeCurve::len).sum()
    }

    /// Evaluates every non-empty curve at `time`.
    ///
    /// This is the view a playback cursor takes of the set: one value per
    /// channel at the current instant. A NaN `time` yields an empty map.
    pub fn sample(&self, time: f64) -> BTreeMap<ChannelKey, f64> {
        self.curves
            .iter()
            .filter_map(|(key, curve)| curve.evaluate(time).map(|value| (*key, value)))
            .collect()
    }

    /// Unwraps the underlying map.
    pub fn into_inner(self) -> BTreeMap<ChannelKey, KeyframeCurve> {
        self.curves
    }
}

impl IntoIterator for CurveSet {
    type Item = (ChannelKey, KeyframeCurve);
    type IntoIter = btree_map::IntoIter<ChannelKey, KeyframeCurve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.into_iter()
    }
}

impl<'a> IntoIterator for &'a CurveSet {
    type Item = (&'a ChannelKey, &'a KeyframeCurve);
    type IntoIter = btree_map::Iter<'a, ChannelKey, KeyframeCurve>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}
