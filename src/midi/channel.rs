//! Stable identifiers for the curves a conversion produces.

use std::fmt;
use std::str::FromStr;

use crate::curves::CurveKind;
use crate::error::ParseChannelKeyError;

/// Names one logical curve of a conversion.
///
/// The display form is the channel name a consumer binds to: `BeatCount`,
/// `BeatClock`, `BarCount`, `BarClock`, `Note[i]` and `CC[i]`. Keys order
/// beat and bar curves first, then notes, then controllers, each by index.
///
/// # Examples
///
/// ```
/// use midicurve::midi::ChannelKey;
///
/// assert_eq!(ChannelKey::Note(60).to_string(), "Note[60]");
/// assert_eq!("CC[7]".parse::<ChannelKey>().unwrap(), ChannelKey::Cc(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChannelKey {
    BeatCount,
    BeatClock,
    BarCount,
    BarClock,
    /// Velocity curve of one note (0-127)
    Note(u8),
    /// Value curve of one controller (0-127)
    Cc(u8),
}

impl ChannelKey {
    /// The tangent policy this channel's curve receives on finalize.
    pub fn kind(&self) -> CurveKind {
        match self {
            ChannelKey::BeatCount | ChannelKey::BarCount => CurveKind::Count,
            ChannelKey::BeatClock | ChannelKey::BarClock => CurveKind::Clock,
            ChannelKey::Note(_) => CurveKind::Note,
            ChannelKey::Cc(_) => CurveKind::Controller,
        }
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKey::BeatCount => write!(f, "BeatCount"),
            ChannelKey::BeatClock => write!(f, "BeatClock"),
            ChannelKey::BarCount => write!(f, "BarCount"),
            ChannelKey::BarClock => write!(f, "BarClock"),
            ChannelKey::Note(index) => write!(f, "Note[{}]", index),
            ChannelKey::Cc(index) => write!(f, "CC[{}]", index),
        }
    }
}

/// `"Note[60]"` with prefix `"Note["` yields `"60"`.
fn bracketed<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.strip_prefix(prefix)?.strip_suffix(']')
}

fn parse_index(digits: &str) -> Result<u8, ParseChannelKeyError> {
    digits
        .parse::<u8>()
        .ok()
        .filter(|index| *index <= 127)
        .ok_or_else(|| ParseChannelKeyError::InvalidIndex(digits.to_string()))
}

impl FromStr for ChannelKey {
    type Err = ParseChannelKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BeatCount" => return Ok(ChannelKey::BeatCount),
            "BeatClock" => return Ok(ChannelKey::BeatClock),
            "BarCount" => return Ok(ChannelKey::BarCount),
            "BarClock" => return Ok(ChannelKey::BarClock),
            _ => {}
        }

        if let Some(digits) = bracketed(s, "Note[") {
            Ok(ChannelKey::Note(parse_index(digits)?))
        } else if let Some(digits) = bracketed(s, "CC[") {
            Ok(ChannelKey::Cc(parse_index(digits)?))
        } else {
            Err(ParseChannelKeyError::UnknownChannel(s.to_string()))
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ChannelKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ChannelKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <String as serde::Deserialize>::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
