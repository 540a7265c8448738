//! Keyframe curves and the tangent policies applied to them.
//!
//! A [`KeyframeCurve`] is the leaf data structure shared by every channel the
//! converter tracks. Curves are built with linear tangents and receive their
//! final interpolation modes from a [`CurveKind`] once all keys are in place.

mod curve;
mod keyframe;
mod policy;

pub use curve::KeyframeCurve;
pub use keyframe::{Keyframe, TangentMode, approximately};
pub use policy::CurveKind;
