//! Rotation-aware aspect correction for video motion keyframes.
//!
//! A keyframe places a video region as four corner points plus a rotation. Correcting it
//! reshapes the region so its displayed aspect (pixel aspect x width / height of the upright
//! rectangle) equals a target, typically the project's output aspect:
//!
//! - [`correct_keyframe`] / [`correct_bounds`] fix one keyframe, keeping center and rotation
//! - [`correct_batch`] runs many keyframes and collects per-keyframe failures
//! - [`match_output_aspect`] walks a [`Project`] and matches every in-scope video event
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod correct;
mod foundation;
mod geometry;
mod project;

pub use crate::foundation::core::{Affine, FrameIndex, OutputFormat, Point, Vec2};
pub use crate::foundation::error::{AspectError, AspectResult};
pub use crate::foundation::math::{is_positive_finite, nearly_eq};

pub use crate::geometry::bounds::Bounds;
pub use crate::geometry::keyframe::Keyframe;

pub use crate::correct::aspect::{
    AspectContext, AxisFit, correct_bounds, correct_keyframe, measure_aspect,
};
pub use crate::correct::batch::{BatchReport, KeyframeFailure, correct_batch};

pub use crate::project::match_output::{
    EventScope, MatchFailure, MatchOpts, MatchReport, match_output_aspect,
};
pub use crate::project::model::{Media, MediaStream, MediaType, Project, Take, Track, TrackEvent};
