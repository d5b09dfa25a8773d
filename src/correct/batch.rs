use crate::correct::aspect::{AspectContext, AxisFit, correct_keyframe};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::AspectError;
use crate::geometry::keyframe::Keyframe;

/// A keyframe the batch could not correct. It was left as it was.
#[derive(Debug)]
pub struct KeyframeFailure {
    /// Position of the keyframe in the batch input.
    pub index: usize,
    /// Timeline frame of the keyframe.
    pub frame: FrameIndex,
    /// Why the correction was refused.
    pub error: AspectError,
}

/// Outcome of [`correct_batch`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Keyframes handed to the corrector.
    pub attempted: usize,
    /// Keyframes successfully corrected.
    pub corrected: usize,
    /// Corrections that rescaled the X axis.
    pub scaled_x: usize,
    /// Corrections that rescaled the Y axis.
    pub scaled_y: usize,
    /// Keyframes left untouched because their correction failed.
    pub failures: Vec<KeyframeFailure>,
}

impl BatchReport {
    /// `true` when every attempted keyframe was corrected.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Correct every `(keyframe, source_pixel_aspect)` pair towards `target_aspect`, in order.
///
/// A failing keyframe is restored and recorded; the rest of the batch still runs.
#[tracing::instrument(skip(items), fields(attempted = tracing::field::Empty))]
pub fn correct_batch<'a, I>(items: I, target_aspect: f64) -> BatchReport
where
    I: IntoIterator<Item = (&'a mut Keyframe, f64)>,
{
    let mut report = BatchReport::default();

    for (index, (keyframe, source_pixel_aspect)) in items.into_iter().enumerate() {
        report.attempted += 1;
        let frame = keyframe.frame;
        let result = AspectContext::new(source_pixel_aspect, target_aspect)
            .and_then(|ctx| correct_keyframe(keyframe, ctx));

        match result {
            Ok(fit) => {
                report.corrected += 1;
                match fit {
                    AxisFit::ScaleX(_) => report.scaled_x += 1,
                    AxisFit::ScaleY(_) => report.scaled_y += 1,
                }
            }
            Err(error) => {
                tracing::warn!(index, frame = frame.0, %error, "keyframe left unchanged");
                report.failures.push(KeyframeFailure {
                    index,
                    frame,
                    error,
                });
            }
        }
    }

    tracing::Span::current().record("attempted", report.attempted);
    report
}

#[cfg(test)]
#[path = "../../tests/unit/correct/batch.rs"]
mod tests;
