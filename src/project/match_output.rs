use crate::correct::batch::correct_batch;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{AspectError, AspectResult};
use crate::project::model::{MediaType, Project, TrackEvent, active_pixel_aspect};

/// Which events [`match_output_aspect`] touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventScope {
    /// Selected video events, or every video event when nothing is selected.
    #[default]
    SelectedOrAll,
    /// Every video event regardless of selection.
    All,
}

/// Options for [`match_output_aspect`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchOpts {
    /// Event selection rule.
    pub scope: EventScope,
}

/// A keyframe that kept its old bounds.
#[derive(Debug)]
pub struct MatchFailure {
    /// Track index in the project.
    pub track: usize,
    /// Event index within the track.
    pub event: usize,
    /// Keyframe index within the event.
    pub keyframe: usize,
    /// Timeline frame of the keyframe.
    pub frame: FrameIndex,
    /// Why the correction was refused.
    pub error: AspectError,
}

/// Summary of a [`match_output_aspect`] run.
#[derive(Debug, Default)]
pub struct MatchReport {
    /// Displayed aspect every keyframe was matched to.
    pub target_aspect: f64,
    /// Events whose keyframes were processed.
    pub events_matched: usize,
    /// In-scope events skipped because their video stream did not resolve.
    pub events_skipped: usize,
    /// Keyframes successfully corrected.
    pub keyframes_corrected: usize,
    /// Keyframes left as they were.
    pub failures: Vec<MatchFailure>,
}

impl MatchReport {
    /// `true` when no keyframe failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

fn in_scope(event: &TrackEvent, scope: EventScope, any_selected: bool) -> bool {
    match scope {
        EventScope::All => true,
        EventScope::SelectedOrAll => !any_selected || event.selected,
    }
}

/// Reshape the motion keyframes of video events so they present the project's output aspect.
///
/// The target aspect is derived once from [`Project::video`]. Each keyframe is corrected
/// against the pixel aspect of its event's active video stream. Keyframes that cannot be
/// corrected keep their bounds and are listed in the report; only an invalid project is an
/// error.
#[tracing::instrument(skip(project))]
pub fn match_output_aspect(project: &mut Project, opts: MatchOpts) -> AspectResult<MatchReport> {
    project.validate()?;

    let target_aspect = project.video.output_aspect();
    let any_selected = project.selection_count(MediaType::Video) > 0;
    let mut report = MatchReport {
        target_aspect,
        ..MatchReport::default()
    };

    let Project {
        media_pool, tracks, ..
    } = project;

    for (ti, track) in tracks.iter_mut().enumerate() {
        if track.kind != MediaType::Video {
            continue;
        }

        for (ei, event) in track.events.iter_mut().enumerate() {
            if !in_scope(event, opts.scope, any_selected) {
                continue;
            }

            let Some(pixel_aspect) = active_pixel_aspect(media_pool, event) else {
                tracing::debug!(
                    track = ti,
                    event = ei,
                    name = %event.name,
                    "no video stream; skipped"
                );
                report.events_skipped += 1;
                continue;
            };

            let batch = correct_batch(
                event.keyframes.iter_mut().map(|k| (k, pixel_aspect)),
                target_aspect,
            );
            report.events_matched += 1;
            report.keyframes_corrected += batch.corrected;
            report
                .failures
                .extend(batch.failures.into_iter().map(|f| MatchFailure {
                    track: ti,
                    event: ei,
                    keyframe: f.index,
                    frame: f.frame,
                    error: f.error,
                }));
        }
    }

    tracing::info!(
        target_aspect,
        events = report.events_matched,
        skipped = report.events_skipped,
        corrected = report.keyframes_corrected,
        failed = report.failures.len(),
        "matched output aspect"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/project/match_output.rs"]
mod tests;
