use super::*;
use crate::correct::aspect::measure_aspect;
use crate::foundation::core::OutputFormat;
use crate::foundation::math::nearly_eq;
use crate::geometry::bounds::Bounds;
use crate::geometry::keyframe::Keyframe;
use crate::project::model::{Media, MediaStream, Take, Track};
use std::collections::BTreeMap;

fn video_event(selected: bool, media: Option<&str>, keyframes: Vec<Keyframe>) -> TrackEvent {
    TrackEvent {
        name: String::new(),
        selected,
        active_take: media.map(|m| Take {
            media_path: m.to_string(),
            stream_index: 0,
        }),
        keyframes,
    }
}

fn wide() -> Keyframe {
    Keyframe::new(Bounds::from_rect(0.0, 0.0, 1000.0, 250.0), 0.0)
}

fn project(events: Vec<TrackEvent>) -> Project {
    let mut media_pool = BTreeMap::new();
    media_pool.insert(
        "square.mp4".to_string(),
        Media {
            streams: vec![MediaStream::Video { pixel_aspect: 1.0 }],
        },
    );
    media_pool.insert(
        "silent.wav".to_string(),
        Media {
            streams: vec![MediaStream::Audio],
        },
    );
    Project {
        video: OutputFormat::new(1920, 1080, 1.0).unwrap(),
        media_pool,
        tracks: vec![
            Track {
                name: "A1".to_string(),
                kind: MediaType::Audio,
                events: vec![],
            },
            Track {
                name: "V1".to_string(),
                kind: MediaType::Video,
                events,
            },
        ],
    }
}

fn is_matched(kf: &Keyframe) -> bool {
    nearly_eq(
        measure_aspect(&kf.bounds, kf.rotation, 1.0).unwrap(),
        16.0 / 9.0,
        1e-9,
    )
}

#[test]
fn no_selection_means_every_event() {
    let mut p = project(vec![
        video_event(false, Some("square.mp4"), vec![wide(), wide()]),
        video_event(false, Some("square.mp4"), vec![wide()]),
    ]);

    let report = match_output_aspect(&mut p, MatchOpts::default()).unwrap();
    assert!(nearly_eq(report.target_aspect, 16.0 / 9.0, 1e-12));
    assert_eq!(report.events_matched, 2);
    assert_eq!(report.keyframes_corrected, 3);
    assert!(report.is_clean());
    assert!(p.tracks[1].events.iter().flat_map(|e| &e.keyframes).all(is_matched));
}

#[test]
fn selection_limits_scope_unless_all_is_requested() {
    let events = vec![
        video_event(true, Some("square.mp4"), vec![wide()]),
        video_event(false, Some("square.mp4"), vec![wide()]),
    ];

    let mut p = project(events.clone());
    let report = match_output_aspect(&mut p, MatchOpts::default()).unwrap();
    assert_eq!(report.events_matched, 1);
    assert!(is_matched(&p.tracks[1].events[0].keyframes[0]));
    assert_eq!(p.tracks[1].events[1].keyframes[0], wide());

    let mut p = project(events);
    let opts = MatchOpts {
        scope: EventScope::All,
    };
    let report = match_output_aspect(&mut p, opts).unwrap();
    assert_eq!(report.events_matched, 2);
}

#[test]
fn events_without_video_stream_are_skipped() {
    let mut p = project(vec![
        video_event(false, None, vec![wide()]),
        video_event(false, Some("missing.mp4"), vec![wide()]),
        video_event(false, Some("silent.wav"), vec![wide()]),
        video_event(false, Some("square.mp4"), vec![wide()]),
    ]);

    let report = match_output_aspect(&mut p, MatchOpts::default()).unwrap();
    assert_eq!(report.events_skipped, 3);
    assert_eq!(report.events_matched, 1);
    for e in &p.tracks[1].events[..3] {
        assert_eq!(e.keyframes[0], wide());
    }
}

#[test]
fn failures_carry_location_and_do_not_stop_the_run() {
    let flat = Keyframe::new(Bounds::from_rect(0.0, 10.0, 100.0, 10.0), 0.0)
        .at(FrameIndex(48));
    let mut p = project(vec![
        video_event(false, Some("square.mp4"), vec![wide()]),
        video_event(false, Some("square.mp4"), vec![wide(), flat, wide()]),
    ]);

    let report = match_output_aspect(&mut p, MatchOpts::default()).unwrap();
    assert_eq!(report.keyframes_corrected, 3);
    assert_eq!(report.failures.len(), 1);

    let f = &report.failures[0];
    assert_eq!((f.track, f.event, f.keyframe), (1, 1, 1));
    assert_eq!(f.frame, FrameIndex(48));
    assert!(f.error.is_recoverable());
    assert_eq!(p.tracks[1].events[1].keyframes[1], flat);
    assert!(is_matched(&p.tracks[1].events[1].keyframes[2]));
}

#[test]
fn bad_stream_pixel_aspect_fails_only_its_keyframes() {
    let mut p = project(vec![
        video_event(false, Some("broken.mov"), vec![wide(), wide().at(FrameIndex(5))]),
        video_event(false, Some("square.mp4"), vec![wide()]),
    ]);
    p.media_pool.insert(
        "broken.mov".to_string(),
        Media {
            streams: vec![MediaStream::Video { pixel_aspect: 0.0 }],
        },
    );

    let report = match_output_aspect(&mut p, MatchOpts::default()).unwrap();
    assert_eq!(report.keyframes_corrected, 1);
    assert_eq!(report.failures.len(), 2);
    for (i, f) in report.failures.iter().enumerate() {
        assert_eq!((f.track, f.event, f.keyframe), (1, 0, i));
        assert!(matches!(f.error, AspectError::InvalidGeometry(_)), "{}", f.error);
    }
    assert_eq!(p.tracks[1].events[0].keyframes[0], wide());
    assert_eq!(p.tracks[1].events[0].keyframes[1], wide().at(FrameIndex(5)));
    assert!(is_matched(&p.tracks[1].events[1].keyframes[0]));
}

#[test]
fn unused_broken_media_does_not_block_the_run() {
    let mut p = project(vec![video_event(false, Some("square.mp4"), vec![wide()])]);
    p.media_pool.insert(
        "unused_broken.mov".to_string(),
        Media {
            streams: vec![MediaStream::Video { pixel_aspect: 0.0 }],
        },
    );

    let report = match_output_aspect(&mut p, MatchOpts::default()).unwrap();
    assert!(report.is_clean());
    assert!(is_matched(&p.tracks[1].events[0].keyframes[0]));
}

#[test]
fn invalid_project_is_rejected_before_any_change() {
    let mut p = project(vec![video_event(false, Some("square.mp4"), vec![wide()])]);
    p.video.pixel_aspect = 0.0;

    let err = match_output_aspect(&mut p, MatchOpts::default()).unwrap_err();
    assert!(matches!(err, AspectError::Validation(_)), "{err}");
    assert_eq!(p.tracks[1].events[0].keyframes[0], wide());
}
