use crate::foundation::core::OutputFormat;
use crate::foundation::error::{AspectError, AspectResult};
use crate::geometry::keyframe::Keyframe;
use crate::project::validate::validate_project;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Editing project as seen by the keyframe tools: output settings, media pool and tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Video output settings.
    pub video: OutputFormat,
    /// Media keyed by path, as referenced from takes.
    #[serde(default)]
    pub media_pool: BTreeMap<String, Media>,
    /// Tracks in display order.
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Kind of content a track or stream carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Picture.
    Video,
    /// Sound.
    Audio,
}

/// One timeline track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Content kind; only video tracks carry motion keyframes.
    pub kind: MediaType,
    /// Events in timeline order.
    #[serde(default)]
    pub events: Vec<TrackEvent>,
}

/// One event (clip instance) on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEvent {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Whether the event is part of the current selection.
    #[serde(default)]
    pub selected: bool,
    /// Take currently feeding the event; `None` for an empty event.
    #[serde(default)]
    pub active_take: Option<Take>,
    /// Motion keyframes of the event's video region.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyframes: Vec<Keyframe>,
}

/// Reference from an event to a stream of a media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Take {
    /// Key into [`Project::media_pool`].
    pub media_path: String,
    /// Index among the media's streams of the wanted type.
    #[serde(default)]
    pub stream_index: usize,
}

/// A media file in the pool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Media {
    /// Streams in file order.
    #[serde(default)]
    pub streams: Vec<MediaStream>,
}

/// One stream of a media file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaStream {
    /// Picture stream with its pixel shape.
    Video {
        /// Width-to-height ratio of one pixel.
        pixel_aspect: f64,
    },
    /// Sound stream.
    Audio,
}

impl MediaStream {
    /// Content kind of the stream.
    pub fn kind(&self) -> MediaType {
        match self {
            Self::Video { .. } => MediaType::Video,
            Self::Audio => MediaType::Audio,
        }
    }
}

impl Media {
    /// The `index`-th stream of the given kind.
    pub fn stream(&self, kind: MediaType, index: usize) -> Option<&MediaStream> {
        self.streams.iter().filter(|s| s.kind() == kind).nth(index)
    }
}

impl Project {
    /// Parse a project from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> AspectResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| AspectError::serde(format!("parse project JSON: {e}")))
    }

    /// Parse a project from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> AspectResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AspectError::validation(format!("open project JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Write the project as pretty-printed JSON.
    pub fn to_writer<W: std::io::Write>(&self, w: W) -> AspectResult<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|e| AspectError::serde(format!("write project JSON: {e}")))
    }

    /// Write the project to a JSON file, replacing it if present.
    pub fn to_path(&self, path: impl AsRef<Path>) -> AspectResult<()> {
        let path = path.as_ref();
        let f = File::create(path).map_err(|e| {
            AspectError::validation(format!("create project JSON '{}': {e}", path.display()))
        })?;
        self.to_writer(BufWriter::new(f))
    }

    /// Check the document's structure. Keyframe geometry is not checked here.
    pub fn validate(&self) -> AspectResult<()> {
        validate_project(self)
            .map_err(|e| AspectError::validation(format!("project validation failed: {e}")))
    }

    /// Number of selected events on tracks of `kind`.
    pub fn selection_count(&self, kind: MediaType) -> usize {
        self.tracks
            .iter()
            .filter(|t| t.kind == kind)
            .flat_map(|t| t.events.iter())
            .filter(|e| e.selected)
            .count()
    }

    /// Pixel aspect of the video stream feeding `event`, if it resolves.
    pub fn active_video_stream(&self, event: &TrackEvent) -> Option<f64> {
        active_pixel_aspect(&self.media_pool, event)
    }
}

pub(crate) fn active_pixel_aspect(
    media_pool: &BTreeMap<String, Media>,
    event: &TrackEvent,
) -> Option<f64> {
    let take = event.active_take.as_ref()?;
    let media = media_pool.get(&take.media_path)?;
    match media.stream(MediaType::Video, take.stream_index)? {
        MediaStream::Video { pixel_aspect } => Some(*pixel_aspect),
        MediaStream::Audio => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/model.rs"]
mod tests;
