use crate::project::model::{MediaType, Project};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct ProjectError {
    pub(crate) path: Vec<PathElem>,
    pub(crate) message: String,
}

impl ProjectError {
    fn at(path: &[PathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct ProjectErrors {
    pub(crate) errors: Vec<ProjectError>,
}

impl fmt::Display for ProjectErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

pub(crate) fn validate_project(project: &Project) -> Result<(), ProjectErrors> {
    let mut errors = Vec::new();
    let mut path = vec![PathElem::Field("video")];

    if let Err(msg) = project.video.check() {
        errors.push(ProjectError::at(&path, msg));
    }

    path.clear();
    path.push(PathElem::Field("media_pool"));
    if project.media_pool.keys().any(|k| k.is_empty()) {
        errors.push(ProjectError::at(&path, "media path must be non-empty"));
    }

    path.clear();
    path.push(PathElem::Field("tracks"));
    for (ti, track) in project.tracks.iter().enumerate() {
        path.push(PathElem::Index(ti));
        path.push(PathElem::Field("events"));
        for (ei, event) in track.events.iter().enumerate() {
            path.push(PathElem::Index(ei));
            if track.kind == MediaType::Audio && !event.keyframes.is_empty() {
                path.push(PathElem::Field("keyframes"));
                errors.push(ProjectError::at(
                    &path,
                    "audio events cannot carry motion keyframes",
                ));
                path.pop();
            }
            if let Some(take) = &event.active_take
                && take.media_path.is_empty()
            {
                path.push(PathElem::Field("active_take"));
                path.push(PathElem::Field("media_path"));
                errors.push(ProjectError::at(&path, "media_path must be non-empty"));
                path.pop();
                path.pop();
            }
            path.pop();
        }
        path.pop();
        path.pop();
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ProjectErrors { errors })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/validate.rs"]
mod tests;
