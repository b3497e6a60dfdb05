//! Path patterns such as `/view-workout/:workoutId`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
}

/// A parsed, absolute path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern '{0}' must start with '/'")]
    NotAbsolute(String),
    #[error("pattern '{0}' contains an empty segment")]
    EmptySegment(String),
    #[error("pattern '{0}' has a parameter without a name")]
    UnnamedParam(String),
    #[error("pattern '{pattern}' repeats parameter '{param}'")]
    DuplicateParam { pattern: String, param: String },
}

/// Splits a concrete or pattern path into segments, ignoring one leading and
/// one trailing slash. `/` yields no segments.
fn split(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if !pattern.starts_with('/') {
            return Err(PatternError::NotAbsolute(pattern.to_string()));
        }

        let mut segments = Vec::new();
        for raw in split(pattern) {
            if raw.is_empty() {
                return Err(PatternError::EmptySegment(pattern.to_string()));
            }
            match raw.strip_prefix(':') {
                Some("") => return Err(PatternError::UnnamedParam(pattern.to_string())),
                Some(name) => {
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                    {
                        return Err(PatternError::DuplicateParam {
                            pattern: pattern.to_string(),
                            param: name.to_string(),
                        });
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(raw.to_string())),
            }
        }
        Ok(PathPattern { segments })
    }

    /// Joins a child path onto `parent`. Absolute children stand on their own.
    pub fn join(parent: &PathPattern, child: &str) -> Result<Self, PatternError> {
        if child.starts_with('/') {
            return PathPattern::parse(child);
        }
        let joined = if parent.segments.is_empty() {
            format!("/{}", child)
        } else {
            format!("{}/{}", parent, child)
        };
        PathPattern::parse(&joined)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Identity used to detect duplicate patterns: static segments compare
    /// case-insensitively and parameter names are irrelevant.
    pub fn key(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Static(s) => format!("/{}", s.to_ascii_lowercase()),
                Segment::Param(_) => "/:".to_string(),
            })
            .collect()
    }

    /// Matches a concrete path (without query or fragment). Returns the
    /// percent-decoded parameters on success.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts = split(path);
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) => {
                    if !expected.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    let value = urlencoding::decode(part)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| part.to_string());
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(params)
    }

    /// Fills the parameters in to produce a concrete path.
    pub fn build(&self, params: &BTreeMap<String, String>) -> Option<String> {
        if self.segments.is_empty() {
            return Some("/".to_string());
        }
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) => path.push_str(&urlencoding::encode(params.get(name)?)),
            }
        }
        Some(path)
    }

    /// Orders two patterns matching the same path: a static segment outranks
    /// a parameter at the first position where they differ.
    pub fn specificity_cmp(&self, other: &PathPattern) -> Ordering {
        for (a, b) in self.segments.iter().zip(other.segments.iter()) {
            match (a, b) {
                (Segment::Static(_), Segment::Param(_)) => return Ordering::Greater,
                (Segment::Param(_), Segment::Static(_)) => return Ordering::Less,
                _ => {}
            }
        }
        self.segments.len().cmp(&other.segments.len())
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Static(s) => write!(f, "/{}", s)?,
                Segment::Param(name) => write!(f, "/:{}", name)?,
            }
        }
        Ok(())
    }
}
