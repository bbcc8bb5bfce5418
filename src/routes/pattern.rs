use std::borrow::Cow;

use crate::error::GateError;

/// Segment
///
/// One `/`-separated piece of a route pattern. Literals are stored lowercased because matching
/// is case-insensitive, mirroring the SPA router's default.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// PathPattern
///
/// A compiled route pattern. Supports exact segments and single-segment parameters written
/// either `{id}` (axum style) or `:id` (SPA router style).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// parse
    ///
    /// Compiles a pattern. Rejects patterns that do not start with `/`, contain empty segments
    /// (`//`), or carry an empty or unbalanced parameter.
    pub fn parse(pattern: &str) -> Result<Self, GateError> {
        let invalid = |reason| GateError::InvalidRoutePattern {
            pattern: pattern.to_string(),
            reason,
        };

        let pieces = split_segments(pattern).ok_or_else(|| invalid("must start with `/`"))?;

        let mut segments = Vec::with_capacity(pieces.len());
        for piece in pieces {
            if piece.is_empty() {
                return Err(invalid("empty segment"));
            }

            let param = piece
                .strip_prefix('{')
                .map(|rest| rest.strip_suffix('}').ok_or_else(|| invalid("unbalanced `{`")))
                .transpose()?
                .or_else(|| piece.strip_prefix(':'));

            match param {
                Some("") => return Err(invalid("empty parameter name")),
                Some(name) if name.contains(['{', '}']) => {
                    return Err(invalid("nested braces in parameter"));
                }
                Some(name) => segments.push(Segment::Param(name.to_string())),
                None if piece.contains(['{', '}']) => return Err(invalid("stray brace")),
                None => segments.push(Segment::Literal(piece.to_lowercase())),
            }
        }

        Ok(Self { segments })
    }

    /// signature
    ///
    /// Shape of the pattern with parameter names erased. Two patterns with the same signature
    /// match exactly the same paths and are treated as the same registered path.
    pub fn signature(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => format!("/{text}"),
                Segment::Param(_) => "/{}".to_string(),
            })
            .collect()
    }

    /// matches
    ///
    /// Returns the captured parameters when `path` matches, `None` otherwise.
    /// The query string and fragment are ignored; one trailing slash is tolerated.
    pub fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
        let pieces = split_segments(strip_query(path))?;
        if pieces.len() != self.segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (segment, piece) in self.segments.iter().zip(pieces) {
            let decoded = decode_segment(piece);
            match segment {
                Segment::Literal(text) => {
                    if decoded.to_lowercase() != *text {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if decoded.is_empty() {
                        return None;
                    }
                    params.push((name.clone(), decoded.into_owned()));
                }
            }
        }
        Some(params)
    }
}

/// strip_query
///
/// Drops the `?query` and `#fragment` parts of a navigation target.
pub fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// split_segments
///
/// `None` when the path is not absolute. The root path yields no segments.
fn split_segments(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix('/')?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() {
        return Some(Vec::new());
    }
    Some(rest.split('/').collect())
}

/// Percent-decodes a segment so `/%61dmin` resolves the same way the SPA router sees it.
/// Sequences that do not decode to UTF-8 are compared verbatim.
fn decode_segment(piece: &str) -> Cow<'_, str> {
    urlencoding::decode(piece).unwrap_or(Cow::Borrowed(piece))
}
