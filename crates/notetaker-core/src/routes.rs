//! Navigation targets shared by every front end.

use std::fmt;

use crate::models::NoteId;

/// Where the presentation layer should be showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The paginated note list, `/`
    List,
    /// A single note, `/notes/{id}`
    Detail(NoteId),
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::List => "/".to_string(),
            Self::Detail(id) => format!("/notes/{id}"),
        }
    }

    /// Match a path against the known routes. Unknown paths yield `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return path.starts_with('/').then_some(Self::List);
        }

        let id = trimmed.strip_prefix("/notes/")?;
        if id.contains('/') {
            return None;
        }
        id.parse().ok().map(Self::Detail)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_roundtrip() {
        for route in [Route::List, Route::Detail(NoteId::new(12))] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn parse_accepts_trailing_slash() {
        assert_eq!(
            Route::parse("/notes/3/"),
            Some(Route::Detail(NoteId::new(3)))
        );
    }

    #[test]
    fn parse_rejects_unknown_paths() {
        assert_eq!(Route::parse(""), None);
        assert_eq!(Route::parse("/notes"), None);
        assert_eq!(Route::parse("/notes/abc"), None);
        assert_eq!(Route::parse("/notes/1/edit"), None);
        assert_eq!(Route::parse("/settings"), None);
    }
}
