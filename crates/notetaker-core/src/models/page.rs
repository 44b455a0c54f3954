//! Page model

use serde::{Deserialize, Serialize};

use super::Note;

/// One window of the remote note collection plus the page count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Notes in server order (newest first)
    pub notes: Vec<Note>,
    /// 1-based page number this window was fetched for
    pub current_page: u32,
    /// Total page count at fetch time, 0 when there are no notes
    pub total_pages: u32,
    /// Total note count, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_notes: Option<u64>,
}

impl Page {
    /// A page with no notes and no known page count.
    #[must_use]
    pub const fn empty(current_page: u32) -> Self {
        Self {
            notes: Vec::new(),
            current_page,
            total_pages: 0,
            total_notes: None,
        }
    }

    /// Cut the newest-first window for `page` out of notes stored oldest first.
    ///
    /// Pages past the end yield an empty window with the real page count.
    #[must_use]
    pub fn from_oldest_first(notes: &[Note], page: u32, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let start = (page.max(1) as usize - 1).saturating_mul(per_page);
        let window = notes
            .iter()
            .rev()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect();

        Self {
            notes: window,
            current_page: page,
            total_pages: total_pages_for(notes.len(), per_page),
            total_notes: Some(notes.len() as u64),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Ceiling division of `total_notes` by `per_page`.
#[must_use]
pub fn total_pages_for(total_notes: usize, per_page: usize) -> u32 {
    if per_page == 0 {
        return 0;
    }
    u32::try_from(total_notes.div_ceil(per_page)).unwrap_or(u32::MAX)
}
