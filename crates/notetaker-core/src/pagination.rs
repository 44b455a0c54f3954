//! Pagination render-model.
//!
//! A pure function of `(current_page, total_pages)`. The model describes which
//! affordances are enabled and which page is active, and turns user actions
//! into [`PageChange`] intents. It never clamps: callers must only request
//! enabled actions.

use std::fmt;

/// Intent to show another page (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange(pub u32);

/// A user action on the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Previous,
    Next,
    Page(u32),
}

/// Previous/Next affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButton {
    pub target: u32,
    pub disabled: bool,
}

/// One numbered page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationModel {
    pub current_page: u32,
    pub total_pages: u32,
    pub previous: NavButton,
    pub next: NavButton,
    pub pages: Vec<PageButton>,
}

impl PaginationModel {
    #[must_use]
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            previous: NavButton {
                target: current_page.saturating_sub(1),
                disabled: current_page <= 1,
            },
            next: NavButton {
                target: current_page.saturating_add(1),
                // Also covers `total_pages == 0`, where there is nowhere to go.
                disabled: current_page >= total_pages,
            },
            pages: (1..=total_pages)
                .map(|number| PageButton {
                    number,
                    active: number == current_page,
                })
                .collect(),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self, action: PageAction) -> bool {
        match action {
            PageAction::Previous => !self.previous.disabled,
            PageAction::Next => !self.next.disabled,
            PageAction::Page(number) => number >= 1 && number <= self.total_pages,
        }
    }

    /// Intent for `action`. Disabled actions still produce their arithmetic target.
    #[must_use]
    pub const fn intent(&self, action: PageAction) -> PageChange {
        match action {
            PageAction::Previous => PageChange(self.previous.target),
            PageAction::Next => PageChange(self.next.target),
            PageAction::Page(number) => PageChange(number),
        }
    }
}

impl fmt::Display for PaginationModel {
    /// Renders e.g. `(Prev) [1] 2 3 Next`; disabled affordances are parenthesized.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(self.pages.len() + 2);
        parts.push(if self.previous.disabled {
            "(Prev)".to_string()
        } else {
            "Prev".to_string()
        });
        for button in &self.pages {
            if button.active {
                parts.push(format!("[{}]", button.number));
            } else {
                parts.push(button.number.to_string());
            }
        }
        parts.push(if self.next.disabled {
            "(Next)".to_string()
        } else {
            "Next".to_string()
        });
        f.write_str(&parts.join(" "))
    }
}
