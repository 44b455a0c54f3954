//! Interactive collaborators injected at the controller boundary.
//!
//! The presentation layer supplies these; closures work out of the box.

/// Yes/no confirmation, e.g. before deleting a note.
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

/// Ask for text, seeded with `initial`. `None` means the user cancelled.
pub trait PromptForText {
    fn prompt_for_text(&self, initial: &str) -> Option<String>;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

impl<F> PromptForText for F
where
    F: Fn(&str) -> Option<String>,
{
    fn prompt_for_text(&self, initial: &str) -> Option<String> {
        self(initial)
    }
}
