use std::io::Write;

use notetaker_core::prompt::PromptForText;
use notetaker_core::{ActionOutcome, ListOperation, NoteListController, NoteService};

use crate::commands::common::{operation_failed, parse_note_id, write_view};
use crate::error::CliError;

/// Update a note with `content`, or with whatever `prompt` returns when
/// no content was given.
pub async fn run_edit<S: NoteService>(
    service: S,
    id: &str,
    page: u32,
    content: Option<&str>,
    prompt: &impl PromptForText,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = parse_note_id(id)?;
    let controller = NoteListController::new(service);
    controller
        .load(page)
        .await
        .map_err(operation_failed(ListOperation::Load))?;

    let outcome = if let Some(content) = content {
        controller
            .update_note(id, content)
            .await
            .map_err(operation_failed(ListOperation::Update))?;
        ActionOutcome::Applied
    } else {
        let note = controller
            .service()
            .fetch_by_id(id)
            .await
            .map_err(operation_failed(ListOperation::Update))?;
        controller
            .edit_note_with(id, &note.content, prompt)
            .await
            .map_err(operation_failed(ListOperation::Update))?
    };

    if outcome == ActionOutcome::Cancelled {
        writeln!(out, "Edit cancelled, note {id} unchanged")?;
    } else {
        writeln!(out, "Updated note {id}")?;
    }
    write_view(out, &controller.view(), false)
}
