use std::io::Write;

use notetaker_core::{ListOperation, NoteListController, NoteService};

use crate::commands::common::{operation_failed, write_view};
use crate::error::CliError;

pub async fn run_add<S: NoteService>(
    service: S,
    content: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let controller = NoteListController::new(service);
    let note = controller
        .add_note(content)
        .await
        .map_err(operation_failed(ListOperation::Add))?;

    writeln!(out, "Created note {}", note.id)?;
    write_view(out, &controller.view(), false)
}
