use std::io::Write;

use notetaker_core::prompt::Confirm;
use notetaker_core::{ActionOutcome, ListOperation, NoteListController, NoteService};

use crate::commands::common::{operation_failed, parse_note_id, write_view};
use crate::error::CliError;

pub async fn run_delete<S: NoteService>(
    service: S,
    id: &str,
    page: u32,
    confirm: &impl Confirm,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = parse_note_id(id)?;
    let controller = NoteListController::new(service);
    controller
        .load(page)
        .await
        .map_err(operation_failed(ListOperation::Load))?;

    let outcome = controller
        .delete_note_with(id, confirm)
        .await
        .map_err(operation_failed(ListOperation::Delete))?;

    if outcome == ActionOutcome::Cancelled {
        writeln!(out, "Delete cancelled, note {id} kept")?;
    } else {
        writeln!(out, "Deleted note {id}")?;
    }
    write_view(out, &controller.view(), false)
}
