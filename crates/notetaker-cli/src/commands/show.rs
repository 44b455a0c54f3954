use std::io::Write;

use notetaker_core::{DetailState, NoteDetailController, NoteService};

use crate::commands::common::{parse_note_id, render_note_detail, route_hint};
use crate::error::CliError;

pub async fn run_show<S: NoteService>(
    service: S,
    id: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = parse_note_id(id)?;
    let controller = NoteDetailController::for_note(service, id).await;
    let state = controller.state();
    let back = state.back_to_list().map(route_hint);

    match state {
        DetailState::Loaded(note) => {
            for line in render_note_detail(&note) {
                writeln!(out, "{line}")?;
            }
            if let Some(back) = back {
                writeln!(out, "\nBack to list: {back}")?;
            }
            Ok(())
        }
        DetailState::Error { reason, .. } => {
            let message = back.map_or_else(
                || reason.clone(),
                |back| format!("{reason}\nBack to list: {back}"),
            );
            Err(CliError::NoteUnavailable(message))
        }
        DetailState::Loading => Ok(()),
    }
}
