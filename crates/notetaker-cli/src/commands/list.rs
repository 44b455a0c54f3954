use std::io::Write;

use notetaker_core::{ListOperation, NoteListController, NoteService};

use crate::commands::common::{operation_failed, write_view};
use crate::error::CliError;

pub async fn run_list<S: NoteService>(
    service: S,
    page: u32,
    as_json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let controller = NoteListController::new(service);
    controller
        .load(page)
        .await
        .map_err(operation_failed(ListOperation::Load))?;

    write_view(out, &controller.view(), as_json)
}
