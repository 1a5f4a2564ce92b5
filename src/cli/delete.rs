//! Delete command handler.

use super::Backend;
use crate::config::AppConfig;
use crate::dashboard::{is_missing_upstream, DeleteOutcome};
use crate::model::{Record, RecordField, RecordId};
use crate::pipeline::exit_codes;
use anyhow::{bail, Result};
use std::io::{self, BufRead, Write};

/// Settings for one `delete` invocation.
#[derive(Debug, Clone)]
pub struct DeleteConfig {
    pub id: RecordId,
    /// Skip the confirmation prompt
    pub yes: bool,
    pub quiet: bool,
}

/// Run the delete command
#[allow(clippy::needless_pass_by_value)]
pub fn run_delete(app: &AppConfig, config: DeleteConfig) -> Result<i32> {
    let backend = Backend::from_config(app)?;
    let (mut dashboard, outcome) = backend.load_dashboard(config.quiet);
    if outcome.is_degraded() {
        bail!("cannot delete record {}: records could not be loaded", config.id);
    }

    let confirm = |record: &Record| config.yes || prompt_confirm(record);
    match dashboard.delete_record(backend.store.as_ref(), &backend.session, config.id, confirm) {
        Ok(DeleteOutcome::Deleted) => {
            if !config.quiet {
                eprintln!("Deleted record {}", config.id);
            }
            Ok(exit_codes::SUCCESS)
        }
        Ok(DeleteOutcome::Cancelled) => {
            if !config.quiet {
                eprintln!("Cancelled; record {} was kept", config.id);
            }
            Ok(exit_codes::CANCELLED)
        }
        Ok(DeleteOutcome::NotFound) => bail!("record {} not found", config.id),
        Err(e) if is_missing_upstream(&e) => {
            bail!("record {} no longer exists upstream; refresh and try again", config.id)
        }
        Err(e) => Err(e.into()),
    }
}

/// Ask on stderr, read one line from stdin. Anything but `y`/`yes` declines.
fn prompt_confirm(record: &Record) -> bool {
    eprint!(
        "Delete record {} ({}, {})? This cannot be undone. [y/N] ",
        record.id,
        record.text_or_missing(RecordField::Project),
        record.owner_label()
    );
    if io::stderr().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_affirmative(&answer)
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
