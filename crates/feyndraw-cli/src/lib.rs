//! Feyndraw CLI library
//!
//! This module contains the replay logic of the `feyndraw` command: load a
//! session script, feed its events to an [`Editor`], and write a report of
//! the resulting diagram.

pub mod error_adapter;
pub mod report;
pub mod script;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::{ConfigError, load_config};
pub use error::CliError;

use std::fs;

use log::{debug, info};

use feyndraw::{Editor, config::AppConfig};

use script::Script;

/// Replays the script in `src` on a fresh editor.
///
/// # Errors
///
/// Returns [`CliError::Script`] for a malformed script,
/// [`CliError::Edit`] if the initial diagram is inconsistent, and
/// [`CliError::Event`] for the first event the engine rejects.
pub fn replay(src: &str, config: AppConfig) -> Result<Editor, CliError> {
    let script = Script::parse(src)?;
    let elements = script.elements(src)?;
    let mut editor = Editor::with_elements(config, elements)?;
    if let Some(title) = &script.title {
        editor.diagram_mut().info_mut().set_title(title.clone());
    }

    for (index, event) in script.events.iter().enumerate() {
        debug!(index = index, action = event.action(); "Replaying event");
        event
            .apply(&mut editor)
            .map_err(|source| CliError::Event {
                index,
                action: event.action(),
                source,
            })?;
    }

    Ok(editor)
}

/// Run the Feyndraw CLI application
///
/// Reads the session script, replays it and writes the report to the output
/// file, or to stdout when no output is given.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed scripts
/// - Edits rejected by the engine
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Replaying session"
    );

    let app_config = load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let editor = replay(&source, app_config)?;
    let report = report::render_report(editor.diagram());

    match &args.output {
        Some(output) => {
            fs::write(output, report)?;
            info!(output_file = output; "Report written");
        }
        None => print!("{report}"),
    }

    Ok(())
}
