//! Sub-command implementations.
//!
//! Listings go to stdout; anything that went wrong goes to stderr. A
//! command that could only do part of its work still prints that part and
//! reports failure through its exit code.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use maildex_core::{
    DEFAULT_MESSAGE_TEMPLATE, MaildirListing, MessageListing, MimeParser, Template,
    default_workers, render_message,
};
use tracing::debug;

use crate::settings::Settings;

/// Prints the maildir folders beneath the prefix.
pub fn maildirs(
    settings: &Settings,
    short: bool,
    unread: bool,
    format: Option<String>,
) -> Result<ExitCode> {
    let template = Template::new(format.unwrap_or_else(|| settings.maildir_format.clone()));
    let report = MaildirListing::new(&settings.prefix, &template)
        .short_names(short)
        .unread_only(unread)
        .highlight(&settings.highlight_marker)
        .policy(settings.unread_policy)
        .list_with_errors();

    for error in &report.errors {
        debug!("Skipped while scanning: {error}");
    }

    let mut out = io::stdout().lock();
    for folder in &report.folders {
        writeln!(out, "{}", folder.rendered)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints the messages of each folder.
///
/// Stops at the first folder that does not exist.
pub fn messages(
    settings: &Settings,
    format: Option<String>,
    arrival_order: bool,
    folders: &[String],
) -> Result<ExitCode> {
    let template = Template::new(format.unwrap_or_else(|| settings.message_format.clone()));
    let listing = MessageListing::new(&settings.prefix, &template, &MimeParser)
        .workers(settings.workers.unwrap_or_else(default_workers))
        .highlight(&settings.highlight_marker)
        .policy(settings.unread_policy);

    let mut complete = true;
    for folder in folders {
        let ok = if arrival_order {
            stream_folder(&listing, folder)?
        } else {
            list_folder(&listing, folder)?
        };
        complete &= ok;
    }

    Ok(exit_code(complete))
}

fn list_folder(listing: &MessageListing<'_, MimeParser>, folder: &str) -> Result<bool> {
    let report = listing.list(folder)?;

    let mut out = io::stdout().lock();
    for message in &report.messages {
        writeln!(out, "{}", message.rendered)?;
    }
    out.flush()?;

    for failure in &report.failures {
        eprintln!("{}: {}", failure.path.display(), failure.error);
    }
    Ok(report.is_complete())
}

fn stream_folder(listing: &MessageListing<'_, MimeParser>, folder: &str) -> Result<bool> {
    let mut out = io::stdout().lock();
    let mut failures = Vec::new();
    let mut write_error = None;

    listing.stream(folder, |result| match result.outcome {
        Ok(rendered) => {
            if write_error.is_none() {
                write_error = writeln!(out, "{rendered}").err();
            }
        }
        Err(error) => failures.push((result.path, error)),
    })?;

    if let Some(e) = write_error {
        return Err(e.into());
    }
    out.flush()?;

    for (path, error) in &failures {
        eprintln!("{}: {error}", path.display());
    }
    Ok(failures.is_empty())
}

/// Prints each message file through the view template.
///
/// With `dump_template`, prints the default template instead.
pub fn message(
    settings: &Settings,
    template: Option<&Path>,
    dump_template: bool,
    files: &[PathBuf],
) -> Result<ExitCode> {
    if dump_template {
        println!("{DEFAULT_MESSAGE_TEMPLATE}");
        return Ok(ExitCode::SUCCESS);
    }

    let template = match template.or(settings.message_template.as_deref()) {
        Some(path) => load_template(path)?,
        None => Template::new(DEFAULT_MESSAGE_TEMPLATE),
    };

    let mut out = io::stdout().lock();
    let mut complete = true;
    for file in files {
        match render_message(&MimeParser, &template, file) {
            Ok(rendered) => writeln!(out, "{rendered}")?,
            Err(e) => {
                complete = false;
                eprintln!("{}: {e}", file.display());
            }
        }
    }
    Ok(exit_code(complete))
}

fn load_template(path: &Path) -> Result<Template> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))?;
    debug!("Using view template from {:?}", path);
    Ok(Template::new(source))
}

const fn exit_code(complete: bool) -> ExitCode {
    if complete {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn template_file_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.tmpl");
        std::fs::write(&path, "#{subject}\n#{body}").unwrap();

        assert_eq!(load_template(&path).unwrap().as_str(), "#{subject}\n#{body}");
    }

    #[test]
    fn missing_template_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_template(&dir.path().join("nope.tmpl")).unwrap_err();
        assert!(err.to_string().contains("nope.tmpl"));
    }

    #[test]
    fn unknown_folder_fails_the_command() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            prefix: dir.path().to_path_buf(),
            ..Settings::default()
        };

        let err = messages(&settings, None, false, &["inbox".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "maildir 'inbox' wasn't found");
    }
}
