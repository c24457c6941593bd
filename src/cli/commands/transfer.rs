//! Export and import command handlers
//!
//! There is no clipboard in a terminal, so the script is printed (or written
//! to a file) for the user to copy into the registration page console.

use super::Workspace;
use selector_helper::{error, warn};
use std::io::{Read, Write};
use std::path::Path;

/// Run the export command
pub fn run_export(workspace: &Workspace, output: Option<&Path>) {
    let session = &workspace.session;
    if session.export_entries().is_empty() {
        warn!("No selected course is marked for registration; the script is empty");
    }

    let script = match session.export_script() {
        Ok(script) => script,
        Err(e) => {
            error!("Failed to build export script: {e}");
            eprintln!("✗ Failed to build export script: {e}");
            return;
        }
    };

    match output {
        Some(path) => match std::fs::write(path, &script) {
            Ok(()) => println!("✓ Script written: {}", path.display()),
            Err(e) => {
                error!("Failed to write {}: {e}", path.display());
                eprintln!("✗ Failed to write {}: {e}", path.display());
            }
        },
        None => {
            eprintln!("Copy the script below into the browser console of the registration page:\n");
            if let Err(e) = write_script(&mut std::io::stdout().lock(), &script) {
                error!("Failed to print export script: {e}");
            }
        }
    }
}

/// Run the import command
pub fn run_import(workspace: &mut Workspace, file: Option<&Path>) {
    let text = match read_input(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("✗ Failed to read import code: {e}");
            std::process::exit(1);
        }
    };

    match workspace.session.apply_import(&workspace.catalog, &text) {
        Ok(count) => {
            println!("✓ Imported {count} courses");
            workspace.save();
        }
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

/// Write nothing but the script, so the stream can be pasted as is
fn write_script(out: &mut impl Write, script: &str) -> std::io::Result<()> {
    writeln!(out, "{script}")?;
    out.flush()
}

fn read_input(file: Option<&Path>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
