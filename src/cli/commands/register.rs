//! Register command handler

use super::Workspace;
use crate::args::RegisterSubcommand;
use selector_helper::core::export::parse_weight_text;

/// Dispatch register subcommands
pub fn run(workspace: &mut Workspace, subcommand: RegisterSubcommand) {
    let session = &mut workspace.session;
    match subcommand {
        RegisterSubcommand::Mark { ids } => {
            for id in ids {
                if session.mark(&id) {
                    println!("✓ Marked {id} for registration");
                } else if session.is_marked(&id) {
                    println!("  {id} is already marked");
                } else {
                    eprintln!("✗ {id} is not selected; use `select add {id}` first");
                }
            }
        }
        RegisterSubcommand::Unmark { ids } => {
            for id in ids {
                if session.unmark(&id) {
                    println!("✓ Unmarked {id}");
                } else {
                    eprintln!("✗ {id} is not marked");
                }
            }
        }
        RegisterSubcommand::Weight { id, value } => {
            let weight = session.set_weight(&id, i64::from(parse_weight_text(&value)));
            println!("✓ Weight of {id} = {weight}");
        }
        RegisterSubcommand::List => {
            let entries = session.export_entries();
            if entries.is_empty() {
                println!("No courses marked for registration.");
            }
            for entry in entries {
                println!("{:<8} {:<24} weight {:>3}", entry.id, entry.name, entry.value);
            }
            return;
        }
    }
    workspace.save();
}
