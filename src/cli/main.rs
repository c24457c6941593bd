//! Command-line interface entry point for `SelectorHelper`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::{detective::DetectiveArgs, search::SearchArgs, Workspace};
use selector_helper::config::Config;
use selector_helper::info;
use selector_helper::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path = (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Versions { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&config.paths.catalog));
            commands::versions::run(&dir);
        }
        command => run_session_command(command, &config),
    }
}

/// Commands that need the catalog and the saved session
fn run_session_command(command: Command, config: &Config) {
    let mut workspace = Workspace::load(config);

    match command {
        Command::Search {
            query,
            filters,
            logic,
            options,
            off,
            clear,
            hide_conflicts,
            show_conflicts,
            selected_only,
            list_options,
            limit,
            save,
        } => {
            let display_conflicts = if hide_conflicts {
                Some(false)
            } else {
                show_conflicts.then_some(true)
            };
            let search = SearchArgs {
                query,
                filters,
                logic,
                options,
                off,
                clear,
                display_conflicts,
                selected_only,
                list_options,
                limit,
                save,
            };
            commands::search::run(&mut workspace, &search);
        }
        Command::Required {
            department,
            grade,
            class,
            clear,
        } => commands::required::run(&mut workspace, department, grade, class, clear),
        Command::Select { subcommand } => commands::select::run(&mut workspace, subcommand),
        Command::Schedule { format, output } => {
            commands::schedule::run(&workspace, format, output.as_deref(), config);
        }
        Command::Detective {
            slots,
            clear_slots,
            seed,
            limit,
            subcommand,
        } => {
            let detective = DetectiveArgs {
                slots,
                clear_slots,
                seed,
                limit,
            };
            commands::detective::run(&mut workspace, detective, subcommand);
        }
        Command::Register { subcommand } => commands::register::run(&mut workspace, subcommand),
        Command::Export { output } => commands::transfer::run_export(&workspace, output.as_deref()),
        Command::Import { file } => commands::transfer::run_import(&mut workspace, file.as_deref()),
        Command::Config { .. } | Command::Versions { .. } => {}
    }
}
