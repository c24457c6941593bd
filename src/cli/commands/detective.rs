//! Detective command handler
//!
//! Ranks the catalog by the enabled buckets, optionally restricted to the
//! chosen time slots, and manages the bucket order.

use super::{format_time, Workspace};
use crate::args::{DetectiveSubcommand, OrderSubcommand};
use selector_helper::core::detective::{move_element, rank_courses, toggle_element};
use selector_helper::models::{default_order, TimeSlot};

/// Options of a ranking run
pub struct DetectiveArgs {
    /// Slots to toggle
    pub slots: Vec<TimeSlot>,
    /// Drop all chosen slots first
    pub clear_slots: bool,
    /// Shuffle seed
    pub seed: Option<u64>,
    /// Output cap
    pub limit: usize,
}

/// Run the detective command
pub fn run(workspace: &mut Workspace, args: DetectiveArgs, subcommand: Option<DetectiveSubcommand>) {
    if let Some(DetectiveSubcommand::Order { subcommand }) = subcommand {
        run_order(workspace, subcommand);
        return;
    }

    let session = &mut workspace.session;
    let slots_changed = (args.clear_slots && !session.time_slots.is_empty()) || !args.slots.is_empty();
    if args.clear_slots {
        session.time_slots.clear();
    }
    for slot in args.slots {
        let state = if session.toggle_time_slot(slot) { "added" } else { "removed" };
        println!("✓ Time slot {slot} {state}");
    }

    if !session.time_slots.is_empty() {
        let slots: Vec<String> = session.time_slots.iter().map(ToString::to_string).collect();
        println!("Time slots: {}", slots.join(", "));
    }

    let ranked = rank_courses(&workspace.catalog, &session.order, &session.time_slots, args.seed);
    for (rank, course) in ranked.iter().take(args.limit).enumerate() {
        println!(
            "{:>3}. {:<8} {:<24} {:<12} {:<16} {}",
            rank + 1,
            course.id,
            course.name,
            course.department,
            course.teacher,
            format_time(course)
        );
    }
    if ranked.len() > args.limit {
        println!("… {} more (use --limit to show more)", ranked.len() - args.limit);
    }
    println!("{} courses", ranked.len());

    if slots_changed {
        workspace.save();
    }
}

fn run_order(workspace: &mut Workspace, subcommand: OrderSubcommand) {
    let order = &mut workspace.session.order;
    let changed = !matches!(subcommand, OrderSubcommand::List);
    match subcommand {
        OrderSubcommand::List => {}
        OrderSubcommand::Move { from, to } => {
            let moved = from > 0 && to > 0 && move_element(order, from - 1, to - 1);
            if !moved {
                eprintln!("✗ Positions must be between 1 and {}", order.len());
                return;
            }
        }
        OrderSubcommand::Toggle { id } => {
            if !toggle_element(order, &id) {
                eprintln!("✗ Unknown bucket '{id}'");
                return;
            }
        }
        OrderSubcommand::Reset => *order = default_order(),
    }

    for (pos, element) in workspace.session.order.iter().enumerate() {
        let on = if element.enabled { "x" } else { " " };
        println!("{:>2}. [{on}] {:<28} {}", pos + 1, element.id, element.label);
    }
    if changed {
        workspace.save();
    }
}
