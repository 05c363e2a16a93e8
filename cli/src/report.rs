//! Renders the run summary as a tree so a folder with dozens of mods stays
//! readable.

use console::style;
use log::warn;
use mc_mod_updater_rs_utils::user_input_delegate::RunSummary;
use ptree::TreeBuilder;

pub(crate) fn print_run_summary(summary: &RunSummary) {
    if summary.current_version == summary.target_version {
        println!(
            "Scanned {} mods ({} on Minecraft {}).",
            summary.scanned_mod_count, summary.loader, summary.current_version
        );
    } else {
        println!(
            "Scanned {} mods ({} on Minecraft {}, checked against {}).",
            summary.scanned_mod_count,
            summary.loader,
            summary.current_version,
            summary.target_version
        );
    }

    let mut p_tree = TreeBuilder::new("Run summary".to_string());

    let updates = &summary.report.updates;

    if updates.is_empty() {
        p_tree.add_empty_child("No updates found".to_string());
    } else {
        p_tree.begin_child(
            style(format!("Updates ({})", updates.len()))
                .green()
                .to_string(),
        );
        for update in updates {
            p_tree.add_empty_child(update.to_string());
        }
        p_tree.end_child();
    }

    if !summary.report.messages.is_empty() {
        p_tree.begin_child(format!("Notes ({})", summary.report.messages.len()));
        for msg in &summary.report.messages {
            p_tree.add_empty_child(msg.clone());
        }
        p_tree.end_child();
    }

    if !summary.not_found.is_empty() {
        p_tree.begin_child(
            style(format!("Not found ({})", summary.not_found.len()))
                .yellow()
                .to_string(),
        );
        for file_name in &summary.not_found {
            p_tree.add_empty_child(file_name.clone());
        }
        p_tree.end_child();
    }

    if !summary.report.errors.is_empty() {
        p_tree.begin_child(
            style(format!("Needs a manual check ({})", summary.report.errors.len()))
                .red()
                .to_string(),
        );
        for error in &summary.report.errors {
            p_tree.add_empty_child(error.clone());
        }
        p_tree.end_child();
    }

    if let Err(e) = ptree::print_tree(&p_tree.build()) {
        warn!("Unable to render the summary tree ({}).", e);
    }
}
