use std::fmt::Display;

use crate::types::{ModLoader, UpdateReport};

/// Everything the end-of-run report needs, gathered in one place so the
/// frontend can render it however it likes.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub current_version: String,
    pub target_version: String,
    pub loader: ModLoader,

    /// How many mod files the folder scan found.
    pub scanned_mod_count: usize,

    pub report: UpdateReport,

    /// Local files that no search strategy could match to a catalog entry.
    pub not_found: Vec<String>,
}

pub trait UserInputDelegate {
    fn get_yes_no_resp(&mut self, prompt: &str) -> bool;

    /// The list provided is guaranteed to always have at least one element.
    fn select_item_from_list<T: Display>(&mut self, prompt: &str, items: &[T]) -> usize;

    /// Returns the indices of the chosen items. An empty selection is a valid
    /// response and is left to the caller to deal with.
    fn select_items_from_list<T: Display>(&mut self, prompt: &str, items: &[T]) -> Vec<usize>;

    fn display_run_summary(&mut self, summary: &RunSummary);
}
