use std::{fmt::Display, io};

use mc_mod_updater_rs_utils::user_input_delegate::{RunSummary, UserInputDelegate};

use crate::report;

#[derive(Debug)]
pub(crate) struct CliUserInputDelegate {
    buf: String,
}

impl CliUserInputDelegate {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    fn read_user_input(&mut self) {
        self.buf.clear();
        io::stdin()
            .read_line(&mut self.buf)
            .expect("Unable to read from stdin!");
    }

    fn get_item_index_of_item(&mut self, num_items: usize) -> usize {
        loop {
            self.read_user_input();
            let input = self.buf.trim();

            let n = match input.parse() {
                Ok(n) => n,
                Err(_) => {
                    println!("Is not parsable to a non-negative integer.");
                    continue;
                },
            };

            if n >= num_items {
                println!(
                    "{} is not an item selection between 0 - {}",
                    n,
                    num_items - 1
                );
                continue;
            }

            return n;
        }
    }

    fn get_item_indices(&mut self, num_items: usize) -> Vec<usize> {
        loop {
            self.read_user_input();
            let input = self.buf.trim();

            // An empty selection is valid and means "none of them".
            if input.is_empty() {
                return Vec::new();
            }

            let parsed: Result<Vec<usize>, _> = input
                .split([' ', ','])
                .filter(|s| !s.is_empty())
                .map(|s| s.parse())
                .collect();

            let mut indices = match parsed {
                Ok(indices) => indices,
                Err(_) => {
                    println!("Is not parsable to a list of non-negative integers (eg. \"0 2 3\").");
                    continue;
                },
            };

            if let Some(out_of_range) = indices.iter().find(|&&n| n >= num_items) {
                println!(
                    "{} is not an item selection between 0 - {}",
                    out_of_range,
                    num_items - 1
                );
                continue;
            }

            indices.sort_unstable();
            indices.dedup();

            return indices;
        }
    }
}

impl UserInputDelegate for CliUserInputDelegate {
    fn get_yes_no_resp(&mut self, prompt: &str) -> bool {
        println!("{} (y/n)", prompt);
        self.read_user_input();

        // Assume anything else is a `no` for now.
        let input = self.buf.trim().to_lowercase();
        input.starts_with("y") || input.starts_with("yes")
    }

    fn select_item_from_list<T: Display>(&mut self, prompt: &str, items: &[T]) -> usize {
        println!("{}", prompt);

        for (i, item) in items.iter().enumerate() {
            println!("{i} - {item}");
        }

        self.get_item_index_of_item(items.len())
    }

    fn select_items_from_list<T: Display>(&mut self, prompt: &str, items: &[T]) -> Vec<usize> {
        println!("{} (space separated, empty for none)", prompt);

        for (i, item) in items.iter().enumerate() {
            println!("{i} - {item}");
        }

        self.get_item_indices(items.len())
    }

    fn display_run_summary(&mut self, summary: &RunSummary) {
        report::print_run_summary(summary);
    }
}
