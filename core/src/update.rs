//! Compares each resolved catalog record against the local file it came from
//! and collects the files worth replacing.

use log::debug;
use mc_mod_updater_rs_utils::types::{ModLoader, UpdateCandidate, UpdateReport};

use crate::{
    filename::{diff_between_files, leading_token},
    record::RemoteModRecord,
};

/// Runs the per-mod update check over every resolved mod and aggregates the
/// outcomes into a single report.
///
/// `target_version` equals `current_version` when the folder is already on
/// the newest game version, and the newest known version otherwise.
pub fn check_for_updates(
    resolved: &[(String, RemoteModRecord)],
    current_version: &str,
    target_version: &str,
    loader: ModLoader,
) -> UpdateReport {
    let mut report = UpdateReport::default();

    for (local_file, record) in resolved {
        check_one_mod(
            &mut report,
            local_file,
            record,
            current_version,
            target_version,
            loader,
        );
    }

    report
}

fn check_one_mod(
    report: &mut UpdateReport,
    local_file: &str,
    record: &RemoteModRecord,
    current_version: &str,
    target_version: &str,
    loader: ModLoader,
) {
    let candidates = record.files_for_version(target_version, loader);

    if candidates.is_empty() {
        // Nothing for a *future* version is expected. Nothing for the version
        // the folder is already on means the mod page needs a human look.
        if target_version == current_version {
            report
                .errors
                .push(no_candidate_error_msg(record, target_version));
        } else {
            debug!(
                "\"{}\" has no file for {} yet.",
                record.display_name(),
                target_version
            );
        }
        return;
    }

    let local_leading = leading_token(local_file);

    for candidate in candidates {
        if candidate.file_name == local_file {
            report
                .messages
                .push(format!("\"{}\" is already up to date.", local_file));
            return;
        }

        // The list is newest first, so once the leading token stops matching
        // we are past this mod's own file series and nothing further down
        // will match better.
        if leading_token(&candidate.file_name) != local_leading {
            debug!(
                "Stopping the scan for \"{}\" at \"{}\".",
                local_file, candidate.file_name
            );
            break;
        }

        if !diff_between_files(local_file, &candidate.file_name).is_empty() {
            report.updates.push(UpdateCandidate {
                local_file: local_file.to_string(),
                remote_file: candidate.file_name,
                download_url: candidate.download_url,
            });
            return;
        }
    }

    report
        .messages
        .push(format!("No newer file than \"{}\" was found.", local_file));
}

fn no_candidate_error_msg(record: &RemoteModRecord, target_version: &str) -> String {
    if record.has_any_available_file() {
        format!(
            "\"{}\" has files, but none for version {}. Check {} by hand.",
            record.display_name(),
            target_version,
            record.page_url()
        )
    } else {
        format!(
            "No downloadable file is available for \"{}\" at all. Check {} by hand.",
            record.display_name(),
            record.page_url()
        )
    }
}
