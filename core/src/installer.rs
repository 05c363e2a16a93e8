//! Stopping running game instances and running downloaded installer jars.

use std::{
    io,
    process::{Command, ExitStatus},
};

use camino::{Utf8Path, Utf8PathBuf};
use log::{info, warn};
use sysinfo::{ProcessRefreshKind, System, UpdateKind};
use thiserror::Error;

pub type InstallerResult<T> = Result<T, InstallerError>;

#[derive(Debug, Error)]
pub enum InstallerError {
    #[error("Unable to run \"java\". Check that Java is installed and on your PATH. ({0})")]
    JavaNotRunnable(io::Error),

    #[error("Running \"java -jar {0}\" exited with {1}.")]
    InstallerExitedWithFailure(Utf8PathBuf, ExitStatus),
}

/// Kills any process that looks like a running game instance and returns how
/// many were stopped.
///
/// The game only rescans its mods folder on startup, so an instance that
/// survives an upgrade would keep running with the old mod set.
pub fn stop_running_game_processes() -> usize {
    let mut system = System::new();
    // The plain `refresh_processes()` skips command lines, which the match
    // below reads.
    system.refresh_processes_specifics(ProcessRefreshKind::new().with_cmd(UpdateKind::Always));

    // Our own command line usually names the mods folder, which would match
    // the check below.
    let own_pid = sysinfo::get_current_pid().ok();
    let mut stopped = 0;

    for (pid, process) in system.processes() {
        if own_pid == Some(*pid) {
            continue;
        }

        let name_matches = process.name().to_lowercase().contains("minecraft");
        let cmd_matches = process
            .cmd()
            .iter()
            .any(|arg| arg.to_lowercase().contains("minecraft"));

        if name_matches || cmd_matches {
            info!(
                "Stopping the running game process \"{}\" ({}).",
                process.name(),
                pid
            );

            if process.kill() {
                stopped += 1;
            } else {
                warn!(
                    "Unable to stop \"{}\" ({}). Close it by hand before continuing.",
                    process.name(),
                    pid
                );
            }
        }
    }

    stopped
}

pub fn run_installer_jar(jar: &Utf8Path) -> InstallerResult<()> {
    info!("Running the installer at \"{}\"...", jar);

    let status = Command::new("java")
        .arg("-jar")
        .arg(jar)
        .status()
        .map_err(InstallerError::JavaNotRunnable)?;

    if !status.success() {
        return Err(InstallerError::InstallerExitedWithFailure(
            jar.to_owned(),
            status,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{process::Command, thread, time::Duration};

    use super::stop_running_game_processes;

    #[cfg(unix)]
    #[test]
    fn a_process_mentioning_minecraft_is_stopped_and_counted() {
        let mut child = Command::new("sh")
            .args(["-c", "while :; do sleep 1; done # minecraft"])
            .spawn()
            .unwrap();

        // Let the shell land in the process table before scanning it.
        thread::sleep(Duration::from_millis(250));

        let stopped = stop_running_game_processes();

        // Reap the child no matter what happened above.
        let _ = child.kill();
        let status = child.wait().unwrap();

        assert!(stopped >= 1);
        assert!(!status.success());
    }
}
