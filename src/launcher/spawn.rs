use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

use super::{LaunchPlan, Mechanism};

/// Ways a planned launch can fail to start. Terminal for the invocation,
/// logged by the dispatcher, never retried and never shown as a dialog.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("helper script missing at {}", .0.display())]
    ScriptMissing(PathBuf),
}

/// Start the planned process detached from the caller. Returns as soon as
/// the child is running; terminal windows are never waited on and their
/// lifetime is not ours.
pub fn launch(plan: &LaunchPlan) -> Result<(), LaunchError> {
    if plan.mechanism == Mechanism::Script {
        if let Some(script) = plan.args.first().map(Path::new) {
            if !script.is_file() {
                return Err(LaunchError::ScriptMissing(script.to_path_buf()));
            }
        }
    }

    let mut command = Command::new(&plan.program);
    command
        .args(&plan.args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if plan.mechanism != Mechanism::Script {
        // The script receives the directory as an argument instead; its
        // runner must start even when the host-reported container is stale.
        command.current_dir(&plan.workdir);
    }

    let mut child = command.spawn().map_err(|source| LaunchError::Spawn {
        program: plan.program.to_string_lossy().into_owned(),
        source,
    })?;

    if plan.mechanism == Mechanism::Script {
        // The script runner is short-lived. Reap it off-thread and log a
        // failed run; denied automation permission surfaces here.
        let program = plan.program.to_string_lossy().into_owned();
        std::thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => {
                tracing::warn!("{program} exited with {status}");
            }
            Err(err) => tracing::warn!("could not reap {program}: {err}"),
            Ok(_) => {}
        });
    }

    Ok(())
}
