use anyhow::Result;
use std::fmt;

use crate::command::CommandSpec;
use crate::config::Config;

/// One line of the status surface: a named readiness signal, re-derived
/// from the filesystem or host tooling on every query.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRow {
    pub label: &'static str,
    pub ready: bool,
    pub detail: String,
}

impl fmt::Display for StatusRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.detail)
    }
}

/// Install the context-menu integration for the current user. Idempotent;
/// re-running overwrites whatever is already there.
pub fn install() -> Result<()> {
    platform_install()
}

pub fn uninstall() -> Result<()> {
    platform_uninstall()
}

/// Current readiness. Never cached and never trusting a previous install
/// call's return value.
pub fn status() -> Result<Vec<StatusRow>> {
    let mut rows = platform_status()?;
    rows.push(assistant_row());
    Ok(rows)
}

fn assistant_row() -> StatusRow {
    let config = Config::load().unwrap_or_default();
    let name = config.assistant.base_command().to_string();
    let ready = crate::status::assistant_on_path(&name);
    let detail = if ready {
        format!("{name} found on PATH")
    } else {
        format!("{name} not found on PATH")
    };
    StatusRow {
        label: "Assistant CLI",
        ready,
        detail,
    }
}

// ──────────────────────────── macOS ────────────────────────────

#[cfg(target_os = "macos")]
fn platform_install() -> Result<()> {
    use crate::assets;

    let dir = assets::scripts_dir()?;
    if assets::install()? {
        println!("Installed helper scripts to {}", dir.display());
    } else {
        println!("Helper scripts partially installed; run `claude-menu status`.");
    }

    if !crate::status::extension_enabled().unwrap_or(false) {
        println!("Enable the Finder extension under System Settings > Extensions:");
        println!("  open \"x-apple.systempreferences:com.apple.ExtensionsPreferences\"");
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn platform_uninstall() -> Result<()> {
    use anyhow::Context;
    use crate::assets;

    let dir = assets::scripts_dir()?;
    if dir.exists() {
        std::fs::remove_dir_all(&dir)
            .with_context(|| format!("Failed to remove {}", dir.display()))?;
        println!("Removed {}", dir.display());
    } else {
        println!("Not installed, nothing to remove.");
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn platform_status() -> Result<Vec<StatusRow>> {
    use crate::assets;

    let installed = assets::installed()?;
    let enabled = crate::status::extension_enabled().unwrap_or(false);
    Ok(vec![
        StatusRow {
            label: "Helper scripts",
            ready: installed,
            detail: if installed { "Installed" } else { "Not installed" }.to_string(),
        },
        StatusRow {
            label: "Finder extension",
            ready: enabled,
            detail: if enabled { "Enabled" } else { "Not enabled" }.to_string(),
        },
    ])
}

// ──────────────────────────── Windows ────────────────────────────

#[cfg(target_os = "windows")]
const SHELL_ROOTS: &[&str] = &[
    r"HKCU\Software\Classes\Directory\shell",
    r"HKCU\Software\Classes\Directory\Background\shell",
    r"HKCU\Software\Classes\Drive\shell",
];

#[cfg(target_os = "windows")]
fn verb_key(root: &str, spec: CommandSpec) -> String {
    format!(r"{root}\{}", spec.registry_verb())
}

#[cfg(target_os = "windows")]
fn platform_install() -> Result<()> {
    use anyhow::{bail, Context};
    use std::process::Command;

    let exe = std::env::current_exe()
        .context("Failed to get current executable path")?
        .display()
        .to_string();

    let run = |args: &[&str]| -> Result<()> {
        let status = Command::new("reg")
            .args(args)
            .status()
            .context("Failed to run `reg`")?;
        if !status.success() {
            bail!("reg command failed");
        }
        Ok(())
    };

    for root in SHELL_ROOTS {
        for spec in CommandSpec::ALL {
            let key = verb_key(root, spec);
            run(&["add", &key, "/d", spec.title(), "/f"])?;
            run(&["add", &key, "/v", "Icon", "/d", "claude.exe", "/f"])?;

            // The background verb has no selected item; %V is the open
            // folder, so it maps to the targeted container.
            let command = if root.contains("Background") {
                format!(r#""{exe}" {} --target "%V""#, spec.cli_verb())
            } else {
                format!(r#""{exe}" {} "%V""#, spec.cli_verb())
            };
            run(&["add", &format!(r"{key}\command"), "/d", &command, "/f"])?;
        }
    }

    println!("Registered Explorer context-menu entries.");
    Ok(())
}

#[cfg(target_os = "windows")]
fn platform_uninstall() -> Result<()> {
    use std::process::Command;

    for root in SHELL_ROOTS {
        for spec in CommandSpec::ALL {
            // Absent keys are fine; uninstall stays idempotent.
            let _ = Command::new("reg")
                .args(["delete", &verb_key(root, spec), "/f"])
                .status();
        }
    }
    println!("Removed Explorer context-menu entries.");
    Ok(())
}

#[cfg(target_os = "windows")]
fn platform_status() -> Result<Vec<StatusRow>> {
    use anyhow::Context;
    use std::process::Command;

    let mut registered = true;
    for spec in CommandSpec::ALL {
        let output = Command::new("reg")
            .args(["query", &verb_key(SHELL_ROOTS[0], spec)])
            .output()
            .context("Failed to query registry")?;
        registered &= output.status.success();
    }

    Ok(vec![StatusRow {
        label: "Explorer menu",
        ready: registered,
        detail: if registered {
            "Registered"
        } else {
            "Not registered"
        }
        .to_string(),
    }])
}

// ──────────────────────────── Linux ────────────────────────────

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn file_manager_scripts_dir() -> Result<std::path::PathBuf> {
    use anyhow::Context;

    let data = dirs::data_local_dir().context("Could not determine local data directory")?;
    Ok(data.join("nautilus").join("scripts"))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_install() -> Result<()> {
    use anyhow::Context;
    use std::os::unix::fs::PermissionsExt;

    let exe = std::env::current_exe().context("Failed to get current executable path")?;
    let dir = file_manager_scripts_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for spec in CommandSpec::ALL {
        // The script's filename is the menu label. GNOME Files runs it
        // with the view's directory as cwd and the selection in
        // NAUTILUS_SCRIPT_SELECTED_FILE_PATHS, one path per line.
        let path = dir.join(spec.title());
        let script = format!(
            "#!/bin/sh\nIFS='\n'\nset -- $NAUTILUS_SCRIPT_SELECTED_FILE_PATHS\nexec \"{exe}\" {verb} --target \"$PWD\" \"$@\"\n",
            exe = exe.display(),
            verb = spec.cli_verb()
        );
        std::fs::write(&path, script)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to mark {} executable", path.display()))?;
    }

    println!("Installed Files context-menu scripts to {}", dir.display());
    Ok(())
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_uninstall() -> Result<()> {
    use anyhow::Context;

    let dir = file_manager_scripts_dir()?;
    let mut removed = false;
    for spec in CommandSpec::ALL {
        let path = dir.join(spec.title());
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            removed = true;
        }
    }
    if removed {
        println!("Removed Files context-menu scripts from {}", dir.display());
    } else {
        println!("Not installed, nothing to remove.");
    }
    Ok(())
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_status() -> Result<Vec<StatusRow>> {
    let dir = file_manager_scripts_dir()?;
    let installed = CommandSpec::ALL
        .iter()
        .all(|spec| dir.join(spec.title()).is_file());

    Ok(vec![StatusRow {
        label: "Files scripts",
        ready: installed,
        detail: if installed { "Installed" } else { "Not installed" }.to_string(),
    }])
}
