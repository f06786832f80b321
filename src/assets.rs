use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Bundle id of the Finder Sync extension. Its sandbox only runs user
/// scripts from the per-extension directory derived from this.
pub const EXTENSION_BUNDLE_ID: &str = "com.anthropic.ClaudeCodeMenu.FinderExtension";

/// Helper scripts by stem, with their embedded AppleScript sources. Each
/// receives the resolved directory as its run argument and owns terminal
/// creation from there.
const SCRIPTS: [(&str, &str); 2] = [
    (
        "open-claude",
        include_str!("../payloads/open-claude.applescript"),
    ),
    (
        "resume-claude",
        include_str!("../payloads/resume-claude.applescript"),
    ),
];

/// `~/Library/Application Scripts/<extension-bundle-id>`
pub fn scripts_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join("Library")
        .join("Application Scripts")
        .join(EXTENSION_BUNDLE_ID))
}

/// Install path of one helper script inside `dir`.
pub fn script_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.scpt"))
}

/// True when every helper script is present by exact filename. This is the
/// sole installed signal; no install-time bookkeeping is consulted.
pub fn installed_in(dir: &Path) -> bool {
    SCRIPTS
        .iter()
        .all(|(name, _)| script_path(dir, name).is_file())
}

pub fn installed() -> Result<bool> {
    Ok(installed_in(&scripts_dir()?))
}

/// Write every helper script into `dir`, replacing existing copies
/// (last-writer-wins, safe to re-run). A script that cannot be written is
/// skipped and the pass reports partial failure; the caller re-derives
/// installed status from the filesystem, not from this value.
pub fn install_into(dir: &Path) -> Result<bool> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create scripts directory {}", dir.display()))?;

    let mut all_installed = true;
    for (name, source) in SCRIPTS {
        let dest = script_path(dir, name);
        if let Err(err) = write_script(&dest, source) {
            tracing::warn!("could not install {name}.scpt: {err:#}");
            all_installed = false;
        }
    }
    Ok(all_installed)
}

pub fn install() -> Result<bool> {
    install_into(&scripts_dir()?)
}

fn write_script(dest: &Path, source: &str) -> Result<()> {
    if dest.exists() {
        std::fs::remove_file(dest)
            .with_context(|| format!("Failed to replace {}", dest.display()))?;
    }
    std::fs::write(dest, source)
        .with_context(|| format!("Failed to write {}", dest.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(dest, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to mark {} executable", dest.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_writes_both_scripts() {
        let dir = tempfile::tempdir().unwrap();
        assert!(install_into(dir.path()).unwrap());
        assert!(installed_in(dir.path()));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn install_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(install_into(dir.path()).unwrap());
        assert!(install_into(dir.path()).unwrap());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn reinstall_restores_a_deleted_script() {
        let dir = tempfile::tempdir().unwrap();
        install_into(dir.path()).unwrap();

        std::fs::remove_file(script_path(dir.path(), "resume-claude")).unwrap();
        assert!(!installed_in(dir.path()));

        assert!(install_into(dir.path()).unwrap());
        assert!(installed_in(dir.path()));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn reinstall_overwrites_a_modified_script() {
        let dir = tempfile::tempdir().unwrap();
        install_into(dir.path()).unwrap();

        let target = script_path(dir.path(), "open-claude");
        std::fs::write(&target, "-- scribbled over\n").unwrap();

        install_into(dir.path()).unwrap();
        let content = std::fs::read_to_string(&target).unwrap();
        assert!(content.contains("on run argv"), "{content}");
    }

    #[test]
    fn missing_scripts_mean_not_installed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!installed_in(dir.path()));
    }

    #[test]
    fn scripts_cover_both_actions() {
        use crate::command::CommandSpec;
        for spec in CommandSpec::ALL {
            assert!(SCRIPTS.iter().any(|(name, _)| *name == spec.script_name()));
        }
    }
}
