use anyhow::{Context, Result};

use crate::assets::EXTENSION_BUNDLE_ID;

/// Whether the Finder Sync extension is currently enabled, asked of
/// `pluginkit` each time. There is no push notification for this; callers
/// re-poll.
pub fn extension_enabled() -> Result<bool> {
    let output = std::process::Command::new("/usr/bin/pluginkit")
        .args(["-m", "-p", "com.apple.FinderSync"])
        .output()
        .context("Failed to run pluginkit")?;

    Ok(parse_pluginkit(
        &String::from_utf8_lossy(&output.stdout),
        EXTENSION_BUNDLE_ID,
    ))
}

/// `pluginkit -m` marks each plugin line with `+` (enabled), `-`
/// (disabled), or nothing (registered, not configured). Only an explicit
/// `+` counts.
pub(crate) fn parse_pluginkit(output: &str, bundle_id: &str) -> bool {
    for line in output.lines() {
        if line.contains(bundle_id) {
            return line.trim_start().starts_with('+');
        }
    }
    false
}

/// Whether the assistant CLI itself is reachable on the search path.
pub fn assistant_on_path(command: &str) -> bool {
    which::which(command).is_ok()
}
