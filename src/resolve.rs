use std::path::PathBuf;
use thiserror::Error;

use crate::selection::SelectionContext;

/// Failure to determine any working directory for a menu invocation.
/// Terminal for the invocation; never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// Neither a usable selection nor a targeted container was supplied.
    #[error("no selection or targeted folder to act on")]
    NoTarget,
}

/// Pick the single working directory for a menu invocation.
///
/// The first selected entry wins, regardless of how many the host reports:
/// a directory is used as-is, a file is replaced by its parent. When the
/// selection is empty or its first entry is gone from disk, the targeted
/// container is used verbatim, trusting the host. Exactly one stat hits the
/// filesystem per call.
pub fn resolve(ctx: &SelectionContext) -> Result<PathBuf, ResolutionError> {
    if let Some(first) = ctx.selected.first() {
        if let Ok(meta) = std::fs::metadata(first) {
            if meta.is_dir() {
                return Ok(first.clone());
            }
            // A file: its parent is the session directory. Hosts pass
            // absolute paths, so a parentless entry falls through to the
            // container like a missing one.
            if let Some(parent) = first.parent().filter(|p| !p.as_os_str().is_empty()) {
                return Ok(parent.to_path_buf());
            }
        }
    }

    ctx.container.clone().ok_or(ResolutionError::NoTarget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn ctx(selected: Vec<PathBuf>, container: Option<&str>) -> SelectionContext {
        SelectionContext::new(selected, container.map(PathBuf::from))
    }

    #[test]
    fn selected_directory_is_returned_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let got = resolve(&ctx(vec![dir.path().to_path_buf()], None)).unwrap();
        assert_eq!(got, dir.path());
    }

    #[test]
    fn selected_file_resolves_to_its_parent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.go");
        std::fs::write(&file, "package main\n").unwrap();
        let got = resolve(&ctx(vec![file], None)).unwrap();
        assert_eq!(got, dir.path());
    }

    #[test]
    fn empty_selection_uses_container_verbatim() {
        // The container is not stat'd: a nonexistent path comes back as-is.
        let got = resolve(&ctx(vec![], Some("/Users/x/Downloads"))).unwrap();
        assert_eq!(got, Path::new("/Users/x/Downloads"));
    }

    #[test]
    fn missing_selected_entry_falls_back_to_container() {
        let got = resolve(&ctx(
            vec![PathBuf::from("/definitely/not/here")],
            Some("/fallback"),
        ))
        .unwrap();
        assert_eq!(got, Path::new("/fallback"));
    }

    #[test]
    fn missing_entry_without_container_fails() {
        let err = resolve(&ctx(vec![PathBuf::from("/definitely/not/here")], None)).unwrap_err();
        assert_eq!(err, ResolutionError::NoTarget);
    }

    #[test]
    fn nothing_to_act_on_fails() {
        let err = resolve(&ctx(vec![], None)).unwrap_err();
        assert_eq!(err, ResolutionError::NoTarget);
    }

    #[test]
    fn only_the_first_selected_entry_counts() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "x").unwrap();
        let other = tempfile::tempdir().unwrap();

        let got = resolve(&ctx(vec![file, other.path().to_path_buf()], None)).unwrap();
        assert_eq!(got, dir.path());
    }

    #[test]
    fn selection_beats_container() {
        let dir = tempfile::tempdir().unwrap();
        let got = resolve(&ctx(
            vec![dir.path().to_path_buf()],
            Some("/elsewhere"),
        ))
        .unwrap();
        assert_eq!(got, dir.path());
    }
}
