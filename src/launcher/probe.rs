use std::ffi::OsStr;
use std::path::PathBuf;

/// Walk a PATH-style `search_list` and return the full path of the first
/// directory entry containing a file named exactly `name`. Missing or
/// unreadable directories are skipped, never fatal.
pub(super) fn find_in_search_list(name: &str, search_list: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_list).find_map(|dir| {
        if dir.as_os_str().is_empty() {
            return None;
        }
        let candidate = dir.join(name);
        candidate.is_file().then_some(candidate)
    })
}

/// Probe `names` in order against the whole search list; the first name
/// found anywhere wins.
pub(super) fn first_on_search_list<'a>(
    names: &[&'a str],
    search_list: &OsStr,
) -> Option<(&'a str, PathBuf)> {
    names
        .iter()
        .find_map(|name| find_in_search_list(name, search_list).map(|path| (*name, path)))
}
