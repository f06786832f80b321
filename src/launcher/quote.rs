//! Quoting for the three syntaxes launch plans embed strings into.

/// Wrap `s` in single quotes for POSIX `sh`, escaping embedded single
/// quotes with the close-escape-reopen idiom.
pub(super) fn sh_single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Wrap `s` in double quotes for a `cmd.exe` command line. Explorer never
/// hands over paths containing `"`.
pub(super) fn cmd_double_quote(s: &str) -> String {
    format!("\"{s}\"")
}

/// A double-quoted AppleScript string literal.
pub(super) fn applescript_string(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
