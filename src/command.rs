/// The two context-menu actions, shared by every host integration.
///
/// Both actions run the same pipeline and differ only in the strings below,
/// so a single enum replaces per-action command objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSpec {
    /// Start a fresh assistant session in the resolved directory.
    Open,
    /// Reopen the assistant's interactive session picker there.
    Resume,
}

impl CommandSpec {
    pub const ALL: [Self; 2] = [Self::Open, Self::Resume];

    /// Assistant binary the argument strings are built from, absent a
    /// configured override.
    pub const DEFAULT_ASSISTANT: &'static str = "claude";

    /// Menu entry title, as the host displays it.
    pub fn title(self) -> &'static str {
        match self {
            Self::Open => "Open with Claude Code",
            Self::Resume => "Resume Chat with Claude",
        }
    }

    /// Stem of the helper script that realizes this action on the
    /// menu-driven macOS host.
    pub fn script_name(self) -> &'static str {
        match self {
            Self::Open => "open-claude",
            Self::Resume => "resume-claude",
        }
    }

    /// CLI subcommand name; host glue builds its command lines from this.
    pub fn cli_verb(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resume => "resume",
        }
    }

    /// Registry verb id for the Explorer context-menu entries.
    pub fn registry_verb(self) -> &'static str {
        match self {
            Self::Open => "ClaudeCodeOpen",
            Self::Resume => "ClaudeCodeResume",
        }
    }

    /// The opaque command string handed to the launched shell. `base` is
    /// the assistant binary or command prefix.
    pub fn assistant_command(self, base: &str) -> String {
        match self {
            Self::Open => base.to_string(),
            Self::Resume => format!("{base} --resume"),
        }
    }
}
