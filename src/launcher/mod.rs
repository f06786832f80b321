//! Launch planning and dispatch.
//!
//! Turns a resolved directory and an action into one concrete process
//! invocation: an enhanced terminal when one is on the search path, the
//! platform's baseline shell host otherwise, or a pre-installed automation
//! script when the menu host owns terminal creation.

mod probe;
mod quote;
mod spawn;


pub use spawn::{launch, LaunchError};

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::assets;
use crate::command::CommandSpec;
use crate::config::Config;
use crate::resolve;
use crate::selection::{SelectionContext, SelectionProvider};

/// Enhanced terminals probed for on the search path, in preference order.
#[cfg(target_os = "windows")]
const RICH_TERMINALS: &[&str] = &["wt.exe"];
#[cfg(target_os = "macos")]
const RICH_TERMINALS: &[&str] = &["alacritty", "kitty", "wezterm"];
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const RICH_TERMINALS: &[&str] = &[
    "alacritty",
    "kitty",
    "wezterm",
    "gnome-terminal",
    "konsole",
    "xfce4-terminal",
];

/// How a plan will be realized on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    /// An enhanced terminal emulator found on the search path.
    RichTerminal,
    /// The platform's baseline shell host.
    FallbackShell,
    /// A pre-installed automation script owns terminal creation.
    Script,
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RichTerminal => "rich-terminal",
            Self::FallbackShell => "fallback-shell",
            Self::Script => "automation-script",
        })
    }
}

/// A fully-built launch: program, argument vector, working directory.
/// Constructed fresh per invocation and discarded once the process starts.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub mechanism: Mechanism,
    pub program: OsString,
    pub args: Vec<OsString>,
    pub workdir: PathBuf,
}

/// Build the launch for `spec` inside `target` with the default assistant
/// command, probing the inherited search path.
pub fn plan(target: &Path, spec: CommandSpec) -> LaunchPlan {
    plan_command(
        target,
        &spec.assistant_command(CommandSpec::DEFAULT_ASSISTANT),
        None,
    )
}

/// Build the launch for an opaque `command` inside `target`. `preferred`
/// is probed before the built-in terminal order. Probing never fails;
/// absence of every candidate selects the baseline shell host.
pub fn plan_command(target: &Path, command: &str, preferred: Option<&str>) -> LaunchPlan {
    let search_list = std::env::var_os("PATH").unwrap_or_default();
    plan_in(target, command, &search_list, preferred)
}

fn plan_in(target: &Path, command: &str, search_list: &OsStr, preferred: Option<&str>) -> LaunchPlan {
    let mut names: Vec<&str> = Vec::with_capacity(RICH_TERMINALS.len() + 1);
    if let Some(name) = preferred {
        names.push(name);
    }
    names.extend_from_slice(RICH_TERMINALS);

    match probe::first_on_search_list(&names, search_list) {
        Some((name, program)) => rich_terminal_plan(name, program, target, command),
        None => fallback_shell_plan(target, command),
    }
}

/// Menu-driven realization: the pre-installed helper script owns terminal
/// creation and receives the resolved directory as its only argument.
pub fn plan_script(target: &Path, spec: CommandSpec) -> anyhow::Result<LaunchPlan> {
    let script = assets::script_path(&assets::scripts_dir()?, spec.script_name());
    Ok(LaunchPlan {
        mechanism: Mechanism::Script,
        program: OsString::from("osascript"),
        args: vec![script.into(), target.into()],
        workdir: target.to_path_buf(),
    })
}

/// Run one menu invocation end to end: inspect the host selection, resolve
/// the working directory, plan, launch. Fire-and-forget: every failure is
/// logged and absorbed, matching context-menu conventions, and concurrent
/// invocations share no state.
pub fn dispatch(provider: &dyn SelectionProvider, spec: CommandSpec, via_script: bool) {
    let ctx = SelectionContext::from_provider(provider);
    let target = match resolve::resolve(&ctx) {
        Ok(dir) => dir,
        Err(err) => {
            tracing::warn!(action = spec.cli_verb(), "{err}");
            return;
        }
    };

    let plan = if via_script {
        match plan_script(&target, spec) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::error!(action = spec.cli_verb(), "could not plan script launch: {err:#}");
                return;
            }
        }
    } else {
        let config = Config::load().unwrap_or_else(|err| {
            tracing::warn!("config unreadable, using defaults: {err:#}");
            Config::default()
        });
        let command = spec.assistant_command(config.assistant.base_command());
        plan_command(&target, &command, config.terminal.command.as_deref())
    };

    tracing::debug!(
        mechanism = %plan.mechanism,
        dir = %plan.workdir.display(),
        "launching"
    );
    if let Err(err) = launch(&plan) {
        tracing::error!(action = spec.cli_verb(), "{err}");
    }
}

/// Run the command, then hand the window to an interactive shell so it
/// stays open.
fn keep_open(command: &str) -> String {
    format!("{command}; exec \"${{SHELL:-sh}}\"")
}

fn rich_terminal_plan(name: &str, program: PathBuf, target: &Path, command: &str) -> LaunchPlan {
    let dir: OsString = target.into();
    let args: Vec<OsString> = match name {
        "wt.exe" => vec![
            "-d".into(),
            dir,
            "cmd".into(),
            "/k".into(),
            command.into(),
        ],
        "alacritty" => vec![
            "--working-directory".into(),
            dir,
            "-e".into(),
            "sh".into(),
            "-c".into(),
            keep_open(command).into(),
        ],
        "kitty" => vec![
            "--directory".into(),
            dir,
            "sh".into(),
            "-c".into(),
            keep_open(command).into(),
        ],
        "wezterm" => vec![
            "start".into(),
            "--cwd".into(),
            dir,
            "--".into(),
            "sh".into(),
            "-c".into(),
            keep_open(command).into(),
        ],
        "gnome-terminal" => vec![
            "--working-directory".into(),
            dir,
            "--".into(),
            "sh".into(),
            "-c".into(),
            keep_open(command).into(),
        ],
        "konsole" => vec![
            "--workdir".into(),
            dir,
            "-e".into(),
            "sh".into(),
            "-c".into(),
            keep_open(command).into(),
        ],
        "xfce4-terminal" => vec![
            "--working-directory".into(),
            dir,
            "-x".into(),
            "sh".into(),
            "-c".into(),
            keep_open(command).into(),
        ],
        // A configured override without a known workdir flag: change
        // directory inside the command line instead.
        _ => vec![
            "-e".into(),
            "sh".into(),
            "-c".into(),
            format!(
                "cd {} && {}",
                quote::sh_single_quote(&target.to_string_lossy()),
                keep_open(command)
            )
            .into(),
        ],
    };

    LaunchPlan {
        mechanism: Mechanism::RichTerminal,
        program: program.into_os_string(),
        args,
        workdir: target.to_path_buf(),
    }
}

fn fallback_shell_plan(target: &Path, command: &str) -> LaunchPlan {
    if cfg!(target_os = "windows") {
        cmd_exe_plan(target, command)
    } else if cfg!(target_os = "macos") {
        terminal_app_plan(target, command)
    } else {
        xterm_plan(target, command)
    }
}

/// `cmd /k "cd /d "<dir>" && <command>"`; the window outlives the command
/// because of `/k`.
fn cmd_exe_plan(target: &Path, command: &str) -> LaunchPlan {
    let line = format!(
        "cd /d {} && {}",
        quote::cmd_double_quote(&target.display().to_string()),
        command
    );
    LaunchPlan {
        mechanism: Mechanism::FallbackShell,
        program: OsString::from("cmd.exe"),
        args: vec!["/k".into(), line.into()],
        workdir: target.to_path_buf(),
    }
}

/// Drive Terminal.app through `osascript`; `do script` opens a window that
/// survives command completion.
fn terminal_app_plan(target: &Path, command: &str) -> LaunchPlan {
    let line = format!(
        "cd {} && {}",
        quote::sh_single_quote(&target.to_string_lossy()),
        command
    );
    let script = format!(
        "tell application \"Terminal\"\n    activate\n    do script {}\nend tell",
        quote::applescript_string(&line)
    );
    LaunchPlan {
        mechanism: Mechanism::FallbackShell,
        program: OsString::from("osascript"),
        args: vec!["-e".into(), script.into()],
        workdir: target.to_path_buf(),
    }
}

fn xterm_plan(target: &Path, command: &str) -> LaunchPlan {
    let line = format!(
        "cd {} && {}",
        quote::sh_single_quote(&target.to_string_lossy()),
        keep_open(command)
    );
    LaunchPlan {
        mechanism: Mechanism::FallbackShell,
        program: OsString::from("xterm"),
        args: vec!["-e".into(), "sh".into(), "-c".into(), line.into()],
        workdir: target.to_path_buf(),
    }
}
