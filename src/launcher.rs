use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use strum::EnumString;
use thiserror::Error;

/// File stem of the chat executable the launcher starts.
pub const COMPANION: &str = "astro-chat";

pub const SPLASH: &str = "🚀\nAstro AI\nPrivate AI Chat Application";

pub const ABOUT: &str = "Astro AI - Private AI Chat Application

This is a rebranded version of the GPT4All application,
customized for your company.

Features:
• Private, local AI conversations
• No data sent to external servers
• Support for multiple LLM models
• Document search with LocalDocs
• OpenAI-compatible API server
• Cross-platform desktop application

Note: This demo showcases the rebranded interface.
The full application requires model downloads and
additional setup for complete functionality.

Your company: Astro AI
Technology: Based on GPT4All open-source project";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Demo application not found at {}", .0.display())]
    CompanionNotFound(PathBuf),

    #[error("Failed to locate the launcher executable")]
    CurrentExe(#[source] io::Error),

    #[error("Failed to launch {}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exited with {status}", .path.display())]
    Failed {
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

/// Menu entries on the splash screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Choice {
    #[strum(serialize = "1", serialize = "launch", serialize = "l")]
    Launch,
    #[strum(serialize = "2", serialize = "about", serialize = "a")]
    About,
    #[strum(serialize = "3", serialize = "exit", serialize = "quit", serialize = "q")]
    Exit,
}

pub const MENU: &str = "[1] Launch Astro AI Demo   [2] About   [3] Exit";

/// A child that ran to completion with a successful status.
#[derive(Debug)]
pub struct Finished {
    pub status: ExitStatus,
    pub stderr: String,
}

/// The chat executable sitting next to the running launcher.
pub fn companion_path() -> Result<PathBuf, LaunchError> {
    let exe = std::env::current_exe().map_err(LaunchError::CurrentExe)?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));

    Ok(dir.join(format!("{COMPANION}{}", std::env::consts::EXE_SUFFIX)))
}

/// Runs `path` with no arguments and waits for it. The child shares the
/// terminal for input and output; its stderr is captured for reporting.
pub async fn launch(path: &Path) -> Result<Finished, LaunchError> {
    if !path.is_file() {
        return Err(LaunchError::CompanionNotFound(path.to_owned()));
    }

    tracing::info!("Launching {}", path.display());

    let output = tokio::process::Command::new(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| LaunchError::Spawn {
            path: path.to_owned(),
            source,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(LaunchError::Failed {
            path: path.to_owned(),
            status: output.status,
            stderr,
        });
    }

    Ok(Finished {
        status: output.status,
        stderr,
    })
}

/// Renders a boxed message, the terminal stand-in for a modal dialog.
pub fn dialog(title: &str, body: &str) -> String {
    let lines: Vec<&str> = std::iter::once(title)
        .chain(std::iter::once(""))
        .chain(body.lines())
        .collect();
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let border = "─".repeat(width + 2);
    let mut rendered = format!("┌{border}┐\n");
    for line in lines {
        let padding = width - line.chars().count();
        rendered.push_str(&format!("│ {line}{} │\n", " ".repeat(padding)));
    }
    rendered.push_str(&format!("└{border}┘"));
    rendered
}
