use crate::model::{LaunchDecision, Tile};
use crate::platform::Platform;
use crate::resolver::{self, FileFacts};
use directories::BaseDirs;
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Launch command is missing for this app.")]
    MissingCommand,
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("nothing to run")]
    EmptyCommand,
    #[error("Launch failed: {0}")]
    Spawn(#[from] io::Error),
}

/// Launches a tile. Desktop tiles run their stored command; path tiles go
/// through the launch resolver.
pub fn launch_tile(tile: &Tile, fallback_interpreter: &str) -> Result<(), LaunchError> {
    match tile {
        Tile::Desktop(t) => {
            if t.exec.is_empty() {
                return Err(LaunchError::MissingCommand);
            }
            start(&LaunchDecision::Spawn { argv: t.exec.clone() })
        }
        Tile::Path(t) => {
            let path = expand_home(&t.path);
            if !path.exists() {
                return Err(LaunchError::NotFound(path));
            }
            let target = path.to_string_lossy();
            let facts = file_facts(&path);
            let platform = Platform::host();
            let decision = resolver::resolve(&target, &platform, facts, fallback_interpreter);
            start(&decision)
        }
    }
}

/// Starts the process described by `decision` without waiting for it.
pub fn start(decision: &LaunchDecision) -> Result<(), LaunchError> {
    let mut command = match decision {
        LaunchDecision::Spawn { argv } => {
            let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;
            let mut command = Command::new(program);
            command.args(args);
            command
        }
        LaunchDecision::OpenDefault { target } => open_with_default(target),
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    info!("Launching {}", decision);
    command.spawn()?;
    Ok(())
}

fn open_with_default(target: &str) -> Command {
    if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", target]);
        command
    } else {
        let mut command = Command::new(if cfg!(target_os = "macos") { "open" } else { "xdg-open" });
        command.arg(target);
        command
    }
}

/// Reads the executable bit and regular-file flag the resolver needs.
pub fn file_facts(path: &Path) -> FileFacts {
    FileFacts {
        executable: is_executable(path),
        regular_file: fs::metadata(path).map(|m| m.is_file()).unwrap_or(false),
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};
    access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    false
}

pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(path),
    };
    match BaseDirs::new() {
        Some(dirs) => {
            let rest = rest.trim_start_matches(['/', '\\']);
            if rest.is_empty() {
                dirs.home_dir().to_path_buf()
            } else {
                dirs.home_dir().join(rest)
            }
        }
        None => PathBuf::from(path),
    }
}
