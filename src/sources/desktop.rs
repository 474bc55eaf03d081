use crate::model::DesktopApp;
use crate::sources::ini::Ini;
use directories::BaseDirs;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SYSTEM_APPLICATIONS: &str = "/usr/share/applications";

/// Scans a fixed list of directories for `*.desktop` files.
pub struct DesktopSource {
    dirs: Vec<PathBuf>,
}

impl Default for DesktopSource {
    fn default() -> Self {
        let mut dirs = vec![PathBuf::from(SYSTEM_APPLICATIONS)];
        if let Some(base_dirs) = BaseDirs::new() {
            dirs.push(base_dirs.home_dir().join(".local").join("share").join("applications"));
        }
        Self::with_dirs(dirs)
    }
}

impl DesktopSource {
    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Parses every descriptor found, drops the invalid ones and sorts by
    /// name, ignoring case.
    pub fn scan(&self) -> Vec<DesktopApp> {
        let mut apps = Vec::new();

        for dir in &self.dirs {
            if !dir.is_dir() {
                debug!("Skipping missing application dir {:?}", dir);
                continue;
            }
            debug!("Scanning desktop files in {:?}", dir);
            let files = WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .flatten()
                .filter(|e| e.file_name().to_string_lossy().ends_with(".desktop"));

            apps.extend(files.filter_map(|file| parse_desktop_file(file.path())));
        }

        apps.sort_by_key(|app| app.name.to_lowercase());
        info!("DesktopSource: found {} entries", apps.len());
        apps
    }
}

/// Splits an `Exec` line like a shell would and drops field codes
/// such as `%U` or `%f`. `None` when the quoting is unbalanced.
pub fn sanitize_exec(exec_line: &str) -> Option<Vec<String>> {
    let parts = shlex::split(&escape_hashes(exec_line))?;
    Some(parts.into_iter().filter(|part| !part.starts_with('%')).collect())
}

// shlex reads an unquoted `#` as the start of a comment; Exec lines have none.
fn escape_hashes(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in line.chars() {
        if escaped {
            escaped = false;
        } else {
            match (quote, ch) {
                (Some(q), c) if c == q => quote = None,
                (Some('"'), '\\') => escaped = true,
                (Some(_), _) => {}
                (None, '\\') => escaped = true,
                (None, '\'' | '"') => quote = Some(ch),
                (None, '#') => out.push('\\'),
                (None, _) => {}
            }
        }
        out.push(ch);
    }
    out
}

pub fn parse_desktop_entry(content: &str, source: &str) -> Option<DesktopApp> {
    let ini = match Ini::parse(content) {
        Ok(ini) => ini,
        Err(e) => {
            debug!("Invalid desktop file {}: {}", source, e);
            return None;
        }
    };
    let entry = ini.section("Desktop Entry")?;

    if entry.get("Type").is_some_and(|t| t != "Application") {
        return None;
    }

    let name = entry.get("Name").filter(|n| !n.is_empty())?;
    let exec_line = entry.get("Exec").filter(|e| !e.is_empty())?;
    let Some(exec) = sanitize_exec(exec_line) else {
        debug!("Unbalanced quoting in Exec of {}", source);
        return None;
    };

    Some(DesktopApp {
        name: name.to_string(),
        exec,
        comment: entry.get("Comment").unwrap_or_default().to_string(),
        icon: entry.get("Icon").unwrap_or_default().to_string(),
        path: source.to_string(),
    })
}

/// Reads and parses a single descriptor from disk.
pub fn parse_desktop_file(path: &Path) -> Option<DesktopApp> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Unreadable desktop file {:?}: {}", path, e);
            return None;
        }
    };
    parse_desktop_entry(&content, &path.to_string_lossy())
}
