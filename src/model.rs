use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Marker carried by tiles that were created from a system application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Desktop,
}

/// A shortcut to an arbitrary file, script or executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTile {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
}

/// A shortcut copied from a parsed desktop entry. `exec` is launched as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopTile {
    pub kind: TileKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exec: Vec<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub desktop_file: String,
}

// Desktop must come first: a desktop tile has no `path` and is only
// recognised by its `kind` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tile {
    Desktop(DesktopTile),
    Path(PathTile),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TileError {
    #[error("Name and path are required.")]
    MissingField,
    #[error("the descriptor path of a system app tile cannot be edited")]
    ReadOnlyPath,
    #[error("no tile at position {0}")]
    NoSuchTile(usize),
}

impl Tile {
    pub fn new_path(name: &str, path: &str, description: &str) -> Self {
        Tile::Path(PathTile {
            name: name.trim().to_string(),
            path: path.trim().to_string(),
            description: description.trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Tile::Desktop(t) => &t.name,
            Tile::Path(t) => &t.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Tile::Desktop(t) => &t.description,
            Tile::Path(t) => &t.description,
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            Tile::Desktop(t) if !t.icon.is_empty() => Some(&t.icon),
            _ => None,
        }
    }

    /// What the tile points at, for display.
    pub fn target(&self) -> String {
        match self {
            Tile::Desktop(t) => t.exec.join(" "),
            Tile::Path(t) => t.path.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), TileError> {
        if self.name().trim().is_empty() {
            return Err(TileError::MissingField);
        }
        if let Tile::Path(t) = self {
            if t.path.trim().is_empty() {
                return Err(TileError::MissingField);
            }
        }
        Ok(())
    }
}

impl From<&DesktopApp> for Tile {
    fn from(app: &DesktopApp) -> Self {
        Tile::Desktop(DesktopTile {
            kind: TileKind::Desktop,
            name: app.name.clone(),
            description: app.comment.clone(),
            exec: app.exec.clone(),
            icon: app.icon.clone(),
            desktop_file: app.path.clone(),
        })
    }
}

/// Normalized content of one `.desktop` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopApp {
    pub name: String,
    pub exec: Vec<String>,
    pub comment: String,
    pub icon: String,
    pub path: String,
}

impl DesktopApp {
    /// Case-insensitive substring match against name and comment.
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        filter.is_empty()
            || self.name.to_lowercase().contains(&filter)
            || self.comment.to_lowercase().contains(&filter)
    }
}

/// How a target should be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchDecision {
    /// Hand the path to the operating system's default handler.
    OpenDefault { target: String },
    /// Start a new process with this argument vector.
    Spawn { argv: Vec<String> },
}

impl LaunchDecision {
    pub fn spawn<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LaunchDecision::Spawn {
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for LaunchDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchDecision::OpenDefault { target } => {
                write!(f, "open-via-os-default {}", target)
            }
            LaunchDecision::Spawn { argv } => {
                let line = shlex::try_join(argv.iter().map(String::as_str))
                    .unwrap_or_else(|_| argv.join(" "));
                write!(f, "spawn {}", line)
            }
        }
    }
}

/// File stem of `path`, used as a default tile name.
pub fn default_name(path: &str) -> String {
    Path::new(path.trim())
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_tile_json_shape() {
        let tile = Tile::new_path(" Run Script ", "C:/scripts/run.py", "Nightly task");
        let json = serde_json::to_value(&tile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Run Script",
                "path": "C:/scripts/run.py",
                "description": "Nightly task",
            })
        );
    }

    #[test]
    fn test_desktop_tile_is_recognised_by_kind() {
        let tile: Tile = serde_json::from_str(
            r#"{"kind": "desktop", "name": "Files", "exec": ["nautilus", "--new-window"], "icon": "folder", "description": "", "desktop_file": "/usr/share/applications/files.desktop"}"#,
        )
        .unwrap();
        match tile {
            Tile::Desktop(t) => {
                assert_eq!(t.exec, vec!["nautilus", "--new-window"]);
                assert_eq!(t.icon, "folder");
            }
            Tile::Path(_) => panic!("expected a desktop tile"),
        }
    }

    #[test]
    fn test_path_tile_without_description() {
        let tile: Tile = serde_json::from_str(r#"{"name": "Notes", "path": "~/notes.txt"}"#).unwrap();
        assert_eq!(tile, Tile::new_path("Notes", "~/notes.txt", ""));
    }

    #[test]
    fn test_validate() {
        assert!(Tile::new_path("a", "/bin/a", "").validate().is_ok());
        assert_eq!(Tile::new_path("  ", "/bin/a", "").validate(), Err(TileError::MissingField));
        assert_eq!(Tile::new_path("a", "", "").validate(), Err(TileError::MissingField));
    }

    #[test]
    fn test_tile_from_app() {
        let app = DesktopApp {
            name: "Sample App".to_string(),
            exec: vec!["sample-app".to_string(), "--flag".to_string()],
            comment: "Runs the sample app".to_string(),
            icon: "sample-icon".to_string(),
            path: "/usr/share/applications/sample.desktop".to_string(),
        };
        let tile = Tile::from(&app);
        assert_eq!(tile.name(), "Sample App");
        assert_eq!(tile.description(), "Runs the sample app");
        assert_eq!(tile.icon(), Some("sample-icon"));
        assert_eq!(tile.target(), "sample-app --flag");
    }

    #[test]
    fn test_app_filter() {
        let app = DesktopApp {
            name: "Text Editor".to_string(),
            exec: vec!["gedit".to_string()],
            comment: "Edit plain files".to_string(),
            icon: String::new(),
            path: String::new(),
        };
        assert!(app.matches(""));
        assert!(app.matches("  editor "));
        assert!(app.matches("PLAIN"));
        assert!(!app.matches("browser"));
    }

    #[test]
    fn test_default_name() {
        assert_eq!(default_name("/home/user/run.sh"), "run");
        assert_eq!(default_name(""), "");
    }

    #[test]
    fn test_decision_display() {
        let d = LaunchDecision::spawn(["bash", "/tmp/run.sh"]);
        assert_eq!(d.to_string(), "spawn bash /tmp/run.sh");
        let d = LaunchDecision::OpenDefault { target: "C:/run.bat".to_string() };
        assert_eq!(d.to_string(), "open-via-os-default C:/run.bat");
    }
}
