use crate::model::{DesktopApp, Tile, TileError};
use crate::sources::tiles;
use anyhow::Result;
use std::path::PathBuf;

/// Changes requested for an existing tile. `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct TileEdit {
    pub name: Option<String>,
    pub path: Option<String>,
    pub description: Option<String>,
}

/// The user's tiles, backed by the JSON store at `path`.
pub struct Board {
    pub tiles: Vec<Tile>,
    path: PathBuf,
}

impl Board {
    pub fn open(path: PathBuf) -> Self {
        Self {
            tiles: tiles::load_tiles(&path),
            path,
        }
    }

    pub fn save(&self) -> Result<()> {
        tiles::save_tiles(&self.path, &self.tiles)
    }

    pub fn get(&self, index: usize) -> Result<&Tile, TileError> {
        self.tiles.get(index).ok_or(TileError::NoSuchTile(index))
    }

    /// First tile whose name matches `name`, ignoring case.
    pub fn find(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.tiles.iter().position(|t| t.name().to_lowercase() == name)
    }

    pub fn add(&mut self, tile: Tile) -> Result<usize, TileError> {
        tile.validate()?;
        self.tiles.push(tile);
        Ok(self.tiles.len() - 1)
    }

    pub fn add_app(&mut self, app: &DesktopApp) -> Result<usize, TileError> {
        self.add(Tile::from(app))
    }

    pub fn edit(&mut self, index: usize, edit: TileEdit) -> Result<(), TileError> {
        let mut updated = self.get(index)?.clone();
        match &mut updated {
            Tile::Desktop(t) => {
                if edit.path.is_some() {
                    return Err(TileError::ReadOnlyPath);
                }
                if let Some(name) = edit.name {
                    t.name = name.trim().to_string();
                }
                if let Some(description) = edit.description {
                    t.description = description.trim().to_string();
                }
            }
            Tile::Path(t) => {
                if let Some(name) = edit.name {
                    t.name = name.trim().to_string();
                }
                if let Some(path) = edit.path {
                    t.path = path.trim().to_string();
                }
                if let Some(description) = edit.description {
                    t.description = description.trim().to_string();
                }
            }
        }
        updated.validate()?;
        self.tiles[index] = updated;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Tile, TileError> {
        self.get(index)?;
        Ok(self.tiles.remove(index))
    }
}

/// Picks an app for `query`: an exact name match wins, otherwise the first
/// app whose name or comment contains it.
pub fn pick_app<'a>(apps: &'a [DesktopApp], query: &str) -> Option<&'a DesktopApp> {
    let wanted = query.trim().to_lowercase();
    apps.iter()
        .find(|a| a.name.to_lowercase() == wanted)
        .or_else(|| apps.iter().find(|a| a.matches(query)))
}
