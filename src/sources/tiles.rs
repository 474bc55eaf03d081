use crate::model::Tile;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Reads the tile list. A missing, unreadable or malformed file yields an
/// empty list; entries that are not tiles are skipped.
pub fn load_tiles(path: &Path) -> Vec<Tile> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No tile file at {:?}", path);
            return Vec::new();
        }
        Err(e) => {
            warn!("Could not read tiles from {:?}: {}", path, e);
            return Vec::new();
        }
    };

    let entries = match serde_json::from_str::<Vec<Value>>(&content) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Ignoring malformed tile file {:?}: {}", path, e);
            return Vec::new();
        }
    };

    // A bad entry is skipped on its own so the rest survive the next save.
    let tiles: Vec<Tile> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value(entry) {
            Ok(tile) => Some(tile),
            Err(e) => {
                warn!("Skipping tile {} in {:?}: {}", i + 1, path, e);
                None
            }
        })
        .collect();
    info!("Loaded {} tiles from {:?}", tiles.len(), path);
    tiles
}

pub fn save_tiles(path: &Path, tiles: &[Tile]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
    }
    let content = serde_json::to_string_pretty(tiles)?;
    fs::write(path, content).with_context(|| format!("writing {:?}", path))?;
    debug!("Saved {} tiles to {:?}", tiles.len(), path);
    Ok(())
}
