mod board;
mod config;
mod executor;
mod icons;
mod interpreter;
mod model;
mod platform;
mod resolver;
mod sources;

use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use crate::board::{Board, TileEdit, pick_app};
use crate::config::load_config;
use crate::icons::IconLookup;
use crate::model::{Tile, default_name};
use crate::platform::Platform;
use crate::resolver::FileFacts;
use crate::sources::desktop::DesktopSource;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tile file to use instead of the configured one
    #[arg(long, global = true)]
    tiles: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Show all tiles
    List {
        /// Include description, target and icon
        #[arg(short, long)]
        long: bool,
    },
    /// Add a shortcut to a file, script or program
    Add {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        path: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List installed applications
    Apps {
        filter: Option<String>,
    },
    /// Add an installed application as a tile
    AddApp {
        query: String,
    },
    /// Change a tile
    Edit {
        index: usize,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        path: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Remove a tile
    Remove {
        index: usize,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Launch a tile by position or name
    Launch {
        tile: String,
    },
    /// Show how a path would be launched, without launching it
    Resolve {
        path: String,
        /// Platform name (Windows, Darwin, Linux, ...); defaults to this host
        #[arg(long)]
        platform: Option<String>,
        /// Treat the target as having its executable bit set (with --platform)
        #[arg(long)]
        executable: bool,
        /// Treat the target as a regular file (with --platform)
        #[arg(long)]
        file: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config()?;
    let mut board = Board::open(config.tiles_path(args.tiles.clone()));

    match args.command {
        Cmd::List { long } => list(&board, long),
        Cmd::Add { name, path, description } => {
            let name = name.filter(|n| !n.trim().is_empty()).unwrap_or_else(|| default_name(&path));
            let index = board.add(Tile::new_path(&name, &path, &description))?;
            board.save()?;
            println!("Added {}. {}", index + 1, board.tiles[index].name());
        }
        Cmd::Apps { filter } => {
            let apps = DesktopSource::default().scan();
            let icons = IconLookup::default();
            let filter = filter.unwrap_or_default();
            for app in apps.iter().filter(|a| a.matches(&filter)) {
                let icon = icons.find(&app.icon).map(|p| p.display().to_string());
                println!("{}\t{}\t{}", app.name, app.comment, icon.as_deref().unwrap_or("-"));
            }
        }
        Cmd::AddApp { query } => {
            let apps = DesktopSource::default().scan();
            if apps.is_empty() {
                bail!("No system applications were found.");
            }
            let app = pick_app(&apps, &query)
                .ok_or_else(|| anyhow!("No application matches {:?}", query))?;
            let index = board.add_app(app)?;
            board.save()?;
            println!("Added {}. {}", index + 1, app.name);
        }
        Cmd::Edit { index, name, path, description } => {
            board.edit(position(index)?, TileEdit { name, path, description })?;
            board.save()?;
        }
        Cmd::Remove { index, yes } => {
            let index = position(index)?;
            let name = board.get(index)?.name().to_string();
            if yes || confirm(&format!("Remove '{}'?", name))? {
                board.remove(index)?;
                board.save()?;
                println!("Removed {}", name);
            }
        }
        Cmd::Launch { tile } => {
            let index = match tile.parse::<usize>() {
                Ok(n) => position(n)?,
                Err(_) => board.find(&tile).ok_or_else(|| anyhow!("No tile named {:?}", tile))?,
            };
            executor::launch_tile(board.get(index)?, &config.general.python)?;
        }
        Cmd::Resolve { path, platform, executable, file } => {
            let (platform, facts) = match platform {
                Some(name) => {
                    let facts = FileFacts { executable, regular_file: file };
                    (Platform::from_name(&name), facts)
                }
                None => (Platform::host(), executor::file_facts(&executor::expand_home(&path))),
            };
            log::debug!("Resolving {} for {}", path, platform);
            println!("{}", resolver::resolve(&path, &platform, facts, &config.general.python));
        }
    }

    Ok(())
}

fn position(index: usize) -> Result<usize> {
    index.checked_sub(1).ok_or_else(|| anyhow!("tile positions start at 1"))
}

fn list(board: &Board, long: bool) {
    if board.tiles.is_empty() {
        println!("No tiles yet. Add your first shortcut to get started.");
        return;
    }
    let icons = IconLookup::default();
    for (i, tile) in board.tiles.iter().enumerate() {
        println!("{:>3}. {}", i + 1, tile.name());
        if long {
            if !tile.description().is_empty() {
                println!("     {}", tile.description());
            }
            println!("     -> {}", tile.target());
            if let Some(icon) = tile.icon().and_then(|name| icons.find(name)) {
                println!("     icon: {}", icon.display());
            }
        }
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}
