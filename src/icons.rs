use std::path::{Path, PathBuf};

const SUBDIRS: [&str; 7] = [
    "hicolor/48x48/apps",
    "hicolor/scalable/apps",
    "hicolor/32x32/apps",
    "hicolor/64x64/apps",
    "Adwaita/48x48/apps",
    "Adwaita/scalable/apps",
    "",
];

const EXTENSIONS: [&str; 3] = ["png", "svg", "xpm"];

/// Maps theme icon names to files on disk.
pub struct IconLookup {
    roots: Vec<PathBuf>,
}

impl Default for IconLookup {
    fn default() -> Self {
        let mut roots = Vec::new();
        if let Some(home) = directories::BaseDirs::new() {
            roots.push(home.data_dir().join("icons"));
        }
        roots.push(PathBuf::from("/usr/share/icons"));
        roots.push(PathBuf::from("/usr/share/pixmaps"));
        Self::with_roots(roots)
    }
}

impl IconLookup {
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn find(&self, icon_name: &str) -> Option<PathBuf> {
        if icon_name.is_empty() {
            return None;
        }
        let path = Path::new(icon_name);
        if path.is_absolute() {
            return path.exists().then(|| path.to_path_buf());
        }

        for root in &self.roots {
            if !root.exists() { continue; }

            for sub in SUBDIRS {
                let dir = root.join(sub);
                if !dir.exists() { continue; }

                for ext in EXTENSIONS {
                    let file_path = dir.join(format!("{}.{}", icon_name, ext));
                    if file_path.exists() {
                        return Some(file_path);
                    }
                }
            }
        }
        None
    }
}
