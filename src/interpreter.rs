use log::debug;
use std::path::Path;

const VENV_DIRS: [&str; 4] = [".venv", "venv", ".env", "env"];

fn venv_python_in(base: &Path) -> Option<String> {
    for name in VENV_DIRS {
        let venv = base.join(name);
        let python = if cfg!(windows) {
            venv.join("Scripts").join("python.exe")
        } else {
            venv.join("bin").join("python")
        };
        if python.exists() {
            return Some(python.to_string_lossy().to_string());
        }
    }
    None
}

/// Finds a virtual-environment interpreter next to `script` or one level up.
/// Falls back to `fallback` unchanged when none exists.
pub fn resolve_interpreter(script: &str, fallback: &str) -> String {
    let script = Path::new(script);
    let parent = script.parent();
    let grandparent = parent.and_then(Path::parent);

    for base in [parent, grandparent].into_iter().flatten() {
        if let Some(python) = venv_python_in(base) {
            debug!("Using {} for {:?}", python, script);
            return python;
        }
    }
    fallback.to_string()
}
