use crate::interpreter::resolve_interpreter;
use crate::model::LaunchDecision;
use crate::platform::Platform;

/// Filesystem facts about a target, gathered by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileFacts {
    pub executable: bool,
    pub regular_file: bool,
}

/// Target classification by suffix. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetKind {
    Python,
    Shell,
    Batch,
    PowerShell,
    Other,
}

impl TargetKind {
    fn of(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.ends_with(".py") {
            TargetKind::Python
        } else if lower.ends_with(".sh") {
            TargetKind::Shell
        } else if lower.ends_with(".bat") || lower.ends_with(".cmd") {
            TargetKind::Batch
        } else if lower.ends_with(".ps1") {
            TargetKind::PowerShell
        } else {
            TargetKind::Other
        }
    }
}

/// Decides how to start `path`. Never touches the filesystem itself;
/// `interpreter` is asked for a Python interpreter only for `.py` targets.
pub fn resolve_with<F>(
    path: &str,
    platform: &Platform,
    facts: FileFacts,
    interpreter: F,
) -> LaunchDecision
where
    F: FnOnce(&str) -> String,
{
    let open_default = || LaunchDecision::OpenDefault { target: path.to_string() };

    match (TargetKind::of(path), platform) {
        (TargetKind::Python, _) => LaunchDecision::spawn([interpreter(path), path.to_string()]),
        (TargetKind::Shell, _) => LaunchDecision::spawn(["bash", path]),
        (TargetKind::Batch, Platform::Windows) => open_default(),
        // Batch files elsewhere are handed to bash as well.
        (TargetKind::Batch, _) => LaunchDecision::spawn(["bash", path]),
        (TargetKind::PowerShell, _) => {
            LaunchDecision::spawn(["powershell", "-ExecutionPolicy", "Bypass", "-File", path])
        }
        (TargetKind::Other, Platform::Windows) => open_default(),
        (TargetKind::Other, Platform::Darwin) => LaunchDecision::spawn(["open", path]),
        (TargetKind::Other, _) if facts.executable && facts.regular_file => {
            LaunchDecision::spawn([path])
        }
        (TargetKind::Other, _) => LaunchDecision::spawn(["xdg-open", path]),
    }
}

/// [`resolve_with`] using the virtual-environment lookup seeded with `fallback_interpreter`.
pub fn resolve(
    path: &str,
    platform: &Platform,
    facts: FileFacts,
    fallback_interpreter: &str,
) -> LaunchDecision {
    resolve_with(path, platform, facts, |script| {
        resolve_interpreter(script, fallback_interpreter)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EXEC_FILE: FileFacts = FileFacts { executable: true, regular_file: true };
    const PLAIN_FILE: FileFacts = FileFacts { executable: false, regular_file: true };

    fn no_interpreter(_: &str) -> String {
        panic!("interpreter lookup should not run for this target")
    }

    fn all_platforms() -> Vec<Platform> {
        vec![
            Platform::Windows,
            Platform::Darwin,
            Platform::Linux,
            Platform::Other("FreeBSD".to_string()),
        ]
    }

    #[test]
    fn test_python_script_uses_interpreter() {
        for platform in all_platforms() {
            let decision = resolve_with("C:/scripts/Run.PY", &platform, PLAIN_FILE, |p| format!("py-for:{}", p));
            assert_eq!(decision, LaunchDecision::spawn(["py-for:C:/scripts/Run.PY", "C:/scripts/Run.PY"]));
        }
    }

    #[test]
    fn test_python_script_falls_back_without_venv() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("scripts");
        fs::create_dir_all(&dir).unwrap();
        let script = dir.join("run.py").to_string_lossy().to_string();

        let decision = resolve(&script, &Platform::Linux, PLAIN_FILE, "/usr/bin/python3");
        assert_eq!(decision, LaunchDecision::spawn(["/usr/bin/python3", script.as_str()]));
    }

    #[test]
    fn test_python_script_uses_venv_next_to_it() {
        let tmp = TempDir::new().unwrap();
        let python = if cfg!(windows) {
            tmp.path().join(".venv").join("Scripts").join("python.exe")
        } else {
            tmp.path().join(".venv").join("bin").join("python")
        };
        fs::create_dir_all(python.parent().unwrap()).unwrap();
        fs::write(&python, "").unwrap();
        let script = tmp.path().join("tool.py").to_string_lossy().to_string();
        let python = python.to_string_lossy().to_string();

        for platform in all_platforms() {
            let decision = resolve(&script, &platform, PLAIN_FILE, "/usr/bin/python3");
            assert_eq!(decision, LaunchDecision::spawn([python.as_str(), script.as_str()]));
        }
    }

    #[test]
    fn test_shell_script() {
        let decision = resolve_with("/home/user/run.sh", &Platform::Linux, EXEC_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::spawn(["bash", "/home/user/run.sh"]));
        let decision = resolve_with("C:/run.SH", &Platform::Windows, PLAIN_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::spawn(["bash", "C:/run.SH"]));
    }

    #[test]
    fn test_batch_on_windows() {
        let decision = resolve_with("run.bat", &Platform::Windows, PLAIN_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::OpenDefault { target: "run.bat".to_string() });
        let decision = resolve_with("C:/scripts/RUN.CMD", &Platform::Windows, PLAIN_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::OpenDefault { target: "C:/scripts/RUN.CMD".to_string() });
    }

    #[test]
    fn test_batch_elsewhere_goes_to_bash() {
        let decision = resolve_with("run.cmd", &Platform::Linux, PLAIN_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::spawn(["bash", "run.cmd"]));
        let decision = resolve_with("run.bat", &Platform::Darwin, EXEC_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::spawn(["bash", "run.bat"]));
    }

    #[test]
    fn test_powershell_on_every_platform() {
        for platform in all_platforms() {
            let decision = resolve_with("script.ps1", &platform, PLAIN_FILE, no_interpreter);
            assert_eq!(
                decision,
                LaunchDecision::spawn(["powershell", "-ExecutionPolicy", "Bypass", "-File", "script.ps1"])
            );
        }
    }

    #[test]
    fn test_other_on_windows_and_macos() {
        let decision = resolve_with("C:/apps/tool.exe", &Platform::Windows, EXEC_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::OpenDefault { target: "C:/apps/tool.exe".to_string() });
        let decision = resolve_with("/Applications/App.app", &Platform::Darwin, EXEC_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::spawn(["open", "/Applications/App.app"]));
    }

    #[test]
    fn test_executable_on_linux() {
        let decision = resolve_with("/bin/tool", &Platform::Linux, EXEC_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::spawn(["/bin/tool"]));
        let decision = resolve_with("/bin/tool", &Platform::Linux, PLAIN_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::spawn(["xdg-open", "/bin/tool"]));
    }

    #[test]
    fn test_executable_directory_is_opened() {
        let dir = FileFacts { executable: true, regular_file: false };
        let decision = resolve_with("/home/user/projects", &Platform::Linux, dir, no_interpreter);
        assert_eq!(decision, LaunchDecision::spawn(["xdg-open", "/home/user/projects"]));
    }

    #[test]
    fn test_unknown_platform_behaves_like_linux() {
        let bsd = Platform::Other("FreeBSD".to_string());
        let decision = resolve_with("/usr/local/bin/tool", &bsd, EXEC_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::spawn(["/usr/local/bin/tool"]));
        let decision = resolve_with("/home/user/notes.txt", &bsd, PLAIN_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::spawn(["xdg-open", "/home/user/notes.txt"]));
    }

    #[test]
    fn test_suffix_is_matched_on_whole_path() {
        // ".py" inside a directory name does not count
        let decision = resolve_with("/opt/app.py/launcher", &Platform::Linux, EXEC_FILE, no_interpreter);
        assert_eq!(decision, LaunchDecision::spawn(["/opt/app.py/launcher"]));
    }
}
