use std::fmt;

/// Operating system family, named the way `uname`-style detection reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Darwin,
    Linux,
    Other(String),
}

impl Platform {
    pub fn host() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::Darwin,
            "linux" => Platform::Linux,
            other => {
                let mut chars = other.chars();
                let name = match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                };
                Platform::Other(name)
            }
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "Windows" => Platform::Windows,
            "Darwin" => Platform::Darwin,
            "Linux" => Platform::Linux,
            other => Platform::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => f.write_str("Windows"),
            Platform::Darwin => f.write_str("Darwin"),
            Platform::Linux => f.write_str("Linux"),
            Platform::Other(name) => f.write_str(name),
        }
    }
}
