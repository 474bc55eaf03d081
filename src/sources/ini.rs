use std::collections::HashMap;
use thiserror::Error;

const DEFAULT_SECTION: &str = "DEFAULT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IniError {
    #[error("line {0}: key outside of any section")]
    MissingSectionHeader(usize),
    #[error("line {0}: duplicate section [{1}]")]
    DuplicateSection(usize, String),
    #[error("line {0}: duplicate key {1:?}")]
    DuplicateKey(usize, String),
    #[error("line {0}: expected key=value")]
    Syntax(usize),
}

/// A parsed INI document. Keys are stored lowercased; values are literal.
#[derive(Debug, Default)]
pub struct Ini {
    defaults: HashMap<String, String>,
    sections: HashMap<String, HashMap<String, String>>,
}

pub struct Section<'a> {
    keys: &'a HashMap<String, String>,
    defaults: &'a HashMap<String, String>,
}

impl Section<'_> {
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.keys
            .get(&key)
            .or_else(|| self.defaults.get(&key))
            .map(String::as_str)
    }
}

impl Ini {
    pub fn section(&self, name: &str) -> Option<Section<'_>> {
        self.sections.get(name).map(|keys| Section {
            keys,
            defaults: &self.defaults,
        })
    }

    pub fn parse(content: &str) -> Result<Self, IniError> {
        let mut ini = Ini::default();
        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;
        let mut key_indent = 0;

        for (idx, raw) in content.lines().enumerate() {
            let lineno = idx + 1;
            let line = raw.trim();

            if line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            // Blank lines belong to the value being read; trailing ones are trimmed below.
            if line.is_empty() {
                if let Some(value) = ini.value_mut(current.as_deref(), last_key.as_deref()) {
                    value.push('\n');
                }
                continue;
            }

            let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
            if indent > key_indent {
                if let Some(value) = ini.value_mut(current.as_deref(), last_key.as_deref()) {
                    value.push('\n');
                    value.push_str(line);
                    continue;
                }
            }
            key_indent = indent;

            if line.starts_with('[') && line.ends_with(']') && line.len() > 2 {
                let name = line[1..line.len() - 1].to_string();
                if name != DEFAULT_SECTION {
                    if ini.sections.contains_key(&name) {
                        return Err(IniError::DuplicateSection(lineno, name));
                    }
                    ini.sections.insert(name.clone(), HashMap::new());
                }
                current = Some(name);
                last_key = None;
                continue;
            }

            let Some(section) = &current else {
                return Err(IniError::MissingSectionHeader(lineno));
            };
            let Some(split) = line.find(['=', ':']) else {
                return Err(IniError::Syntax(lineno));
            };
            let key = line[..split].trim().to_lowercase();
            let value = line[split + 1..].trim().to_string();
            if key.is_empty() {
                return Err(IniError::Syntax(lineno));
            }

            let keys = ini.section_mut(section);
            if keys.contains_key(&key) {
                return Err(IniError::DuplicateKey(lineno, key));
            }
            keys.insert(key.clone(), value);
            last_key = Some(key);
        }

        let values = ini
            .defaults
            .values_mut()
            .chain(ini.sections.values_mut().flat_map(|keys| keys.values_mut()));
        for value in values {
            let len = value.trim_end().len();
            value.truncate(len);
        }

        Ok(ini)
    }

    fn value_mut(&mut self, section: Option<&str>, key: Option<&str>) -> Option<&mut String> {
        let (Some(section), Some(key)) = (section, key) else {
            return None;
        };
        self.section_mut(section).get_mut(key)
    }

    fn section_mut(&mut self, name: &str) -> &mut HashMap<String, String> {
        if name == DEFAULT_SECTION {
            &mut self.defaults
        } else {
            self.sections.entry(name.to_string()).or_default()
        }
    }
}
