use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Name of the per-project config file.
pub const CONFIG_FILE: &str = ".build";
/// Section holding keys that appear before any `[section]` header.
pub const DEFAULT_SECTION: &str = "";
/// Directory name used for build outputs when `BUILD_OUT` is unset.
pub const DEFAULT_BUILD_OUT: &str = "build_out";

lazy_static! {
    static ref SECTION: Regex = Regex::new(r"^\[\s*([^\]]*?)\s*\]$").unwrap();
    static ref PAIR: Regex = Regex::new(r"^([^=]+?)\s*=\s*(.*)$").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    project_path: PathBuf,
    sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    /// Parses INI text. Blank lines and lines starting with `;` or `#` are
    /// ignored.
    pub fn parse(text: &str) -> Result<Config, Error> {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current = String::from(DEFAULT_SECTION);

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(captures) = SECTION.captures(line) {
                current = captures[1].to_string();
                sections.entry(current.clone()).or_default();
            } else if let Some(captures) = PAIR.captures(line) {
                sections
                    .entry(current.clone())
                    .or_default()
                    .insert(captures[1].trim().to_string(), captures[2].trim().to_string());
            } else {
                return Err(Error::new(
                    ErrorImpl::MalformedConfig {
                        line: line.to_string(),
                    },
                    Position::new(index as u32 + 1, 1),
                ));
            }
        }

        Ok(Config {
            project_path: PathBuf::new(),
            sections,
        })
    }

    /// Reads `<project_dir>/.build`. A missing file is an empty config.
    pub fn load(project_dir: impl AsRef<Path>) -> Result<Config, Error> {
        let project_dir = project_dir.as_ref();
        let path = project_dir.join(CONFIG_FILE);

        let config = match fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "loading config");
                Config::parse(&text)?
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Config::default(),
            Err(error) => return Err(Error::io(&path, error)),
        };

        Ok(config.with_project_path(project_dir))
    }

    /// Loads the config of the project containing `start`: the nearest
    /// ancestor holding a `.git` entry, or `start` itself when there is none.
    pub fn discover(start: impl AsRef<Path>) -> Result<Config, Error> {
        let start = start.as_ref();
        let root = find_project_root(start).unwrap_or_else(|| start.to_path_buf());

        Config::load(root)
    }

    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = path.into();
        self
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// `path` relative to the project root, if it lives inside it.
    pub fn rel_path(&self, path: impl AsRef<Path>) -> Option<PathBuf> {
        path.as_ref()
            .strip_prefix(&self.project_path)
            .ok()
            .map(Path::to_path_buf)
    }

    pub fn section_value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|values| values.get(key))
            .map(String::as_str)
    }

    /// Resolves `name` against `env`, then the OS section, then the default
    /// section. Empty environment values count as unset.
    pub fn lookup<F>(&self, name: &str, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env(name).filter(|value| !value.is_empty()) {
            return Some(value);
        }

        self.section_value(std::env::consts::OS, name)
            .or_else(|| self.section_value(DEFAULT_SECTION, name))
            .map(str::to_string)
    }

    /// Resolves `name` against the process environment and the config file.
    pub fn get(&self, name: &str) -> Option<String> {
        self.lookup(name, |key| std::env::var(key).ok())
    }

    pub fn build_out_with<F>(&self, env: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        // relative values are taken from the project root
        match self.lookup("BUILD_OUT", env) {
            Some(out) => self.project_path.join(out),
            None => self.project_path.join(DEFAULT_BUILD_OUT),
        }
    }

    /// Output directory for builds: `BUILD_OUT` (resolved against the project
    /// root), or `<project>/build_out`.
    pub fn build_out(&self) -> PathBuf {
        self.build_out_with(|key| std::env::var(key).ok())
    }
}

/// Returns the nearest ancestor of `start` (inclusive) that contains `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
