//! Configuration file.
//!
//! Each line has the form `KEY=VALUE` and is split at the first `=`.

use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Write},
    path::Path,
};

use crate::{Error, Result};

/// Key holding the build version.
pub const VERSION_KEY: &str = "VERSION_32";

/// Version used when the configuration does not contain one.
pub const DEFAULT_VERSION: u32 = 1;

/// Configuration values in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conf {
    entries: Vec<(String, String)>,
}

impl Conf {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the configuration from the specified file.
    ///
    /// A missing file yields an empty configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("configuration {} not found, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(err) => return Err(Error::io(path)(err)),
        };

        let mut conf = Self::new();
        for (n, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(Error::io(path))?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if line.is_empty() {
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) if !key.is_empty() => conf.set(key, value),
                _ => return Err(Error::MalformedLine { path: path.to_path_buf(), line: n + 1 }),
            }
        }

        Ok(conf)
    }

    /// Saves the configuration to the specified file, one entry per line.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut data = String::new();
        for (key, value) in &self.entries {
            data.push_str(key);
            data.push('=');
            data.push_str(value);
            data.push('\n');
        }

        let mut file = File::create(path).map_err(Error::io(path))?;
        file.write_all(data.as_bytes()).map_err(Error::io(path))?;
        file.flush().map_err(Error::io(path))?;

        Ok(())
    }

    /// Value of the specified key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Sets the value of a key.
    ///
    /// An existing entry keeps its position, a new entry is appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Iterates over all entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the configuration has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sets the version to [`DEFAULT_VERSION`] unless present.
    pub fn ensure_version(&mut self) {
        if self.get(VERSION_KEY).is_none() {
            self.set(VERSION_KEY, DEFAULT_VERSION.to_string());
        }
    }

    /// Current version.
    pub fn version(&self) -> Result<u32> {
        match self.get(VERSION_KEY) {
            Some(value) => value.trim().parse().map_err(|_| Error::InvalidVersion(value.to_string())),
            None => Ok(DEFAULT_VERSION),
        }
    }

    /// Increments the version and returns the new value.
    pub fn bump_version(&mut self) -> Result<u32> {
        let version = self.version()?.checked_add(1).ok_or(Error::VersionOverflow)?;
        self.set(VERSION_KEY, version.to_string());
        Ok(version)
    }
}
