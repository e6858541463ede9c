use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::ExecError;

/// Named configuration values: process environment first, `.env` file second.
#[derive(Debug, Default, Clone)]
pub struct EnvSource {
    file_values: HashMap<String, String>,
    /// Replaces the process environment
    #[cfg(test)]
    overrides: Option<HashMap<String, String>>,
}

impl EnvSource {
    /// Read `path` if it exists. A missing file is not an error.
    ///
    /// The file is parsed with dotenv rules (comments, quotes, `export `) but
    /// never written into the process environment.
    pub fn load(path: &Path) -> Result<Self> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(EnvSource::default());
            }
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };

        let mut file_values = HashMap::new();
        for item in iter {
            let (key, value) = item.with_context(|| format!("parsing {}", path.display()))?;
            file_values.insert(key, value);
        }
        debug!(path = %path.display(), count = file_values.len(), "loaded env file");

        Ok(EnvSource { file_values, ..Default::default() })
    }

    /// Fixed set of values, nothing read from the process
    #[cfg(test)]
    pub fn from_map(values: HashMap<String, String>) -> Self {
        EnvSource { file_values: HashMap::new(), overrides: Some(values) }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.process_value(name).or_else(|| self.file_values.get(name).cloned())
    }

    /// Same as `get`, but a missing value is an error naming the variable
    pub fn require(&self, name: &str) -> Result<String, ExecError> {
        self.get(name).ok_or_else(|| ExecError::MissingVar(name.to_string()))
    }

    #[cfg(not(test))]
    fn process_value(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    #[cfg(test)]
    fn process_value(&self, name: &str) -> Option<String> {
        match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }
}
