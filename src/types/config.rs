use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::SessionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where the picked handles are kept between runs.
    pub state_path: PathBuf,
    /// Optional JSON catalog mapping `content://` handles to display names.
    pub catalog_path: Option<PathBuf>,
    /// Extensions offered by the file picker.
    pub accepted_extensions: Vec<String>,
    pub autoplay: bool,
    pub log_filter: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            state_path: PathBuf::from("vidsession_state.json"),
            catalog_path: None,
            accepted_extensions: vec!["mp4".to_string()],
            autoplay: true,
            log_filter: "info".to_string(),
        }
    }
}

impl SessionConfig {
    /// Save the config to a JSON file at the given path.
    pub fn save_to_file(&self, path: &Path) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SessionError::Config(e.to_string()))?;
        let mut file = File::create(path).map_err(|e| config_io(path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| config_io(path, e))
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: &Path) -> Result<SessionConfig, SessionError> {
        let mut file = File::open(path).map_err(|e| config_io(path, e))?;
        let mut json = String::new();
        file.read_to_string(&mut json)
            .map_err(|e| config_io(path, e))?;
        serde_json::from_str(&json)
            .map_err(|e| SessionError::Config(format!("{}: {}", path.display(), e)))
    }
}

fn config_io(path: &Path, err: std::io::Error) -> SessionError {
    SessionError::Config(format!("{}: {}", path.display(), err))
}
