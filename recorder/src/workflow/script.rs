use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One submission as written in a session file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SightingEntry {
    pub plant: String,
    #[serde(default)]
    pub periods: Vec<String>,
}

/// Batch of sightings replayed through the form at startup.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionScript {
    #[serde(default)]
    pub sightings: Vec<SightingEntry>,
}

impl SessionScript {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading session {}", path_ref.display()))?;
        let script: SessionScript = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing session {}", path_ref.display()))?;
        Ok(script)
    }
}
