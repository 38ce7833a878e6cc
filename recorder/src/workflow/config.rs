use anyhow::Context;
use floracore::chart::RenderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "curva_floral.png";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub output: PathBuf,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let render = RenderConfig::default();
        Self {
            width: render.width,
            height: render.height,
            title: render.title,
            x_desc: render.x_desc,
            y_desc: render.y_desc,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl ChartConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading chart config {}", path_ref.display()))?;
        let config: ChartConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing chart config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Command-line values override whatever the file (or the defaults) set.
    pub fn apply_overrides(
        mut self,
        width: Option<u32>,
        height: Option<u32>,
        title: Option<String>,
        output: Option<PathBuf>,
    ) -> Self {
        if let Some(width) = width {
            self.width = width;
        }
        if let Some(height) = height {
            self.height = height;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(output) = output {
            self.output = output;
        }
        self
    }

    pub fn to_render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            title: self.title.clone(),
            x_desc: self.x_desc.clone(),
            y_desc: self.y_desc.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn overrides_produce_render_config() {
        let cfg = ChartConfig::default().apply_overrides(Some(1024), None, None, None);
        let render = cfg.to_render_config();
        assert_eq!(render.width, 1024);
        assert_eq!(render.height, 600);
        assert_eq!(cfg.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn config_load_reads_partial_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"width: 640\ntitle: Floracion 2024\noutput: out/curva.png\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = ChartConfig::load(&path).unwrap();
        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.height, 600);
        assert_eq!(cfg.title, "Floracion 2024");
        assert_eq!(cfg.output, PathBuf::from("out/curva.png"));
    }

    #[test]
    fn config_load_reports_missing_file() {
        let err = ChartConfig::load("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("reading chart config"));
    }
}
