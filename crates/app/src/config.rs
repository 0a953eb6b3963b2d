use crate::style::Palette;
use anyhow::{Context, Result};
use kintree_layout::FamilyTreeLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Everything a `.ron` config file can override, each part optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: FamilyTreeLayout,
    pub style: Palette,
}

impl Config {
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Config = ron::from_str(text).context("Malformed config")?;
        config.layout.metrics.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Can't read config {}", path.display()))?;
        let config =
            Self::from_ron(&text).with_context(|| format!("Invalid config {}", path.display()))?;
        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use std::io::Write;
    use test_log::test;

    #[test]
    fn test_partial_config() {
        let config = Config::from_ron(
            r##"(
                layout: (metrics: (node_width: 150.0)),
                style: (male: "#0000ff"),
            )"##,
        )
        .unwrap();
        assert_eq!(config.layout.metrics.node_width, 150.0);
        assert_eq!(config.layout.metrics.node_height, 80.0);
        assert_eq!(config.style.male, Color(0x0000ff));
        assert_eq!(config.style.female, Palette::default().female);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_ron("()").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_metric_is_rejected() {
        let err = Config::from_ron("(layout: (metrics: (node_width: 0.0)))").unwrap_err();
        assert!(err.to_string().contains("node_width"), "{err}");
        assert!(Config::from_ron(r#"(style: (male: "blue"))"#).is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        writeln!(file, "(layout: (metrics: (generation_gap: 60.0)))").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.layout.metrics.generation_gap, 60.0);

        let missing = Config::load(Path::new("/nonexistent/kintree.ron"));
        assert!(missing.is_err());
    }
}
