use crate::generator::GeneratorConfig;
use anyhow::Context;
use detectcore::render::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub layout: LayoutConfig,
    pub generator: GeneratorConfig,
    pub output_dir: PathBuf,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            generator: GeneratorConfig::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config
            .layout
            .validate()
            .with_context(|| format!("validating layout in {}", path_ref.display()))?;
        Ok(config)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        seed: Option<u64>,
        delay_ms: Option<u64>,
        output_dir: Option<PathBuf>,
    ) -> Self {
        if seed.is_some() {
            self.generator.seed = seed;
        }
        if let Some(delay_ms) = delay_ms {
            self.generator.delay_ms = delay_ms;
        }
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn overrides_replace_only_given_values() {
        let cfg = WorkflowConfig::default().with_overrides(Some(9), None, Some("reports".into()));
        assert_eq!(cfg.generator.seed, Some(9));
        assert_eq!(cfg.generator.delay_ms, 2000);
        assert_eq!(cfg.output_dir, PathBuf::from("reports"));
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"layout:\n  margin: 15.0\n  overflow_threshold_y: 240.0\ngenerator:\n  seed: 3\n  delay_ms: 0\noutput_dir: out\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.layout.margin, 15.0);
        assert_eq!(cfg.layout.overflow_threshold_y, 240.0);
        assert_eq!(cfg.layout.bar_width, 100.0);
        assert_eq!(cfg.generator.seed, Some(3));
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn config_load_rejects_bad_layout() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"layout:\n  summary_threshold_y: 500.0\n").unwrap();
        let path = temp.into_temp_path();
        assert!(WorkflowConfig::load(&path).is_err());
    }
}
