use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::types::{AtlasConfig, ProjectConfig};

/// A loaded project file with its associated directory.
///
/// Paths in the config are relative to the config file location,
/// so we need to track where the config was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    /// The parsed configuration
    pub config: ProjectConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedProject {
    /// Load and validate a project file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: ProjectConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if config.atlas.is_empty() {
            bail!("no atlas entries in config file: {}", path.display());
        }
        for entry in &config.atlas {
            validate_entry(entry)?;
        }

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Resolve one entry's input patterns to actual file paths.
    ///
    /// Glob patterns are expanded, and all paths are resolved relative
    /// to the config file directory.
    pub fn resolve_inputs(&self, entry: &AtlasConfig) -> Result<Vec<PathBuf>> {
        let mut results = Vec::new();

        for pattern in &entry.input {
            if is_glob_pattern(pattern) {
                let full_pattern = self.config_dir.join(pattern);
                let pattern_str = full_pattern.to_string_lossy();

                let paths = glob::glob(&pattern_str)
                    .with_context(|| format!("invalid glob pattern: {}", pattern))?;

                for found in paths {
                    let path =
                        found.with_context(|| format!("failed to read glob entry: {}", pattern))?;
                    results.push(path);
                }
            } else {
                results.push(self.config_dir.join(pattern));
            }
        }

        Ok(results)
    }

    /// Resolve an entry's save folder relative to the config file directory.
    pub fn resolve_save_folder(&self, entry: &AtlasConfig) -> PathBuf {
        self.config_dir.join(&entry.save_folder)
    }
}

/// Range checks the type system cannot express. Runs once at the loading
/// boundary; the packing core assumes validated values.
fn validate_entry(entry: &AtlasConfig) -> Result<()> {
    if entry.name.is_empty() {
        bail!("atlas entry has an empty name");
    }
    if entry.max_width == 0 || entry.max_height == 0 {
        bail!(
            "atlas '{}': max_width and max_height must be positive",
            entry.name
        );
    }
    if entry.input.is_empty() {
        bail!("atlas '{}': no input paths configured", entry.name);
    }
    Ok(())
}

/// Check if a pattern contains glob characters.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}
