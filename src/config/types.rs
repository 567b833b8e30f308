use serde::{Deserialize, Serialize};

/// One atlas definition inside a project file.
///
/// All paths are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Base name for output files (name.png / name_0.png, name.json)
    pub name: String,
    /// Directory the page images and data file are written to
    pub save_folder: String,
    /// Input file paths or glob patterns
    pub input: Vec<String>,
    /// Maximum page width in pixels
    pub max_width: u32,
    /// Maximum page height in pixels
    pub max_height: u32,
    /// Gap between sprites in pixels
    pub padding: u32,
    /// Extrude sprite edges by N pixels (prevents texture bleeding)
    pub extrude: u32,
    /// Skip writing the JSON data file
    pub no_data: bool,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            name: "atlas".to_string(),
            save_folder: ".".to_string(),
            input: Vec::new(),
            max_width: 4096,
            max_height: 4096,
            padding: 0,
            extrude: 0,
            no_data: false,
        }
    }
}

/// Project configuration file: a list of atlas definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub atlas: Vec<AtlasConfig>,
}
