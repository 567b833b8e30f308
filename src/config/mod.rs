mod load;
mod types;

pub use load::LoadedProject;
pub use types::{AtlasConfig, ProjectConfig};

/// Starter config written by `quilt init`.
pub const PROJECT_TEMPLATE: &str = r#"{
  "atlas": [
    {
      "name": "atlas",
      "save_folder": "out",
      "input": ["images/*.png"],
      "max_width": 4096,
      "max_height": 4096,
      "padding": 0,
      "extrude": 0,
      "no_data": false
    }
  ]
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses() {
        let project: ProjectConfig = serde_json::from_str(PROJECT_TEMPLATE).unwrap();
        assert_eq!(project.atlas.len(), 1);
        assert_eq!(project.atlas[0].name, "atlas");
        assert!(!project.atlas[0].input.is_empty());
    }
}
