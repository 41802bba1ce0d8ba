//! @ai:module:intent Configuration structs for the analysis tool
//! @ai:module:layer infrastructure
//! @ai:module:public_api QlensConfig, ApiConfig, UploadConfig, ExportConfig
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Top-level configuration, loaded from `qlens.toml`
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QlensConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// @ai:intent Generation service settings; the key itself is read from the environment
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// @ai:intent Transcript upload contract
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

/// @ai:intent Standalone HTML export settings
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_filename")]
    pub filename: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_chart_library_url")]
    pub chart_library_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            max_output_tokens: None,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: default_filename(),
            title: default_title(),
            chart_library_url: default_chart_library_url(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_max_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    [".txt", ".md", ".rtf"].iter().map(|s| s.to_string()).collect()
}

fn default_filename() -> String {
    crate::export::EXPORT_FILENAME.to_string()
}

fn default_title() -> String {
    "Q-Lens AI Report".to_string()
}

fn default_chart_library_url() -> String {
    crate::export::CHART_LIBRARY_URL.to_string()
}

impl QlensConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_upload_contract() {
        let config = QlensConfig::default();
        assert_eq!(config.upload.max_bytes, 5_242_880);
        assert_eq!(config.upload.allowed_extensions, vec![".txt", ".md", ".rtf"]);
        assert_eq!(config.export.filename, "Q-Lens-AI-Report.html");
        assert_eq!(config.api.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: QlensConfig = toml::from_str(
            r#"
            [api]
            model = "gemini-2.5-flash"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.model, "gemini-2.5-flash");
        assert!((config.api.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.upload.max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qlens.toml");
        let mut config = QlensConfig::default();
        config.api.max_output_tokens = Some(8192);
        config.save(&path).unwrap();

        let loaded = QlensConfig::load(&path).unwrap();
        assert_eq!(loaded.api.max_output_tokens, Some(8192));
        assert_eq!(loaded.export.title, "Q-Lens AI Report");
    }
}
