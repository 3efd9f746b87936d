use crate::core::dispatcher::Channels;
use crate::core::parser::DEFAULT_PALETTE;
use crate::utils::error::{HookError, Result};
use crate::utils::validation::{
    validate_distinct, validate_hex_colors, validate_non_empty_string, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hook settings. Every section is optional; missing values take the
/// built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    pub channels: Channels,
    pub chart: ChartConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Series colors, assigned round-robin in field order.
    pub palette: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl HookConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HookError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CHART_CHANNEL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for HookConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("channels.chart", &self.channels.chart)?;
        validate_non_empty_string("channels.table", &self.channels.table)?;
        validate_non_empty_string("channels.diagram", &self.channels.diagram)?;
        validate_distinct(
            "channels",
            &[
                self.channels.chart.as_str(),
                self.channels.table.as_str(),
                self.channels.diagram.as_str(),
            ],
        )?;

        validate_hex_colors("chart.palette", &self.chart.palette)?;

        tracing::debug!("✅ Hook configuration validation passed");
        Ok(())
    }
}
