use crate::core::ConfigProvider;
use crate::utils::error::{HdError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_positive_number, validate_range,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CHART_MODES: [&str; 2] = ["remote", "static"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub chart: ChartConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// `remote` 呼叫外部服務；`static` 固定回傳 `static_type`
    pub mode: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub ephemeris: String,
    pub static_type: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            mode: "remote".to_string(),
            endpoint: "http://127.0.0.1:9000/chart/type".to_string(),
            timeout_seconds: 10,
            ephemeris: "moshier".to_string(),
            static_type: "Generator".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allow_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub verbose: bool,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，缺少的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HdError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CHART_ENDPOINT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HdError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn is_static_chart(&self) -> bool {
        self.chart.mode == "static"
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;

        validate_one_of("chart.mode", &self.chart.mode, &CHART_MODES)?;
        if self.is_static_chart() {
            validate_non_empty_string("chart.static_type", &self.chart.static_type)?;
        } else {
            validate_url("chart.endpoint", &self.chart.endpoint)?;
            validate_positive_number("chart.timeout_seconds", self.chart.timeout_seconds, 1)?;
            validate_non_empty_string("chart.ephemeris", &self.chart.ephemeris)?;
        }

        validate_non_empty_string("cors.allow_origin", &self.cors.allow_origin)?;
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn chart_endpoint(&self) -> &str {
        &self.chart.endpoint
    }

    fn chart_timeout(&self) -> Duration {
        Duration::from_secs(self.chart.timeout_seconds)
    }

    fn ephemeris(&self) -> &str {
        &self.chart.ephemeris
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
