use crate::config::toml_config::AppConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;

/// 命令列參數；有給值的會覆蓋設定檔
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "hd-type-server")]
#[command(about = "HTTP service that resolves a birth moment to a chart Type")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, env = "HD_CONFIG")]
    pub config: Option<String>,

    #[arg(long, env = "HD_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "HD_PORT")]
    pub port: Option<u16>,

    /// `remote` or `static`
    #[arg(long, env = "HD_CHART_MODE")]
    pub chart_mode: Option<String>,

    #[arg(long, env = "HD_CHART_ENDPOINT")]
    pub chart_endpoint: Option<String>,

    #[arg(long, env = "HD_CHART_TIMEOUT_SECONDS")]
    pub chart_timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliArgs {
    /// 設定檔 → 命令列覆蓋，尚未驗證
    pub fn load_config(&self) -> Result<AppConfig> {
        let config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        Ok(self.apply_overrides(config))
    }

    pub fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(mode) = &self.chart_mode {
            config.chart.mode = mode.clone();
        }
        if let Some(endpoint) = &self.chart_endpoint {
            config.chart.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.chart_timeout_seconds {
            config.chart.timeout_seconds = timeout;
        }
        if self.verbose {
            config.logging.verbose = true;
        }
        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file_values() {
        let file_config = AppConfig::from_toml_str(
            "[server]\nport = 3000\n[chart]\nendpoint = \"https://file.example.com/type\"",
        )
        .unwrap();

        let args = CliArgs::parse_from([
            "hd-type-server",
            "--port",
            "4000",
            "--chart-mode",
            "static",
            "--json-logs",
        ]);
        let config = args.apply_overrides(file_config);

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.chart.mode, "static");
        assert_eq!(config.chart.endpoint, "https://file.example.com/type");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.logging.verbose);
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let config = CliArgs::default().load_config().unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.chart.mode, "remote");
    }
}
