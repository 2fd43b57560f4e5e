//! 配置管理模块
//!
//! 支持多层配置文件加载与环境变量覆盖，类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
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

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

/// 启动时注入的种子规则
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRule {
    pub condition: String,
    pub label: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_priority() -> i32 {
    1
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// 可选的种子规则，便于演示和本地开发
    #[serde(default)]
    pub seed_rules: Vec<SeedRule>,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. 环境变量（LABELER_ 前缀，如 LABELER_SERVER_PORT -> server.port）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("LABELER_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
        Self::load_from_dir(service_name, Path::new(&config_dir), &env)
    }

    /// 从指定目录加载配置文件，外加 LABELER_ 前缀的环境变量覆盖
    pub fn load_from_dir(
        service_name: &str,
        config_dir: &Path,
        env: &str,
    ) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                Environment::with_prefix("LABELER")
                    .separator("_")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 获取服务监听地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.seed_rules.is_empty());
    }

    #[test]
    fn test_load_from_dir_reads_seed_rules() {
        let dir = std::env::temp_dir().join("labeler-config-test-valid");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("default.toml"),
            r#"
[server]
host = "127.0.0.1"
port = 9999

[[seed_rules]]
condition = "Price > 10"
label = "expensive"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_dir("labeling-service", &dir, "development").unwrap();
        assert_eq!(config.server_addr(), "127.0.0.1:9999");
        assert_eq!(config.seed_rules.len(), 1);
        assert_eq!(config.seed_rules[0].label, "expensive");
        // priority 缺省为 1
        assert_eq!(config.seed_rules[0].priority, 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_dir_malformed_file_is_an_error() {
        let dir = std::env::temp_dir().join("labeler-config-test-malformed");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("default.toml"), "server = {").unwrap();

        let result = AppConfig::load_from_dir("labeling-service", &dir, "development");
        assert!(result.is_err());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 9000,
            },
            ..Default::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:9000");
    }
}
