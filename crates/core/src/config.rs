//! 应用配置
//!
//! 配置来源优先级：TOML文件 < 环境变量（HMMS_前缀）。
//! 未找到配置文件时使用内置默认值。

use ::config::{Config as ConfigBuilder, Environment, File, FileFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{MaintenanceError, MaintenanceResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub scheduler: SchedulerConfig,
    pub push: PushConfig,
    pub observability: ObservabilityConfig,
}

/// 数据库配置（嵌入式SQLite）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

/// 扫描器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub enabled: bool,
    /// 扫描间隔（秒）。源系统每分钟扫描一次，生产节奏属于部署选择
    pub scan_interval_seconds: u64,
    /// 计划没有负责人时，生成的工单以该系统用户作为创建者
    pub system_user_id: String,
}

/// 推送网关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    pub enabled: bool,
    pub gateway_url: String,
    pub request_timeout_seconds: u64,
}

/// 可观测性配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
}

pub const DEFAULT_PUSH_GATEWAY_URL: &str = "https://exp.host/--/api/v2/push/send";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://data/hmms.db".to_string(),
                max_connections: 5,
                min_connections: 1,
                connection_timeout_seconds: 30,
                idle_timeout_seconds: 600,
            },
            scheduler: SchedulerConfig {
                enabled: true,
                scan_interval_seconds: 60,
                system_user_id: "SYSTEM_ADMIN".to_string(),
            },
            push: PushConfig {
                enabled: true,
                gateway_url: DEFAULT_PUSH_GATEWAY_URL.to_string(),
                request_timeout_seconds: 10,
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("配置文件不存在: {}", path));
            }
        } else {
            let default_paths = ["config/hmms.toml", "hmms.toml", "/etc/hmms/config.toml"];

            let mut config_file_found = false;
            for path in &default_paths {
                if Path::new(path).exists() {
                    builder = builder.add_source(File::new(path, FileFormat::Toml));
                    config_file_found = true;
                    break;
                }
            }

            if !config_file_found {
                builder = builder
                    .set_default("database.url", "sqlite://data/hmms.db")?
                    .set_default("database.max_connections", 5)?
                    .set_default("database.min_connections", 1)?
                    .set_default("database.connection_timeout_seconds", 30)?
                    .set_default("database.idle_timeout_seconds", 600)?
                    .set_default("scheduler.enabled", true)?
                    .set_default("scheduler.scan_interval_seconds", 60)?
                    .set_default("scheduler.system_user_id", "SYSTEM_ADMIN")?
                    .set_default("push.enabled", true)?
                    .set_default("push.gateway_url", DEFAULT_PUSH_GATEWAY_URL)?
                    .set_default("push.request_timeout_seconds", 10)?
                    .set_default("observability.log_level", "info")?;
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("HMMS")
                .separator("_")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .context("构建配置失败")?
            .try_deserialize()
            .context("反序列化配置失败")?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("解析TOML配置失败")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("序列化配置为TOML失败")
    }

    pub fn validate(&self) -> MaintenanceResult<()> {
        if self.database.url.is_empty() {
            return Err(MaintenanceError::Configuration(
                "database.url 不能为空".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(MaintenanceError::Configuration(
                "database.max_connections 必须大于0".to_string(),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(MaintenanceError::Configuration(
                "database.min_connections 不能大于 max_connections".to_string(),
            ));
        }
        if self.scheduler.scan_interval_seconds == 0 {
            return Err(MaintenanceError::Configuration(
                "scheduler.scan_interval_seconds 必须大于0".to_string(),
            ));
        }
        if self.scheduler.system_user_id.is_empty() {
            return Err(MaintenanceError::Configuration(
                "scheduler.system_user_id 不能为空".to_string(),
            ));
        }
        if self.push.enabled && self.push.gateway_url.is_empty() {
            return Err(MaintenanceError::Configuration(
                "push.gateway_url 不能为空".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.scheduler.scan_interval_seconds, 60);
        assert_eq!(config.scheduler.system_user_id, "SYSTEM_ADMIN");
        assert_eq!(config.push.gateway_url, DEFAULT_PUSH_GATEWAY_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_app_config_from_toml() {
        let toml_str = r#"
[database]
url = "sqlite://test/hmms.db"
max_connections = 10
min_connections = 1
connection_timeout_seconds = 30
idle_timeout_seconds = 600

[scheduler]
enabled = true
scan_interval_seconds = 5
system_user_id = "SYSTEM_ADMIN"

[push]
enabled = false
gateway_url = "https://exp.host/--/api/v2/push/send"
request_timeout_seconds = 10

[observability]
log_level = "debug"
"#;

        let config = AppConfig::from_toml(toml_str).expect("Failed to parse TOML");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.scheduler.scan_interval_seconds, 5);
        assert!(!config.push.enabled);
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_app_config_toml_round_trip() {
        let config = AppConfig::default();
        let serialized = config.to_toml().expect("Failed to serialize");
        let deserialized = AppConfig::from_toml(&serialized).expect("Failed to deserialize");
        assert_eq!(
            config.scheduler.scan_interval_seconds,
            deserialized.scheduler.scan_interval_seconds
        );
        assert_eq!(config.database.url, deserialized.database.url);
    }

    #[test]
    fn test_app_config_validation_rejects_zero_interval() {
        let mut config = AppConfig::default();
        config.scheduler.scan_interval_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_app_config_validation_rejects_empty_system_user() {
        let mut config = AppConfig::default();
        config.scheduler.system_user_id = String::new();
        assert!(config.validate().is_err());
    }
}
