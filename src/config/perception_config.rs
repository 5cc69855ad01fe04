// ==========================================
// 日期感知 - 配置定义
// ==========================================
// 分节: plugin / perception / components / holiday / llm
// 每个字段都有默认值,配置文件缺失等同于全部默认
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 默认时区
pub const DEFAULT_TIMEZONE: &str = "Asia/Shanghai";

/// 节假日数据下载 URL 模板，`{year}` 为年份占位符
pub const DEFAULT_ENDPOINT_TEMPLATE: &str =
    "https://unpkg.com/holiday-calendar@1.3.0/data/CN/{year}.json";

/// 远程下载超时（毫秒）
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 2_000;

/// 缓存目录环境变量
pub const CACHE_DIR_ENV: &str = "DATE_PERCEPTION_CACHE_DIR";

/// 顶层配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// 插件基本信息
    pub plugin: PluginConfig,
    /// 感知功能配置
    pub perception: PerceptionSection,
    /// 组件开关（由宿主读取）
    pub components: ComponentsConfig,
    /// 节假日数据源配置
    pub holiday: HolidayConfig,
    /// LLM 扩展配置（由宿主读取）
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub enabled: bool,
    pub config_version: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            config_version: "1.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PerceptionSection {
    /// IANA 时区标识符
    pub timezone: String,
    pub enable_holiday: bool,
    pub enable_lunar: bool,
    pub enable_solar_term: bool,
}

impl Default for PerceptionSection {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            enable_holiday: true,
            enable_lunar: true,
            enable_solar_term: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComponentsConfig {
    pub enable_event_handler: bool,
    pub enable_tool: bool,
    pub enable_command: bool,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            enable_event_handler: true,
            enable_tool: true,
            enable_command: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HolidayConfig {
    /// 年表缓存目录（None 时按默认规则解析）
    pub cache_dir: Option<PathBuf>,
    pub endpoint_template: String,
    pub fetch_timeout_ms: u64,
    pub enable_local_library: bool,
    pub enable_network: bool,
}

impl Default for HolidayConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            endpoint_template: DEFAULT_ENDPOINT_TEMPLATE.to_string(),
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            enable_local_library: true,
            enable_network: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub enable_llm_expand: bool,
    pub llm_model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enable_llm_expand: false,
            llm_model: "replyer".to_string(),
        }
    }
}

impl PerceptionConfig {
    /// 从 TOML 文本解析
    pub fn from_toml_str(toml_str: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// 从文件加载
    ///
    /// # 返回
    /// - Err(Read): 文件不可读
    /// - Err(Parse): TOML 格式错误
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let toml_str = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&toml_str)
    }

    /// 从文件加载，文件缺失或无效时使用默认配置
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("配置文件不存在，使用默认配置: {}", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{}，使用默认配置", e);
                Self::default()
            }
        }
    }

    /// 解析时区
    pub fn try_timezone(&self) -> ConfigResult<Tz> {
        self.perception
            .timezone
            .trim()
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimezone(self.perception.timezone.clone()))
    }

    /// 解析时区，无效时记录错误并回退到 Asia/Shanghai
    pub fn timezone(&self) -> Tz {
        match self.try_timezone() {
            Ok(tz) => tz,
            Err(e) => {
                tracing::error!("{}，使用默认时区 {}", e, DEFAULT_TIMEZONE);
                chrono_tz::Asia::Shanghai
            }
        }
    }

    /// 远程下载超时
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.holiday.fetch_timeout_ms)
    }

    /// 解析年表缓存目录
    ///
    /// 优先级: 配置项 -> 环境变量 -> 用户数据目录 -> ./data/holidays
    pub fn cache_dir(&self) -> PathBuf {
        if let Some(dir) = &self.holiday.cache_dir {
            return dir.clone();
        }

        if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        match dirs::data_dir() {
            Some(data_dir) => data_dir.join("date-perception").join("holidays"),
            None => PathBuf::from("data").join("holidays"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PerceptionConfig::default();
        assert!(config.plugin.enabled);
        assert_eq!(config.perception.timezone, "Asia/Shanghai");
        assert!(config.perception.enable_lunar);
        assert_eq!(config.holiday.fetch_timeout_ms, 2_000);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(2));
        assert!(!config.llm.enable_llm_expand);
        assert_eq!(config.llm.llm_model, "replyer");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PerceptionConfig::from_toml_str(
            r#"
            [perception]
            enable_lunar = false

            [holiday]
            cache_dir = "/tmp/holidays"
            "#,
        )
        .unwrap();

        assert!(!config.perception.enable_lunar);
        assert!(config.perception.enable_solar_term);
        assert_eq!(config.cache_dir(), PathBuf::from("/tmp/holidays"));
        assert_eq!(config.holiday.endpoint_template, DEFAULT_ENDPOINT_TEMPLATE);
    }

    #[test]
    fn test_malformed_toml() {
        let result = PerceptionConfig::from_toml_str("[perception\nfoo=");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_timezone_falls_back() {
        let mut config = PerceptionConfig::default();
        config.perception.timezone = "Mars/Olympus".to_string();
        assert!(config.try_timezone().is_err());
        assert_eq!(config.timezone(), chrono_tz::Asia::Shanghai);

        config.perception.timezone = "Europe/Berlin".to_string();
        assert_eq!(config.timezone(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = PerceptionConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert!(config.plugin.enabled);
    }
}
