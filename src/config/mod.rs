// ==========================================
// 日期感知 - 配置层
// ==========================================
// 职责: 读取 TOML 配置,提供默认值
// 存储: config.toml（缺失时全部使用默认值）
// ==========================================

pub mod error;
pub mod perception_config;

// 重导出
pub use error::{ConfigError, ConfigResult};
pub use perception_config::{
    ComponentsConfig, HolidayConfig, LlmConfig, PerceptionConfig, PerceptionSection, PluginConfig,
    CACHE_DIR_ENV, DEFAULT_ENDPOINT_TEMPLATE, DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_TIMEZONE,
};
