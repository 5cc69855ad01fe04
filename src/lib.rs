// ==========================================
// 日期感知 - 核心库
// ==========================================
// 职责: 对任意公历日期给出节假日状态、农历表示与最近节气
// 核心: 节假日多数据源级联 + 农历/节气计算
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值类型
pub mod domain;

// 历法层 - 农历与节气
pub mod calendar;

// 节假日层 - 级联判定、缓存、远程数据
pub mod holiday;

// 感知层 - 对外查询与文本组装
pub mod perception;

// 配置层
pub mod config;

// 可选能力标记
pub mod capability;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use calendar::{CalendarMath, LunarDate, Proximity, SolarTerm, SolarTermInfo, SolarTermLocator};
pub use capability::Capabilities;
pub use config::PerceptionConfig;
pub use domain::{CalendarDate, HolidayStatus, HolidayYearTable};
pub use holiday::{HolidayCache, HolidayResolver, RemoteHolidaySource};
pub use perception::{DateInfoAssembler, DatePerception, DateResolution};

// ==========================================
// 常量定义
// ==========================================

// 版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 名称
pub const APP_NAME: &str = "日期感知";
