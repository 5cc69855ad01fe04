// ==========================================
// 日期感知 - 节假日数据层
// ==========================================
// 职责: 节假日状态级联判定
// 数据源: 内置分类器 / 本地年表缓存 / 远程下载 / 固定节日 / 周末判断
// ==========================================

pub mod cache;
pub mod error;
pub mod official_calendar;
pub mod remote;
pub mod resolver;
pub mod tiers;

// 重导出
pub use cache::{HolidayCache, HolidayStore, JsonFileStore};
pub use error::{HolidayError, HolidayResult};
pub use official_calendar::{HolidayClassifier, OfficialCalendar};
pub use remote::{endpoint_url, parse_dates_payload, HttpHolidaySource, RemoteHolidaySource};
pub use resolver::HolidayResolver;
pub use tiers::{
    status_from_record, CacheTier, FixedTableTier, HolidayTier, LocalLibraryTier,
    WeekdayFallbackTier, FIXED_HOLIDAYS,
};
