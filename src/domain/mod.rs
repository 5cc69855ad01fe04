// ==========================================
// 日期感知 - 领域模型层
// ==========================================
// 职责: 定义日期、节假日状态、节假日年表等值类型
// 红线: 不含数据访问逻辑,不含级联逻辑
// ==========================================

pub mod holiday_table;
pub mod types;

// 重导出核心类型
pub use holiday_table::{HolidayKind, HolidayRecord, HolidayYearTable, TRANSFER_WORKDAY_TYPE};
pub use types::{CalendarDate, HolidayStatus, MAKE_UP_LABEL, WEEKEND_LABEL, WORKDAY_LABEL};
