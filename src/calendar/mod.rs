// ==========================================
// 日期感知 - 历法计算层
// ==========================================
// 职责: 农历转换、干支生肖、二十四节气
// 红线: 纯计算,无 I/O;不参与节假日级联
// ==========================================

pub mod astronomy;
pub mod error;
pub mod lunar;
pub mod lunar_table;
pub mod names;
pub mod solar_term;

// 重导出
pub use error::{CalendarError, CalendarResult};
pub use lunar::{sexagenary_indices, CalendarMath, LunarConverter, LunarDate, TableLunarConverter};
pub use names::{classify_time_period, format_date_short, weekday_cn};
pub use solar_term::{
    AstronomicalTermCalendar, Proximity, SolarTerm, SolarTermInfo, SolarTermLocator, TermCalendar,
};
