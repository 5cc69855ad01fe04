// ==========================================
// 日期感知 - 领域类型定义
// ==========================================
// 职责: 公历日期值对象、节假日状态
// 红线: 纯值类型,不含 I/O
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 调休工作日的默认标签（数据源未给出节日名称时使用）
pub const MAKE_UP_LABEL: &str = "调休";

/// 周末状态文本
pub const WEEKEND_LABEL: &str = "周末";

/// 普通工作日状态文本（展示层通常省略）
pub const WORKDAY_LABEL: &str = "工作日";

// ==========================================
// CalendarDate - 公历日期
// ==========================================
// 内部只保存 chrono 日期,年月日与星期均由其派生,不会出现不一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "CalendarDateFields")]
pub struct CalendarDate {
    date: NaiveDate,
}

/// 序列化形状: { year, month, day, weekday }
#[derive(Serialize)]
struct CalendarDateFields {
    year: i32,
    month: u32,
    day: u32,
    weekday: u32,
}

impl From<CalendarDate> for CalendarDateFields {
    fn from(date: CalendarDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            weekday: date.weekday(),
        }
    }
}

impl CalendarDate {
    /// 由年月日构造，日期非法时返回 None
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from_naive)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self { date }
    }

    /// 解析 "YYYY-MM-DD"
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .ok()
            .map(Self::from_naive)
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// 0=周一 ... 6=周日
    pub fn weekday(&self) -> u32 {
        self.date.weekday().num_days_from_monday()
    }

    /// 转回 chrono 日期
    pub fn to_naive(&self) -> NaiveDate {
        self.date
    }

    /// 年表键: "YYYY-MM-DD"
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// 固定节日表键: "MM-DD"
    pub fn month_day_key(&self) -> String {
        self.date.format("%m-%d").to_string()
    }

    /// 周六或周日
    pub fn is_weekend(&self) -> bool {
        self.weekday() >= 5
    }

    /// 偏移若干天，超出 chrono 支持范围时返回 None
    pub fn offset_days(&self, days: i64) -> Option<Self> {
        self.date
            .checked_add_signed(chrono::Duration::days(days))
            .map(Self::from_naive)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ==========================================
// HolidayStatus - 节假日状态
// ==========================================
// 每个日期只由级联中的一层给出最终结果,不做合并
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HolidayStatus {
    /// 有名称的节假日或调休工作日
    Named {
        label: String,
        is_make_up_workday: bool,
    },
    /// 周末
    Weekend,
    /// 普通工作日
    Workday,
}

impl HolidayStatus {
    pub fn holiday(label: impl Into<String>) -> Self {
        HolidayStatus::Named {
            label: label.into(),
            is_make_up_workday: false,
        }
    }

    pub fn make_up_workday(label: impl Into<String>) -> Self {
        HolidayStatus::Named {
            label: label.into(),
            is_make_up_workday: true,
        }
    }

    /// 纯星期兜底判断
    pub fn by_weekday(date: &CalendarDate) -> Self {
        if date.is_weekend() {
            HolidayStatus::Weekend
        } else {
            HolidayStatus::Workday
        }
    }

    /// 是否为"无特殊信息"的普通工作日（展示层据此省略）
    pub fn is_plain_workday(&self) -> bool {
        matches!(self, HolidayStatus::Workday)
    }

    /// 当天是否需要上班（普通工作日或调休工作日）
    pub fn is_working_day(&self) -> bool {
        match self {
            HolidayStatus::Named {
                is_make_up_workday, ..
            } => *is_make_up_workday,
            HolidayStatus::Weekend => false,
            HolidayStatus::Workday => true,
        }
    }
}

impl fmt::Display for HolidayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayStatus::Named {
                label,
                is_make_up_workday: true,
            } if label.is_empty() || label == MAKE_UP_LABEL => write!(f, "{}", MAKE_UP_LABEL),
            HolidayStatus::Named {
                label,
                is_make_up_workday: true,
            } => write!(f, "{}（{}）", label, MAKE_UP_LABEL),
            HolidayStatus::Named { label, .. } => write!(f, "{}", label),
            HolidayStatus::Weekend => write!(f, "{}", WEEKEND_LABEL),
            HolidayStatus::Workday => write!(f, "{}", WORKDAY_LABEL),
        }
    }
}
