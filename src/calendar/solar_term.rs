// ==========================================
// 日期感知 - 最近节气定位
// ==========================================
// 算法: 取日期所在公历年的 24 个节气, 计算 d = 节气日期 - 查询日期
//       以 |d| 最小者为准, 严格小于比较（并列时保留先出现者）
// 分类: d == 0 今日 / 0 < d <= 2 临近 / -2 <= d < 0 已过 / 其余 当前节气
// ==========================================

use crate::calendar::astronomy;
use crate::calendar::error::{CalendarError, CalendarResult};
use crate::calendar::names::SOLAR_TERMS;
use crate::capability::Capabilities;
use crate::domain::CalendarDate;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// 节气"临近/已过"的判定窗口（天）
pub const PROXIMITY_WINDOW_DAYS: i64 = 2;

/// 天文节气计算支持的年份
pub const FIRST_SUPPORTED_YEAR: i32 = 1900;
pub const LAST_SUPPORTED_YEAR: i32 = 2100;

/// 单个节气
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTerm {
    pub name: &'static str,
    pub date: NaiveDate,
}

/// 与最近节气的相对关系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Proximity {
    /// 当日交节
    Today,
    /// 节气在未来 1-2 天内
    Approaching,
    /// 节气在过去 1-2 天内
    JustPassed,
    /// 超出 ±2 天窗口
    Current,
}

impl Proximity {
    /// 按有符号天数（正数表示节气在未来）分类
    pub fn classify(distance_days: i64) -> Self {
        match distance_days {
            0 => Proximity::Today,
            d if d > 0 && d <= PROXIMITY_WINDOW_DAYS => Proximity::Approaching,
            d if d < 0 && d >= -PROXIMITY_WINDOW_DAYS => Proximity::JustPassed,
            _ => Proximity::Current,
        }
    }
}

/// 最近节气查询结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTermInfo {
    pub term: SolarTerm,
    /// 节气日期 - 查询日期
    pub distance_days: i64,
    pub proximity: Proximity,
}

impl fmt::Display for SolarTermInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.term.name;
        match self.proximity {
            Proximity::Today => write!(f, "今日{}", name),
            Proximity::Approaching => write!(f, "临近{}", name),
            Proximity::JustPassed => write!(f, "{}已过", name),
            Proximity::Current => write!(f, "当前节气: {}", name),
        }
    }
}

// ==========================================
// TermCalendar Trait - 节气日期来源
// ==========================================
// 实现者: AstronomicalTermCalendar; 测试中可注入合成节气表
pub trait TermCalendar: Send + Sync {
    /// 返回某年的全部节气（按固定顺序）
    fn terms_for_year(&self, year: i32) -> CalendarResult<Vec<SolarTerm>>;
}

/// 天文算法节气表
#[derive(Debug, Clone, Copy, Default)]
pub struct AstronomicalTermCalendar;

impl TermCalendar for AstronomicalTermCalendar {
    fn terms_for_year(&self, year: i32) -> CalendarResult<Vec<SolarTerm>> {
        if !(FIRST_SUPPORTED_YEAR..=LAST_SUPPORTED_YEAR).contains(&year) {
            return Err(CalendarError::OutOfRange {
                year,
                min: FIRST_SUPPORTED_YEAR,
                max: LAST_SUPPORTED_YEAR,
            });
        }

        SOLAR_TERMS
            .iter()
            .enumerate()
            .map(|(index, &name)| {
                let jde = astronomy::solar_term_jde(year, index)?;
                let date = astronomy::beijing_date(jde).ok_or(CalendarError::OutOfRange {
                    year,
                    min: FIRST_SUPPORTED_YEAR,
                    max: LAST_SUPPORTED_YEAR,
                })?;
                Ok(SolarTerm { name, date })
            })
            .collect()
    }
}

// ==========================================
// SolarTermLocator - 最近节气定位器
// ==========================================
pub struct SolarTermLocator {
    capabilities: Capabilities,
    calendar: Box<dyn TermCalendar>,
}

impl SolarTermLocator {
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_calendar(capabilities, Box::new(AstronomicalTermCalendar))
    }

    pub fn with_calendar(capabilities: Capabilities, calendar: Box<dyn TermCalendar>) -> Self {
        Self {
            capabilities,
            calendar,
        }
    }

    /// 查找最近节气
    ///
    /// # 返回
    /// - Some(SolarTermInfo): 最近节气及相对关系
    /// - None: 能力不可用、年份不支持或节气表为空
    pub fn nearest_term(&self, date: &CalendarDate) -> Option<SolarTermInfo> {
        if !self.capabilities.lunar_conversion {
            return None;
        }

        let terms = match self.calendar.terms_for_year(date.year()) {
            Ok(terms) => terms,
            Err(e) => {
                tracing::debug!("节气计算失败: date={}, error={}", date, e);
                return None;
            }
        };

        let today = date.to_naive();
        let mut closest: Option<(SolarTerm, i64)> = None;
        for term in terms {
            let distance = (term.date - today).num_days();
            let is_closer = match closest {
                Some((_, best)) => distance.abs() < best.abs(),
                None => true,
            };
            if is_closer {
                closest = Some((term, distance));
            }
        }

        closest.map(|(term, distance_days)| SolarTermInfo {
            term,
            distance_days,
            proximity: Proximity::classify(distance_days),
        })
    }
}
