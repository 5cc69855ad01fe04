// ==========================================
// 日期感知 - 农历转换
// ==========================================
// 干支纪年: o = (农历年 - 4) mod 60, 天干 = o mod 10, 地支 = o mod 12
// 生肖与地支同序
// 输出格式: 农历{干}{支}年({生肖}年){月名}{日名}
// ==========================================

use crate::calendar::error::{CalendarError, CalendarResult};
use crate::calendar::lunar_table;
use crate::calendar::names::{
    EARTHLY_BRANCHES, HEAVENLY_STEMS, LEAP_MONTH_MARKER, LUNAR_DAYS, LUNAR_MONTHS, ZODIAC_ANIMALS,
};
use crate::capability::Capabilities;
use crate::domain::CalendarDate;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// 干支纪年的参照年（公元 4 年为甲子年）
const SEXAGENARY_EPOCH_YEAR: i32 = 4;

// ==========================================
// LunarDate - 农历日期
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LunarDate {
    pub lunar_year: i32,
    /// 1..=12
    pub lunar_month: u32,
    pub is_leap_month: bool,
    /// 1..=30
    pub lunar_day: u32,
    /// 0..=9
    pub stem_index: usize,
    /// 0..=11
    pub branch_index: usize,
    /// 与 branch_index 相同
    pub zodiac_index: usize,
}

impl LunarDate {
    /// 构造农历日期，并计算干支/生肖序号
    ///
    /// # 返回
    /// - Err(InvalidLunarValue): 月份不在 1..=12 或日不在 1..=30
    pub fn new(
        lunar_year: i32,
        lunar_month: u32,
        is_leap_month: bool,
        lunar_day: u32,
    ) -> CalendarResult<Self> {
        if !(1..=12).contains(&lunar_month) {
            return Err(CalendarError::InvalidLunarValue {
                field: "lunar_month",
                value: lunar_month as i64,
            });
        }
        if !(1..=30).contains(&lunar_day) {
            return Err(CalendarError::InvalidLunarValue {
                field: "lunar_day",
                value: lunar_day as i64,
            });
        }

        let (stem_index, branch_index) = sexagenary_indices(lunar_year);
        Ok(Self {
            lunar_year,
            lunar_month,
            is_leap_month,
            lunar_day,
            stem_index,
            branch_index,
            zodiac_index: branch_index,
        })
    }

    pub fn stem(&self) -> &'static str {
        HEAVENLY_STEMS[self.stem_index]
    }

    pub fn branch(&self) -> &'static str {
        EARTHLY_BRANCHES[self.branch_index]
    }

    pub fn zodiac(&self) -> &'static str {
        ZODIAC_ANIMALS[self.zodiac_index]
    }

    /// 月名，闰月带"闰"前缀
    pub fn month_name(&self) -> String {
        let name = LUNAR_MONTHS[(self.lunar_month - 1) as usize];
        if self.is_leap_month {
            format!("{}{}", LEAP_MONTH_MARKER, name)
        } else {
            name.to_string()
        }
    }

    pub fn day_name(&self) -> &'static str {
        LUNAR_DAYS[(self.lunar_day - 1) as usize]
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "农历{}{}年({}年){}{}",
            self.stem(),
            self.branch(),
            self.zodiac(),
            self.month_name(),
            self.day_name()
        )
    }
}

/// 计算农历年的 (天干序号, 地支序号)，周期 60
pub fn sexagenary_indices(lunar_year: i32) -> (usize, usize) {
    let offset = (lunar_year - SEXAGENARY_EPOCH_YEAR).rem_euclid(60) as usize;
    (offset % 10, offset % 12)
}

// ==========================================
// LunarConverter Trait - 公历转农历能力
// ==========================================
// 实现者: TableLunarConverter（内置年信息表）
pub trait LunarConverter: Send + Sync {
    /// 公历日期转农历日期
    fn solar_to_lunar(&self, date: NaiveDate) -> CalendarResult<LunarDate>;
}

/// 基于内置年信息表的转换器，支持农历 1900-2100 年
#[derive(Debug, Clone, Copy, Default)]
pub struct TableLunarConverter;

impl LunarConverter for TableLunarConverter {
    fn solar_to_lunar(&self, date: NaiveDate) -> CalendarResult<LunarDate> {
        let epoch = lunar_table::epoch().ok_or_else(|| out_of_range(date.year()))?;
        let mut offset = (date - epoch).num_days();
        if offset < 0 {
            return Err(out_of_range(date.year()));
        }

        // 1) 逐年扣减
        let mut year = lunar_table::FIRST_YEAR;
        loop {
            if year > lunar_table::LAST_YEAR {
                return Err(out_of_range(date.year()));
            }
            let days = lunar_table::year_days(year) as i64;
            if offset < days {
                break;
            }
            offset -= days;
            year += 1;
        }

        // 2) 逐月扣减，闰月紧跟在同名平月之后
        let leap = lunar_table::leap_month(year);
        let mut month = 1u32;
        let mut in_leap = false;
        loop {
            let days = if in_leap {
                lunar_table::leap_month_days(year)
            } else {
                lunar_table::month_days(year, month)
            } as i64;
            if offset < days {
                break;
            }
            offset -= days;
            if month == leap && !in_leap {
                in_leap = true;
            } else {
                in_leap = false;
                month += 1;
            }
            if month > 12 {
                return Err(CalendarError::InvalidLunarValue {
                    field: "lunar_month",
                    value: month as i64,
                });
            }
        }

        LunarDate::new(year, month, in_leap, offset as u32 + 1)
    }
}

fn out_of_range(year: i32) -> CalendarError {
    CalendarError::OutOfRange {
        year,
        min: lunar_table::FIRST_YEAR,
        max: lunar_table::LAST_YEAR,
    }
}

// ==========================================
// CalendarMath - 农历查询入口
// ==========================================
// 能力缺失或转换失败一律返回 None（"不可用"）,不向上传播
pub struct CalendarMath {
    capabilities: Capabilities,
    converter: Box<dyn LunarConverter>,
}

impl CalendarMath {
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_converter(capabilities, Box::new(TableLunarConverter))
    }

    pub fn with_converter(capabilities: Capabilities, converter: Box<dyn LunarConverter>) -> Self {
        Self {
            capabilities,
            converter,
        }
    }

    /// 公历转农历
    ///
    /// # 返回
    /// - Some(LunarDate): 转换成功
    /// - None: 转换能力不可用或日期超出支持范围
    pub fn to_lunar(&self, date: &CalendarDate) -> Option<LunarDate> {
        if !self.capabilities.lunar_conversion {
            return None;
        }

        match self.converter.solar_to_lunar(date.to_naive()) {
            Ok(lunar) => Some(lunar),
            Err(e) => {
                tracing::debug!("农历转换失败: date={}, error={}", date, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(y: i32, m: u32, d: u32) -> CalendarResult<LunarDate> {
        TableLunarConverter.solar_to_lunar(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_known_dates() {
        let dataset = [
            ((2000, 1, 1), (1999, 11, false, 25)),
            ((2017, 1, 28), (2017, 1, false, 1)),
            ((2017, 7, 22), (2017, 6, false, 29)),
            ((2017, 7, 23), (2017, 6, true, 1)),
            ((2017, 12, 17), (2017, 10, false, 30)),
            ((2024, 2, 10), (2024, 1, false, 1)),
            ((2023, 3, 22), (2023, 2, true, 1)),
            ((2025, 7, 25), (2025, 6, true, 1)),
        ];
        for ((y, m, d), (ly, lm, leap, ld)) in dataset {
            let lunar = convert(y, m, d).unwrap();
            assert_eq!(
                (lunar.lunar_year, lunar.lunar_month, lunar.is_leap_month, lunar.lunar_day),
                (ly, lm, leap, ld),
                "date={}-{}-{}",
                y,
                m,
                d
            );
        }
    }

    #[test]
    fn test_epoch_and_bounds() {
        let lunar = convert(1900, 1, 31).unwrap();
        assert_eq!((lunar.lunar_year, lunar.lunar_month, lunar.lunar_day), (1900, 1, 1));

        assert!(matches!(
            convert(1900, 1, 30),
            Err(CalendarError::OutOfRange { .. })
        ));
        assert!(convert(2100, 12, 31).is_ok());
        assert!(matches!(
            convert(2101, 6, 1),
            Err(CalendarError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_display_format() {
        let lunar = convert(2024, 2, 10).unwrap();
        assert_eq!(lunar.to_string(), "农历甲辰年(龙年)正月初一");

        let leap = convert(2023, 3, 22).unwrap();
        assert_eq!(leap.to_string(), "农历癸卯年(兔年)闰二月初一");

        let winter = convert(2000, 1, 1).unwrap();
        assert_eq!(winter.to_string(), "农历己卯年(兔年)冬月廿五");
    }

    #[test]
    fn test_sexagenary_cycle_period_60() {
        for year in [1900, 1984, 2024, 2044] {
            assert_eq!(sexagenary_indices(year), sexagenary_indices(year + 60));
        }
        // 1984 甲子
        assert_eq!(sexagenary_indices(1984), (0, 0));
        // 公元前年份也落在 0..60
        assert_eq!(sexagenary_indices(-56), (0, 0));
    }

    #[test]
    fn test_invalid_lunar_values() {
        assert!(LunarDate::new(2024, 13, false, 1).is_err());
        assert!(LunarDate::new(2024, 1, false, 31).is_err());
        assert!(LunarDate::new(2024, 0, false, 1).is_err());
    }

    #[test]
    fn test_calendar_math_capability_gate() {
        let date = CalendarDate::from_ymd(2024, 2, 10).unwrap();

        let enabled = CalendarMath::new(Capabilities::all());
        assert!(enabled.to_lunar(&date).is_some());

        let disabled = CalendarMath::new(Capabilities::none());
        assert!(disabled.to_lunar(&date).is_none());

        let out_of_range = CalendarDate::from_ymd(1880, 1, 1).unwrap();
        assert!(enabled.to_lunar(&out_of_range).is_none());
    }
}
