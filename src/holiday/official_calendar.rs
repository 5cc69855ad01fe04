// ==========================================
// 日期感知 - 内置节假日分类器
// ==========================================
// 数据: 国务院办公厅节假日安排（2024-2026）
// 规则: 放假区间内 -> 节假日; 调休上班日 -> 工作日; 其余按周末判断
// 红线: 表外年份返回 UnsupportedYear,由级联降级处理
// ==========================================

use crate::domain::CalendarDate;
use crate::holiday::error::{HolidayError, HolidayResult};

/// (月, 日)
type MonthDay = (u32, u32);

/// 单个节日的放假安排
#[derive(Debug, Clone, Copy)]
struct Arrangement {
    name: &'static str,
    /// 放假区间（含两端）
    off: (MonthDay, MonthDay),
    /// 调休上班日
    make_up: &'static [MonthDay],
}

const fn arrangement(
    name: &'static str,
    first: MonthDay,
    last: MonthDay,
    make_up: &'static [MonthDay],
) -> Arrangement {
    Arrangement {
        name,
        off: (first, last),
        make_up,
    }
}

const YEAR_2024: &[Arrangement] = &[
    arrangement("元旦", (1, 1), (1, 1), &[]),
    arrangement("春节", (2, 10), (2, 17), &[(2, 4), (2, 18)]),
    arrangement("清明节", (4, 4), (4, 6), &[(4, 7)]),
    arrangement("劳动节", (5, 1), (5, 5), &[(4, 28), (5, 11)]),
    arrangement("端午节", (6, 10), (6, 10), &[]),
    arrangement("中秋节", (9, 15), (9, 17), &[(9, 14)]),
    arrangement("国庆节", (10, 1), (10, 7), &[(9, 29), (10, 12)]),
];

const YEAR_2025: &[Arrangement] = &[
    arrangement("元旦", (1, 1), (1, 1), &[]),
    arrangement("春节", (1, 28), (2, 4), &[(1, 26), (2, 8)]),
    arrangement("清明节", (4, 4), (4, 6), &[]),
    arrangement("劳动节", (5, 1), (5, 5), &[(4, 27)]),
    arrangement("端午节", (5, 31), (6, 2), &[]),
    // 中秋与国庆连休,当天按中秋节命名
    arrangement("中秋节", (10, 6), (10, 6), &[]),
    arrangement("国庆节", (10, 1), (10, 8), &[(9, 28), (10, 11)]),
];

const YEAR_2026: &[Arrangement] = &[
    arrangement("元旦", (1, 1), (1, 3), &[(1, 4)]),
    arrangement("春节", (2, 15), (2, 23), &[(2, 14), (2, 28)]),
    arrangement("清明节", (4, 4), (4, 6), &[]),
    arrangement("劳动节", (5, 1), (5, 5), &[(5, 9)]),
    arrangement("端午节", (6, 19), (6, 21), &[]),
    arrangement("中秋节", (9, 25), (9, 27), &[]),
    arrangement("国庆节", (10, 1), (10, 7), &[(9, 20), (10, 10)]),
];

const OFFICIAL_YEARS: &[(i32, &[Arrangement])] =
    &[(2024, YEAR_2024), (2025, YEAR_2025), (2026, YEAR_2026)];

/// 某日在安排表中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayMark {
    Off(&'static str),
    MakeUp(&'static str),
}

// ==========================================
// HolidayClassifier Trait - 进程内节假日分类器
// ==========================================
// 实现者: OfficialCalendar; 测试中可注入失败分类器
pub trait HolidayClassifier: Send + Sync {
    /// 是否休息日（法定节假日或非调休的周末）
    fn is_holiday(&self, date: &CalendarDate) -> HolidayResult<bool>;

    /// 是否工作日
    fn is_workday(&self, date: &CalendarDate) -> HolidayResult<bool> {
        self.is_holiday(date).map(|holiday| !holiday)
    }

    /// 节日名称（节假日及其调休上班日）
    fn holiday_detail(&self, date: &CalendarDate) -> HolidayResult<Option<String>>;
}

/// 内置官方安排分类器
#[derive(Debug, Clone, Copy, Default)]
pub struct OfficialCalendar;

impl OfficialCalendar {
    pub fn supported_years() -> impl Iterator<Item = i32> {
        OFFICIAL_YEARS.iter().map(|(year, _)| *year)
    }

    fn arrangements(year: i32) -> HolidayResult<&'static [Arrangement]> {
        OFFICIAL_YEARS
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, arrangements)| *arrangements)
            .ok_or(HolidayError::UnsupportedYear(year))
    }

    fn mark(date: &CalendarDate) -> HolidayResult<Option<DayMark>> {
        let arrangements = Self::arrangements(date.year())?;
        let day: MonthDay = (date.month(), date.day());

        // 放假优先于调休,按表内顺序取第一个命中
        if let Some(a) = arrangements
            .iter()
            .find(|a| a.off.0 <= day && day <= a.off.1)
        {
            return Ok(Some(DayMark::Off(a.name)));
        }
        Ok(arrangements
            .iter()
            .find(|a| a.make_up.contains(&day))
            .map(|a| DayMark::MakeUp(a.name)))
    }
}

impl HolidayClassifier for OfficialCalendar {
    fn is_holiday(&self, date: &CalendarDate) -> HolidayResult<bool> {
        Ok(match Self::mark(date)? {
            Some(DayMark::Off(_)) => true,
            Some(DayMark::MakeUp(_)) => false,
            None => date.is_weekend(),
        })
    }

    fn holiday_detail(&self, date: &CalendarDate) -> HolidayResult<Option<String>> {
        Ok(Self::mark(date)?.map(|mark| match mark {
            DayMark::Off(name) | DayMark::MakeUp(name) => name.to_string(),
        }))
    }
}
