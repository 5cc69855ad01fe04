// ==========================================
// 日期感知 - 农历年信息表 (1900-2100)
// ==========================================
// 每年一个编码值:
// - bit 0-3:   闰月月份（0 表示无闰月）
// - bit 4-15:  正月至腊月大小（bit 15 为正月, 1=30天, 0=29天）
// - bit 16:    闰月大小（1=30天, 0=29天）
// 农历 1900 年正月初一 = 公历 1900-01-31
// ==========================================

use chrono::NaiveDate;

/// 表覆盖的首个农历年
pub const FIRST_YEAR: i32 = 1900;

/// 表覆盖的末个农历年
pub const LAST_YEAR: i32 = 2100;

#[rustfmt::skip]
static LUNAR_YEAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520,                                                                                   // 2100
];

/// 农历 1900 年正月初一对应的公历日期
pub fn epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1900, 1, 31)
}

fn info(year: i32) -> Option<u32> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return None;
    }
    LUNAR_YEAR_INFO.get((year - FIRST_YEAR) as usize).copied()
}

/// 闰月月份，无闰月或超出范围返回 0
pub fn leap_month(year: i32) -> u32 {
    info(year).map(|v| v & 0xf).unwrap_or(0)
}

/// 闰月天数，无闰月返回 0
pub fn leap_month_days(year: i32) -> u32 {
    match info(year) {
        Some(v) if v & 0xf != 0 => {
            if v & 0x10000 != 0 {
                30
            } else {
                29
            }
        }
        _ => 0,
    }
}

/// 平月天数（month: 1..=12）
pub fn month_days(year: i32, month: u32) -> u32 {
    match info(year) {
        Some(v) if (1..=12).contains(&month) && v & (0x10000 >> month) != 0 => 30,
        _ => 29,
    }
}

/// 全年天数（含闰月）
pub fn year_days(year: i32) -> u32 {
    let common: u32 = (1..=12).map(|m| month_days(year, m)).sum();
    common + leap_month_days(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leap_months() {
        assert_eq!(leap_month(2017), 6);
        assert_eq!(leap_month(2020), 4);
        assert_eq!(leap_month(2023), 2);
        assert_eq!(leap_month(2025), 6);
        assert_eq!(leap_month(2024), 0);
        assert_eq!(leap_month_days(2024), 0);
    }

    #[test]
    fn test_year_days_range() {
        for year in FIRST_YEAR..=LAST_YEAR {
            let days = year_days(year);
            if leap_month(year) == 0 {
                assert!((353..=355).contains(&days), "year={} days={}", year, days);
            } else {
                assert!((383..=385).contains(&days), "year={} days={}", year, days);
            }
        }
    }

    #[test]
    fn test_out_of_range_has_no_info() {
        assert_eq!(leap_month(1899), 0);
        assert_eq!(leap_month(2101), 0);
    }
}
