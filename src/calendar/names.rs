// ==========================================
// 日期感知 - 传统历法名称表
// ==========================================
// 天干、地支、生肖、农历月日名、二十四节气、星期
// ==========================================

use chrono::{Datelike, NaiveDate};

/// 中文星期名称，0=周一
pub const WEEKDAY_NAMES: [&str; 7] = [
    "星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日",
];

/// 农历月名
pub const LUNAR_MONTHS: [&str; 12] = [
    "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "冬月",
    "腊月",
];

/// 农历日名
pub const LUNAR_DAYS: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一",
    "十二", "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", "廿一", "廿二",
    "廿三", "廿四", "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// 闰月前缀
pub const LEAP_MONTH_MARKER: &str = "闰";

/// 二十四节气，按一年内先后顺序（自小寒起）
pub const SOLAR_TERMS: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种",
    "夏至", "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪",
    "大雪", "冬至",
];

/// 天干
pub const HEAVENLY_STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// 地支
pub const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// 生肖，与地支同序
pub const ZODIAC_ANIMALS: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

/// 中文星期名称
pub fn weekday_cn(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

/// 短日期格式，如 "1月2日"
pub fn format_date_short(date: NaiveDate) -> String {
    format!("{}月{}日", date.month(), date.day())
}

/// 按小时划分时段
///
/// 5-11 上午, 12-13 中午, 14-17 下午, 18-21 晚上, 其余深夜
pub fn classify_time_period(hour: u32) -> &'static str {
    match hour {
        5..=11 => "上午",
        12..=13 => "中午",
        14..=17 => "下午",
        18..=21 => "晚上",
        _ => "深夜",
    }
}
