// ==========================================
// 日期感知 - 节气天文计算
// ==========================================
// 太阳视黄经: 低精度解析式（几何平黄经 + 中心差 + 章动/光行差修正）
// 节气时刻: 视黄经 = 285° + 15°·k（k=0 为小寒），牛顿迭代求解（力学时）
// 力学时 → 世界时: 减 ΔT；民用日期取北京时间（UTC+8）
// ==========================================

use crate::calendar::error::{CalendarError, CalendarResult};
use chrono::{Datelike, NaiveDate};

/// J2000.0 历元（儒略日）
const J2000: f64 = 2_451_545.0;

/// 公历 0001-01-01 零时对应的儒略日减一天
const CE_JD_OFFSET: f64 = 1_721_424.5;

/// 回归年长度（日）
const TROPICAL_YEAR_DAYS: f64 = 365.2422;

/// 北京时间相对 UT 的偏移（日）
const BEIJING_OFFSET_DAYS: f64 = 8.0 / 24.0;

const MAX_ITERATIONS: usize = 50;
const CONVERGENCE_DAYS: f64 = 1e-7;

/// 日期零时（UT）的儒略日
pub fn julian_day(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64 + CE_JD_OFFSET
}

/// 太阳视黄经（度, 0..360）
///
/// `jde` 为力学时儒略日
pub fn apparent_solar_longitude(jde: f64) -> f64 {
    let t = (jde - J2000) / 36_525.0;
    let mean_longitude = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let mean_anomaly = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t).to_radians();
    let center = (1.914602 - 0.004817 * t - 0.000014 * t * t) * mean_anomaly.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * mean_anomaly).sin()
        + 0.000289 * (3.0 * mean_anomaly).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();
    let apparent = mean_longitude + center - 0.00569 - 0.00478 * omega.sin();
    apparent.rem_euclid(360.0)
}

/// ΔT = TT - UT（秒）的分段多项式估计
pub fn delta_t_seconds(jde: f64) -> f64 {
    let y = (jde - 2_451_544.5) / 365.2425 + 2000.0;
    if y < 1986.0 {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    } else if y < 2005.0 {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if y < 2050.0 {
        let t = y - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
    }
}

/// 节气对应的目标视黄经（度）
pub fn term_longitude(index: usize) -> f64 {
    (285.0 + 15.0 * index as f64).rem_euclid(360.0)
}

/// 求某年第 `index` 个节气（0=小寒）的力学时儒略日
pub fn solar_term_jde(year: i32, index: usize) -> CalendarResult<f64> {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CalendarError::OutOfRange {
        year,
        min: year,
        max: year,
    })?;
    let target = term_longitude(index);

    // 初值: 小寒约在 1 月 6 日，此后每个节气约间隔 15.2 天
    let mut jde = julian_day(jan_first) + 5.0 + 15.2184 * index as f64;
    for _ in 0..MAX_ITERATIONS {
        let diff = (target - apparent_solar_longitude(jde) + 540.0).rem_euclid(360.0) - 180.0;
        let step = diff * TROPICAL_YEAR_DAYS / 360.0;
        jde += step;
        if step.abs() < CONVERGENCE_DAYS {
            return Ok(jde);
        }
    }
    Err(CalendarError::NoConvergence { year, index })
}

/// 力学时儒略日 → 北京时间民用日期
pub fn beijing_date(jde: f64) -> Option<NaiveDate> {
    let ut = jde - delta_t_seconds(jde) / 86_400.0;
    let jdn = (ut + BEIJING_OFFSET_DAYS + 0.5).floor() as i64;
    let days_from_ce = i32::try_from(jdn - 1_721_425).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days_from_ce)
}
