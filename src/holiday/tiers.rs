// ==========================================
// 日期感知 - 节假日判定层级
// ==========================================
// 顺序: 内置分类器 -> 年表缓存 -> 固定节日表 -> 周末判断
// 每层返回 Ok(Some) 表示给出最终结果, Ok(None) 表示无结论,
// Err 由 HolidayResolver 记录后继续下一层
// ==========================================

use crate::capability::Capabilities;
use crate::domain::{CalendarDate, HolidayKind, HolidayRecord, HolidayStatus, MAKE_UP_LABEL};
use crate::holiday::cache::HolidayCache;
use crate::holiday::error::HolidayResult;
use crate::holiday::official_calendar::{HolidayClassifier, OfficialCalendar};
use async_trait::async_trait;

/// 内置固定节日（按 "MM-DD" 匹配,不区分年份）
pub const FIXED_HOLIDAYS: &[(&str, &str)] = &[
    ("01-01", "元旦"),
    ("05-01", "劳动节"),
    ("05-02", "劳动节"),
    ("05-03", "劳动节"),
    ("10-01", "国庆节"),
    ("10-02", "国庆节"),
    ("10-03", "国庆节"),
    ("10-04", "国庆节"),
    ("10-05", "国庆节"),
    ("10-06", "国庆节"),
    ("10-07", "国庆节"),
];

// ==========================================
// HolidayTier Trait - 单个判定层级
// ==========================================
#[async_trait]
pub trait HolidayTier: Send + Sync {
    /// 层级名称（用于日志）
    fn name(&self) -> &'static str;

    /// 尝试判定某日状态
    ///
    /// # 返回
    /// - Ok(Some(status)): 最终结果
    /// - Ok(None): 无结论,交给下一层
    /// - Err: 内部失败,交给下一层
    async fn attempt(&self, date: &CalendarDate) -> HolidayResult<Option<HolidayStatus>>;
}

// ==========================================
// 第 1 层: 内置分类器
// ==========================================
pub struct LocalLibraryTier {
    capabilities: Capabilities,
    classifier: Box<dyn HolidayClassifier>,
}

impl LocalLibraryTier {
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_classifier(capabilities, Box::new(OfficialCalendar))
    }

    pub fn with_classifier(
        capabilities: Capabilities,
        classifier: Box<dyn HolidayClassifier>,
    ) -> Self {
        Self {
            capabilities,
            classifier,
        }
    }
}

#[async_trait]
impl HolidayTier for LocalLibraryTier {
    fn name(&self) -> &'static str {
        "local_library"
    }

    async fn attempt(&self, date: &CalendarDate) -> HolidayResult<Option<HolidayStatus>> {
        if !self.capabilities.local_library {
            return Ok(None);
        }

        let is_holiday = self.classifier.is_holiday(date)?;
        let is_workday = self.classifier.is_workday(date)?;
        let label = self.classifier.holiday_detail(date)?;

        let status = match label {
            Some(label) if is_workday => HolidayStatus::make_up_workday(label),
            Some(label) => HolidayStatus::holiday(label),
            None if is_holiday => HolidayStatus::Weekend,
            None => HolidayStatus::Workday,
        };
        Ok(Some(status))
    }
}

// ==========================================
// 第 2 层: 年表缓存（未命中时远程下载）
// ==========================================
pub struct CacheTier {
    cache: HolidayCache,
}

impl CacheTier {
    pub fn new(cache: HolidayCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &HolidayCache {
        &self.cache
    }
}

/// 年表记录转换为状态
///
/// 调休记录无名称时使用"调休"; 普通节假日无名称视为无结论
pub fn status_from_record(record: &HolidayRecord) -> Option<HolidayStatus> {
    match record.kind() {
        HolidayKind::TransferWorkday if record.name_cn.is_empty() => {
            Some(HolidayStatus::make_up_workday(MAKE_UP_LABEL))
        }
        HolidayKind::TransferWorkday => {
            Some(HolidayStatus::make_up_workday(record.name_cn.clone()))
        }
        HolidayKind::NormalHoliday if record.name_cn.is_empty() => None,
        HolidayKind::NormalHoliday => Some(HolidayStatus::holiday(record.name_cn.clone())),
    }
}

#[async_trait]
impl HolidayTier for CacheTier {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn attempt(&self, date: &CalendarDate) -> HolidayResult<Option<HolidayStatus>> {
        let table = self.cache.get_year_table(date.year()).await;
        Ok(table.get(&date.key()).and_then(status_from_record))
    }
}

// ==========================================
// 第 3 层: 固定节日表
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTableTier;

#[async_trait]
impl HolidayTier for FixedTableTier {
    fn name(&self) -> &'static str {
        "fixed_table"
    }

    async fn attempt(&self, date: &CalendarDate) -> HolidayResult<Option<HolidayStatus>> {
        let key = date.month_day_key();
        Ok(FIXED_HOLIDAYS
            .iter()
            .find(|(month_day, _)| *month_day == key)
            .map(|(_, label)| HolidayStatus::holiday(*label)))
    }
}

// ==========================================
// 第 4 层: 周末判断（总能给出结果）
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekdayFallbackTier;

#[async_trait]
impl HolidayTier for WeekdayFallbackTier {
    fn name(&self) -> &'static str {
        "weekday_fallback"
    }

    async fn attempt(&self, date: &CalendarDate) -> HolidayResult<Option<HolidayStatus>> {
        Ok(Some(HolidayStatus::by_weekday(date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::error::HolidayError;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_status_from_record() {
        assert_eq!(
            status_from_record(&HolidayRecord::new("国庆节", "public_holiday")),
            Some(HolidayStatus::holiday("国庆节"))
        );
        assert_eq!(
            status_from_record(&HolidayRecord::new("国庆节", "transfer_workday")),
            Some(HolidayStatus::make_up_workday("国庆节"))
        );
        assert_eq!(
            status_from_record(&HolidayRecord::new("", "transfer_workday"))
                .unwrap()
                .to_string(),
            "调休"
        );
        assert_eq!(status_from_record(&HolidayRecord::new("", "public_holiday")), None);
    }

    #[tokio::test]
    async fn test_local_library_tier_decisions() {
        let tier = LocalLibraryTier::new(Capabilities::all());

        let status = tier.attempt(&d(2024, 10, 1)).await.unwrap();
        assert_eq!(status, Some(HolidayStatus::holiday("国庆节")));

        let status = tier.attempt(&d(2024, 9, 29)).await.unwrap();
        assert_eq!(status, Some(HolidayStatus::make_up_workday("国庆节")));

        let status = tier.attempt(&d(2024, 3, 9)).await.unwrap();
        assert_eq!(status, Some(HolidayStatus::Weekend));

        let status = tier.attempt(&d(2024, 3, 11)).await.unwrap();
        assert_eq!(status, Some(HolidayStatus::Workday));
    }

    #[tokio::test]
    async fn test_local_library_tier_gated_and_unsupported() {
        let disabled = LocalLibraryTier::new(Capabilities::none());
        assert_eq!(disabled.attempt(&d(2024, 10, 1)).await.unwrap(), None);

        let enabled = LocalLibraryTier::new(Capabilities::all());
        assert_eq!(
            enabled.attempt(&d(2031, 10, 1)).await,
            Err(HolidayError::UnsupportedYear(2031))
        );
    }

    #[tokio::test]
    async fn test_fixed_table_ignores_year() {
        let tier = FixedTableTier;
        assert_eq!(
            tier.attempt(&d(2099, 10, 3)).await.unwrap(),
            Some(HolidayStatus::holiday("国庆节"))
        );
        assert_eq!(tier.attempt(&d(2099, 5, 4)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_weekday_fallback_always_answers() {
        let tier = WeekdayFallbackTier;
        // 2030-01-05 周六, 2030-01-07 周一
        assert_eq!(
            tier.attempt(&d(2030, 1, 5)).await.unwrap(),
            Some(HolidayStatus::Weekend)
        );
        assert_eq!(
            tier.attempt(&d(2030, 1, 7)).await.unwrap(),
            Some(HolidayStatus::Workday)
        );
    }
}
