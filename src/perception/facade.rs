// ==========================================
// 日期感知 - 对外查询入口
// ==========================================
// resolve(date) -> (节假日状态, 农历?, 节气?)
// 节假日走级联; 农历与节气独立计算,不参与级联
// ==========================================

use crate::calendar::{CalendarMath, LunarDate, SolarTermInfo, SolarTermLocator};
use crate::capability::Capabilities;
use crate::config::PerceptionConfig;
use crate::domain::{CalendarDate, HolidayStatus};
use crate::holiday::HolidayResolver;
use serde::Serialize;

/// 单日完整查询结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateResolution {
    pub date: CalendarDate,
    pub status: HolidayStatus,
    /// 转换能力不可用或超出范围时为 None
    pub lunar: Option<LunarDate>,
    /// 计算能力不可用或超出范围时为 None
    pub solar_term: Option<SolarTermInfo>,
}

pub struct DatePerception {
    resolver: HolidayResolver,
    calendar: CalendarMath,
    terms: SolarTermLocator,
}

impl DatePerception {
    pub fn new(resolver: HolidayResolver, calendar: CalendarMath, terms: SolarTermLocator) -> Self {
        Self {
            resolver,
            calendar,
            terms,
        }
    }

    /// 按配置组装全部组件
    pub fn from_config(capabilities: Capabilities, config: &PerceptionConfig) -> Self {
        Self::new(
            HolidayResolver::from_config(capabilities, config),
            CalendarMath::new(capabilities),
            SolarTermLocator::new(capabilities),
        )
    }

    pub async fn resolve(&self, date: &CalendarDate) -> DateResolution {
        DateResolution {
            date: *date,
            status: self.resolver.resolve(date).await,
            lunar: self.calendar.to_lunar(date),
            solar_term: self.terms.nearest_term(date),
        }
    }

    /// 仅查询节假日状态
    pub async fn status(&self, date: &CalendarDate) -> HolidayStatus {
        self.resolver.resolve(date).await
    }

    pub fn lunar(&self, date: &CalendarDate) -> Option<LunarDate> {
        self.calendar.to_lunar(date)
    }

    pub fn solar_term(&self, date: &CalendarDate) -> Option<SolarTermInfo> {
        self.terms.nearest_term(date)
    }
}
