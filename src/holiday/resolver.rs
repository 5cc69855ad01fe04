// ==========================================
// 日期感知 - 节假日状态解析器
// ==========================================
// 职责: 按顺序遍历判定层级,返回第一个确定结果
// 红线: resolve 永不失败; 任何层级错误只记录并降级到下一层
// ==========================================

use crate::capability::Capabilities;
use crate::config::PerceptionConfig;
use crate::domain::{CalendarDate, HolidayStatus};
use crate::holiday::cache::{HolidayCache, JsonFileStore};
use crate::holiday::remote::{HttpHolidaySource, RemoteHolidaySource};
use crate::holiday::tiers::{
    CacheTier, FixedTableTier, HolidayTier, LocalLibraryTier, WeekdayFallbackTier,
};
use std::sync::Arc;

pub struct HolidayResolver {
    tiers: Vec<Box<dyn HolidayTier>>,
}

impl HolidayResolver {
    /// 使用自定义层级列表创建（按给定顺序判定）
    pub fn new(tiers: Vec<Box<dyn HolidayTier>>) -> Self {
        Self { tiers }
    }

    /// 标准四层级联
    ///
    /// # 参数
    /// - capabilities: 启动时探测的能力标记
    /// - cache: 年表缓存（已绑定远程数据源）
    pub fn standard(capabilities: Capabilities, cache: HolidayCache) -> Self {
        Self::new(vec![
            Box::new(LocalLibraryTier::new(capabilities)),
            Box::new(CacheTier::new(cache)),
            Box::new(FixedTableTier),
            Box::new(WeekdayFallbackTier),
        ])
    }

    /// 按配置组装: JSON 文件缓存 + HTTP 数据源
    pub fn from_config(capabilities: Capabilities, config: &PerceptionConfig) -> Self {
        let remote: Arc<dyn RemoteHolidaySource> =
            Arc::new(HttpHolidaySource::from_config(capabilities, config));
        let store = JsonFileStore::new(config.cache_dir());
        tracing::debug!("节假日缓存目录: {}", store.dir().display());

        Self::standard(capabilities, HolidayCache::new(Box::new(store), remote))
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|tier| tier.name()).collect()
    }

    /// 解析某日节假日状态
    pub async fn resolve(&self, date: &CalendarDate) -> HolidayStatus {
        for tier in &self.tiers {
            match tier.attempt(date).await {
                Ok(Some(status)) => {
                    tracing::trace!("节假日判定: date={}, tier={}, status={}", date, tier.name(), status);
                    return status;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!("节假日判定层级失败: tier={}, date={}, error={}", tier.name(), date, e);
                }
            }
        }

        // 层级列表中没有兜底层时仍保证有结果
        HolidayStatus::by_weekday(date)
    }
}
