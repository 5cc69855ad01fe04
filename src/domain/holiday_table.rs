// ==========================================
// 日期感知 - 节假日年表
// ==========================================
// 缓存文件格式: {"YYYY-MM-DD": {"name_cn": "...", "type": "..."}}
// 年表创建后不可变,由 HolidayCache 持有
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 调休工作日的类型标记
pub const TRANSFER_WORKDAY_TYPE: &str = "transfer_workday";

/// 年表中的日期类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidayKind {
    /// 法定节假日（任何非调休类型标记都归入此类）
    NormalHoliday,
    /// 调休工作日
    TransferWorkday,
}

impl HolidayKind {
    pub fn from_type_tag(tag: &str) -> Self {
        if tag == TRANSFER_WORKDAY_TYPE {
            HolidayKind::TransferWorkday
        } else {
            HolidayKind::NormalHoliday
        }
    }
}

/// 年表单条记录
///
/// 原样保留数据源的类型标记,写回缓存时不丢信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// 中文名称（可能为空）
    #[serde(default)]
    pub name_cn: String,

    /// 类型标记，如 "public_holiday" / "transfer_workday"
    #[serde(rename = "type", default)]
    pub type_tag: String,
}

impl HolidayRecord {
    pub fn new(name_cn: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name_cn: name_cn.into(),
            type_tag: type_tag.into(),
        }
    }

    pub fn kind(&self) -> HolidayKind {
        HolidayKind::from_type_tag(&self.type_tag)
    }
}

/// 一年的节假日表，键为 "YYYY-MM-DD"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayYearTable {
    entries: BTreeMap<String, HolidayRecord>,
}

impl HolidayYearTable {
    /// 空表（表示"无数据"）
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, date_key: &str) -> Option<&HolidayRecord> {
        self.entries.get(date_key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, HolidayRecord)> for HolidayYearTable {
    fn from_iter<I: IntoIterator<Item = (String, HolidayRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
