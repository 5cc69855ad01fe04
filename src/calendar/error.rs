// ==========================================
// 日期感知 - 历法计算错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 历法错误只在模块内部流转,对外统一降级为"不可用"
// ==========================================

use thiserror::Error;

/// 历法计算错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    #[error("年份超出支持范围: {year}（支持 {min}-{max}）")]
    OutOfRange { year: i32, min: i32, max: i32 },

    #[error("农历数值非法 ({field}): {value}")]
    InvalidLunarValue { field: &'static str, value: i64 },

    #[error("节气求解未收敛: {year} 年第 {index} 个节气")]
    NoConvergence { year: i32, index: usize },
}

/// Result 类型别名
pub type CalendarResult<T> = Result<T, CalendarError>;
