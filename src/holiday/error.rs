// ==========================================
// 日期感知 - 节假日数据错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 所有错误在级联内部被记录并降级,不会传播到 resolve 调用方
// ==========================================

use thiserror::Error;

/// 节假日数据错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HolidayError {
    // ===== 能力缺失 =====
    #[error("可选能力不可用: {0}")]
    CapabilityAbsent(&'static str),

    // ===== 本地缓存 =====
    #[error("缓存文件读写失败 ({path}): {message}")]
    Io { path: String, message: String },

    #[error("数据格式错误 ({origin}): {message}")]
    Malformed { origin: String, message: String },

    // ===== 远程下载 =====
    #[error("HTTP 请求失败: HTTP {status}")]
    Http { status: u16 },

    #[error("网络请求异常: {0}")]
    Network(String),

    #[error("网络请求超时: {0}ms")]
    Timeout(u64),

    // ===== 内置分类器 =====
    #[error("内置节假日表不支持该年份: {0}")]
    UnsupportedYear(i32),
}

impl HolidayError {
    pub fn io(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        HolidayError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn malformed(origin: impl Into<String>, err: impl std::fmt::Display) -> Self {
        HolidayError::Malformed {
            origin: origin.into(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type HolidayResult<T> = Result<T, HolidayError>;
