// ==========================================
// 日期感知 - 可选能力标记
// ==========================================
// 启动时探测一次,之后只读
// 来源: 编译特性 (local-calendar / network / lunar) 与配置开关
// ==========================================

use crate::config::PerceptionConfig;
use std::sync::OnceLock;

static GLOBAL_CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// 进程级能力标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// 内置节假日分类器
    pub local_library: bool,
    /// 网络客户端（远程节假日数据）
    pub network_client: bool,
    /// 农历/节气计算
    pub lunar_conversion: bool,
}

impl Capabilities {
    /// 编译期可用的能力
    pub fn compiled() -> Self {
        Self {
            local_library: cfg!(feature = "local-calendar"),
            network_client: cfg!(feature = "network"),
            lunar_conversion: cfg!(feature = "lunar"),
        }
    }

    /// 探测能力: 编译特性 与 配置开关 同时满足才视为可用
    pub fn probe(config: &PerceptionConfig) -> Self {
        let compiled = Self::compiled();
        let capabilities = Self {
            local_library: compiled.local_library && config.holiday.enable_local_library,
            network_client: compiled.network_client && config.holiday.enable_network,
            lunar_conversion: compiled.lunar_conversion,
        };

        if !capabilities.network_client {
            tracing::warn!("网络客户端不可用，将无法下载节假日数据");
        }
        if !capabilities.local_library {
            tracing::warn!("内置节假日分类器不可用，将使用备用节假日识别方案");
        }
        if !capabilities.lunar_conversion {
            tracing::warn!("农历转换能力不可用，将跳过农历和节气功能");
        }

        capabilities
    }

    pub fn all() -> Self {
        Self {
            local_library: true,
            network_client: true,
            lunar_conversion: true,
        }
    }

    pub fn none() -> Self {
        Self {
            local_library: false,
            network_client: false,
            lunar_conversion: false,
        }
    }

    /// 安装为进程级能力标记
    ///
    /// 仅首次调用生效，返回实际生效的值
    pub fn install(self) -> Self {
        *GLOBAL_CAPABILITIES.get_or_init(|| self)
    }

    /// 记录依赖能力状态
    pub fn log_status(&self) {
        fn status(flag: bool) -> &'static str {
            if flag {
                "可用"
            } else {
                "不可用"
            }
        }
        tracing::info!(
            "依赖能力状态: local_library={}, network_client={}, lunar_conversion={}",
            status(self.local_library),
            status(self.network_client),
            status(self.lunar_conversion)
        );
    }
}
