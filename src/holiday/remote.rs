// ==========================================
// 日期感知 - 远程节假日数据源
// ==========================================
// 接口: GET {endpoint_template 中 {year} 替换为年份}
// 响应: {"dates": [{"date": "YYYY-MM-DD", "name_cn": "...", "type": "..."}]}
// 红线: 失败一律返回空表,只记录日志,不重试
// ==========================================

use crate::capability::Capabilities;
use crate::config::PerceptionConfig;
use crate::domain::{HolidayRecord, HolidayYearTable};
use crate::holiday::error::{HolidayError, HolidayResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// 数据源标识（用于错误信息）
const REMOTE_ORIGIN: &str = "remote";

// ==========================================
// RemoteHolidaySource Trait
// ==========================================
// 用途: HolidayCache 缓存未命中时下载年表
// 实现者: HttpHolidaySource; 测试中可注入计数/固定数据源
#[async_trait]
pub trait RemoteHolidaySource: Send + Sync {
    /// 下载某年节假日表
    ///
    /// # 返回
    /// - 非空表: 下载成功
    /// - 空表: 能力缺失、HTTP 非 2xx、超时、连接失败或响应格式错误
    async fn fetch(&self, year: i32) -> HolidayYearTable;
}

// ==========================================
// 响应解析
// ==========================================

#[derive(Debug, Deserialize)]
struct DatesPayload {
    #[serde(default)]
    dates: Vec<RemoteDateRecord>,
}

#[derive(Debug, Deserialize)]
struct RemoteDateRecord {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    name_cn: Option<String>,
    #[serde(rename = "type", default)]
    type_tag: Option<String>,
}

/// 解析远程响应体
///
/// 记录按日期一一转换; 缺少日期的记录被丢弃; 缺少 dates 字段视为空表
///
/// # 返回
/// - Err(Malformed): 响应体不是预期的 JSON 对象
pub fn parse_dates_payload(body: &str) -> HolidayResult<HolidayYearTable> {
    let payload: DatesPayload =
        serde_json::from_str(body).map_err(|e| HolidayError::malformed(REMOTE_ORIGIN, e))?;

    Ok(payload
        .dates
        .into_iter()
        .filter_map(|item| {
            let date = item.date.filter(|d| !d.is_empty())?;
            Some((
                date,
                HolidayRecord::new(
                    item.name_cn.unwrap_or_default(),
                    item.type_tag.unwrap_or_default(),
                ),
            ))
        })
        .collect())
}

/// 按模板生成某年的下载地址
pub fn endpoint_url(template: &str, year: i32) -> String {
    template.replace("{year}", &year.to_string())
}

// ==========================================
// HttpHolidaySource - HTTP 数据源
// ==========================================
pub struct HttpHolidaySource {
    capabilities: Capabilities,
    endpoint_template: String,
    timeout: Duration,
    #[cfg(feature = "network")]
    client: Option<reqwest::Client>,
}

impl HttpHolidaySource {
    /// 创建 HTTP 数据源
    ///
    /// # 参数
    /// - capabilities: 能力标记（network_client 为 false 时不发起任何请求）
    /// - endpoint_template: 含 `{year}` 占位符的 URL 模板
    /// - timeout: 整个请求（含响应体）的超时
    pub fn new(
        capabilities: Capabilities,
        endpoint_template: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            capabilities,
            endpoint_template: endpoint_template.into(),
            timeout,
            #[cfg(feature = "network")]
            client: build_client(capabilities, timeout),
        }
    }

    pub fn from_config(capabilities: Capabilities, config: &PerceptionConfig) -> Self {
        Self::new(
            capabilities,
            config.holiday.endpoint_template.clone(),
            config.fetch_timeout(),
        )
    }

    pub fn url_for(&self, year: i32) -> String {
        endpoint_url(&self.endpoint_template, year)
    }

    /// 下载并解析某年节假日表（错误不降级）
    #[cfg(feature = "network")]
    pub async fn try_fetch(&self, year: i32) -> HolidayResult<HolidayYearTable> {
        let client = match (&self.client, self.capabilities.network_client) {
            (Some(client), true) => client,
            _ => return Err(HolidayError::CapabilityAbsent("network_client")),
        };

        let url = self.url_for(year);
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HolidayError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;
        parse_dates_payload(&body)
    }

    /// 下载并解析某年节假日表（未编译网络能力）
    #[cfg(not(feature = "network"))]
    pub async fn try_fetch(&self, _year: i32) -> HolidayResult<HolidayYearTable> {
        Err(HolidayError::CapabilityAbsent("network_client"))
    }

    #[cfg(feature = "network")]
    fn map_request_error(&self, err: reqwest::Error) -> HolidayError {
        if err.is_timeout() {
            HolidayError::Timeout(self.timeout.as_millis() as u64)
        } else {
            HolidayError::Network(err.to_string())
        }
    }
}

#[cfg(feature = "network")]
fn build_client(capabilities: Capabilities, timeout: Duration) -> Option<reqwest::Client> {
    if !capabilities.network_client {
        return None;
    }
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::error!("HTTP 客户端初始化失败: {}", e);
            None
        }
    }
}

#[async_trait]
impl RemoteHolidaySource for HttpHolidaySource {
    async fn fetch(&self, year: i32) -> HolidayYearTable {
        match self.try_fetch(year).await {
            Ok(table) => {
                tracing::info!("成功下载 {} 年节假日数据: {} 条", year, table.len());
                table
            }
            Err(HolidayError::CapabilityAbsent(name)) => {
                tracing::warn!("{} 不可用，无法下载 {} 年节假日数据", name, year);
                HolidayYearTable::empty()
            }
            Err(HolidayError::Http { status }) => {
                tracing::warn!("下载节假日数据失败: HTTP {}", status);
                HolidayYearTable::empty()
            }
            Err(e) => {
                tracing::error!("下载节假日数据异常: year={}, error={}", year, e);
                HolidayYearTable::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HolidayKind;

    #[test]
    fn test_parse_payload_drops_records_without_date() {
        let body = r#"{
            "year": 2024,
            "dates": [
                {"date": "2024-10-01", "name": "National Day", "name_cn": "国庆节", "type": "public_holiday"},
                {"date": "2024-09-29", "name_cn": "国庆节", "type": "transfer_workday"},
                {"name_cn": "无日期", "type": "public_holiday"},
                {"date": "", "name_cn": "空日期", "type": "public_holiday"}
            ]
        }"#;

        let table = parse_dates_payload(body).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("2024-10-01").unwrap().name_cn, "国庆节");
        assert_eq!(
            table.get("2024-09-29").unwrap().kind(),
            HolidayKind::TransferWorkday
        );
    }

    #[test]
    fn test_parse_payload_missing_fields() {
        let table =
            parse_dates_payload(r#"{"dates": [{"date": "2024-01-01", "name_cn": null}]}"#)
                .unwrap();
        let record = table.get("2024-01-01").unwrap();
        assert_eq!(record.name_cn, "");
        assert_eq!(record.type_tag, "");

        assert!(parse_dates_payload(r#"{"year": 2024}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_payload_malformed() {
        assert!(matches!(
            parse_dates_payload("<html>not found</html>"),
            Err(HolidayError::Malformed { .. })
        ));
        assert!(parse_dates_payload(r#"{"dates": "oops"}"#).is_err());
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("https://example.com/data/CN/{year}.json", 2025),
            "https://example.com/data/CN/2025.json"
        );
    }

    #[tokio::test]
    async fn test_capability_absent_returns_empty_without_io() {
        // 不可路由地址: 若真的发起请求会超时失败, 但能力缺失时不应发起
        let source = HttpHolidaySource::new(
            Capabilities::none(),
            "http://10.255.255.1/{year}.json",
            Duration::from_millis(50),
        );
        assert!(matches!(
            source.try_fetch(2024).await,
            Err(HolidayError::CapabilityAbsent(_))
        ));
        assert!(source.fetch(2024).await.is_empty());
    }
}
