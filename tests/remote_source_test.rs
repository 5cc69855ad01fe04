// ==========================================
// HttpHolidaySource 集成测试
// ==========================================
// 测试目标: 使用本地 HTTP 服务验证成功/非 2xx/格式错误/超时/连接失败
// ==========================================

#![cfg(feature = "network")]


use date_perception::holiday::{HolidayError, HttpHolidaySource, RemoteHolidaySource};
use date_perception::Capabilities;
use std::time::Duration;
use test_helpers::{spawn_http_server, unused_local_url};

const PAYLOAD_2024: &str = r#"{
    "year": 2024,
    "region": "CN",
    "dates": [
        {"date": "2024-10-01", "name": "National Day", "name_cn": "国庆节", "type": "public_holiday"},
        {"date": "2024-09-29", "name": "National Day", "name_cn": "国庆节", "type": "transfer_workday"},
        {"name_cn": "缺少日期", "type": "public_holiday"}
    ]
}"#;

fn source(template: String, timeout_ms: u64) -> HttpHolidaySource {
    HttpHolidaySource::new(
        Capabilities::all(),
        template,
        Duration::from_millis(timeout_ms),
    )
}

#[tokio::test]
async fn test_fetch_success() {
    let server = spawn_http_server(200, PAYLOAD_2024, false).await;
    let source = source(server.endpoint_template(), 2_000);

    let table = source.fetch(2024).await;
    assert_eq!(table.len(), 2, "Record without date should be dropped");
    assert_eq!(table.get("2024-10-01").unwrap().name_cn, "国庆节");
    assert_eq!(table.get("2024-09-29").unwrap().type_tag, "transfer_workday");
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn test_url_substitutes_year() {
    let source = source("https://example.com/data/CN/{year}.json".to_string(), 2_000);
    assert_eq!(source.url_for(2026), "https://example.com/data/CN/2026.json");
}

#[tokio::test]
async fn test_non_success_status_yields_empty() {
    let server = spawn_http_server(404, r#"{"error": "not found"}"#, false).await;
    let source = source(server.endpoint_template(), 2_000);

    assert_eq!(
        source.try_fetch(2099).await,
        Err(HolidayError::Http { status: 404 })
    );
    assert!(source.fetch(2099).await.is_empty());
}

#[tokio::test]
async fn test_malformed_body_yields_empty() {
    let server = spawn_http_server(200, "<html>oops</html>", false).await;
    let source = source(server.endpoint_template(), 2_000);

    assert!(matches!(
        source.try_fetch(2024).await,
        Err(HolidayError::Malformed { .. })
    ));
    assert!(source.fetch(2024).await.is_empty());
}

#[tokio::test]
async fn test_timeout_yields_empty() {
    let server = spawn_http_server(200, PAYLOAD_2024, true).await;
    let source = source(server.endpoint_template(), 200);

    let started = std::time::Instant::now();
    assert_eq!(source.try_fetch(2024).await, Err(HolidayError::Timeout(200)));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_connection_refused_yields_empty() {
    let source = source(unused_local_url().await, 2_000);

    assert!(matches!(
        source.try_fetch(2024).await,
        Err(HolidayError::Network(_))
    ));
    assert!(source.fetch(2024).await.is_empty());
}

#[tokio::test]
async fn test_network_capability_absent_makes_no_request() {
    let server = spawn_http_server(200, PAYLOAD_2024, false).await;
    let source = HttpHolidaySource::new(
        Capabilities::none(),
        server.endpoint_template(),
        Duration::from_millis(2_000),
    );

    assert!(source.fetch(2024).await.is_empty());
    assert_eq!(server.hits(), 0);
}
