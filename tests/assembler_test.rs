// ==========================================
// DateInfoAssembler 集成测试
// ==========================================
// 测试目标: 三天概览、单时刻感知串、注入块的格式与降级
// ==========================================


use chrono::{NaiveDate, NaiveDateTime};
use date_perception::config::PerceptionSection;
use date_perception::{Capabilities, DateInfoAssembler};
use std::sync::Arc;
use test_helpers::{offline_capabilities, offline_perception};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn assembler(capabilities: Capabilities, dir: &std::path::Path) -> DateInfoAssembler {
    DateInfoAssembler::new(
        Arc::new(offline_perception(capabilities, dir)),
        chrono_tz::Asia::Shanghai,
    )
}

#[tokio::test]
async fn test_three_days_info_national_day() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let assembler = assembler(offline_capabilities(), dir.path());

    let info = assembler.three_days_info(at(2024, 10, 1, 10, 30)).await;
    assert_eq!(
        info,
        "昨天 | 9月30日 星期一\n\
         今天 | 10月1日 星期二【国庆节】\n\
         明天 | 10月2日 星期三【国庆节】\n\
         农历甲辰年(龙年)八月廿九\n\
         当前节气: 寒露"
    );
}

#[tokio::test]
async fn test_three_days_info_make_up_day() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let assembler = assembler(offline_capabilities(), dir.path());

    let info = assembler.three_days_info(at(2024, 9, 30, 8, 0)).await;
    let lines: Vec<&str> = info.lines().collect();
    assert_eq!(lines[0], "昨天 | 9月29日 星期日【国庆节（调休）】");
    assert_eq!(lines[1], "今天 | 9月30日 星期一");
    assert_eq!(lines[2], "明天 | 10月1日 星期二【国庆节】");
    assert_eq!(lines[3], "农历甲辰年(龙年)八月廿八");
    // 距秋分与寒露均为 8 天,取年内先出现者
    assert_eq!(lines[4], "当前节气: 秋分");
}

#[tokio::test]
async fn test_three_days_info_without_lunar_capability() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let capabilities = Capabilities {
        lunar_conversion: false,
        ..offline_capabilities()
    };
    let assembler = assembler(capabilities, dir.path());

    let info = assembler.three_days_info(at(2024, 10, 1, 10, 30)).await;
    assert_eq!(info.lines().count(), 3);
}

#[tokio::test]
async fn test_perception_info_all_sections() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let assembler = assembler(offline_capabilities(), dir.path());

    let info = assembler
        .perception_info(at(2024, 10, 1, 14, 30), &PerceptionSection::default())
        .await;
    assert_eq!(
        info,
        "[发送时间: 2024-10-01 14:30:00 | 星期二, 国庆节, 下午 | 农历甲辰年(龙年)八月廿九 | 当前节气: 寒露]"
    );
}

#[tokio::test]
async fn test_perception_info_respects_toggles() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let assembler = assembler(offline_capabilities(), dir.path());

    let section = PerceptionSection {
        enable_lunar: false,
        enable_solar_term: false,
        ..PerceptionSection::default()
    };
    let info = assembler
        .perception_info(at(2024, 3, 11, 9, 5), &section)
        .await;
    assert_eq!(info, "[发送时间: 2024-03-11 09:05:00 | 星期一, 工作日, 上午]");

    let section = PerceptionSection {
        enable_holiday: false,
        enable_solar_term: false,
        ..PerceptionSection::default()
    };
    let info = assembler
        .perception_info(at(2024, 2, 10, 23, 0), &section)
        .await;
    assert_eq!(info, "[发送时间: 2024-02-10 23:00:00 | 农历甲辰年(龙年)正月初一]");
}

#[tokio::test]
async fn test_injection_content_full() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let assembler = assembler(offline_capabilities(), dir.path());

    let content = assembler.injection_content(at(2024, 10, 1, 19, 45)).await;
    let rule = "=".repeat(50);

    assert!(content.starts_with(&format!("\n{}\n📅 当前日期时间信息\n", rule)));
    assert!(content.ends_with(&format!("{}\n", rule)));
    assert!(content.contains("⏰ 当前时间: 2024年10月01日 19:45:00"));
    assert!(content.contains("📆 星期: 星期二"));
    assert!(content.contains("🕐 时段: 晚上"));
    assert!(content.contains("  昨天: 9月30日 星期一\n"));
    assert!(content.contains("  今天: 10月1日 星期二 【国庆节】"));
    assert!(content.contains("🏮 农历信息:"));
    assert!(content.contains("  农历甲辰年(龙年)八月廿九"));
    assert!(content.contains("🌸 节气信息:"));
    assert!(content.contains("  • 以上包含公历、农历、节气等完整日期信息"));
    assert!(content.contains("  • 不需要调用搜索工具查询日期相关信息"));
}

#[tokio::test]
async fn test_injection_content_without_lunar_capability() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let assembler = assembler(Capabilities::none(), dir.path());

    let content = assembler.injection_content(at(2030, 1, 5, 3, 0)).await;
    assert!(!content.contains("🏮"));
    assert!(!content.contains("🌸"));
    assert!(content.contains("  • 以上包含公历日期信息"));
    assert!(content.contains("🕐 时段: 深夜"));
    // 2030-01-05 周六,固定表与缓存均无记录
    assert!(content.contains("  今天: 1月5日 星期六 【周末】"));
}
