// ==========================================
// 日期感知 - 日期信息文本组装
// ==========================================
// 输出: 三天概览 / 单时刻感知串 / 提示词注入块
// 红线: 任一部分不可用时省略该部分,组装本身不会失败
// "工作日" 属于无特殊信息,在三天概览中省略
// ==========================================

use crate::calendar::{classify_time_period, format_date_short, weekday_cn};
use crate::config::{PerceptionConfig, PerceptionSection};
use crate::domain::{CalendarDate, HolidayStatus};
use crate::perception::facade::DatePerception;
use chrono::{NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use std::sync::Arc;

const SECTION_RULE_WIDTH: usize = 50;

/// 三天的日期与状态
struct ThreeDays {
    days: [(&'static str, CalendarDate, HolidayStatus); 3],
}

pub struct DateInfoAssembler {
    perception: Arc<DatePerception>,
    timezone: Tz,
}

impl DateInfoAssembler {
    pub fn new(perception: Arc<DatePerception>, timezone: Tz) -> Self {
        Self {
            perception,
            timezone,
        }
    }

    pub fn from_config(perception: Arc<DatePerception>, config: &PerceptionConfig) -> Self {
        Self::new(perception, config.timezone())
    }

    /// 配置时区下的当前时间
    pub fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.timezone).naive_local()
    }

    async fn three_days(&self, today: CalendarDate) -> ThreeDays {
        let yesterday = today.offset_days(-1).unwrap_or(today);
        let tomorrow = today.offset_days(1).unwrap_or(today);

        let (s_yesterday, s_today, s_tomorrow) = futures::join!(
            self.perception.status(&yesterday),
            self.perception.status(&today),
            self.perception.status(&tomorrow),
        );

        ThreeDays {
            days: [
                ("昨天", yesterday, s_yesterday),
                ("今天", today, s_today),
                ("明天", tomorrow, s_tomorrow),
            ],
        }
    }

    /// 三天日期信息
    ///
    /// # 示例输出
    /// ```text
    /// 昨天 | 9月30日 星期一
    /// 今天 | 10月1日 星期二【国庆节】
    /// 明天 | 10月2日 星期三【国庆节】
    /// 农历甲辰年(龙年)八月廿九
    /// 当前节气: 寒露
    /// ```
    pub async fn three_days_info(&self, now: NaiveDateTime) -> String {
        let today = CalendarDate::from_naive(now.date());
        let three_days = self.three_days(today).await;

        let mut lines: Vec<String> = three_days
            .days
            .iter()
            .map(|(label, date, status)| {
                let mut line = format!("{} | {}", label, day_summary(date));
                if !status.is_plain_workday() {
                    line.push_str(&format!("【{}】", status));
                }
                line
            })
            .collect();

        if let Some(lunar) = self.perception.lunar(&today) {
            lines.push(lunar.to_string());
        }
        if let Some(term) = self.perception.solar_term(&today) {
            lines.push(term.to_string());
        }

        lines.join("\n")
    }

    /// 单时刻感知信息
    ///
    /// 格式: `[发送时间: 2024-01-02 14:30:00 | 星期二, 工作日, 下午 | 农历... | 节气...]`
    pub async fn perception_info(&self, now: NaiveDateTime, section: &PerceptionSection) -> String {
        let today = CalendarDate::from_naive(now.date());
        let mut parts = vec![format!("发送时间: {}", now.format("%Y-%m-%d %H:%M:%S"))];

        if section.enable_holiday {
            let status = self.perception.status(&today).await;
            parts.push(format!(
                "{}, {}, {}",
                weekday_cn(now.date()),
                status,
                classify_time_period(now.hour())
            ));
        }

        if section.enable_lunar {
            if let Some(lunar) = self.perception.lunar(&today) {
                parts.push(lunar.to_string());
            }
        }

        if section.enable_solar_term {
            if let Some(term) = self.perception.solar_term(&today) {
                parts.push(term.to_string());
            }
        }

        format!("[{}]", parts.join(" | "))
    }

    /// 提示词注入内容
    pub async fn injection_content(&self, now: NaiveDateTime) -> String {
        let heavy_rule = "=".repeat(SECTION_RULE_WIDTH);
        let light_rule = "-".repeat(SECTION_RULE_WIDTH);
        let today = CalendarDate::from_naive(now.date());

        let mut lines = vec![
            heavy_rule.clone(),
            "📅 当前日期时间信息".to_string(),
            heavy_rule.clone(),
            String::new(),
            format!("⏰ 当前时间: {}", now.format("%Y年%m月%d日 %H:%M:%S")),
            format!("📆 星期: {}", weekday_cn(now.date())),
            format!("🕐 时段: {}", classify_time_period(now.hour())),
            String::new(),
            "📋 三天日期概览:".to_string(),
            light_rule.clone(),
        ];

        let three_days = self.three_days(today).await;
        for (label, date, status) in three_days.days.iter() {
            let mut line = format!("  {}: {}", label, day_summary(date));
            if !status.is_plain_workday() {
                line.push_str(&format!(" 【{}】", status));
            }
            lines.push(line);
        }
        lines.push(String::new());

        let lunar = self.perception.lunar(&today);
        if let Some(lunar) = &lunar {
            lines.push("🏮 农历信息:".to_string());
            lines.push(light_rule.clone());
            lines.push(format!("  {}", lunar));
            lines.push(String::new());
        }

        let term = self.perception.solar_term(&today);
        if let Some(term) = &term {
            lines.push("🌸 节气信息:".to_string());
            lines.push(light_rule.clone());
            lines.push(format!("  {}", term));
            lines.push(String::new());
        }

        lines.push("💡 提示:".to_string());
        lines.push(light_rule);
        let coverage = match (lunar.is_some(), term.is_some()) {
            (true, true) => "  • 以上包含公历、农历、节气等完整日期信息",
            (true, false) => "  • 以上包含公历和农历日期信息",
            (false, true) => "  • 以上包含公历和节气信息",
            (false, false) => "  • 以上包含公历日期信息",
        };
        lines.push(coverage.to_string());
        lines.push("  • 你可以根据用户问题自然地引用这些信息".to_string());
        lines.push(
            "  • 如果用户询问日期、星期、节假日、农历、节气等，直接使用以上信息回答".to_string(),
        );
        lines.push("  • 不需要调用搜索工具查询日期相关信息".to_string());
        lines.push(String::new());
        lines.push(heavy_rule);

        format!("\n{}\n", lines.join("\n"))
    }
}

/// "10月1日 星期二"
fn day_summary(date: &CalendarDate) -> String {
    let naive = date.to_naive();
    format!("{} {}", format_date_short(naive), weekday_cn(naive))
}
