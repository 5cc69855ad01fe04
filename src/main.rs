// ==========================================
// 日期感知 - 命令行入口
// ==========================================
// 流程: 解析参数 -> 初始化日志 -> 加载配置 -> 探测能力 -> 执行子命令
// 结果输出到 stdout,日志输出到 stderr
// ==========================================

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use date_perception::calendar::weekday_cn;
use date_perception::{
    logging, CalendarDate, Capabilities, DateInfoAssembler, DatePerception, PerceptionConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_with_default(logging::level_for_verbosity(cli.verbose));
    tracing::info!("{} v{}", date_perception::APP_NAME, date_perception::VERSION);

    let config = PerceptionConfig::load_or_default(&cli.config);
    if !config.plugin.enabled {
        tracing::warn!("配置中已禁用日期感知 (plugin.enabled = false)");
        return Ok(());
    }

    let capabilities = Capabilities::probe(&config).install();
    capabilities.log_status();

    let timezone = config.timezone();
    tracing::info!("时区配置: {}", timezone);

    let perception = Arc::new(DatePerception::from_config(capabilities, &config));
    let assembler = DateInfoAssembler::new(Arc::clone(&perception), timezone);

    match cli.command {
        Command::Date => {
            println!("{}", assembler.three_days_info(assembler.now()).await);
        }
        Command::Perception => {
            let info = assembler
                .perception_info(assembler.now(), &config.perception)
                .await;
            println!("{}", info);
        }
        Command::Inject => {
            print!("{}", assembler.injection_content(assembler.now()).await);
        }
        Command::Resolve { date, json } => {
            let date = CalendarDate::parse(&date)
                .with_context(|| format!("日期格式无效（应为 YYYY-MM-DD）: {}", date))?;
            let resolution = perception.resolve(&date).await;

            if json {
                let output =
                    serde_json::to_string_pretty(&resolution).context("序列化查询结果失败")?;
                println!("{}", output);
            } else {
                println!("{} {}", resolution.date, weekday_cn(resolution.date.to_naive()));
                println!("节假日: {}", resolution.status);
                match &resolution.lunar {
                    Some(lunar) => println!("农历: {}", lunar),
                    None => println!("农历: 不可用"),
                }
                match &resolution.solar_term {
                    Some(term) => println!("节气: {}", term),
                    None => println!("节气: 不可用"),
                }
            }
        }
    }

    Ok(())
}
