// ==========================================
// 日期感知 - 命令行参数
// ==========================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 日期感知: 节假日、农历与节气查询
#[derive(Parser)]
#[command(name = "date-perception", version, about = "节假日、农历与节气查询")]
pub struct Cli {
    /// TOML 配置文件路径（不存在时使用默认配置）
    #[arg(short, long, global = true, default_value = "date-perception.toml")]
    pub config: PathBuf,

    /// 日志详细程度（-v info, -vv debug, -vvv trace）
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// 昨天、今天、明天的日期信息
    Date,
    /// 当前时刻的单行感知信息
    Perception,
    /// 完整的提示词注入内容
    Inject,
    /// 查询指定日期的节假日状态、农历与节气
    Resolve {
        /// 日期，格式 YYYY-MM-DD
        date: String,

        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },
}
