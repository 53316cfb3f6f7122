use clap::Parser;
use env_logger::Env;
use log::LevelFilter;

use lsb_veil::{
    cli::{Cli, Commands},
    handler::{handle_capacity, handle_hide, handle_recover},
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Hide(args) => handle_hide(args),
        Commands::Recover(args) => handle_recover(args).map(|_| ()),
        Commands::Capacity(args) => handle_capacity(args).map(|_| ()),
    }
}

/// RUST_LOG 优先，否则按 -v 的次数决定日志级别
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    if verbose > 1 {
        builder.filter_level(LevelFilter::Trace);
    }
    builder.try_init()?;
    Ok(())
}
