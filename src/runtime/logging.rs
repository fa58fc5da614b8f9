//! 日志初始化
//!
//! 本 crate 自身只通过 `tracing` 宏产生事件，从不隐式安装全局
//! subscriber；嵌入方（API 层、测试二进制）在启动时调用一次 `init`。

use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;

/// 初始化日志输出
///
/// 开发环境使用带文件名/行号的文本格式，生产环境输出 JSON。
/// 返回的 guard 在被 drop 前保证缓冲日志全部落盘，调用方需持有它。
pub fn init() -> WorkerGuard {
    let config = AppConfig::get();

    let stdout_log = std::io::stdout();
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    guard
}
