//! 日志初始化，输出到 stderr，结果本身写到 stdout

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化全局日志；设置了 `RUST_LOG` 时以环境变量为准
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "draftmate=debug"
    } else {
        "draftmate=info"
    };

    // 重复初始化（例如测试中）直接忽略
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
