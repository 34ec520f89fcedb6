//! 日志基础设施

use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

pub struct Logger;

impl Logger {
    /// `RUST_LOG` 优先，否则使用 `default_level`
    pub fn init(default_level: LevelFilter) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(default_level.into()));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).compact())
            .init();
    }
}
