use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "info";

/// 安装全局 tracing 订阅者；`RUST_LOG` 优先，多次调用只生效一次。
#[flutter_rust_bridge::frb]
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        if let Err(err) = fmt().with_env_filter(filter).with_target(false).try_init() {
            eprintln!("[logging] subscriber already installed: {err}");
        }
    });
}
