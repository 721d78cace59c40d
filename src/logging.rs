use env_logger::{Builder, Env};

use crate::config::Config;

pub const DEFAULT_FILTER: &str = "info";

/// A filter given on the command line wins over `RUST_LOG`.
fn builder(filter: Option<&str>) -> Builder {
    match filter {
        Some(filter) => {
            let mut builder = Builder::new();
            builder.parse_filters(filter);
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER)),
    }
}

pub fn init_logging(config: &Config) {
    let mut builder = builder(config.log_filter.as_deref());
    builder.format_timestamp_millis();
    match builder.try_init() {
        Ok(()) => debug!("logging initialized"),
        Err(e) => warn!("keeping the installed logger: {}", e),
    }
}
