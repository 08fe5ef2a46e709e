use tracing_subscriber::EnvFilter;

/// 既定のログフィルタ
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "vinscout=debug,vinscout_common=debug"
    } else {
        "vinscout=warn"
    }
}

/// tracing を初期化（RUST_LOG があれば優先）
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
