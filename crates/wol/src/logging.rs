/// Initialize logging to stderr with a default filter of `info`.
///
/// Stdout is reserved for the CLI's own output (listings, per-send
/// confirmation lines); RUST_LOG tunes verbosity as usual.
pub fn init() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logger: {}", e))
}
