use tracing_subscriber::EnvFilter;

/// Subscribes to tracing events that will output to the console.
///
/// By default, it enables:
///
/// * `warn` level (and higher) on all modules,
/// * `debug` level (and higher) on the `solana_tx_verifier` module,
/// * all levels on the current module.
///
/// You can override these defaults by setting the `RUST_LOG` env variable, e.g.:
///
/// ```sh
/// $ RUST_LOG=solana_tx_verifier=trace cargo run --example verify_payment -- <signature> 0.1
/// ```
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,solana_tx_verifier=debug,{}", current_exe()))
    });

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn current_exe() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_default()
}
