use std::io::IsTerminal;

/// Parse a log level name, falling back to `INFO` for anything unknown.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.trim().to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" | "warning" => tracing::Level::WARN,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::INFO,
    }
}

/// Initialize tracing/logging for the application.
///
/// Events go to stderr so that shell replies on stdout stay machine readable.
/// Colour codes are only emitted when stderr is a terminal.
pub fn init(default_level: &str) {
    // try_init so tests can call this repeatedly without panicking
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(default_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(stderr_is_terminal())
        .try_init();
}

/// Whether log output should carry ANSI colour codes.
pub fn stderr_is_terminal() -> bool {
    std::io::stderr().is_terminal()
}
