//! The `utils` module provides the pieces shared across `pollsub`: the error
//! types returned by the registry and the tracing setup used by the binary.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests {
    use super::error::PubSubError;
    use super::logging;

    #[test]
    fn logging_init_accepts_levels() {
        // Should not panic
        logging::init("info");
        logging::init("debug");
        logging::init("warn");
    }

    #[test]
    fn parse_level_falls_back_to_info() {
        assert_eq!(logging::parse_level("DEBUG"), tracing::Level::DEBUG);
        assert_eq!(logging::parse_level("warning"), tracing::Level::WARN);
        assert_eq!(logging::parse_level(" trace "), tracing::Level::TRACE);
        assert_eq!(logging::parse_level("verbose"), tracing::Level::INFO);
    }

    #[test]
    fn ansi_only_when_stderr_is_a_terminal() {
        use std::io::IsTerminal;
        assert_eq!(
            logging::stderr_is_terminal(),
            std::io::stderr().is_terminal()
        );
    }

    #[test]
    fn subscription_not_found_names_both_sides() {
        let err = PubSubError::subscription_not_found("t0", "s0");
        assert_eq!(
            err.to_string(),
            "subscription not found: 's0' on topic 't0'"
        );
    }
}
