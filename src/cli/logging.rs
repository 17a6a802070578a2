use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Log level selected by the command line flags
pub fn log_level(debug: bool, quiet: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    }
}

/// Initialize logging with the specified level
pub fn init_logging(debug: bool, quiet: bool) -> LevelFilter {
    let level = log_level(debug, quiet);

    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(false, false), LevelFilter::Info);
        assert_eq!(log_level(true, false), LevelFilter::Debug);
        assert_eq!(log_level(false, true), LevelFilter::Error);
    }
}
