use quire_domain::config::LoggingConfig;
use quire_logger::{Logger, LoggerError};

#[test]
fn applies_logging_section() {
    let bad = LoggingConfig { level: "chatty".to_owned(), ..LoggingConfig::default() };
    assert!(matches!(
        Logger::from_config("quire-config", &bad),
        Err(LoggerError::InvalidConfiguration { .. })
    ));

    let dir = tempfile::tempdir().unwrap();
    let cfg = LoggingConfig {
        level: "debug".to_owned(),
        console: false,
        json: true,
        path: Some(dir.path().to_path_buf()),
        filter: Some("from_config=debug".to_owned()),
    };
    let logger = Logger::from_config("quire-config", &cfg).unwrap();
    assert!(logger.guard().is_some());
}
