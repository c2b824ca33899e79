use quire_domain::config::{
    ApiConfig, ContentConfig, DatabaseConfig, LoggingConfig, PaymentsConfig, ServerConfig,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 1337);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "quire");
    assert_eq!(db.database, "content");
    assert!(db.credentials.is_none());

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.console);

    let content = ContentConfig::default();
    assert!(content.default_page_size <= content.max_page_size);

    let payments = PaymentsConfig::default();
    assert!(payments.enabled);
    assert_eq!(payments.namespace, "payments");
}

#[test]
fn api_config_deserializes_partial_sections() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "database": { "url": "mem://", "namespace": "n", "database": "d", "credentials": null },
        "payments": { "namespace": "stripe" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.namespace, "n");
    assert_eq!(cfg.payments.namespace, "stripe");
    assert!(cfg.payments.enabled);
    assert_eq!(cfg.content.max_page_size, 100);
}

#[test]
fn api_config_is_copy_on_write() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.server.port = 4000;

    assert_eq!(original.server.port, 1337);
    assert_eq!(changed.server.port, 4000);
}
