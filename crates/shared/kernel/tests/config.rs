use quire_kernel::config::load_config;
use quire_kernel::domain::config::ApiConfig;
use std::fs;

#[test]
fn loads_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8080

[database]
url = "mem://"
namespace = "test"
database = "cfg"

[payments]
namespace = "billing"
"#,
    )
    .unwrap();

    let cfg: ApiConfig = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.namespace, "test");
    assert_eq!(cfg.payments.namespace, "billing");
    assert_eq!(cfg.content.default_page_size, 25);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config::<ApiConfig>(Some(dir.path().join("absent.toml")));
    assert!(result.is_err());
}
