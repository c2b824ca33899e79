use quire_kernel::security::resource::ResourceGuard;

#[test]
fn resource_guard_extracts_keys() {
    assert_eq!(ResourceGuard::verify("article:abc-123", "article").unwrap(), "abc-123");
    assert_eq!(ResourceGuard::verify(" abc_123 ", "article").unwrap(), "abc_123");
    assert!(ResourceGuard::verify("migration:abc", "article").is_err());
}
