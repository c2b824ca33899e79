#[test]
fn quire_error_expands() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/quire_error_pass.rs");
}
