//! The golden corpus under `fixtures/` must compile to its `.d.ts` files.
use std::path::Path;

fn check(name: &str) {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    let source = std::fs::read_to_string(dir.join(format!("{name}.schema.json"))).unwrap();
    let expected = std::fs::read_to_string(dir.join(format!("{name}.d.ts"))).unwrap();
    let schema: serde_json::Value = serde_json::from_str(&source).unwrap();
    let actual = schema_tsd::compile(schema, Some(dir.as_path())).unwrap();
    assert_eq!(actual, expected.trim_end());
}

#[test]
fn user_fixture() {
    check("user");
}

#[test]
fn shapes_fixture() {
    check("shapes");
}
