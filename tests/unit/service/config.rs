use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.addr(), "0.0.0.0:5000");
    assert_eq!(cfg.artifact_path, PathBuf::from("static/orbits.gif"));
}

#[test]
fn reads_port_bind_and_artifact() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("ORRERY_BIND", "127.0.0.1"),
        ("ORRERY_ARTIFACT", "/tmp/o.gif"),
    ]))
    .unwrap();
    assert_eq!(cfg.addr(), "127.0.0.1:8080");
    assert_eq!(cfg.artifact_path, PathBuf::from("/tmp/o.gif"));
}

#[test]
fn blank_values_keep_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "  ")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
}

#[test]
fn bad_port_is_a_validation_error() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert!(err.to_string().contains("validation error:"));
    assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
}
