use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_default_limit() {
    assert_eq!(ElabOptions::default().unroll_limit, 1_048_576);
}

#[test]
fn test_env_value_overrides() {
    assert_eq!(ElabOptions::from_env_value(Some(" 64 ")).unroll_limit, 64);
    assert_eq!(ElabOptions::from_env_value(None), ElabOptions::default());
}

#[test]
fn test_unparseable_env_value_falls_back() {
    assert_eq!(
        ElabOptions::from_env_value(Some("lots")),
        ElabOptions::default()
    );
}

#[test]
fn test_from_env_reads_variable() {
    let raw = std::env::var(UNROLL_LIMIT_VAR).ok();
    assert_eq!(
        ElabOptions::from_env(),
        ElabOptions::from_env_value(raw.as_deref())
    );
}
