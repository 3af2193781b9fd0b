use simsuite_site::config::normalize_base_url;

#[test]
fn base_url_trailing_slashes_stripped() {
    assert_eq!(
        normalize_base_url("http://localhost:8001/").unwrap(),
        "http://localhost:8001"
    );
    assert_eq!(
        normalize_base_url("  https://ai.example.org/api//  ").unwrap(),
        "https://ai.example.org/api"
    );
}

#[test]
fn base_url_kept_when_already_clean() {
    assert_eq!(
        normalize_base_url("http://10.0.0.5:8001").unwrap(),
        "http://10.0.0.5:8001"
    );
}

#[test]
fn base_url_requires_http_scheme() {
    assert!(normalize_base_url("localhost:8001").is_err());
    assert!(normalize_base_url("ftp://localhost").is_err());
    assert!(normalize_base_url("").is_err());
}

#[test]
fn bare_scheme_rejected() {
    assert!(normalize_base_url("http://").is_err());
    assert!(normalize_base_url("https:///").is_err());
}
