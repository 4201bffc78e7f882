use std::collections::HashMap;

use spotfilter::config::Config;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_apply_when_only_required_values_are_set() {
    let config = Config::from_lookup(lookup_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client"),
        ("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback"),
    ]))
    .unwrap();

    assert_eq!(config.client_id, "client");
    assert_eq!(config.server_addr, "127.0.0.1:8888");
    assert_eq!(config.api_url, "https://api.spotify.com/v1");
    assert_eq!(config.auth_url, "https://accounts.spotify.com/authorize");
    assert_eq!(config.token_url, "https://accounts.spotify.com/api/token");
    assert!(config.scope.contains("user-library-read"));
    assert!(config.scope.contains("playlist-modify-public"));
}

#[test]
fn test_missing_client_id_is_reported_by_name() {
    let err = Config::from_lookup(lookup_from(&[(
        "SPOTIFY_API_REDIRECT_URI",
        "http://127.0.0.1:8888/callback",
    )]))
    .unwrap_err();

    assert!(err.contains("SPOTIFY_API_AUTH_CLIENT_ID"));
}

#[test]
fn test_blank_values_count_as_missing() {
    let err = Config::from_lookup(lookup_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client"),
        ("SPOTIFY_API_REDIRECT_URI", "   "),
    ]))
    .unwrap_err();

    assert!(err.contains("SPOTIFY_API_REDIRECT_URI"));
}

#[test]
fn test_overrides_win_and_api_url_is_normalized() {
    let config = Config::from_lookup(lookup_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client"),
        ("SPOTIFY_API_REDIRECT_URI", "http://localhost:9000/callback"),
        ("SERVER_ADDRESS", "0.0.0.0:9000"),
        ("SPOTIFY_API_URL", "http://localhost:4010/v1/"),
    ]))
    .unwrap();

    assert_eq!(config.server_addr, "0.0.0.0:9000");
    assert_eq!(config.api_url, "http://localhost:4010/v1");
}
