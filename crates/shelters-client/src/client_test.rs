use super::*;

#[test]
fn endpoint_url_appends_api_path() {
    let url = AvailabilityClient::endpoint_url("http://127.0.0.1:5000").unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/shelters");
}

#[test]
fn endpoint_url_strips_trailing_slash() {
    let url = AvailabilityClient::endpoint_url("https://shelters.example.org/").unwrap();
    assert_eq!(url.as_str(), "https://shelters.example.org/api/shelters");
}

#[test]
fn endpoint_url_keeps_path_prefix() {
    let url = AvailabilityClient::endpoint_url("https://example.org/toronto").unwrap();
    assert_eq!(url.as_str(), "https://example.org/toronto/api/shelters");
}

#[test]
fn endpoint_url_rejects_garbage() {
    let err = AvailabilityClient::endpoint_url("not a url").unwrap_err();
    assert!(
        matches!(err, ClientError::InvalidBaseUrl { ref base_url, .. } if base_url == "not a url"),
        "got {err:?}"
    );
}

#[test]
fn from_config_uses_configured_base_url() {
    let config = AppConfig {
        api_base_url: "https://shelters.example.org".to_string(),
        log_level: "info".to_string(),
        request_timeout_secs: 5,
        user_agent: "shelters-test/0.1".to_string(),
        geocoder_base_url: "https://geocoder.example.org/json".to_string(),
        maps_api_key: None,
        map_search_url: "https://maps.example.org/?q=".to_string(),
        capabilities: shelters_core::ViewCapabilities::default(),
    };
    let client = AvailabilityClient::from_config(&config).unwrap();
    assert_eq!(
        client.endpoint().as_str(),
        "https://shelters.example.org/api/shelters"
    );
}
