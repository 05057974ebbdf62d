use std::sync::{Arc, Mutex};

use forecast_core::{
    City, CityDropdown, CityLookup, LookupError, lookup::openweather::OpenWeatherLookup,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn lookup_for(server: &MockServer) -> OpenWeatherLookup {
    OpenWeatherLookup::with_base_url("test-key".to_string(), &server.uri())
}

#[tokio::test]
async fn find_sends_query_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/find"))
        .and(query_param("q", "São Paulo & co"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{"id": 3448439, "name": "São Paulo", "sys": {"country": "BR"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cities = lookup_for(&server).find("São Paulo & co").await.expect("lookup succeeds");

    assert_eq!(cities, vec![City::new(3448439, "São Paulo", "BR")]);
}

#[tokio::test]
async fn find_returns_list_verbatim() {
    let server = MockServer::start().await;
    let list = json!([
        {"id": 2643743, "name": "London", "coord": {"lat": 51.5085, "lon": -0.1257}, "sys": {"country": "GB"}},
        {"id": 6058560, "name": "London", "sys": {"country": "CA"}, "main": {"temp": 275.1}}
    ]);

    Mock::given(method("GET"))
        .and(path("/find"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"cod": "200", "count": 2, "list": list})),
        )
        .mount(&server)
        .await;

    let cities = lookup_for(&server).find("London").await.expect("lookup succeeds");

    assert_eq!(serde_json::to_value(&cities).expect("serializable"), list);
}

#[tokio::test]
async fn missing_list_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/find"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cod": "200", "count": 0})))
        .mount(&server)
        .await;

    let cities = lookup_for(&server).find("Xy").await.expect("lookup succeeds");
    assert!(cities.is_empty());
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/find"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#),
        )
        .mount(&server)
        .await;

    let err = lookup_for(&server).find("London").await.unwrap_err();

    match err {
        LookupError::Status { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/find"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = lookup_for(&server).find("London").await.unwrap_err();
    assert!(matches!(err, LookupError::Parse(_)));
}

#[tokio::test]
async fn unreachable_host_is_request_error() {
    let lookup = OpenWeatherLookup::with_base_url("test-key".to_string(), "http://127.0.0.1:1");

    let err = lookup.find("London").await.unwrap_err();
    assert!(matches!(err, LookupError::Request(_)));
}

#[tokio::test]
async fn dropdown_end_to_end_selection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/find"))
        .and(query_param("q", "Lon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{"id": 1, "name": "London", "sys": {"country": "GB"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let selected = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&selected);
    let mut dropdown = CityDropdown::new(Arc::new(lookup_for(&server)), move |city| {
        sink.lock().unwrap().push(city)
    });

    dropdown.on_toggle();
    dropdown.on_input_change("L").await;
    dropdown.on_input_change("Lon").await;
    assert_eq!(dropdown.matches().len(), 1);

    assert!(dropdown.select_match(0));

    assert_eq!(*selected.lock().unwrap(), vec![City::new(1, "London", "GB")]);
    assert_eq!(dropdown.query(), "");
    assert!(dropdown.matches().is_empty());
    assert!(!dropdown.is_open());
}

#[tokio::test]
async fn dropdown_swallows_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/find"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let mut dropdown = CityDropdown::new(Arc::new(lookup_for(&server)), |_| {});
    dropdown.on_input_change("London").await;

    assert!(dropdown.matches().is_empty());
    assert_eq!(dropdown.query(), "London");
}
