use climachat::chat::{ChatCommand, Mode, Sender, Transcript, dispatch};
use climachat::config::{Config, Credentials, WeatherConfig};
use climachat::core::error::{ClimaError, ErrorKind};
use climachat::responders::Responder;
use climachat::responders::factory::build_responders;
use climachat::responders::weather::WeatherClient;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, key: Option<&str>) -> WeatherClient {
    let config = WeatherConfig {
        base_url: Some(server.uri()),
        ..Default::default()
    };
    WeatherClient::new(&config, key.map(str::to_string)).expect("client should build")
}

#[tokio::test]
async fn madrid_success_formats_sentence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Madrid"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "es"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": {"temp": 21.5},
            "weather": [{"description": "cielos despejados"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server, Some("test-key")).respond("Madrid").await;
    assert_eq!(
        reply.unwrap(),
        "El clima en Madrid: cielos despejados, temperatura: 21.5 ºC"
    );
}

#[tokio::test]
async fn unknown_city_reports_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Xyzcity"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, Some("test-key"))
        .respond("Xyzcity")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamClientError);
    assert!(matches!(err, ClimaError::Upstream { status: 404, .. }));
    assert!(err.to_string().contains("city not found"));
}

#[tokio::test]
async fn error_without_message_uses_fallback_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("test-key"))
        .respond("Lima")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Error al obtener el clima: Ciudad no encontrada");
}

#[tokio::test]
async fn missing_key_skips_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    for city in ["Madrid", "", "Xyzcity"] {
        let err = client.respond(city).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: La API Key de OpenWeather no está configurada."
        );
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"main": {}})))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("test-key"))
        .respond("Madrid")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportOrParseFailure);
    assert!(err.to_string().starts_with("Error al consultar el clima: JSON error:"));
}

#[tokio::test]
async fn empty_conditions_list_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": {"temp": 10},
            "weather": []
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("test-key"))
        .respond("Quito")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportOrParseFailure);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let config = WeatherConfig {
        base_url: Some("http://127.0.0.1:1".to_string()),
        ..Default::default()
    };

    let client = WeatherClient::new(&config, Some("test-key".to_string())).unwrap();
    let err = client.respond("Madrid").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportOrParseFailure);
    assert!(err.to_string().starts_with("Error al consultar el clima: "));
}

#[tokio::test]
async fn connection_errors_do_not_echo_the_api_key() {
    let mut config = Config::default();
    config.weather.base_url = Some("http://127.0.0.1:1".to_string());
    let credentials = Credentials {
        weather_key: Some("SUPERSECRETKEY".to_string()),
        openai_key: None,
    };
    let responders = build_responders(&config, &credentials).unwrap();

    let mut transcript = Transcript::default();
    dispatch(ChatCommand::new(Mode::Weather, "Madrid"), &responders, &mut transcript).await;

    let reply = transcript.last().unwrap();
    assert_eq!(reply.sender(), Sender::Bot);
    assert!(reply.text().starts_with("Error al consultar el clima: Connection failed"));
    assert!(!reply.text().contains("SUPERSECRETKEY"));
    assert!(!reply.text().contains("appid"));
}

#[tokio::test]
async fn timeouts_do_not_echo_the_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = WeatherConfig {
        base_url: Some(server.uri()),
        timeout_secs: Some(1),
        ..Default::default()
    };
    let client = WeatherClient::new(&config, Some("SUPERSECRETKEY".to_string())).unwrap();
    let err = client.respond("Madrid").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportOrParseFailure);
    assert!(err.to_string().contains("Request timed out"));
    assert!(!err.to_string().contains("SUPERSECRETKEY"));
}
