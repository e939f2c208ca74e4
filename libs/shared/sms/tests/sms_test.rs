use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use shared_sms::{SmsClient, SmsError};

fn test_config(api_url: &str) -> AppConfig {
    AppConfig {
        database_host: "localhost".into(),
        database_port: 5432,
        database_user: "postgres".into(),
        database_password: String::new(),
        database_name: "dentclinic_test".into(),
        listen_port: 0,
        upload_dir: "uploads".into(),
        sms_api_url: api_url.into(),
        sms_usercode: "testuser".into(),
        sms_password: "testpass".into(),
        sms_header: "DENTCLINIC".into(),
        admin_jwt_secret: "secret".into(),
        admin_bootstrap_username: "admin".into(),
        admin_bootstrap_password: "change-me".into(),
    }
}

#[tokio::test]
async fn send_succeeds_on_accepted_provider_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sms/send/get"))
        .and(body_string_contains("gsmno=5321234567"))
        .and(body_string_contains("msgheader=DENTCLINIC"))
        .and(body_string_contains("dil=TR"))
        .respond_with(ResponseTemplate::new(200).set_body_string("00 92150819"))
        .expect(1)
        .mount(&server)
        .await;

    let client = SmsClient::new(&test_config(&format!("{}/sms/send/get", server.uri())));
    let result = client.send("+90 532 123 45 67", "Randevunuz onaylandı").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn send_fails_on_provider_rejection_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("30"))
        .mount(&server)
        .await;

    let client = SmsClient::new(&test_config(&server.uri()));
    let result = client.send("05321234567", "hello").await;

    assert!(matches!(result, Err(SmsError::Rejected(_))));
}

#[tokio::test]
async fn send_fails_on_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = SmsClient::new(&test_config(&server.uri()));
    let result = client.send("05321234567", "hello").await;

    assert!(matches!(result, Err(SmsError::Rejected(_))));
}

#[tokio::test]
async fn send_rejects_malformed_recipient_without_calling_provider() {
    let server = MockServer::start().await;
    // No mock mounted: a request would 404 and fail the test differently.

    let client = SmsClient::new(&test_config(&server.uri()));
    let result = client.send("12345", "hello").await;

    assert!(matches!(result, Err(SmsError::InvalidRecipient(_))));
}

#[tokio::test]
async fn send_fails_fast_when_unconfigured() {
    let mut config = test_config("http://localhost:1");
    config.sms_usercode = String::new();

    let client = SmsClient::new(&config);
    let result = client.send("05321234567", "hello").await;

    assert!(matches!(result, Err(SmsError::NotConfigured)));
}
