/// End-to-end prediction tests.
///
/// A `tiny_http` server on an ephemeral port plays the prediction API; the
/// real `ApiClient` talks to it over HTTP and the dashboard renders what
/// comes back.
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tiny_http::{Header, Method, Response, Server};

use equipred::api::{ApiClient, PredictionApi};
use equipred::config::schema::ApiConfig;
use equipred::web::Dashboard;

/// A request as the stub backend saw it.
struct Seen {
    method: String,
    url: String,
    body: String,
}

/// Serve `replies` in order, one per request, then stop.
fn stub_backend(replies: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<Seen>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, reply) in replies {
            let mut request = server.recv().unwrap();
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body).unwrap();
            tx.send(Seen {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body,
            })
            .unwrap();
            let response = Response::from_string(reply)
                .with_status_code(status)
                .with_header(Header::from_bytes("Content-Type", "application/json").unwrap());
            request.respond(response).unwrap();
        }
    });

    (format!("http://127.0.0.1:{port}/api"), rx)
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::from_config(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_ms: 5000,
    })
}

const FORM: &str =
    "temperature=85.5&pressure=42.3&vibration=2.1&humidity=65.7&equipment=Turbine&location=Chicago";

#[test]
fn fault_prediction_round_trip() {
    let (base_url, seen) = stub_backend(vec![(
        200,
        r#"{"prediction":1,"probability":{"faulty":0.82,"normal":0.18}}"#,
    )]);
    let dashboard = Dashboard::new(Box::new(client(&base_url)), base_url.clone());

    let page = dashboard.dispatch(&Method::Post, "/predictions", Some(FORM));

    let request = seen.recv().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "/api/predict");
    let sent: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({
            "temperature": 85.5,
            "pressure": 42.3,
            "vibration": 2.1,
            "humidity": 65.7,
            "equipment": "Turbine",
            "location": "Chicago",
        })
    );

    assert_eq!(page.status, 200);
    assert!(page.body.contains("Fault Detected"));
    assert!(page.body.contains("82.00%"));
    assert!(page.body.contains("18.00%"));
    assert!(page.body.contains("schedule a maintenance check"));
}

#[test]
fn unparsable_reading_is_sent_as_null() {
    let (base_url, seen) = stub_backend(vec![(
        200,
        r#"{"prediction":0,"probability":{"faulty":0.3,"normal":0.7}}"#,
    )]);
    let dashboard = Dashboard::new(Box::new(client(&base_url)), base_url.clone());

    let page = dashboard.dispatch(
        &Method::Post,
        "/predictions",
        Some("temperature=hot&equipment=Pump&location=Dallas"),
    );

    let sent: serde_json::Value = serde_json::from_str(&seen.recv().unwrap().body).unwrap();
    assert!(sent["temperature"].is_null());
    assert_eq!(sent["pressure"], 42.3);
    assert!(page.body.contains("Normal Operation"));
    assert!(page.body.contains("70.00%"));
}

#[test]
fn server_error_status_becomes_failed_prediction() {
    let (base_url, _seen) = stub_backend(vec![(500, r#"{"error":"boom"}"#)]);
    let dashboard = Dashboard::new(Box::new(client(&base_url)), base_url.clone());

    let page = dashboard.dispatch(&Method::Post, "/predictions", Some(FORM));

    assert!(page.body.contains("Failed to make prediction. Please check your inputs and try again."));
    assert!(!page.body.contains("Prediction Result"));
}

#[test]
fn sample_endpoint_prefills_over_http() {
    let (base_url, seen) = stub_backend(vec![(
        200,
        r#"{"temperature":91.2,"pressure":40,"vibration":3.3,"humidity":55,"equipment":"Valve","location":"New York"}"#,
    )]);
    let api = client(&base_url);

    let sample = api.sample().unwrap();
    assert_eq!(seen.recv().unwrap().url, "/api/sample");
    assert_eq!(sample.temperature, 91.2);
    assert_eq!(sample.location, "New York");
}

#[test]
fn malformed_payload_fails_the_page() {
    let (base_url, _seen) = stub_backend(vec![(200, r#"{"total_records":"many"}"#)]);
    let dashboard = Dashboard::new(Box::new(client(&base_url)), base_url.clone());

    let page = dashboard.dispatch(&Method::Get, "/dataset", None);
    assert!(page.body.contains("Failed to load dataset summary."));
}

#[test]
fn configured_timeout_bounds_a_silent_backend() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    thread::spawn(move || {
        // Accept the request and hold it without answering.
        let request = server.recv().unwrap();
        thread::sleep(Duration::from_secs(5));
        drop(request);
    });

    let api = ApiClient::from_config(&ApiConfig {
        base_url: format!("http://127.0.0.1:{port}/api"),
        timeout_ms: 200,
    });
    let started = Instant::now();
    let err = api.health().unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(format!("{err:#}").contains("GET /health failed"));
}
