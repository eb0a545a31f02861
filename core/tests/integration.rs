//! Execute parsed commands against a live echo server.
//!
//! # Design
//! Starts a small axum echo server on a random port, then parses curl
//! commands, builds `HttpRequest`s with the core and executes them over real
//! HTTP using ureq. The echo reflects method, content type and body, so the
//! body-encoding decisions of `HttpRequest::from_execute` are checked
//! end-to-end.

use axum::{
    http::{HeaderMap, Method as AxumMethod, StatusCode},
    routing::any,
    Json, Router,
};
use curlconv_core::{parse, ExecuteOutcome, ExecuteRequest, HttpRequest, HttpResponse, Method};
use serde_json::{json, Value};

async fn echo(method: AxumMethod, headers: HeaderMap, body: String) -> (StatusCode, Json<Value>) {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let x_test = headers
        .get("x-test")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    (
        StatusCode::OK,
        Json(json!({
            "method": method.as_str(),
            "content_type": content_type,
            "x_test": x_test,
            "body": body,
        })),
    )
}

fn start_echo_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let app = Router::new().route("/echo", any(echo));
            axum::serve(listener, app).await
        })
        .unwrap();
    });

    addr
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match req.method {
        Method::Post => {
            let mut builder = agent.post(&req.url);
            for (k, v) in &req.headers {
                builder = builder.header(k.as_str(), v.as_str());
            }
            match req.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
        Method::Put => {
            let mut builder = agent.put(&req.url);
            for (k, v) in &req.headers {
                builder = builder.header(k.as_str(), v.as_str());
            }
            match req.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
        _ => {
            let mut builder = agent.get(&req.url);
            for (k, v) in &req.headers {
                builder = builder.header(k.as_str(), v.as_str());
            }
            builder.call()
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
        .collect();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers,
        body,
    }
}

#[test]
fn parsed_commands_execute_end_to_end() {
    let addr = start_echo_server();
    let url = format!("http://{addr}/echo");

    // Step 1: JSON body is sent as JSON with a matching content type.
    let command = format!(
        "curl '{url}' -H 'X-Test: one' --data-raw '{{\"name\": \"x\", \"ok\": true}}'"
    );
    let model = parse(&command);
    assert_eq!(model.method, Method::Post);
    let req = HttpRequest::from_execute(ExecuteRequest::from(&model)).unwrap();
    let outcome = ExecuteOutcome::from(execute(req));
    assert_eq!(outcome.status_code, 200);
    assert_eq!(outcome.content["method"], "POST");
    assert_eq!(outcome.content["content_type"], "application/json");
    assert_eq!(outcome.content["x_test"], "one");
    let sent: Value = serde_json::from_str(outcome.content["body"].as_str().unwrap()).unwrap();
    assert_eq!(sent, json!({"name": "x", "ok": true}));

    // Step 2: raw body is sent verbatim, form-encoded by default.
    let model = parse(&format!("curl -X PUT {url} -d 'a=1&b=2'"));
    let req = HttpRequest::from_execute(ExecuteRequest::from(&model)).unwrap();
    let outcome = ExecuteOutcome::from(execute(req));
    assert_eq!(outcome.content["method"], "PUT");
    assert_eq!(outcome.content["content_type"], "application/x-www-form-urlencoded");
    assert_eq!(outcome.content["body"], "a=1&b=2");

    // Step 3: GET carries no body even if the command had one.
    let model = parse(&format!("curl -X GET {url} --data-raw 'ignored'"));
    let req = HttpRequest::from_execute(ExecuteRequest::from(&model)).unwrap();
    assert!(req.body.is_none());
    let outcome = ExecuteOutcome::from(execute(req));
    assert_eq!(outcome.content["method"], "GET");
    assert_eq!(outcome.content["body"], "");
    assert!(outcome.headers.contains_key("content-type"));
}

#[test]
fn unknown_route_is_returned_as_data() {
    let addr = start_echo_server();
    let model = parse(&format!("curl http://{addr}/missing"));
    let req = HttpRequest::from_execute(ExecuteRequest::from(&model)).unwrap();
    let outcome = ExecuteOutcome::from(execute(req));
    assert_eq!(outcome.status_code, 404);
    assert_eq!(outcome.content, Value::String(String::new()));
}
