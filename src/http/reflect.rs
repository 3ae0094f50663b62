//! Diagnostic routes under `/erised/`.
//!
//! Each one reflects something about the request or the server and answers
//! through the same response writer as the landing route.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    response::Response,
};
use serde_json::{json, Map, Value};

use crate::directive::{Encoding, ResponseSpec, DATA};
use crate::http::request::RequestMeta;
use crate::http::response::respond;
use crate::http::server::AppState;
use crate::observability::metrics;

const MAX_ECHO_BODY: usize = 10 * 1024 * 1024;

/// `GET /erised/headers`
pub async fn headers_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let meta = RequestMeta::of(&request);
    meta.log("headers");
    metrics::record_request("headers");

    let body = headers_json(request.headers(), &meta.host);
    respond(ResponseSpec::fixed(Encoding::Json, body), state.write_timeout).await
}

/// `GET /erised/info`
pub async fn info_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let meta = RequestMeta::of(&request);
    meta.log("info");
    metrics::record_request("info");

    let body = json!({
        "Host": meta.host,
        "Method": meta.method.as_str(),
        "Protocol": meta.protocol,
        "Request URI": meta.uri,
    });
    respond(ResponseSpec::fixed(Encoding::Json, body.to_string()), state.write_timeout).await
}

/// `GET /erised/ip`
pub async fn ip_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let meta = RequestMeta::of(&request);
    meta.log("ip");
    metrics::record_request("ip");

    let body = json!({ "Client IP": meta.remote() });
    respond(ResponseSpec::fixed(Encoding::Json, body.to_string()), state.write_timeout).await
}

/// `POST /erised/shutdown`
///
/// The acknowledgement is built before the trigger fires; the server drains
/// it along with every other in-flight response.
pub async fn shutdown_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    RequestMeta::of(&request).log("shutdown");
    metrics::record_request("shutdown");

    let response = respond(
        ResponseSpec::fixed(Encoding::Json, r#"{"shutdown":"ok"}"#),
        state.write_timeout,
    )
    .await;

    tracing::info!("Initiating server shutdown");
    state.shutdown.trigger();
    response
}

/// `ANY /erised/echoserver[/...]`
pub async fn echo_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let meta = RequestMeta::of(&request);
    meta.log("echoserver");
    metrics::record_request("echoserver");

    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, MAX_ECHO_BODY).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::error!(error = %e, "Error reading request body");
            let spec = ResponseSpec::fixed(Encoding::Text, "Internal Server Error\n")
                .with_status(StatusCode::INTERNAL_SERVER_ERROR);
            return respond(spec, state.write_timeout).await;
        }
    };

    let page = echo_page(&meta, &parts.headers, &body);
    respond(ResponseSpec::fixed(Encoding::Html, page), state.write_timeout).await
}

/// Fallback for the GET/POST-only routes.
pub async fn method_not_allowed(State(state): State<AppState>, request: Request<Body>) -> Response {
    tracing::error!(
        method = %request.method(),
        path = %request.uri().path(),
        "Method not allowed"
    );
    let spec = ResponseSpec::fixed(Encoding::Text, "Method Not Allowed\n")
        .with_status(StatusCode::METHOD_NOT_ALLOWED);
    respond(spec, state.write_timeout).await
}

/// Request headers as a JSON object, first value per name, plus `Host`.
///
/// An `X-Erised-Data` value that is valid JSON is embedded as JSON.
pub fn headers_json(headers: &HeaderMap, host: &str) -> String {
    let mut object = Map::new();

    for name in headers.keys() {
        if *name == header::HOST {
            continue;
        }
        let Some(value) = headers.get(name) else {
            continue;
        };
        let embedded = if name.as_str() == DATA {
            serde_json::from_slice::<Value>(value.as_bytes()).ok()
        } else {
            None
        };
        let value = embedded
            .unwrap_or_else(|| Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()));
        object.insert(canonical_name(name.as_str()), value);
    }

    object.insert("Host".to_string(), Value::String(host.to_string()));
    Value::Object(object).to_string()
}

/// `x-erised-data` → `X-Erised-Data`
pub fn canonical_name(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn echo_page(meta: &RequestMeta, headers: &HeaderMap, body: &str) -> String {
    let mut page = String::from("<!DOCTYPE html>");
    page.push_str("<html><head><title>Erised Webpage</title></head>");
    page.push_str("<style>h3 {color: blue; font-family: verdana; margin-bottom: -5px; padding-left: 10px;}");
    page.push_str("p {font-family: courier; margin-bottom: -15px; padding-left: 25px;}</style>");
    page.push_str("<body>");

    page.push_str("<h3><i>Server Environment Variables</i></h3>");
    push_row(&mut page, "HOSTNAME", &hostname());
    page.push_str("<br>");
    let mut env: Vec<(String, String)> = std::env::vars_os()
        .map(|(k, v)| (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned()))
        .collect();
    env.sort();
    for (key, value) in &env {
        push_row(&mut page, key, value);
    }

    page.push_str("<br><hr><h3><i>Request Info</i></h3>");
    push_row(&mut page, "Remote Address", &meta.remote());
    push_row(&mut page, "Host", &meta.host);
    push_row(&mut page, "Method", meta.method.as_str());
    push_row(&mut page, "Protocol", &meta.protocol);
    push_row(&mut page, "Request Path", &meta.uri);
    push_row(
        &mut page,
        "Time",
        &chrono::Local::now().format("%A, %d-%b-%y %H:%M:%S %Z").to_string(),
    );

    page.push_str("<br><hr><h3><i>Request Headers</i></h3>");
    let mut names: Vec<_> = headers.keys().collect();
    names.sort_by_key(|name| canonical_name(name.as_str()));
    for name in names {
        for value in headers.get_all(name) {
            push_row(
                &mut page,
                &canonical_name(name.as_str()),
                &String::from_utf8_lossy(value.as_bytes()),
            );
        }
    }

    if !body.is_empty() {
        page.push_str("<br><hr><h3><i>Request Body</i></h3>");
        page.push_str(&format!("<p>{}</p>", escape_html(body)));
    }

    page.push_str(&format!(
        "<br><hr><br><center><a href=\"https://github.com/EAddario/erised\">Erised ({}): \
         A nimble http server to test arbitrary REST API responses.</a></center>",
        env!("CARGO_PKG_VERSION")
    ));
    page.push_str("</body></html>");
    page
}

fn push_row(page: &mut String, label: &str, value: &str) {
    page.push_str(&format!(
        "<p><b>{}: </b>{}</p>",
        escape_html(label),
        escape_html(value)
    ));
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn hostname() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unable to read hostname");
            String::new()
        })
}
