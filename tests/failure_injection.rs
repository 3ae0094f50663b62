//! Misbehaving directives and timeouts.

use std::time::Duration;

use erised::config::ServerConfig;

mod common;

#[tokio::test]
async fn test_write_timeout_aborts_body() {
    let mut config = ServerConfig::default();
    config.timeouts.write_secs = 1;
    let server = common::start_server(config).await;
    let client = common::client();

    let res = client
        .get(server.url("/"))
        .header("X-Erised-Response-Delay", "2500")
        .header("X-Erised-Data", "never delivered")
        .send()
        .await
        .unwrap();

    // Headers were committed before the delay started
    assert_eq!(res.status(), 200);
    assert!(res.bytes().await.is_err());

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_garbage_directives_fall_back_to_defaults() {
    let server = common::start_server(ServerConfig::default()).await;
    let client = common::client();

    let res = client
        .get(server.url("/"))
        .header("X-Erised-Status-Code", "NotARealStatus")
        .header("X-Erised-Content-Type", "yaml")
        .header("X-Erised-Headers", "[1, 2, 3]")
        .header("X-Erised-Response-Delay", "soon")
        .header("X-Erised-Location", "https://www.example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "text/plain");
    assert!(res.headers().get("content-encoding").is_none());
    assert!(res.headers().get("location").is_none());

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_missing_search_root_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ServerConfig::default();
    config.search.path = dir.path().join("removed").to_string_lossy().into_owned();
    let server = common::start_server(config).await;
    let client = common::client();

    let res = client
        .get(server.url("/"))
        .header("X-Erised-Response-File", "anything.json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_wrong_method_on_diagnostic_route() {
    let server = common::start_server(ServerConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/erised/shutdown")).send().await.unwrap();
    assert_eq!(res.status(), 405);
    assert_eq!(res.text().await.unwrap(), "Method Not Allowed\n");

    // Still serving
    tokio::time::sleep(Duration::from_millis(50)).await;
    let res = client.get(server.url("/erised/info")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    server.shutdown.trigger();
}
