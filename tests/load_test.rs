//! Concurrency checks: delays on one request never hold up another.

use std::time::{Duration, Instant};

use erised::config::ServerConfig;

mod common;

#[tokio::test]
async fn test_delay_is_isolated_per_request() {
    let server = common::start_server(ServerConfig::default()).await;
    let client = common::client();

    let slow_client = client.clone();
    let slow_url = server.url("/slow");
    let slow = tokio::spawn(async move {
        let start = Instant::now();
        let res = slow_client
            .get(slow_url)
            .header("X-Erised-Response-Delay", "800")
            .send()
            .await
            .unwrap();
        let _ = res.bytes().await.unwrap();
        start.elapsed()
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    let start = Instant::now();
    let res = client.get(server.url("/fast")).send().await.unwrap();
    let _ = res.bytes().await.unwrap();
    let fast = start.elapsed();

    let slow = slow.await.unwrap();
    assert!(slow >= Duration::from_millis(800), "slow took {:?}", slow);
    assert!(fast < Duration::from_millis(500), "fast took {:?}", fast);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests() {
    let server = common::start_server(ServerConfig::default()).await;
    let client = common::client();

    let num_requests = 200;
    let concurrency = 20;
    let start = Instant::now();

    let mut handles = Vec::new();
    for i in 0..concurrency {
        let client = client.clone();
        let url = server.url("/");
        handles.push(tokio::spawn(async move {
            let mut ok = 0;
            for j in 0..(num_requests / concurrency) {
                let data = format!("request {}-{}", i, j);
                let res = client
                    .get(&url)
                    .header("X-Erised-Data", data.as_str())
                    .header("X-Erised-Response-Delay", "10")
                    .send()
                    .await
                    .unwrap();
                if res.status() == 200 && res.text().await.unwrap() == data {
                    ok += 1;
                }
            }
            ok
        }));
    }

    let mut total_ok = 0;
    for handle in handles {
        total_ok += handle.await.unwrap();
    }

    let duration = start.elapsed();
    println!("{} requests in {:?}", num_requests, duration);

    assert_eq!(total_ok, num_requests);
    server.shutdown.trigger();
}
