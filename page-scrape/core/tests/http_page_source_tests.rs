// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use page_scrape_core::{extract_title, HttpPageSource, PageSource, RetryPolicy, ScrapeError};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RANDOM_PATH: &str = "/wiki/Special:Random";

fn fast_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

fn source_for(server: &MockServer, retry: RetryPolicy) -> HttpPageSource {
    source_with_timeout(&server.uri(), Duration::from_secs(5), retry)
}

fn source_with_timeout(base: &str, timeout: Duration, retry: RetryPolicy) -> HttpPageSource {
    HttpPageSource::new(
        format!("{}{}", base, RANDOM_PATH),
        timeout,
        "page-scrape-test/1.0",
        retry,
    )
    .unwrap()
}

#[tokio::test]
async fn test_fetches_page_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANDOM_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><h1>Ferris the Crab</h1></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = source_for(&server, fast_retries(2));
    let html = source.fetch().await.unwrap();

    assert_eq!(extract_title(&html).unwrap(), "Ferris the Crab");
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANDOM_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = source_for(&server, fast_retries(2)).fetch().await.unwrap_err();

    assert!(matches!(err, ScrapeError::HttpStatus(404)));
}

#[tokio::test]
async fn test_too_many_requests_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANDOM_PATH))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(RANDOM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>Second try</h1>"))
        .expect(1)
        .mount(&server)
        .await;

    let html = source_for(&server, fast_retries(2)).fetch().await.unwrap();

    assert_eq!(extract_title(&html).unwrap(), "Second try");
}

#[tokio::test]
async fn test_server_errors_give_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANDOM_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let err = source_for(&server, fast_retries(2)).fetch().await.unwrap_err();

    assert!(matches!(err, ScrapeError::HttpStatus(503)));
}

#[tokio::test]
async fn test_timed_out_request_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RANDOM_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<h1>Too slow</h1>")
                .set_delay(Duration::from_secs(2)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(RANDOM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>On time</h1>"))
        .expect(1)
        .mount(&server)
        .await;

    let source = source_with_timeout(&server.uri(), Duration::from_millis(200), fast_retries(2));
    let html = source.fetch().await.unwrap();

    assert_eq!(extract_title(&html).unwrap(), "On time");
}

#[tokio::test]
async fn test_connect_errors_give_up_after_max_retries() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = source_with_timeout(&base, Duration::from_secs(5), fast_retries(2))
        .fetch()
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Request(e) if e.is_connect()));
}
