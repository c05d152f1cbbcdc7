//! End-to-end session tests against the mock HTTP client.
//!
//! Each test drives a full exchange through the controller, the stream
//! decoder and the recording renderer.

mod common;

use bytes::Bytes;
use common::{controller_with_mock, split_bytes, sse_body, TEST_ENDPOINT};
use streamchat::adapters::mock::MockResponse;
use streamchat::error::TransportError;
use streamchat::session::ExchangeStatus;
use streamchat::traits::Sender;

#[tokio::test]
async fn test_hello_reply_renders_and_completes() {
    let (mut controller, client, renderer) = controller_with_mock();
    client.push_response(MockResponse::chunks([
        "data: Hel\n\n",
        "data: lo\n\n",
        "event: end\n\n",
    ]));

    assert!(controller.submit("hi"));
    controller.run_until_idle().await;

    let messages = renderer.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[0].text, "hi");
    assert_eq!(messages[1].text, "Hello");
    assert!(!messages[1].placeholder);

    let requests = client.get_requests();
    assert_eq!(requests[0].url, TEST_ENDPOINT);
    assert_eq!(requests[0].body, r#"{"message":"hi"}"#);
    assert_eq!(
        requests[0].headers.get("Accept"),
        Some(&"text/event-stream".to_string())
    );
}

#[tokio::test]
async fn test_reply_is_independent_of_chunking() {
    let body = sse_body(&[
        "data: Grüße, ",
        "data:  wörld ",
        "data: 🎉",
        "event: end",
    ]);

    for size in [1, 2, 3, 5, 7, body.len()] {
        let (mut controller, client, renderer) = controller_with_mock();
        client.push_response(MockResponse::Stream(split_bytes(body.as_bytes(), size)));

        controller.submit("greet");
        controller.run_until_idle().await;

        let bot = renderer.last_bot_message().unwrap();
        assert_eq!(bot.text, "Grüße,  wörld 🎉", "chunk size {}", size);
        assert_eq!(
            controller.exchange().unwrap().status(),
            ExchangeStatus::Complete
        );
    }
}

#[tokio::test]
async fn test_unknown_records_are_ignored() {
    let (mut controller, client, renderer) = controller_with_mock();
    client.push_response(MockResponse::chunks([sse_body(&[
        "event: ping",
        ": comment",
        "data: ok",
        "retry: 10",
    ])]));

    controller.submit("x");
    controller.run_until_idle().await;

    assert_eq!(renderer.last_bot_message().unwrap().text, "ok");
}

#[tokio::test]
async fn test_error_record_stops_reply() {
    let (mut controller, client, renderer) = controller_with_mock();
    client.push_response(MockResponse::chunks([sse_body(&[
        "data: partial",
        "event: error\ndata: {\"error\":\"boom\"}",
        "data: never shown",
    ])]));

    controller.submit("x");
    controller.run_until_idle().await;

    let bot = renderer.last_bot_message().unwrap();
    assert_eq!(bot.text, "partial\nSorry, an error occurred: boom");
    assert!(bot.error);
    assert_eq!(
        controller.exchange().unwrap().status(),
        ExchangeStatus::Errored
    );
}

#[tokio::test]
async fn test_connection_failure_is_rendered() {
    let (mut controller, client, renderer) = controller_with_mock();
    client.push_response(MockResponse::Error(TransportError::ConnectionFailed(
        "connection refused".to_string(),
    )));

    controller.submit("x");
    controller.run_until_idle().await;

    let bot = renderer.last_bot_message().unwrap();
    assert_eq!(bot.text, "Sorry, an error occurred: connection refused");
    assert!(bot.error);
    assert!(!bot.placeholder);
}

#[tokio::test]
async fn test_status_without_error_body_uses_status_text() {
    let (mut controller, client, renderer) = controller_with_mock();
    client.push_response(MockResponse::status_json(502, "<html>bad gateway</html>"));

    controller.submit("x");
    controller.run_until_idle().await;

    let bot = renderer.last_bot_message().unwrap();
    assert!(bot.text.contains("502"), "got {:?}", bot.text);
    assert!(bot.error);
}

#[tokio::test]
async fn test_consecutive_exchanges() {
    let (mut controller, client, renderer) = controller_with_mock();
    client.push_response(MockResponse::chunks(["data: one\n\n"]));
    client.push_response(MockResponse::chunks(["data: two\n\n"]));

    controller.submit("first");
    controller.run_until_idle().await;
    controller.submit("second");
    controller.run_until_idle().await;

    let texts: Vec<String> = renderer.messages().into_iter().map(|m| m.text).collect();
    assert_eq!(texts, vec!["first", "one", "second", "two"]);
    assert_eq!(renderer.input_clears(), 2);
    assert_eq!(client.request_count(), 2);
}

#[tokio::test]
async fn test_superseded_reply_receives_no_further_updates() {
    let (mut controller, client, renderer) = controller_with_mock();
    let (first_body, first_response) = MockResponse::channel();
    client.push_response(first_response);
    client.push_response(MockResponse::chunks(["data: fresh\n\n"]));

    controller.submit("first");
    first_body
        .unbounded_send(Ok(Bytes::from("data: old\n\n")))
        .unwrap();
    let update = controller.next_update().await.unwrap();
    controller.apply_update(update);

    controller.submit("second");
    let _ = first_body.unbounded_send(Ok(Bytes::from("data: stale\n\n")));
    let _ = first_body.unbounded_send(Ok(Bytes::from("event: error\ndata: {\"error\":\"x\"}\n\n")));
    drop(first_body);
    controller.run_until_idle().await;

    let first_bot = renderer.message(1).unwrap();
    assert_eq!(first_bot.text, "old");
    assert_eq!(first_bot.updates, 1);
    assert!(!first_bot.error);
    assert!(!first_bot.placeholder);

    assert_eq!(renderer.message(3).unwrap().text, "fresh");
    assert_eq!(controller.exchange().unwrap().user_text(), "second");
}
