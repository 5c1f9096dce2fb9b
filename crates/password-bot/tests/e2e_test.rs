//! End-to-end tests: Telegram updates in, Telegram replies out.

mod common;

use common::{memory_router, PHONE};
use password_bot::{AppError, SessionRouter};
use secrecy::SecretString;
use std::time::Duration;
use telegram_client::{BotMessage, MessageReceiver, TelegramClient};
use tokio_stream::StreamExt;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_telegram_client(mock_server: &MockServer) -> TelegramClient {
    TelegramClient::new(
        mock_server.uri(),
        SecretString::new("test-token".into()),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn text_update(update_id: i64, chat_id: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id,
            "date": 1677652288,
            "chat": { "id": chat_id, "type": "private" },
            "text": text
        }
    })
}

async fn mount_send_ok(mock_server: &MockServer, expected: serde_json::Value, times: u64) {
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .and(body_json(expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": { "message_id": 1 }
        })))
        .expect(times)
        .mount(mock_server)
        .await;
}

/// Route one message and send the reply, as the bot's main loop does.
async fn handle(router: &SessionRouter, telegram: &TelegramClient, message: &BotMessage) {
    let reply = router
        .dispatch(&message.session_id(), &message.text)
        .await
        .unwrap();
    telegram
        .send_message(message.chat_id, &reply.text, reply.keyboard.as_ref())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_start_e2e() {
    let telegram_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bottest-token/getUpdates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": [text_update(1, 1001, "/start")]
        })))
        .up_to_n_times(1)
        .mount(&telegram_server)
        .await;

    mount_send_ok(
        &telegram_server,
        serde_json::json!({
            "chat_id": 1001,
            "text": "Welcome! Please send your phone number starting with '+'."
        }),
        1,
    )
    .await;

    let (router, _store, _delivery) = memory_router();
    let telegram = test_telegram_client(&telegram_server);

    let receiver = MessageReceiver::new(telegram.clone(), Duration::from_secs(1));
    let mut stream = Box::pin(receiver.stream());
    let message = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .unwrap()
        .unwrap();

    handle(&router, &telegram, &message).await;
}

#[tokio::test]
async fn test_verification_sends_keyboard_e2e() {
    let telegram_server = MockServer::start().await;

    mount_send_ok(
        &telegram_server,
        serde_json::json!({
            "chat_id": 1001,
            "text": "A verification code has been sent to your phone. Please enter the 6-digit code."
        }),
        1,
    )
    .await;

    mount_send_ok(
        &telegram_server,
        serde_json::json!({
            "chat_id": 1001,
            "text": "Verification successful! You can now manage your passwords.",
            "reply_markup": {
                "keyboard": [[{ "text": "Add Password" }, { "text": "Retrieve Password" }]],
                "resize_keyboard": true
            }
        }),
        1,
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .and(body_partial_json(serde_json::json!({
            "text": "Your saved passwords:\nmail.com\n"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": { "message_id": 3 }
        })))
        .expect(1)
        .mount(&telegram_server)
        .await;

    mount_send_ok(
        &telegram_server,
        serde_json::json!({ "chat_id": 1001, "text": "Password added successfully." }),
        1,
    )
    .await;

    let (router, store, delivery) = memory_router();
    let telegram = test_telegram_client(&telegram_server);

    let to_message = |update_id: i64, text: &str| {
        let update = serde_json::from_value(text_update(update_id, 1001, text)).unwrap();
        BotMessage::from_update(&update).unwrap()
    };

    handle(&router, &telegram, &to_message(1, PHONE)).await;

    let code = delivery.last_code().unwrap();
    handle(&router, &telegram, &to_message(2, &code)).await;
    handle(&router, &telegram, &to_message(3, "Add mail.com hunter2")).await;
    handle(&router, &telegram, &to_message(4, "Retrieve Password")).await;

    assert_eq!(store.count().await, 1);
}

#[tokio::test]
async fn test_rejected_token_surfaces_as_telegram_error() {
    let telegram_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bottest-token/getMe"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 401,
            "description": "Unauthorized"
        })))
        .mount(&telegram_server)
        .await;

    let telegram = test_telegram_client(&telegram_server);
    let err: AppError = telegram.get_me().await.unwrap_err().into();

    assert!(matches!(err, AppError::Telegram(_)));
    assert_eq!(err.to_string(), "Telegram error: API error: Unauthorized");
}
