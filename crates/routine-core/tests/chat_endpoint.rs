use httpmock::prelude::*;
use routine_core::catalog::parse_catalog;
use routine_core::{
    CatalogError, CatalogLoader, CatalogSource, ChatClient, ChatError, ChatRole, Conversation,
    SelectionSet,
};
use serde_json::json;

fn reply_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

#[tokio::test]
async fn text_submission_round_trip_appends_user_then_assistant() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat")
                .json_body_partial(r#"{"max_tokens": 200}"#)
                .body_contains("Is retinol safe for sensitive skin?");
            then.status(200).json_body(reply_body("Start slowly, twice a week."));
        })
        .await;

    let client = ChatClient::new(&server.url("/chat"));
    let mut conversation = Conversation::new();
    let before = conversation.messages().len();

    let pending = conversation.submit_text("Is retinol safe for sensitive skin?").unwrap();
    let reply = client.send(&pending.messages).await.unwrap();
    assert!(conversation.complete(pending.ticket, reply));

    mock.assert_async().await;
    let appended: Vec<ChatRole> =
        conversation.messages()[before..].iter().map(|m| m.role).collect();
    assert_eq!(appended, vec![ChatRole::User, ChatRole::Assistant]);
    assert_eq!(
        conversation.messages().last().unwrap().content,
        "Start slowly, twice a week."
    );
}

#[tokio::test]
async fn routine_with_empty_selection_sends_empty_json_array() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat")
                .body_contains("Here it is in JSON form: []");
            then.status(200).json_body(reply_body("Add a few products first!"));
        })
        .await;

    let products = parse_catalog(r#"{"products": []}"#).unwrap();
    let json = SelectionSet::new().products_json(&products).unwrap();

    let client = ChatClient::new(&server.url("/chat"));
    let mut conversation = Conversation::new();
    let pending = conversation.submit_routine(&json).unwrap();
    let reply = client.send(&pending.messages).await.unwrap();

    mock.assert_async().await;
    assert!(conversation.complete(pending.ticket, reply));
}

#[tokio::test]
async fn non_success_status_appends_no_assistant_message() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat");
            then.status(502).body("upstream unavailable");
        })
        .await;

    let client = ChatClient::new(&server.url("/chat"));
    let mut conversation = Conversation::new();
    let pending = conversation.submit_text("hello").unwrap();

    let err = client.send(&pending.messages).await.unwrap_err();
    match err {
        ChatError::Status { status, body } => {
            assert_eq!(status.as_u16(), 502);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(conversation.fail(pending.ticket));

    mock.assert_async().await;
    let last = conversation.messages().last().unwrap();
    assert_eq!(last.role, ChatRole::User);
    assert_eq!(
        conversation
            .messages()
            .iter()
            .filter(|m| m.role == ChatRole::Assistant)
            .count(),
        1
    );
}

#[tokio::test]
async fn reply_without_choices_is_empty_reply() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let client = ChatClient::new(&server.url("/chat"));
    let conversation = Conversation::new();
    let err = client.send(conversation.messages()).await.unwrap_err();
    assert!(matches!(err, ChatError::EmptyReply));
}

#[tokio::test]
async fn malformed_reply_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat");
            then.status(200).body("<html>oops</html>");
        })
        .await;

    let client = ChatClient::new(&server.url("/chat"));
    let err = client.send(Conversation::new().messages()).await.unwrap_err();
    assert!(matches!(err, ChatError::Decode(_)));
}

#[tokio::test]
async fn url_catalog_is_fetched_on_every_load() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/products.json");
            then.status(200).json_body(json!({
                "products": [{
                    "id": 7,
                    "name": "Revitalift Derm Intensives 1.5% Pure Hyaluronic Acid Serum",
                    "brand": "L'Oréal Paris",
                    "category": "moisturizer",
                    "description": "Hydrating serum.",
                    "image": "https://example.com/7.jpg"
                }]
            }));
        })
        .await;

    let loader = CatalogLoader::new(CatalogSource::parse(&server.url("/products.json")));
    assert_eq!(loader.load().await.unwrap()[0].id, 7);
    assert_eq!(loader.load().await.unwrap().len(), 1);
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn url_catalog_error_status_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/products.json");
            then.status(404);
        })
        .await;

    let loader = CatalogLoader::new(CatalogSource::parse(&server.url("/products.json")));
    assert!(matches!(loader.load().await, Err(CatalogError::Status(_))));
}
