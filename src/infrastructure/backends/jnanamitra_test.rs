use anyhow::Result;
use mockito::Matcher;

use super::ChatResponse;
use super::ErrorResponse;
use super::JnanaMitra;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::Message;
use crate::domain::models::Role;

impl JnanaMitra {
    fn with_url(url: String) -> JnanaMitra {
        return JnanaMitra {
            url,
            timeout: "200".to_string(),
        };
    }
}

fn prompt(text: &str) -> BackendPrompt {
    return BackendPrompt::new(
        vec![Message::new(Role::Assistant, "How can I help you today?")],
        text.to_string(),
    );
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/openapi.json")
        .with_status(200)
        .create();

    let backend = JnanaMitra::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/openapi.json")
        .with_status(500)
        .create();

    let backend = JnanaMitra::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks_without_url() {
    let backend = JnanaMitra::with_url("".to_string());
    let err = backend.health_check().await.unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"JnanaMitra chat URL is not defined");
}

#[tokio::test]
async fn it_gets_completions() -> Result<()> {
    let body = serde_json::to_string(&ChatResponse {
        message: "Paris is the capital of France.".to_string(),
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(serde_json::json!({
                "new_message": "Tell me about France",
            })),
            Matcher::Regex(
                r#"\{"role":"assistant","content":"How can I help you today\?","image":"","#
                    .to_string(),
            ),
        ]))
        .with_status(200)
        .with_body(body)
        .create();

    let backend = JnanaMitra::with_url(server.url());
    let res = backend.get_completion(prompt("Tell me about France")).await?;
    mock.assert();

    assert_eq!(res.message, "Paris is the capital of France.");
    return Ok(());
}

#[tokio::test]
async fn it_returns_the_error_detail() -> Result<()> {
    let body = serde_json::to_string(&ErrorResponse {
        detail: "Model is overloaded".to_string(),
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(500)
        .with_body(body)
        .create();

    let backend = JnanaMitra::with_url(server.url());
    let err = backend.get_completion(prompt("Hi")).await.unwrap_err();
    mock.assert();

    insta::assert_snapshot!(err.to_string(), @"Model is overloaded");
    return Ok(());
}

#[tokio::test]
async fn it_returns_the_status_without_detail() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(502)
        .with_body("Bad Gateway")
        .create();

    let backend = JnanaMitra::with_url(server.url());
    let err = backend.get_completion(prompt("Hi")).await.unwrap_err();
    mock.assert();

    insta::assert_snapshot!(err.to_string(), @"Request failed with status code 502");
}
