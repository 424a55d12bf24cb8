//! End-to-end tests for the chat loop against a mock endpoint.

use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aura::chat::{ChatConfig, ChatSession, ExitReason, ScriptedSource, TypewriterRenderer};
use aura::{HistoryStore, MISSING_REPLY_FALLBACK, Turn};

fn config(server: &MockServer, history_path: &Path) -> ChatConfig {
    ChatConfig::new()
        .with_api_url(format!("{}/api/deepai/", server.uri()))
        .with_history_path(history_path)
        .with_request_timeout(Duration::from_secs(5))
        .with_typing_delay(Duration::ZERO)
        .with_spinner_interval(Duration::from_millis(5))
        .without_color()
}

fn renderer() -> TypewriterRenderer<Vec<u8>> {
    TypewriterRenderer::with_writer(Vec::new(), false, Duration::ZERO)
}

fn persisted(history_path: &Path) -> Vec<Turn> {
    HistoryStore::new(history_path, 15).load()
}

#[tokio::test]
async fn exit_first_saves_and_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Javob": "unused"})))
        .expect(0)
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let history_path = tmp.path().join("history.json");
    let mut session = ChatSession::new(config(&server, &history_path)).unwrap();
    let mut input = ScriptedSource::new(["/EXIT", "never read"]);
    let mut out = renderer();

    let reason = session
        .run(&mut input, &mut out, &AtomicBool::new(false))
        .await;

    assert_eq!(reason, ExitReason::Command);
    assert_eq!(std::fs::read_to_string(&history_path).unwrap(), "[]");
    assert_eq!(
        String::from_utf8(out.into_inner()).unwrap(),
        "Goodbye!\nSessiya saqlandi\n"
    );
}

#[tokio::test]
async fn conversation_is_rendered_and_persisted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/deepai/"))
        .and(query_param("sh", "User: Salom\nAssistant:"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Javob": "Va  alaykum\nassalom"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/deepai/"))
        .and(query_param(
            "sh",
            "User: Salom\nAssistant: Va  alaykum\nassalom\nUser: Qalaysiz?\nAssistant:",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let history_path = tmp.path().join("history.json");
    let mut session = ChatSession::new(config(&server, &history_path)).unwrap();
    let mut input = ScriptedSource::new(["  Salom  ", "", "Qalaysiz?", "/exit"]);
    let mut out = renderer();

    let reason = session
        .run(&mut input, &mut out, &AtomicBool::new(false))
        .await;
    assert_eq!(reason, ExitReason::Command);

    let expected = vec![
        Turn::user("Salom"),
        Turn::assistant("Va  alaykum\nassalom"),
        Turn::user("Qalaysiz?"),
        Turn::assistant(MISSING_REPLY_FALLBACK),
    ];
    assert_eq!(session.history(), expected.as_slice());
    assert_eq!(persisted(&history_path), expected);

    let output = String::from_utf8(out.into_inner()).unwrap();
    assert!(output.contains("Aura: Va alaykum assalom \n"), "{output}");
    assert!(
        output.contains("Aura: Xato: API javobida 'Javob' maydoni topilmadi. \n"),
        "{output}"
    );
}

#[tokio::test]
async fn failed_request_keeps_user_turn() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let history_path = tmp.path().join("history.json");
    let mut session = ChatSession::new(config(&server, &history_path)).unwrap();
    let mut input = ScriptedSource::new(["are you there?"]);
    let mut out = renderer();

    let reason = session
        .run(&mut input, &mut out, &AtomicBool::new(false))
        .await;

    assert_eq!(reason, ExitReason::EndOfInput);
    assert_eq!(persisted(&history_path), vec![Turn::user("are you there?")]);
    let output = String::from_utf8(out.into_inner()).unwrap();
    assert!(
        output.starts_with("\nXato: So'rov yuborishda xatolik: "),
        "{output}"
    );
    assert!(output.contains("500"), "{output}");
    assert!(output.ends_with("\nSessiyadan chiqilyapti...\nSessiya saqlandi\n"));
}

#[tokio::test]
async fn failed_turn_is_part_of_the_next_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("sh", "User: first\nAssistant:"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("sh", "User: first\nUser: second\nAssistant:"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Javob": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let history_path = tmp.path().join("history.json");
    let mut session = ChatSession::new(config(&server, &history_path)).unwrap();
    let mut input = ScriptedSource::new(["first", "second"]);
    let mut out = renderer();

    session
        .run(&mut input, &mut out, &AtomicBool::new(false))
        .await;

    assert_eq!(
        persisted(&history_path),
        vec![
            Turn::user("first"),
            Turn::user("second"),
            Turn::assistant("ok"),
        ]
    );
}

#[tokio::test]
async fn transcript_stays_bounded_across_turns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Javob": "ack"})))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let history_path = tmp.path().join("history.json");
    let seeded: Vec<Turn> = (0..14).map(|i| Turn::user(format!("old {i}"))).collect();
    HistoryStore::new(&history_path, 15).save(&seeded);

    let mut session = ChatSession::new(config(&server, &history_path)).unwrap();
    let mut input = ScriptedSource::new(["new 1", "new 2"]);
    let mut out = renderer();
    session
        .run(&mut input, &mut out, &AtomicBool::new(false))
        .await;

    let history = persisted(&history_path);
    assert_eq!(history.len(), 15);
    assert_eq!(history.first(), Some(&Turn::user("old 3")));
    assert_eq!(
        &history[11..],
        &[
            Turn::user("new 1"),
            Turn::assistant("ack"),
            Turn::user("new 2"),
            Turn::assistant("ack"),
        ]
    );
}

#[tokio::test]
async fn corrupt_history_starts_fresh() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let history_path = tmp.path().join("history.json");
    std::fs::write(&history_path, "{not json").unwrap();

    let mut session = ChatSession::new(config(&server, &history_path)).unwrap();
    assert!(session.history().is_empty());

    let mut input = ScriptedSource::new(["/exit"]);
    let mut out = renderer();
    session
        .run(&mut input, &mut out, &AtomicBool::new(false))
        .await;
    assert_eq!(std::fs::read_to_string(&history_path).unwrap(), "[]");
}
