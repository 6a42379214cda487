use newsping::models::{Config, Target, TargetOutcome};
use newsping::pipeline::{RunOptions, run_once};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"
    <html><body>
      <a class="js-teaser-heading-link" href="/content/first">First headline</a>
      <a class="js-teaser-heading-link" href="/content/second">Second headline</a>
    </body></html>
"#;

fn config(server: &MockServer, ledger_dir: &TempDir, pages: &[&str]) -> Config {
    let mut config = Config::default();
    config.ledger_path = ledger_dir.path().join("sent_links.txt");
    config.pacing_ms = 0;
    config.fetch.timeout_secs = 5;
    config.telegram.token = "123:abc".to_string();
    config.telegram.chat_id = "42".to_string();
    config.telegram.api_base = server.uri();
    config.targets = pages
        .iter()
        .map(|p| Target::new(&format!("{}{}", server.uri(), p), "a.js-teaser-heading-link").unwrap())
        .collect();
    config
}

async fn mount_telegram_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn pass_sends_first_unseen_article_and_persists_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lex"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LISTING, "text/html"))
        .mount(&server)
        .await;
    let expected_text = format!("📰 First headline\n🔗 {}/content/first", server.uri());
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(json!({ "chat_id": "42", "text": expected_text })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir, &["/lex"]);

    let report = run_once(&config, &RunOptions::default()).await.unwrap();
    assert_eq!(report.notified_count(), 1);

    let ledger = std::fs::read_to_string(&config.ledger_path).unwrap();
    assert_eq!(ledger, format!("{}/content/first\n", server.uri()));
}

#[tokio::test]
async fn consecutive_passes_walk_down_the_page_then_go_quiet() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lex"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LISTING, "text/html"))
        .mount(&server)
        .await;
    mount_telegram_ok(&server).await;

    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir, &["/lex"]);
    let options = RunOptions::default();

    let first = run_once(&config, &options).await.unwrap();
    let second = run_once(&config, &options).await.unwrap();
    let third = run_once(&config, &options).await.unwrap();

    assert_eq!(first.notified_count(), 1);
    assert_eq!(second.notified_count(), 1);
    assert_eq!(third.notified_count(), 0);
    assert_eq!(third.targets[0].outcome, TargetOutcome::NothingNew);
}

#[tokio::test]
async fn failing_target_is_alerted_and_next_target_still_runs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lex"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LISTING, "text/html"))
        .mount(&server)
        .await;
    mount_telegram_ok(&server).await;

    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir, &["/broken", "/lex"]);

    let report = run_once(&config, &RunOptions::default()).await.unwrap();

    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.notified_count(), 1);

    // One alert for the broken page, one article for the working one
    let posts = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "POST")
        .count();
    assert_eq!(posts, 2);
}

#[tokio::test]
async fn dry_run_sends_and_records_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lex"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LISTING, "text/html"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir, &["/lex"]);
    let options = RunOptions {
        dry_run: true,
        ..RunOptions::default()
    };

    let report = run_once(&config, &options).await.unwrap();

    assert_eq!(report.notified_count(), 1);
    assert!(!config.ledger_path.exists());
}

#[tokio::test]
async fn long_title_is_shortened_but_link_is_delivered() {
    let server = MockServer::start().await;
    let listing = format!(
        r#"<a class="js-teaser-heading-link" href="/article-1">{}</a>"#,
        "x".repeat(5000)
    );
    Mock::given(method("GET"))
        .and(path("/lex"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(listing, "text/html"))
        .mount(&server)
        .await;
    mount_telegram_ok(&server).await;

    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir, &["/lex"]);

    let report = run_once(&config, &RunOptions::default()).await.unwrap();
    assert_eq!(report.notified_count(), 1);

    let sent: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "POST")
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["text"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(sent.len(), 1);

    let link = format!("{}/article-1", server.uri());
    assert!(sent[0].ends_with(&format!("🔗 {link}")));
    assert!(sent[0].encode_utf16().count() <= 4096);
}

#[tokio::test]
async fn unreadable_ledger_stops_the_pass() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let mut config = config(&server, &dir, &["/lex"]);
    // A directory where the ledger file should be
    config.ledger_path = dir.path().to_path_buf();

    assert!(run_once(&config, &RunOptions::default()).await.is_err());
}
