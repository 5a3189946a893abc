//! Author harvesting against a mock server.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use maka::client::AcademicClient;
use maka::config::Config;
use maka::harvest::{AuthorHarvester, AuthorReport, HarvestOptions, read_author_list};

fn harvester(mock_server: &MockServer, options: HarvestOptions) -> AuthorHarvester {
    let client = AcademicClient::new(Config::for_testing(&mock_server.uri())).unwrap();
    AuthorHarvester::new(Arc::new(client), options)
}

fn single_interpretation(value: &str) -> serde_json::Value {
    json!({
        "query": "papers by someone",
        "interpretations": [{
            "logprob": -10.0,
            "parse": "<rule name=\"#GetPapers\">...</rule>",
            "rules": [{"name": "#GetPapers", "output": {"type": "query", "value": value}}]
        }]
    })
}

fn papers(ids: &[u64]) -> serde_json::Value {
    let entities: Vec<_> = ids
        .iter()
        .map(|id| json!({"Id": id, "Ti": format!("paper {id}"), "Y": 2000, "CC": 1}))
        .collect();
    json!({"expr": "x", "entities": entities})
}

async fn mount_citations(mock_server: &MockServer, paper_id: u64, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains(format!("expr=RId%3D{paper_id}&")))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_harvest_collects_papers_and_citations() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/interpret"))
        .and(body_string_contains("query=papers+by+albert+einstein"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("fixtures/interpret.json"))
                .insert_header("content-type", "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Both interpretations are OR-ed together
    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains("expr=OR%28Composite%28AA.AuN%3D%3D%27albert+einstein%27%29"))
        .and(body_string_contains("attributes=*"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("fixtures/evaluate_papers.json"))
                .insert_header("content-type", "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_citations(
        &mock_server,
        2_086_880_498,
        ResponseTemplate::new(200).set_body_json(papers(&[11, 12, 11])),
    )
    .await;
    mount_citations(
        &mock_server,
        1_966_380_411,
        ResponseTemplate::new(200).set_body_json(papers(&[21])),
    )
    .await;

    let harvester = harvester(&mock_server, HarvestOptions::default());
    let report = harvester.run("albert einstein").await.unwrap();

    assert_eq!(report.author, "albert einstein");
    assert_eq!(report.aliases, vec!["albert einstein", "a einstein"]);
    assert_eq!(report.articles.len(), 2);

    // Citations attach to their own paper whatever order they finish in
    let first = &report.articles[0];
    assert_eq!(first.id, 2_086_880_498);
    assert_eq!(first.cites.iter().map(|p| p.id).collect::<Vec<_>>(), vec![11, 12]);

    let second = &report.articles[1];
    assert_eq!(second.id, 1_966_380_411);
    assert_eq!(second.cites.iter().map(|p| p.id).collect::<Vec<_>>(), vec![21]);

    assert_eq!(report.total_citing(), 3);
}

#[tokio::test]
async fn test_failed_citation_fetch_leaves_cites_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/interpret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(single_interpretation("Composite(AA.AuN=='jane doe')")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains("expr=Composite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(&[1, 2])))
        .mount(&mock_server)
        .await;

    mount_citations(&mock_server, 1, ResponseTemplate::new(500).set_body_string("boom")).await;
    mount_citations(&mock_server, 2, ResponseTemplate::new(200).set_body_json(papers(&[3])))
        .await;

    let options = HarvestOptions { workers: 4, ..HarvestOptions::default() };
    let report = harvester(&mock_server, options).run("jane doe").await.unwrap();

    assert_eq!(report.aliases, vec!["jane doe"]);
    assert_eq!(report.articles.len(), 2);
    assert!(report.articles[0].cites.is_empty());
    assert_eq!(report.articles[1].cites.len(), 1);
}

#[tokio::test]
async fn test_pages_until_short_page_and_dedupes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/interpret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(single_interpretation("Composite(AA.AuN=='jane doe')")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains("expr=Composite"))
        .and(body_string_contains("count=2&offset=0&"))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(&[1, 2])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains("expr=Composite"))
        .and(body_string_contains("count=2&offset=2&"))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(&[2, 3])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains("expr=Composite"))
        .and(body_string_contains("count=2&offset=4&"))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(&[4])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains("expr=RId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(&[])))
        .mount(&mock_server)
        .await;

    let options = HarvestOptions { page_size: 2, ..HarvestOptions::default() };
    let report = harvester(&mock_server, options).run("jane doe").await.unwrap();

    let ids: Vec<u64> = report.articles.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_max_pages_stops_paging() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/interpret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(single_interpretation("Composite(AA.AuN=='jane doe')")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains("expr=Composite"))
        .and(body_string_contains("count=2&offset=0&"))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(&[1, 2])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains("expr=Composite"))
        .and(body_string_contains("offset=2&"))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(&[3])))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains("expr=RId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(&[])))
        .mount(&mock_server)
        .await;

    let options = HarvestOptions { page_size: 2, max_pages: Some(1), ..HarvestOptions::default() };
    let report = harvester(&mock_server, options).run("jane doe").await.unwrap();

    assert_eq!(report.articles.len(), 2);
}

#[tokio::test]
async fn test_no_interpretation_gives_empty_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/interpret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"query": "papers by nobody", "interpretations": []})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(&[1])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let report =
        harvester(&mock_server, HarvestOptions::default()).run("nobody").await.unwrap();

    assert_eq!(report, AuthorReport::empty("nobody"));
}

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("maka-{name}-{}", std::process::id()))
}

#[tokio::test]
async fn test_batch_continues_after_failed_author() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/interpret"))
        .and(body_string_contains("query=papers+by+bad"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/interpret"))
        .and(body_string_contains("query=papers+by+good"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"query": "papers by good", "interpretations": []})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = scratch_dir("batch");
    std::fs::create_dir_all(&dir).unwrap();

    let harvester = harvester(&mock_server, HarvestOptions::default());
    let mut seen = Vec::new();
    let summary = harvester
        .run_batch(&["bad".to_string(), "good".to_string()], &dir, |report, _| {
            seen.push(report.author.clone());
        })
        .await;

    assert!(!summary.is_success());
    assert_eq!(summary.failed, vec!["bad"]);
    assert_eq!(summary.written, vec![dir.join("good.json")]);
    assert_eq!(seen, vec!["good"]);
    assert!(dir.join("good.json").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_batch_write_failure_does_not_stop_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/interpret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"query": "papers by x", "interpretations": []})),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let missing = scratch_dir("missing").join("nested");

    let harvester = harvester(&mock_server, HarvestOptions::default());
    let summary = harvester
        .run_batch(&["a".to_string(), "b".to_string()], &missing, |_, _| {
            panic!("nothing should be written");
        })
        .await;

    assert!(summary.written.is_empty());
    assert_eq!(summary.failed, vec!["a", "b"]);
}

async fn mount_author_with_papers(mock_server: &MockServer, ids: &[u64], citation_delay: Duration) {
    Mock::given(method("POST"))
        .and(path("/interpret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(single_interpretation("Composite(AA.AuN=='jane doe')")),
        )
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains("expr=Composite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(ids)))
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/evaluate"))
        .and(body_string_contains("expr=RId"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(papers(&[])).set_delay(citation_delay),
        )
        .expect(ids.len() as u64)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_citation_fetches_respect_worker_limit() {
    let mock_server = MockServer::start().await;
    mount_author_with_papers(&mock_server, &[1, 2, 3, 4, 5, 6, 7, 8], Duration::from_millis(200))
        .await;

    // 8 fetches, 2 at a time, 200ms each: at least 4 rounds
    let options = HarvestOptions { workers: 2, ..HarvestOptions::default() };
    let started = Instant::now();
    let report = harvester(&mock_server, options).run("jane doe").await.unwrap();

    assert_eq!(report.articles.len(), 8);
    assert!(started.elapsed() >= Duration::from_millis(750), "took {:?}", started.elapsed());
}

#[tokio::test]
async fn test_citation_fetches_run_concurrently() {
    let mock_server = MockServer::start().await;
    mount_author_with_papers(&mock_server, &[1, 2, 3, 4, 5, 6, 7, 8], Duration::from_millis(200))
        .await;

    // One at a time would take 1.6s
    let options = HarvestOptions { workers: 8, ..HarvestOptions::default() };
    let started = Instant::now();
    let report = harvester(&mock_server, options).run("jane doe").await.unwrap();

    assert_eq!(report.articles.len(), 8);
    assert!(started.elapsed() < Duration::from_millis(1200), "took {:?}", started.elapsed());
}

#[test]
fn test_report_written_and_read_back() {
    let dir = scratch_dir("report");
    std::fs::create_dir_all(&dir).unwrap();

    let report = AuthorReport {
        author: "jane doe".to_string(),
        aliases: vec!["jane doe".to_string()],
        articles: serde_json::from_value::<Vec<_>>(papers(&[5, 6])["entities"].clone()).unwrap(),
    };

    let path = report.write_to(&dir).unwrap();
    assert_eq!(path.file_name().unwrap(), "janedoe.json");

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"title\": \"paper 5\""));
    let loaded: AuthorReport = serde_json::from_str(&written).unwrap();
    assert_eq!(loaded, report);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_read_author_list() {
    let dir = scratch_dir("authors");
    std::fs::create_dir_all(&dir).unwrap();

    let file = dir.join("authors.txt");
    std::fs::write(&file, "albert einstein\n\n  marie curie  \n").unwrap();

    let authors = read_author_list(&file).unwrap();
    assert_eq!(authors, vec!["albert einstein", "marie curie"]);

    assert!(read_author_list(&dir.join("missing.txt")).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
