//! Target resolution: registry, direct URLs and website discovery

use crate::support::*;
use college_leads::config::JobConfig;
use college_leads::model::EntrySource;
use college_leads::{run_job, JobStatus};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer};

#[tokio::test]
async fn test_unknown_college_is_unresolved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "Nonexistent College XYZ official website"))
        .respond_with(html(search_results(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let result = run_job(
        JobConfig::new("Nonexistent College XYZ"),
        settings_for(&server, ""),
    )
    .await
    .unwrap();

    assert_eq!(result.status, JobStatus::TargetUnresolved);
    assert!(result.is_unresolved());
    assert!(result.records.is_empty());
    assert_eq!(result.pages_visited, 0);
    assert!(result.termination.is_none());
    assert!(result.college_website.is_none());

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["status"], "target_unresolved");
}

#[tokio::test]
async fn test_discovery_finds_listing_through_homepage() {
    let server = MockServer::start().await;
    let home = format!("{}/home", server.uri());

    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "Example College official website"))
        .respond_with(html(search_results(&[(home.as_str(), "Example College home")])))
        .mount(&server)
        .await;

    serve(
        &server,
        "/home",
        r#"<html><body>
        <nav><a href="/admissions">Admissions</a> <a href="/our-faculty">Faculty</a></nav>
        <footer>Write to info@example.edu or call +91 9876543210</footer>
        </body></html>"#,
    )
    .await;
    serve(&server, "/our-faculty", listing_page(1..=3, None)).await;

    let result = run_job(JobConfig::new("Example College"), settings_for(&server, ""))
        .await
        .unwrap();

    assert_eq!(result.status, JobStatus::Completed);
    assert_eq!(result.college_website.as_deref(), Some(home.as_str()));
    assert_eq!(
        result.start_url,
        Some(format!("{}/our-faculty", server.uri()))
    );
    assert_eq!(result.college_contacts.emails, vec!["info@example.edu"]);
    assert!(result
        .college_contacts
        .phones
        .contains(&"+91 9876543210".to_string()));
    assert_eq!(result.records.len(), 3);
    assert_eq!(result.pages_visited, 1);
}

#[tokio::test]
async fn test_homepage_without_listing_link_is_unresolved() {
    let server = MockServer::start().await;
    let home = format!("{}/home", server.uri());

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(html(search_results(&[(home.as_str(), "")])))
        .mount(&server)
        .await;
    serve(
        &server,
        "/home",
        r#"<html><body><a href="/about">About</a> contact: admin@example.edu</body></html>"#,
    )
    .await;

    let result = run_job(JobConfig::new("Example College"), settings_for(&server, ""))
        .await
        .unwrap();

    assert_eq!(result.status, JobStatus::TargetUnresolved);
    assert_eq!(result.college_website.as_deref(), Some(home.as_str()));
    assert_eq!(result.college_contacts.emails, vec!["admin@example.edu"]);
    assert_eq!(result.pages_visited, 0);
}

#[tokio::test]
async fn test_registry_entry_with_selectors() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/people",
        r#"<html><body>
        <section class="bio"><span class="who">Kiran Das</span><em>Lecturer</em>
            <span class="addr">kiran@example.edu</span></section>
        <section class="bio"><span class="who">Leela Menon</span><em>Reader</em>
            <span class="addr">leela@example.edu</span></section>
        </body></html>"#,
    )
    .await;

    let extra = format!(
        r#"
[[college]]
name = "Example Institute of Technology"
aliases = ["EIT"]
listing-url = "{}/people"
strategy = "selectors"

[college.selectors]
entry = "section.bio"
name = ".who"
title = "em"
email = ".addr"
"#,
        server.uri()
    );

    let result = run_job(JobConfig::new("  eit "), settings_for(&server, &extra))
        .await
        .unwrap();

    assert_eq!(result.status, JobStatus::Completed);
    assert_eq!(result.college_name, "  eit ");
    assert_eq!(result.records.len(), 2);

    let first = &result.records[0].stub;
    assert_eq!(first.name, "Kiran Das");
    assert_eq!(first.title.as_deref(), Some("Lecturer"));
    assert_eq!(first.email.as_deref(), Some("kiran@example.edu"));
    assert_eq!(first.source, EntrySource::Rule);
}

#[tokio::test]
async fn test_site_rule_applies_to_listing_domain() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/faculty",
        r#"<html><body>
        <div class="faculty"><h3>Block Person</h3><a href="mailto:block@example.edu">m</a></div>
        <table><tr><td>Row Person</td><td>row@example.edu</td></tr></table>
        </body></html>"#,
    )
    .await;

    let extra = r#"
[[site]]
domain = "127.0.0.1"
strategy = "table"
"#;

    let result = run_job(job_for(&server, "/faculty"), settings_for(&server, extra))
        .await
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].stub.name, "Row Person");
}

#[tokio::test]
async fn test_discovery_disabled() {
    let server = MockServer::start().await;
    let mut settings = settings_for(&server, "");
    settings.search.discover_websites = false;

    let result = run_job(JobConfig::new("Example College"), settings)
        .await
        .unwrap();

    assert_eq!(result.status, JobStatus::TargetUnresolved);
    assert!(server.received_requests().await.unwrap().is_empty());
}
