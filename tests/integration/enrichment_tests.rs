//! Professional-network enrichment within full jobs

use crate::support::*;
use college_leads::config::JobConfig;
use college_leads::{run_job, EnrichmentStatus};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry(server: &MockServer) -> String {
    format!(
        r#"
[[college]]
name = "Example College"
listing-url = "{}/faculty"
"#,
        server.uri()
    )
}

async fn mount_search(server: &MockServer, name: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param(
            "q",
            format!("{} Example College site:linkedin.com", name).as_str(),
        ))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

fn profile_redirect(slug: &str) -> String {
    format!(
        "//duckduckgo.com/l/?uddg=https%3A%2F%2Fin.linkedin.com%2Fin%2F{}&rut=x",
        slug
    )
}

#[tokio::test]
async fn test_one_failed_lookup_is_counted() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=3, None)).await;

    let first = profile_redirect("member-1");
    mount_search(
        &server,
        &member_name(1),
        html(search_results(&[
            (first.as_str(), "Assistant Professor at Example College"),
            ("https://www.linkedin.com/in/member-1-alt", "Another profile"),
        ])),
    )
    .await;
    mount_search(&server, &member_name(2), ResponseTemplate::new(503)).await;
    let third = profile_redirect("member-3");
    mount_search(
        &server,
        &member_name(3),
        html(search_results(&[(third.as_str(), "")])),
    )
    .await;

    let mut job = JobConfig::new("Example College");
    job.include_linkedin = true;

    let result = run_job(job, settings_for(&server, &registry(&server)))
        .await
        .unwrap();

    assert_eq!(result.records.len(), 3);
    assert_eq!(result.enrichment_failures, 1);

    let statuses: Vec<EnrichmentStatus> =
        result.records.iter().map(|r| r.enrichment_status).collect();
    assert_eq!(
        statuses,
        vec![
            EnrichmentStatus::Succeeded,
            EnrichmentStatus::Failed,
            EnrichmentStatus::Succeeded
        ]
    );

    let enriched = &result.records[0];
    assert_eq!(
        enriched.linkedin_url.as_deref(),
        Some("https://in.linkedin.com/in/member-1")
    );
    assert_eq!(enriched.linkedin_candidates.len(), 2);
    assert_eq!(
        enriched.bio.as_deref(),
        Some("Assistant Professor at Example College")
    );

    // A failed lookup keeps the stub untouched
    let failed = &result.records[1];
    assert_eq!(failed.stub.name, member_name(2));
    assert_eq!(failed.stub.email.as_deref(), Some(member_email(2).as_str()));
    assert!(failed.linkedin_url.is_none());

    assert!(result.records[2].bio.is_none());
}

#[tokio::test]
async fn test_no_profile_in_results_marks_failed() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=1, None)).await;
    mount_search(
        &server,
        &member_name(1),
        html(search_results(&[("https://example.edu/people/1", "Faculty page")])),
    )
    .await;

    let mut job = JobConfig::new("Example College");
    job.include_linkedin = true;

    let result = run_job(job, settings_for(&server, &registry(&server)))
        .await
        .unwrap();

    assert_eq!(result.records[0].enrichment_status, EnrichmentStatus::Failed);
    assert_eq!(result.enrichment_failures, 1);
}

#[tokio::test]
async fn test_linkedin_jobs_use_stricter_bounds() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=10, Some("/faculty/page/2"))).await;
    serve(&server, "/faculty/page/2", listing_page(11..=20, Some("/faculty/page/3"))).await;

    // Every lookup returns the same empty results page
    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(html(search_results(&[])))
        .expect(10)
        .mount(&server)
        .await;

    let mut job = JobConfig::new("Example College");
    job.include_linkedin = true;
    job.max_faculty_pages = 5;
    job.max_faculty_per_page = 25;

    let result = run_job(job, settings_for(&server, &registry(&server)))
        .await
        .unwrap();

    assert_eq!(result.config.max_faculty_pages, 2);
    assert_eq!(result.config.max_faculty_per_page, 5);
    assert_eq!(result.records.len(), 10);
    assert_eq!(result.enrichment_failures, 10);
}

#[tokio::test]
async fn test_lookups_share_the_polite_delay_with_listing_fetches() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=2, Some("/faculty/page/2"))).await;
    serve(&server, "/faculty/page/2", listing_page(3..=4, None)).await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(html(search_results(&[])))
        .expect(4)
        .mount(&server)
        .await;

    let mut job = JobConfig::new("Example College");
    job.include_linkedin = true;
    job.polite_delay_s = 0.15;

    let start = Instant::now();
    let result = run_job(job, settings_for(&server, &registry(&server)))
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(result.pages_visited, 2);
    assert_eq!(result.records.len(), 4);
    assert_eq!(server.received_requests().await.unwrap().len(), 6);

    // 2 listing fetches and 4 lookups form one chain of 6 spaced requests.
    // Separate limiters for listing and lookups would only need 4 delays.
    assert!(elapsed >= Duration::from_millis(750), "elapsed {:?}", elapsed);
}
