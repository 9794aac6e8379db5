//! End-to-end job behaviour: bounds, failures and output shape

use crate::support::*;
use college_leads::config::JobConfig;
use college_leads::model::Termination;
use college_leads::{run_job, ConfigError, Coordinator, EnrichmentStatus, JobStatus, LeadError};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_bounds_limit_pages_and_entries() {
    let server = MockServer::start().await;

    serve(&server, "/faculty", listing_page(1..=10, Some("/faculty/page/2"))).await;
    serve(&server, "/faculty/page/2", listing_page(11..=20, Some("/faculty/page/3"))).await;

    // The third page exists but must never be fetched
    Mock::given(method("GET"))
        .and(path("/faculty/page/3"))
        .respond_with(html(listing_page(21..=30, None)))
        .expect(0)
        .mount(&server)
        .await;

    let mut job = job_for(&server, "/faculty");
    job.max_faculty_pages = 2;
    job.max_faculty_per_page = 8;

    let result = run_job(job, settings_for(&server, "")).await.unwrap();

    assert_eq!(result.status, JobStatus::Completed);
    assert_eq!(result.records.len(), 16);
    assert_eq!(result.pages_visited, 2);
    assert_eq!(result.pages_failed, 0);
    assert_eq!(result.termination, Some(Termination::PageLimit));

    let names: Vec<&str> = result.records.iter().map(|r| r.stub.name.as_str()).collect();
    let expected: Vec<String> = (1..=8).chain(11..=18).map(member_name).collect();
    assert_eq!(names, expected);

    assert!(result.records[..8].iter().all(|r| r.stub.page_index == 1));
    assert!(result.records[8..].iter().all(|r| r.stub.page_index == 2));
    assert!(result.records.len() <= result.config.record_capacity());
}

#[tokio::test]
async fn test_first_page_timeout_is_not_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/faculty"))
        .respond_with(html(listing_page(1..=3, None)).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let mut job = job_for(&server, "/faculty");
    job.request_timeout_s = 0.3;

    let result = run_job(job, settings_for(&server, "")).await.unwrap();

    assert_eq!(result.status, JobStatus::Completed);
    assert!(result.records.is_empty());
    assert_eq!(result.pages_visited, 1);
    assert_eq!(result.pages_failed, 1);
    assert_eq!(result.termination, Some(Termination::FetchFailed));
}

#[tokio::test]
async fn test_without_linkedin_no_enrichment_requests() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=4, None)).await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(html(search_results(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let result = run_job(job_for(&server, "/faculty"), settings_for(&server, ""))
        .await
        .unwrap();

    assert_eq!(result.records.len(), 4);
    assert_eq!(result.enrichment_failures, 0);
    assert!(result
        .records
        .iter()
        .all(|r| r.enrichment_status == EnrichmentStatus::NotAttempted && r.linkedin_url.is_none()));
}

#[tokio::test]
async fn test_polite_delay_spaces_requests() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=2, Some("/faculty/page/2"))).await;
    serve(&server, "/faculty/page/2", listing_page(3..=4, Some("/faculty/page/3"))).await;
    serve(&server, "/faculty/page/3", listing_page(5..=6, None)).await;

    let mut job = job_for(&server, "/faculty");
    job.max_faculty_pages = 3;
    job.polite_delay_s = 0.2;

    let start = Instant::now();
    let result = run_job(job, settings_for(&server, "")).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(result.pages_visited, 3);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
    // Three requests need at least two full delays between their starts
    assert!(elapsed >= Duration::from_millis(400), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_repeated_jobs_are_identical() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=5, Some("/faculty/page/2"))).await;
    serve(&server, "/faculty/page/2", listing_page(6..=9, None)).await;

    let coordinator = Coordinator::new(settings_for(&server, "")).unwrap();
    let job = job_for(&server, "/faculty");

    let first = coordinator.run(job.clone()).await.unwrap();
    let second = coordinator.run(job).await.unwrap();

    assert_eq!(first.records, second.records);
    assert_eq!(first.pages_visited, second.pages_visited);
    assert_eq!(first.termination, second.termination);
}

#[tokio::test]
async fn test_invalid_job_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = run_job(JobConfig::new(""), settings_for(&server, ""))
        .await
        .unwrap_err();
    assert!(matches!(err, LeadError::Config(ConfigError::Validation(_))));

    let mut job = job_for(&server, "/faculty");
    job.polite_delay_s = -1.0;
    assert!(run_job(job, settings_for(&server, "")).await.is_err());
}

#[tokio::test]
async fn test_bounds_are_clamped_to_limits() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=3, None)).await;

    let mut job = job_for(&server, "/faculty");
    job.max_faculty_pages = 50;
    job.max_faculty_per_page = 500;
    job.request_timeout_s = 120.0;

    let result = run_job(job, settings_for(&server, "")).await.unwrap();

    assert_eq!(result.config.max_faculty_pages, 5);
    assert_eq!(result.config.max_faculty_per_page, 25);
    assert_eq!(result.config.request_timeout_s, 15.0);
    assert_eq!(result.records.len(), 3);
}

#[tokio::test]
async fn test_result_json_shape() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=1, None)).await;

    let result = run_job(job_for(&server, "/faculty"), settings_for(&server, ""))
        .await
        .unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["status"], "completed");
    assert_eq!(value["termination"], "no_next_page");
    assert_eq!(value["pages_visited"], 1);
    assert_eq!(value["records"][0]["name"], member_name(1));
    assert_eq!(value["records"][0]["email"], member_email(1));
    assert_eq!(value["records"][0]["title"], "Assistant Professor");
    assert_eq!(value["records"][0]["enrichment_status"], "not_attempted");
}
