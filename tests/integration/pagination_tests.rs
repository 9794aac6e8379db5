//! Pagination termination rules

use crate::support::*;
use college_leads::model::Termination;
use college_leads::run_job;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_failed_second_page_keeps_first_page() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=4, Some("/faculty/page/2"))).await;
    Mock::given(method("GET"))
        .and(path("/faculty/page/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut job = job_for(&server, "/faculty");
    job.max_faculty_pages = 3;

    let result = run_job(job, settings_for(&server, "")).await.unwrap();

    assert_eq!(result.records.len(), 4);
    assert_eq!(result.pages_visited, 2);
    assert_eq!(result.pages_failed, 1);
    assert_eq!(result.termination, Some(Termination::FetchFailed));
}

#[tokio::test]
async fn test_empty_page_ends_pagination() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=3, Some("/faculty/page/2"))).await;
    serve(
        &server,
        "/faculty/page/2",
        "<html><body><p>No more faculty.</p><a rel=\"next\" href=\"/faculty/page/3\">Next</a></body></html>",
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/faculty/page/3"))
        .respond_with(html(listing_page(4..=6, None)))
        .expect(0)
        .mount(&server)
        .await;

    let mut job = job_for(&server, "/faculty");
    job.max_faculty_pages = 5;

    let result = run_job(job, settings_for(&server, "")).await.unwrap();

    assert_eq!(result.records.len(), 3);
    assert_eq!(result.pages_visited, 2);
    assert_eq!(result.pages_failed, 0);
    assert_eq!(result.termination, Some(Termination::ParseEmpty));
}

#[tokio::test]
async fn test_next_link_loop_is_detected() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=2, Some("/faculty/page/2"))).await;
    serve(&server, "/faculty/page/2", listing_page(3..=4, Some("/faculty"))).await;

    let mut job = job_for(&server, "/faculty");
    job.max_faculty_pages = 5;

    let result = run_job(job, settings_for(&server, "")).await.unwrap();

    assert_eq!(result.records.len(), 4);
    assert_eq!(result.pages_visited, 2);
    assert_eq!(result.termination, Some(Termination::Loop));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_single_page_without_next() {
    let server = MockServer::start().await;
    serve(&server, "/faculty", listing_page(1..=3, None)).await;

    let mut job = job_for(&server, "/faculty");
    job.max_faculty_pages = 4;

    let result = run_job(job, settings_for(&server, "")).await.unwrap();

    assert_eq!(result.pages_visited, 1);
    assert_eq!(result.termination, Some(Termination::NoNextPage));
}

#[tokio::test]
async fn test_numbered_pagination_is_followed() {
    let server = MockServer::start().await;
    let pager = |current: usize| {
        let links: String = (1..=3)
            .map(|n| {
                if n == current {
                    format!("<span>{}</span>", n)
                } else {
                    format!(r#"<a href="/staff/{}">{}</a>"#, n, n)
                }
            })
            .collect();
        format!(r#"<ul class="pager">{}</ul>"#, links)
    };
    let page = |members: std::ops::RangeInclusive<usize>, current: usize| {
        listing_page(members, None).replace("</body>", &format!("{}</body>", pager(current)))
    };

    serve(&server, "/staff/1", page(1..=2, 1)).await;
    serve(&server, "/staff/2", page(3..=4, 2)).await;
    serve(&server, "/staff/3", page(5..=6, 3)).await;

    let mut job = job_for(&server, "/staff/1");
    job.max_faculty_pages = 5;

    let result = run_job(job, settings_for(&server, "")).await.unwrap();

    assert_eq!(result.records.len(), 6);
    assert_eq!(result.pages_visited, 3);
    assert_eq!(result.termination, Some(Termination::NoNextPage));
}

#[tokio::test]
async fn test_unnamed_entries_are_counted() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/faculty",
        r#"<html><body>
        <div class="faculty-card"><h3>Asha Rao</h3><a href="mailto:rao@example.edu">Mail</a></div>
        <div class="faculty-card"><a href="mailto:office@example.edu">office@example.edu</a></div>
        </body></html>"#,
    )
    .await;

    let result = run_job(job_for(&server, "/faculty"), settings_for(&server, ""))
        .await
        .unwrap();

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.entries_dropped, 1);
}
