//! Shared fixtures for the integration tests

use college_leads::config::{parse_settings, JobConfig, Settings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Faculty member with a deterministic name and address
pub fn member_name(n: usize) -> String {
    format!("Faculty Member {}", n)
}

pub fn member_email(n: usize) -> String {
    format!("member{}@example.edu", n)
}

/// A table listing of the given members, with an optional next-page link
pub fn listing_page(members: impl IntoIterator<Item = usize>, next: Option<&str>) -> String {
    let rows: String = members
        .into_iter()
        .map(|n| {
            format!(
                "<tr><td>{}</td><td>Assistant Professor</td><td><a href=\"mailto:{}\">Email</a></td></tr>\n",
                member_name(n),
                member_email(n)
            )
        })
        .collect();

    let next_link = next
        .map(|href| format!(r#"<a rel="next" href="{}">Next</a>"#, href))
        .unwrap_or_default();

    format!(
        r#"<html><head><title>Faculty</title></head><body>
        <table>
          <tr><th>Name</th><th>Designation</th><th>Contact</th></tr>
          {}
        </table>
        <div class="pagination">{}</div>
        </body></html>"#,
        rows, next_link
    )
}

pub fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body.into())
}

/// Mounts a GET route serving the given body
pub async fn serve(server: &MockServer, route: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Settings pointing the search surface at the mock server
pub fn settings_for(server: &MockServer, extra: &str) -> Settings {
    let toml = format!(
        r#"
[user-agent]
crawler-name = "CollegeLeadsTest"
crawler-version = "1.0"

[search]
endpoint = "{}/html/"

{}
"#,
        server.uri(),
        extra
    );
    parse_settings(&toml).expect("test settings should parse")
}

/// A job crawling the mock server's listing URL directly
pub fn job_for(server: &MockServer, route: &str) -> JobConfig {
    JobConfig::new(format!("{}{}", server.uri(), route))
}

/// Search results page in the HTML search surface's markup
pub fn search_results(links: &[(&str, &str)]) -> String {
    let results: String = links
        .iter()
        .map(|(href, snippet)| {
            format!(
                r#"<div class="result"><h2 class="result__title"><a class="result__a" href="{}">Result</a></h2>
                <a class="result__snippet">{}</a></div>"#,
                href, snippet
            )
        })
        .collect();

    format!(
        r#"<html><body><div class="results">{}</div></body></html>"#,
        results
    )
}
