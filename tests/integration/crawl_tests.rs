//! Integration tests for the sweeper
//!
//! These tests use wiremock to serve a storefront and drive the full
//! sweep cycle end-to-end over real HTTP.

use sku_sweep::config::{
    ClientConfig, Config, FilesConfig, LoggingConfig, SessionConfig, SiteConfig,
};
use sku_sweep::crawler::Coordinator;
use sku_sweep::storage::{open_store, RecordStore};
use sku_sweep::SweepError;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/products/part_search/query_parts.asp";

/// Creates a test configuration against the mock storefront
fn create_test_config(base_url: &str, dir: &TempDir) -> Config {
    let file = |name: &str| dir.path().join(name).display().to_string();

    Config {
        site: SiteConfig {
            search_url: format!("{}{}?q={{query}}", base_url, SEARCH_PATH),
            wait_timeout_secs: 1,
            max_candidates: 10,
        },
        client: ClientConfig {
            user_agent: "TestSweeper/1.0".to_string(),
            request_timeout_secs: 1,
            poll_interval_ms: 50,
        },
        files: FilesConfig {
            input_path: file("input.txt"),
            output_path: file("output.txt"),
            error_path: file("error.txt"),
            checkpoint_path: file("identification.txt"),
        },
        session: SessionConfig::default(),
        logging: LoggingConfig::default(),
    }
}

fn input_line(id: &str, sku: &str, mpn: &str) -> String {
    [
        id, sku, "MODEL", "Server Part", "https://ours/p", "https://ours/i.jpg", "0001",
        "Acme", mpn, "Servers", "B0TEST", "149.00", "0", "2 lb", "1x1x1", "",
    ]
    .join("\t")
}

fn write_input(dir: &TempDir, lines: &[String]) -> PathBuf {
    let path = dir.path().join("input.txt");
    let text: String = lines.iter().map(|l| format!("{}\n", l)).collect();
    fs::write(&path, text).expect("Failed to write input");
    path
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

fn card_grid(links: &[&str]) -> ResponseTemplate {
    let tiles: String = links
        .iter()
        .map(|href| {
            format!(
                r#"<article class="card card-product"><div class="card-body">
                <div class="img-wrap"><a href="{}"><img src="t.jpg"></a></div>
                <h6 class="title">Product</h6></div></article>"#,
                href
            )
        })
        .collect();
    html(format!(
        r#"<html><head><title>Search Results</title></head><body>
        <section class="section-content bg padding-y"><div class="row">{}</div></section>
        </body></html>"#,
        tiles
    ))
}

fn product_box(links: &[&str]) -> ResponseTemplate {
    let rows: String = links
        .iter()
        .map(|href| {
            format!(
                r#"<div class="productbox"><div class="imgBox"><a href="{}">view</a></div>
                <div class="productDesc">Product</div></div>"#,
                href
            )
        })
        .collect();
    html(format!(
        r#"<html><head><title>Search Results</title></head><body>
        <section class="section-content bg padding-y">{}</section></body></html>"#,
        rows
    ))
}

fn not_found_page() -> ResponseTemplate {
    html("<html><head><title>Not Found</title></head><body>No results</body></html>".to_string())
}

fn product_page(part: &str, price: &str, details: &str) -> ResponseTemplate {
    html(format!(
        r#"<html><head><title>Product</title></head><body>
        <span class="skumodel">Manufacturer: Acme</span>
        <span class="skumodel">Part Number: {}</span>
        <span class="pricebig protected">{}</span>
        <div class="card-body detail_overviewd">{}</div>
        </body></html>"#,
        part, price, details
    ))
}

async fn mount_search(server: &MockServer, mpn: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", mpn))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, page: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(response)
        .mount(server)
        .await;
}

/// One storefront with three requests: a card grid hit, a product box hit,
/// and a search without results
async fn storefront() -> MockServer {
    let server = MockServer::start().await;

    mount_search(&server, "MPN-1", card_grid(&["/p/101", "/p/102", "/p/103"])).await;
    mount_page(
        &server,
        "/p/101",
        product_page(
            "ABC-007",
            "$1,299.00",
            "<li>Condition: Refurbished<br>Availability: In Stock.</li>",
        ),
    )
    .await;
    mount_page(&server, "/p/102", product_page("XYZ-1", "$5.00", "")).await;
    mount_page(
        &server,
        "/p/103",
        product_page("abc7", "$1,150.50", "<li>Availability: Backorder</li>"),
    )
    .await;

    mount_search(&server, "MPN-2", product_box(&["/p/201"])).await;
    mount_page(
        &server,
        "/p/201",
        product_page(
            "0DEF-9",
            "$89.99",
            "<p>Warranty: 1 year</p><p>Condition: New.</p><p>Availability: Ships Today</p>",
        ),
    )
    .await;

    mount_search(&server, "MPN-3", not_found_page()).await;

    server
}

fn batch() -> Vec<String> {
    vec![
        input_line("T001", "abc-007", "MPN-1"),
        input_line("T002", "DEF9", "MPN-2"),
        input_line("T003", "GHI-3", "MPN-3"),
    ]
}

/// Output rows, header excluded, split into columns
fn output_rows(config: &Config) -> Vec<Vec<String>> {
    fs::read_to_string(&config.files.output_path)
        .unwrap_or_default()
        .lines()
        .skip(1)
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}

fn search_requests(requests: &[wiremock::Request]) -> usize {
    requests
        .iter()
        .filter(|r| r.url.path() == SEARCH_PATH)
        .count()
}

#[tokio::test]
async fn test_full_sweep_both_layouts() {
    let server = storefront().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server.uri(), &dir);
    write_input(&dir, &batch());

    let mut coordinator = Coordinator::new(&config).expect("Invalid config");
    let summary = coordinator.run().await.expect("Sweep failed");

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.found, 2);
    assert_eq!(summary.not_found, 1);
    assert_eq!(summary.failed, 0);

    let header = fs::read_to_string(&config.files.output_path)
        .expect("Output missing")
        .lines()
        .next()
        .expect("Header missing")
        .to_string();
    assert!(header.starts_with("Strike ID\tSKU\tBrand\tMPN\tModel\tUPC\tAsin\tMy Price\tStatus\tPrice 1"));
    assert!(header.ends_with("Availability 10"));

    let rows = output_rows(&config);
    assert_eq!(rows.len(), 3);

    // Card grid: two matching products in display order, the mismatch dropped
    assert_eq!(rows[0][0], "T001");
    assert_eq!(rows[0][8], "FOUND");
    assert_eq!(
        &rows[0][9..],
        &["1299.00", "Refurbished", "In Stock", "1150.50", "na", "Backorder"]
    );

    // Product box with details in paragraphs
    assert_eq!(rows[1][0], "T002");
    assert_eq!(&rows[1][9..], &["89.99", "New", "Ships Today"]);

    // No results page
    assert_eq!(rows[2].len(), 9);
    assert_eq!(rows[2][8], "NOT_FOUND");

    let store = open_store(&config.files, 10);
    assert_eq!(store.last_checkpoint().unwrap().as_deref(), Some("T003"));
    assert!(!dir.path().join("error.txt").exists());
}

#[tokio::test]
async fn test_resume_skips_completed_requests() {
    let server = storefront().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server.uri(), &dir);
    write_input(&dir, &batch());
    fs::write(
        &config.files.checkpoint_path,
        "T001\t2024-01-01T00:00:00+00:00\nT002\t2024-01-01T00:01:00+00:00\n",
    )
    .unwrap();

    let summary = Coordinator::new(&config).expect("Invalid config").run().await.expect("Sweep failed");

    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.processed, 1);

    let rows = output_rows(&config);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "T003");

    let received = server.received_requests().await.expect("Recording disabled");
    assert_eq!(search_requests(&received), 1);
    assert_eq!(received[0].url.query(), Some("q=MPN-3"));
}

#[tokio::test]
async fn test_checkpoint_missing_from_input_processes_nothing() {
    let server = storefront().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server.uri(), &dir);
    write_input(&dir, &batch());
    fs::write(&config.files.checkpoint_path, "X999\t2024-01-01T00:00:00+00:00\n").unwrap();

    let summary = Coordinator::new(&config).expect("Invalid config").run().await.expect("Sweep failed");

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.missing_checkpoint.as_deref(), Some("X999"));
    assert!(output_rows(&config).is_empty());

    let received = server.received_requests().await.expect("Recording disabled");
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_failed_search_is_isolated() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "SLOW",
        not_found_page().set_delay(Duration::from_secs(3)),
    )
    .await;
    mount_search(&server, "FAST", not_found_page()).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server.uri(), &dir);
    let slow = input_line("T001", "S1", "SLOW");
    write_input(&dir, &[slow.clone(), input_line("T002", "F1", "FAST")]);

    let summary = Coordinator::new(&config).expect("Invalid config").run().await.expect("Sweep failed");

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.not_found, 1);

    let errors = fs::read_to_string(&config.files.error_path).expect("Error file missing");
    assert_eq!(errors, format!("{}\n", slow));

    let rows = output_rows(&config);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "T002");

    let checkpoints = fs::read_to_string(&config.files.checkpoint_path).unwrap();
    assert_eq!(checkpoints.lines().count(), 1);
    assert!(checkpoints.starts_with("T002\t"));
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let server = storefront().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server.uri(), &dir);
    write_input(&dir, &batch());

    Coordinator::new(&config).expect("Invalid config").run().await.expect("First sweep failed");
    let after_first = server.received_requests().await.unwrap().len();

    let summary = Coordinator::new(&config).expect("Invalid config").run().await.expect("Second sweep failed");

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.skipped, 3);
    assert_eq!(server.received_requests().await.unwrap().len(), after_first);

    let ids: Vec<String> = output_rows(&config).into_iter().map(|r| r[0].clone()).collect();
    assert_eq!(ids, vec!["T001", "T002", "T003"]);

    let counts = summary.counts.expect("Tally missing");
    assert_eq!((counts.input, counts.output, counts.errors), (3, 3, 0));
}

#[tokio::test]
async fn test_malformed_input_is_fatal() {
    let server = storefront().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server.uri(), &dir);
    write_input(&dir, &[input_line("T001", "abc-007", "MPN-1"), "T002\tshort".to_string()]);

    let result = Coordinator::new(&config).expect("Invalid config").run().await;

    assert!(matches!(result, Err(SweepError::Storage(_))));
    assert!(output_rows(&config).is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}
