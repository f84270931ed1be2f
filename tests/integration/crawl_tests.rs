//! Integration tests for the crawler
//!
//! These tests use wiremock to serve listing and detail pages and run the
//! real HTTP fetcher through the full search, rank and save cycle.

use regional_reels::config::{Config, OutputConfig, SearchConfig, SiteConfig, UserAgentConfig};
use regional_reels::crawler::{crawl, QueryPlanner};
use regional_reels::output::{load_catalog, CatalogSink, JsonSink};
use tempfile::TempDir;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server, with no delays
fn create_test_config(base_url: &str, base_queries: &[&str], keywords: &[&str]) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        search: SearchConfig {
            region_code: "np".to_string(),
            title_type: "feature".to_string(),
            base_queries: base_queries.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            per_query_cap: 20,
            primary_sweep: false,
            item_delay_ms: 0,
            query_delay_ms: 0,
        },
        output: OutputConfig {
            catalog_path: "unused.json".to_string(),
            limit: 50,
            top_n: 10,
        },
    }
}

/// One listing card in the search-results layout
fn listing_card(id: &str, title: &str, year: &str, rating: &str, plot: &str) -> String {
    format!(
        r#"<div class="lister-item mode-advanced">
            <div class="lister-item-image">
                <a href="/title/{id}/"><img class="loadlate" loadlate="/posters/{id}.jpg" src="/posters/blank.png"></a>
            </div>
            <div class="lister-item-content">
                <h3 class="lister-item-header">
                    <span class="lister-item-index">1.</span>
                    <a href="/title/{id}/?ref_=adv_li_tt">{title}</a>
                    <span class="lister-item-year text-muted unbold">({year})</span>
                </h3>
                <p class="text-muted">
                    <span class="runtime">102 min</span> | <span class="genre">Drama, Thriller</span>
                </p>
                <div class="ratings-bar">
                    <div class="inline-block ratings-imdb-rating" data-value="{rating}"><strong>{rating}</strong></div>
                </div>
                <p class="text-muted">{plot}</p>
            </div>
        </div>"#,
        id = id,
        title = title,
        year = year,
        rating = rating,
        plot = plot
    )
}

fn listing_page(cards: &[String]) -> String {
    format!(
        "<html><head><title>Advanced search</title></head><body><div class=\"lister-list\">{}</div></body></html>",
        cards.concat()
    )
}

async fn mount_search(server: &MockServer, term: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/search/title/"))
        .and(query_param("title", term))
        .and(query_param("title_type", "feature"))
        .and(query_param("countries", "np"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_requests_carry_parameters_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/title/"))
        .and(query_param("title", "Nepal"))
        .and(query_param("title_type", "feature"))
        .and(query_param("countries", "np"))
        .and(query_param("count", "20"))
        .and(header_exists("accept-language"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[listing_card(
            "tt1000001",
            "Kabaddi",
            "2014",
            "7.9",
            "A village romance.",
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["Nepal"], &[]);
    let planner = QueryPlanner::new(config).expect("Failed to create planner");

    let outcome = planner.run(50).await;

    assert_eq!(outcome.movies.len(), 1);
    let movie = &outcome.movies[0];
    assert_eq!(movie.id, "tt1000001");
    assert_eq!(movie.title.as_deref(), Some("Kabaddi"));
    assert_eq!(movie.year, Some(2014));
    assert_eq!(movie.rating, Some(7.9));
    assert_eq!(movie.runtime_minutes, Some(102));
    assert_eq!(movie.genres, vec!["Drama", "Thriller"]);
    assert_eq!(movie.description.as_deref(), Some("A village romance."));
    assert_eq!(
        movie.poster_url,
        Some(format!("{}/posters/tt1000001.jpg", mock_server.uri()))
    );
    assert_eq!(
        movie.source_url,
        Some(format!("{}/title/tt1000001/", mock_server.uri()))
    );
}

#[tokio::test]
async fn test_failing_query_does_not_abort_crawl() {
    let mock_server = MockServer::start().await;

    mount_search(
        &mock_server,
        "Nepal",
        listing_page(&[listing_card("tt1", "First", "2010", "6.5", "One.")]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/search/title/"))
        .and(query_param("title", "Kathmandu"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    mount_search(
        &mock_server,
        "Pokhara",
        listing_page(&[
            listing_card("tt1", "First again", "2010", "9.9", "Dup."),
            listing_card("tt2", "Second", "2019", "8.1", "Two."),
        ]),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &["Nepal", "Kathmandu"], &["Pokhara"]);
    let planner = QueryPlanner::new(config).expect("Failed to create planner");

    let outcome = planner.run(50).await;

    let ids: Vec<_> = outcome.movies.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["tt2", "tt1"]);
    // First-seen record is kept for duplicates
    assert_eq!(outcome.movies[1].title.as_deref(), Some("First"));
    assert_eq!(outcome.movies[1].rating, Some(6.5));

    assert_eq!(outcome.stats.queries_run, 3);
    assert_eq!(outcome.stats.queries_failed, 1);
    assert_eq!(outcome.stats.duplicates, 1);
}

#[tokio::test]
async fn test_unreachable_server_yields_empty_catalog() {
    // Port 9 (discard) is not listening on the test host
    let config = create_test_config("http://127.0.0.1:9", &["Nepal"], &["Kathmandu"]);
    let planner = QueryPlanner::new(config).expect("Failed to create planner");

    let outcome = planner.run(50).await;

    assert!(outcome.movies.is_empty());
    assert_eq!(outcome.stats.queries_failed, 2);
}

#[tokio::test]
async fn test_fetch_details_from_detail_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/tt2000002/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <h1 data-testid="hero-title-block__title">Pashupati Prasad</h1>
                <a href="/title/tt2000002/releaseinfo?ref_=tt_ov_rdat">2016</a>
                <span data-testid="ratingGroup--imdb-rating"><span>8.3</span><span>/10</span><div>2.1K</div></span>
                <ul><li data-testid="title-techspec_runtime"><span>Runtime</span><div>115 min</div></li></ul>
                <a href="/genre/comedy/?ref_=tt_ov_inf"><span>Comedy</span></a>
                <a href="/genre/drama/?ref_=tt_ov_inf"><span>Drama</span></a>
                <span data-testid="plot-l">A street hustler in Kathmandu.</span>
                <img data-testid="hero-poster-img" src="https://img.example.com/pp.jpg">
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["Nepal"], &[]);
    let planner = QueryPlanner::new(config).expect("Failed to create planner");

    let movie = planner
        .fetch_details("tt2000002")
        .await
        .expect("Detail page should be fetched");

    assert_eq!(movie.id, "tt2000002");
    assert_eq!(movie.title.as_deref(), Some("Pashupati Prasad"));
    assert_eq!(movie.year, Some(2016));
    assert_eq!(movie.rating, Some(8.3));
    assert_eq!(movie.runtime_minutes, Some(115));
    assert_eq!(movie.genres, vec!["Comedy", "Drama"]);
    assert_eq!(
        movie.description.as_deref(),
        Some("A street hustler in Kathmandu.")
    );
    assert_eq!(
        movie.poster_url.as_deref(),
        Some("https://img.example.com/pp.jpg")
    );

    // No mock for this title: wiremock answers 404
    assert!(planner.fetch_details("tt0000000").await.is_none());
}

#[tokio::test]
async fn test_crawl_enrich_and_save_catalog() {
    let mock_server = MockServer::start().await;

    // A card without a plot paragraph and without genres
    let sparse_card = r#"<div class="lister-item">
            <h3 class="lister-item-header"><a href="/title/tt3000003/">Loot</a></h3>
            <div class="ratings-imdb-rating" data-value="8.0"></div>
        </div>"#
        .to_string();

    mount_search(
        &mock_server,
        "Nepal",
        listing_page(&[
            sparse_card,
            listing_card("tt3000004", "Jhola", "2013", "7.4", "सती प्रथा"),
        ]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/title/tt3000003/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <a href="/title/tt3000003/releaseinfo">2012</a>
                <a href="/genre/crime/">Crime</a>
                <span data-testid="plot-xl">A heist in Kathmandu.</span>
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt3000004/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &["Nepal"], &[]);
    let outcome = crawl(config, true).await.expect("Crawl failed");

    assert_eq!(outcome.movies.len(), 2);

    let loot = &outcome.movies[0];
    assert_eq!(loot.id, "tt3000003");
    assert_eq!(loot.rating, Some(8.0));
    assert_eq!(loot.year, Some(2012));
    assert_eq!(loot.genres, vec!["Crime"]);
    assert_eq!(loot.description.as_deref(), Some("A heist in Kathmandu."));

    // Detail fetch failed: listing record passes through unchanged
    let jhola = &outcome.movies[1];
    assert_eq!(jhola.id, "tt3000004");
    assert_eq!(jhola.description.as_deref(), Some("सती प्रथा"));

    let dir = TempDir::new().expect("Failed to create temp dir");
    let catalog_path = dir.path().join("movies.json");
    let sink = JsonSink::new(&catalog_path);
    sink.write_catalog(&outcome.movies)
        .expect("Failed to write catalog");

    let text = std::fs::read_to_string(&catalog_path).expect("Failed to read catalog");
    assert!(text.contains("सती प्रथा"));
    assert!(text.contains("\"poster_url\": null"));

    let loaded = load_catalog(&catalog_path).expect("Failed to load catalog");
    assert_eq!(loaded, outcome.movies);
}

#[tokio::test]
async fn test_primary_sweep_requests_limit_as_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/title/"))
        .and(query_param("title", "Nepal"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[listing_card(
            "tt4000001",
            "Sweep",
            "2001",
            "5.5",
            "Plot.",
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/title/"))
        .and(query_param("title", "Nepal"))
        .and(query_param("count", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), &["Nepal"], &[]);
    config.search.primary_sweep = true;
    let planner = QueryPlanner::new(config).expect("Failed to create planner");

    let outcome = planner.run(5).await;
    assert_eq!(outcome.movies.len(), 1);
    assert_eq!(outcome.stats.queries_run, 2);
}
