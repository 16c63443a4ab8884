//! End-to-end tests: mock feed -> catalog client -> support matrix

mod helper;

use mockito::Server;

use helper::{FixedClock, PYTHON_FEED, create_test_client};
use support_matrix::catalog::{CatalogError, EolStatus};
use support_matrix::catalog::fallback::fallback_versions;
use support_matrix::constraint::ConstraintError;
use support_matrix::matrix::{CandidateSource, SupportMatrix, compute_support_matrix};

#[tokio::test]
async fn resolves_matrix_from_live_feed() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/python.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PYTHON_FEED)
        .expect(1)
        .create_async()
        .await;

    let client = create_test_client(
        &format!("{}/api/python.json", server.url()),
        FixedClock::at(2025, 6, 1),
    );

    let matrix = compute_support_matrix(">=3.10,<3.14", &client).await.unwrap();
    assert_eq!(
        matrix,
        SupportMatrix {
            versions: vec!["3.10".into(), "3.11".into(), "3.12".into(), "3.13".into()],
            source: CandidateSource::Feed,
        }
    );

    // Second resolution is served from the cache.
    let matrix = compute_support_matrix("^3.11,!=3.12", &client).await.unwrap();
    assert_eq!(matrix.versions, vec!["3.11", "3.13"]);

    mock.assert_async().await;
}

#[tokio::test]
async fn supported_versions_excludes_pre_minimum_and_eol_lines() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(PYTHON_FEED)
        .create_async()
        .await;

    let client = create_test_client(&server.url(), FixedClock::at(2025, 6, 1));

    assert_eq!(
        client.supported_versions().await.unwrap(),
        vec!["3.13", "3.12", "3.11", "3.10", "3.9"]
    );
}

#[tokio::test]
async fn is_eol_reports_dates_and_flags_from_feed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(PYTHON_FEED)
        .create_async()
        .await;

    let client = create_test_client(&server.url(), FixedClock::at(2025, 6, 1));
    let catalog = client.fetch().await.unwrap();

    assert_eq!(
        client.is_eol("3.8", &catalog),
        EolStatus::EndOfLife {
            since: "2024-10-07".to_string()
        }
    );
    assert_eq!(client.is_eol("3.13", &catalog), EolStatus::Supported);
    assert_eq!(client.is_eol("3.7", &catalog).since(), "true");
    assert_eq!(client.is_eol("2.7", &catalog), EolStatus::Supported);
}

#[tokio::test]
async fn falls_back_to_static_list_when_feed_is_down() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let client = create_test_client(&server.url(), FixedClock::at(2025, 6, 1));

    let matrix = compute_support_matrix(">=3.0", &client).await.unwrap();

    mock.assert_async().await;
    assert_eq!(matrix.versions, fallback_versions());
    assert_eq!(matrix.source, CandidateSource::Fallback);
}

#[tokio::test]
async fn direct_fetch_surfaces_exhaustion() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(r#"[{"cycle": ""}]"#)
        .expect(3)
        .create_async()
        .await;

    let client = create_test_client(&server.url(), FixedClock::at(2025, 6, 1));

    match client.fetch().await {
        Err(CatalogError::FetchExhausted { attempts, source }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(*source, CatalogError::InvalidResponse(_)));
        }
        other => panic!("expected FetchExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn constraint_errors_are_reported_without_contacting_feed() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(PYTHON_FEED)
        .expect(0)
        .create_async()
        .await;

    let client = create_test_client(&server.url(), FixedClock::at(2025, 6, 1));

    assert_eq!(
        compute_support_matrix("   ", &client).await,
        Err(ConstraintError::EmptyConstraint)
    );
    assert_eq!(
        compute_support_matrix(" , ,", &client).await,
        Err(ConstraintError::NoConstraintsFound)
    );
    assert_eq!(
        compute_support_matrix(">=3.10,>>3.11", &client).await,
        Err(ConstraintError::MalformedConstraint {
            segment: ">>3.11".to_string()
        })
    );

    mock.assert_async().await;
}

#[tokio::test]
async fn no_match_carries_original_expression() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(PYTHON_FEED)
        .create_async()
        .await;

    let client = create_test_client(&server.url(), FixedClock::at(2025, 6, 1));

    assert_eq!(
        compute_support_matrix(">=4.0", &client).await,
        Err(ConstraintError::NoMatch {
            constraint: ">=4.0".to_string()
        })
    );
}
