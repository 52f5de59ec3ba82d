//! End-to-end tests of the AMSKY01 driver against a local HTTP server.
//!
//! These exercise the full cycle (connect probe, timer polls, URL change,
//! error classification) without a real station; the server body and status
//! are mutable so tests can flip the endpoint between good and bad responses.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use amsky01::{Amsky01Client, Amsky01Station, ApiError, Config, API_URL_FIELD};
use axum::http::StatusCode;
use common::{closed_endpoint, shared_response, spawn_api_server, RecordingSink, Updates};
use skybridge::{Health, StationDriver};

const FULL_DOC: &str = r#"{"hygro":{"temp":12.3,"rh":78.0,"dew_point":8.5},
    "light":{"lux":0.02,"sqm":21.4},
    "cloud":{"center":-18.2}}"#;

fn station_for(endpoint: &str) -> (Amsky01Station, Updates, Arc<Mutex<Vec<String>>>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let sink = RecordingSink::default();
    let updates = sink.updates.clone();
    let statuses = sink.statuses.clone();
    let config = Config {
        endpoint: endpoint.to_string(),
        request_timeout_ms: 1000,
    };
    let station = Amsky01Station::new(config, Box::new(sink)).unwrap();
    (station, updates, statuses)
}

#[tokio::test]
async fn test_connect_publishes_snapshot() {
    let state = shared_response(StatusCode::OK, FULL_DOC);
    let endpoint = spawn_api_server(state).await;
    let (mut station, updates, statuses) = station_for(&endpoint);

    station.connect().await.unwrap();

    assert_eq!(station.report_health(), Health::Ok);
    let updates = updates.lock().unwrap();
    assert!(updates.contains(&("WEATHER_TEMPERATURE".to_string(), 12.3)));
    assert!(updates.contains(&("WEATHER_SKY_TEMP_CENTER".to_string(), -18.2)));
    assert_eq!(updates.len(), 6);
    assert_eq!(
        *statuses.lock().unwrap(),
        vec!["Connecting".to_string(), "Connected - Reading API".to_string()]
    );
}

#[tokio::test]
async fn test_connect_refused_on_http_error() {
    let state = shared_response(StatusCode::NOT_FOUND, "not found");
    let endpoint = spawn_api_server(state).await;
    let (mut station, updates, _) = station_for(&endpoint);

    assert!(station.connect().await.is_err());
    assert_eq!(station.report_health(), Health::Alert);
    assert!(updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_connect_refused_on_transport_error() {
    let endpoint = closed_endpoint().await;
    let (mut station, updates, _) = station_for(&endpoint);

    assert!(station.connect().await.is_err());
    assert!(updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_classifies_http_status() {
    let state = shared_response(StatusCode::NOT_FOUND, "not found");
    let endpoint = spawn_api_server(state).await;
    let client = Amsky01Client::new(Duration::from_secs(1)).unwrap();

    match client.fetch(&endpoint).await {
        Err(ApiError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {:?}", other.map(|_| "body")),
    }
}

#[tokio::test]
async fn test_fetch_classifies_transport_failure() {
    let endpoint = closed_endpoint().await;
    let client = Amsky01Client::new(Duration::from_secs(1)).unwrap();

    match client.fetch(&endpoint).await {
        Err(ApiError::Transport { url, .. }) => assert_eq!(url, endpoint),
        other => panic!("expected transport error, got {:?}", other.map(|_| "body")),
    }
}

#[tokio::test]
async fn test_failed_poll_keeps_stale_data_and_health() {
    let state = shared_response(StatusCode::OK, FULL_DOC);
    let endpoint = spawn_api_server(state.clone()).await;
    let (mut station, updates, _) = station_for(&endpoint);

    station.connect().await.unwrap();
    let published = updates.lock().unwrap().len();

    // Endpoint starts failing; the next ticks must not publish anything new
    // and must not drop the ok health (stale data is fine).
    *state.lock().unwrap() = (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string());
    station.on_timer().await;
    station.on_timer().await;

    assert_eq!(station.report_health(), Health::Ok);
    assert_eq!(updates.lock().unwrap().len(), published);
}

#[tokio::test]
async fn test_malformed_body_aborts_cycle() {
    let state = shared_response(StatusCode::OK, FULL_DOC);
    let endpoint = spawn_api_server(state.clone()).await;
    let (mut station, updates, _) = station_for(&endpoint);

    station.connect().await.unwrap();
    let published = updates.lock().unwrap().len();

    *state.lock().unwrap() = (StatusCode::OK, r#"{"hygro":"#.to_string());
    station.on_timer().await;

    assert_eq!(station.report_health(), Health::Ok);
    assert_eq!(updates.lock().unwrap().len(), published);
}

#[tokio::test]
async fn test_partial_document_merges_into_snapshot() {
    let state = shared_response(StatusCode::OK, r#"{"hygro":{"temp":10.0,"rh":60.0}}"#);
    let endpoint = spawn_api_server(state.clone()).await;
    let (mut station, updates, _) = station_for(&endpoint);

    station.connect().await.unwrap();

    *state.lock().unwrap() = (StatusCode::OK, r#"{"hygro":{"temp":11.0}}"#.to_string());
    station.on_timer().await;

    let updates = updates.lock().unwrap();
    // Second cycle republishes the retained humidity alongside the new temp.
    let last_two: Vec<_> = updates.iter().rev().take(2).cloned().collect();
    assert!(last_two.contains(&("WEATHER_TEMPERATURE".to_string(), 11.0)));
    assert!(last_two.contains(&("WEATHER_HUMIDITY".to_string(), 60.0)));
}

#[tokio::test]
async fn test_url_change_takes_effect_on_next_fetch() {
    let first = shared_response(StatusCode::OK, r#"{"hygro":{"temp":1.0}}"#);
    let second = shared_response(StatusCode::OK, r#"{"hygro":{"temp":2.0}}"#);
    let first_endpoint = spawn_api_server(first).await;
    let second_endpoint = spawn_api_server(second).await;
    let (mut station, updates, _) = station_for(&first_endpoint);

    station.connect().await.unwrap();
    assert!(station.on_config_changed(API_URL_FIELD, &second_endpoint).unwrap());
    station.on_timer().await;

    let updates = updates.lock().unwrap();
    assert_eq!(
        updates.last(),
        Some(&("WEATHER_TEMPERATURE".to_string(), 2.0))
    );
}

#[tokio::test]
async fn test_disconnect_stops_polling() {
    let state = shared_response(StatusCode::OK, FULL_DOC);
    let endpoint = spawn_api_server(state).await;
    let (mut station, updates, statuses) = station_for(&endpoint);

    station.connect().await.unwrap();
    station.disconnect().await.unwrap();
    let published = updates.lock().unwrap().len();

    station.on_timer().await;

    assert_eq!(updates.lock().unwrap().len(), published);
    assert_eq!(statuses.lock().unwrap().last().unwrap(), "Disconnected");
    // Stale snapshot remains valid after disconnect.
    assert_eq!(station.report_health(), Health::Ok);
}
