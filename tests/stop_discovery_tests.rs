//! Stop discovery through the Overpass adapter against local stubs.

mod fixtures;

use std::time::{Duration, Instant};

use ride_fare_engine::discovery::{CandidateStop, StopDiscoveryService};
use ride_fare_engine::places::{OverpassClient, PlaceSearchConfig};

use fixtures::{CHENNAI, MADURAI, StubReply, serve};

fn discover(base_url: String) -> Vec<CandidateStop> {
    let client = OverpassClient::new(PlaceSearchConfig {
        base_url,
        timeout_secs: 1,
        ..PlaceSearchConfig::default()
    })
    .expect("build Overpass client");

    StopDiscoveryService::new(client)
        .find_intermediate_stops(CHENNAI.coordinate(), MADURAI.coordinate())
}

#[test]
fn silent_overpass_times_out_to_no_candidates() {
    let started = Instant::now();
    let candidates = discover(serve(StubReply::Silent));

    assert!(candidates.is_empty());
    assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());
}

#[test]
fn overpass_rate_limited_gives_no_candidates() {
    assert!(discover(serve(StubReply::status("429 Too Many Requests"))).is_empty());
}

#[test]
fn overpass_service_unavailable_gives_no_candidates() {
    assert!(discover(serve(StubReply::status("503 Service Unavailable"))).is_empty());
}

#[test]
fn overpass_non_json_body_gives_no_candidates() {
    assert!(discover(serve(StubReply::ok("runtime error: query timed out"))).is_empty());
}

#[test]
fn overpass_places_are_ranked_from_origin() {
    let body = serde_json::json!({
        "elements": [
            { "type": "node", "id": 3, "lat": 10.7905, "lon": 78.7047,
              "tags": { "name": "Tiruchirappalli", "place": "city" } },
            { "type": "node", "id": 1, "lat": 12.6819, "lon": 79.9888,
              "tags": { "name": "Chengalpattu", "place": "town" } },
            { "type": "node", "id": 2, "lat": 11.9401, "lon": 79.4861,
              "tags": { "name": "Villupuram", "place": "town" } },
            { "type": "node", "id": 4, "lat": 11.5, "lon": 79.0,
              "tags": { "place": "village" } }
        ]
    })
    .to_string();

    let candidates = discover(serve(StubReply::ok(body)));

    let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Chengalpattu", "Villupuram", "Tiruchirappalli"]);
    assert!(candidates.windows(2).all(|w| w[0].distance_from_origin <= w[1].distance_from_origin));
}
