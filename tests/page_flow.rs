//! End-to-end page flows against a mocked store.
//!
//! The page is composed the way the CLI composes it: an HTTP store, a
//! Nominatim geocoder and the OpenLayers picker, all pointed at `wiremock`.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use loc_admin::form::{LocationForm, SubmitOutcome};
use loc_admin::geo::nominatim::NominatimBackend;
use loc_admin::map::openlayers::OpenLayersPicker;
use loc_admin::map::MapEvent;
use loc_admin::page::{LocationPage, View};
use loc_admin::store::HttpLocationStore;
use loc_admin::table::DeleteOutcome;
use loc_admin::Coordinates;

const LOCATIONS: &str = "/api/v1/location";

fn page(server: &MockServer) -> LocationPage<HttpLocationStore, NominatimBackend> {
    let geocoder =
        NominatimBackend::with_base_url(&server.uri()).expect("failed to build test geocoder");
    LocationPage::new(
        HttpLocationStore::new(&server.uri()),
        LocationForm::new(geocoder, Box::new(OpenLayersPicker::new())),
    )
}

fn stored(id: &str, nick_name: &str, address: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "NickName": nick_name,
        "Address": address,
        "Latitude": 0.0,
        "Longitude": 0.0,
        "createdAt": "2024-03-25T10:15:00.000Z",
        "updatedAt": "2024-03-25T10:15:00.000Z"
    })
}

#[tokio::test]
async fn add_location_to_empty_store() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LOCATIONS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": [] })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(LOCATIONS))
        .and(body_json(json!({
            "NickName": "Home",
            "Address": "221B Baker Street",
            "Latitude": 0.0,
            "Longitude": 0.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "result": stored("a1", "Home", "221B Baker Street")
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LOCATIONS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [stored("a1", "Home", "221B Baker Street")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = page(&server);
    page.mount().await;

    let view = page.table_view();
    assert!(view.rows.is_empty());
    assert_eq!(view.current_page, 1);

    page.add_new();
    {
        let (form, _) = page.form_mut();
        form.set_nick_name("Home");
        // typed text is pending a search; the result is never applied here
        form.set_address("221B Baker Street");
    }

    let outcome = page.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Saved(Some(ref l)) if l.id == "a1"));
    assert_eq!(page.view(), View::List);
    assert_eq!(page.table_view().ids, vec!["a1"]);
    assert!(page.last_error().is_none());
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LOCATIONS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [stored("a1", "Home", "Rd"), stored("b2", "Office", "St")]
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/a1", LOCATIONS)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LOCATIONS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [stored("b2", "Office", "St")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = page(&server);
    page.mount().await;

    let declined = page.delete("a1", &|_: &str, _: &str| false).await;
    assert_eq!(declined, DeleteOutcome::Cancelled);
    assert_eq!(page.locations().len(), 2);

    let accepted = page.delete("a1", &|_: &str, _: &str| true).await;
    assert_eq!(accepted, DeleteOutcome::Deleted);
    assert_eq!(page.table_view().ids, vec!["b2"]);
}

#[tokio::test]
async fn failed_fetch_reports_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LOCATIONS))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut page = page(&server);
    page.mount().await;

    assert!(!page.is_loading());
    assert!(page.last_error().is_some());
    assert!(page.locations().is_empty());
    assert!(!page.notices().is_empty());
}

#[tokio::test]
async fn edit_with_map_pick_updates_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LOCATIONS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [stored("a1", "Office", "Old Rd")]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("lat", "5"))
        .and(query_param("lon", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lat": "5", "lon": "6", "display_name": "5 Elm St"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/a1", LOCATIONS)))
        .and(body_json(json!({
            "NickName": "Office",
            "Address": "5 Elm St",
            "Latitude": 5.0,
            "Longitude": 6.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = page(&server);
    page.mount().await;
    assert!(page.edit("a1"));
    {
        let (form, notices) = page.form_mut();
        form.pick_and_resolve(MapEvent::Click(Coordinates::new(5.0, 6.0)), notices)
            .await;
        assert_eq!(form.draft().address, "5 Elm St");
    }

    let outcome = page.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert_eq!(page.view(), View::List);
}

#[tokio::test]
async fn malformed_refresh_keeps_previous_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LOCATIONS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [stored("a1", "Home", "Rd"), stored("b2", "Office", "St")]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LOCATIONS))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Internal error" })),
        )
        .mount(&server)
        .await;

    let mut page = page(&server);
    page.mount().await;
    assert_eq!(page.locations().len(), 2);
    page.notices_mut().drain();

    assert!(!page.refresh().await);

    assert_eq!(page.locations().len(), 2);
    assert_eq!(page.table_view().ids, vec!["a1", "b2"]);
    assert!(page.last_error().is_some());
    assert!(!page.notices().is_empty());
}
