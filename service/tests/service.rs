use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate};
use reservation::ReservationManager;
use reservation_service::{router, ErrorBody, RsvpService};
use serde_json::{json, Value};
use tower::ServiceExt;

fn day(offset: i64) -> NaiveDate {
    abi::today() + Duration::days(offset)
}

fn test_app() -> Router {
    router(RsvpService::new(ReservationManager::in_memory()))
}

fn payload(room: &str, start: i64, end: i64, guest: Option<i64>) -> Value {
    json!({
        "roomNumber": room,
        "startDate": day(start),
        "endDate": day(end),
        "guestId": guest,
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn error_body(value: Value) -> ErrorBody {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn reservation_crud_should_work() {
    let app = test_app();

    // make a reservation
    let (status, created) = send(
        &app,
        "POST",
        "/reservations",
        Some(payload("101", 2, 4, Some(1))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["roomNumber"], "101");
    assert_eq!(created["startDate"], json!(day(2)));
    assert_eq!(created["endDate"], json!(day(4)));
    assert_eq!(created["guestId"], 1);

    // read it back, twice
    let uri = format!("/reservations/{}", id);
    let (status, first) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = send(&app, "GET", &uri, None).await;
    assert_eq!(first, second);
    assert_eq!(first, created);

    // list
    let (status, all) = send(&app, "GET", "/reservations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([created]));

    // update to new dates
    let (status, updated) = send(&app, "PUT", &uri, Some(payload("101", 5, 8, Some(2)))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["startDate"], json!(day(5)));
    assert_eq!(updated["guestId"], 2);

    // delete, then it is gone
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body = error_body(body);
    assert_eq!(body.status, 404);
    assert_eq!(body.error, "Not Found - Resource Not Found");
    assert_eq!(body.message, format!("Reservation with id {} not found.", id));
    assert_eq!(body.path, uri);
}

#[tokio::test]
async fn empty_list_should_be_an_empty_array() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/reservations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn rule_violations_should_be_bad_requests() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(payload("101", 4, 4, Some(1))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = error_body(body);
    assert_eq!(body.status, 400);
    assert_eq!(body.error, "Bad Request - Validation Error");
    assert_eq!(
        body.message,
        "The end date of the reservation must be after the start date."
    );
    assert_eq!(body.path, "/reservations");

    let (status, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(payload("101", -1, 2, Some(1))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_body(body).message,
        "Reservations cannot be made for past dates."
    );

    for guest in [None, Some(0), Some(-5)] {
        let (status, body) = send(
            &app,
            "POST",
            "/reservations",
            Some(payload("101", 1, 2, guest)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error_body(body).message,
            "The guest id is required and must be valid."
        );
    }
}

#[tokio::test]
async fn overlapping_reservation_should_be_rejected() {
    let app = test_app();
    let (status, _) = send(
        &app,
        "POST",
        "/reservations",
        Some(payload("101", 2, 4, Some(1))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(payload("101", 1, 3, Some(2))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_body(body).message,
        format!(
            "Room 101 is already booked in the period from {} to {}.",
            day(1),
            day(3)
        )
    );

    // back-to-back and another room are fine
    let (status, _) = send(
        &app,
        "POST",
        "/reservations",
        Some(payload("101", 4, 6, Some(2))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(
        &app,
        "POST",
        "/reservations",
        Some(payload("202", 2, 4, Some(3))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn update_should_ignore_itself_but_not_others() {
    let app = test_app();
    let (_, r1) = send(
        &app,
        "POST",
        "/reservations",
        Some(payload("101", 2, 4, Some(1))),
    )
    .await;
    send(
        &app,
        "POST",
        "/reservations",
        Some(payload("101", 6, 8, Some(2))),
    )
    .await;
    let uri = format!("/reservations/{}", r1["id"]);

    let (status, _) = send(&app, "PUT", &uri, Some(payload("101", 2, 4, Some(1)))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "PUT", &uri, Some(payload("101", 3, 7, Some(1)))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = error_body(body);
    assert_eq!(body.path, uri);
    assert_eq!(
        body.message,
        "Room 101 is already booked by another reservation in the new period."
    );
}

#[tokio::test]
async fn unknown_id_should_be_not_found() {
    let app = test_app();
    let uri = "/reservations/4242";

    let (status, _) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "PUT", uri, Some(payload("101", 2, 4, Some(1)))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // even with a payload that would be rejected
    let (status, body) = send(&app, "PUT", uri, Some(json!({"roomNumber": "101"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_body(body).message, "Reservation with id 4242 not found.");
}

#[tokio::test]
async fn malformed_requests_should_be_bad_requests() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/reservations/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = error_body(body);
    assert!(body.message.starts_with("Invalid reservation id"));
    assert_eq!(body.path, "/reservations/abc");

    let req = Request::builder()
        .method("POST")
        .uri("/reservations")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(json!({"roomNumber": "101", "guestId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_body(body).message,
        "Start date and end date are required."
    );
}

#[tokio::test]
async fn client_supplied_id_should_be_ignored_on_create() {
    let app = test_app();
    let mut body = payload("101", 2, 4, Some(1));
    body["id"] = json!(999);

    let (status, created) = send(&app, "POST", "/reservations", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn health_should_report_ok() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
