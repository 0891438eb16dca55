//! HTTP-level tests for the sessions router. Each test drives the router
//! directly through `tower::ServiceExt::oneshot` with in-memory adapters
//! behind the handlers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{NaiveTime, Weekday};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use mindfulcare::adapters::http::{sessions_router, SessionHandlers};
use mindfulcare::adapters::memory::{InMemoryNotifier, InMemorySessionStore};
use mindfulcare::adapters::payment::MockPaymentGateway;
use mindfulcare::adapters::therapist::MockTherapistDirectory;
use mindfulcare::application::handlers::scheduling::{
    AttachNoteHandler, BookSessionHandler, CancelSessionHandler, CompleteSessionHandler,
    ConfirmSessionHandler, GetSessionHandler, ListSessionsHandler, PreviewPriceHandler,
    TherapistLocks,
};
use mindfulcare::domain::foundation::{PaymentId, SessionId, TherapistId};
use mindfulcare::domain::scheduling::AvailabilityWindow;
use mindfulcare::ports::{PaymentError, PaymentRecord, PaymentStatus};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    payments: MockPaymentGateway,
    therapist_id: Uuid,
    patient_id: Uuid,
}

fn test_app() -> TestApp {
    let store = Arc::new(InMemorySessionStore::new());
    let payments = MockPaymentGateway::new();
    let notifier = Arc::new(InMemoryNotifier::new());
    let directory = MockTherapistDirectory::new();

    let therapist = TherapistId::new();
    directory.set_rate(therapist, 80.0);
    // Mondays 09:00-12:00. 2025-03-03 is a Monday.
    directory.set_windows(
        therapist,
        vec![AvailabilityWindow::new(
            Weekday::Mon,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        )
        .unwrap()],
    );
    let directory = Arc::new(directory);

    let handlers = SessionHandlers {
        book: Arc::new(BookSessionHandler::new(
            store.clone(),
            directory.clone(),
            Arc::new(TherapistLocks::new()),
        )),
        confirm: Arc::new(ConfirmSessionHandler::new(
            store.clone(),
            Arc::new(payments.clone()),
            notifier.clone(),
        )),
        cancel: Arc::new(CancelSessionHandler::new(
            store.clone(),
            Arc::new(payments.clone()),
            notifier.clone(),
        )),
        complete: Arc::new(CompleteSessionHandler::new(store.clone(), notifier)),
        attach_note: Arc::new(AttachNoteHandler::new(store.clone())),
        get: Arc::new(GetSessionHandler::new(store.clone())),
        list: Arc::new(ListSessionsHandler::new(store)),
        preview_price: Arc::new(PreviewPriceHandler::new(directory)),
    };

    TestApp {
        router: sessions_router(handlers),
        payments,
        therapist_id: *therapist.as_uuid(),
        patient_id: Uuid::new_v4(),
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router should not fail");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn put_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

fn booking_body(app: &TestApp, start: &str) -> Value {
    json!({
        "therapist_id": app.therapist_id,
        "patient_id": app.patient_id,
        "start": start,
        "duration_minutes": 60,
        "modality": "ONLINE",
    })
}

/// Books a session in the standing Monday window and returns its id.
async fn book(app: &TestApp) -> Uuid {
    let (status, body) = send(
        &app.router,
        post_json("/", &booking_body(app, "2025-03-03T10:00:00Z")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().parse().unwrap()
}

/// Books and confirms a session, returning its id.
async fn book_scheduled(app: &TestApp) -> Uuid {
    let session_id = book(app).await;
    let payment_id = PaymentId::new();
    app.payments.add_payment(PaymentRecord {
        id: payment_id,
        session_id: Some(SessionId::from_uuid(session_id)),
        status: PaymentStatus::Succeeded,
        amount: 80.0,
    });
    let (status, _) = send(
        &app.router,
        post_json(
            &format!("/{}/confirm", session_id),
            &json!({ "payment_id": payment_id.as_uuid() }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    session_id
}

// =============================================================================
// Booking
// =============================================================================

#[tokio::test]
async fn booking_returns_201_with_a_video_link() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        post_json("/", &booking_body(&app, "2025-03-03T10:00:00Z")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "PENDING_PAYMENT");
    assert_eq!(body["modality"], "ONLINE");
    assert_eq!(body["duration_minutes"], 60);
    assert!(body["video_link"]
        .as_str()
        .unwrap()
        .starts_with("https://meet.jit.si/session-"));
}

#[tokio::test]
async fn booking_outside_the_window_is_409() {
    let app = test_app();

    // A Tuesday; the therapist only works Mondays.
    let (status, body) = send(
        &app.router,
        post_json("/", &booking_body(&app, "2025-03-04T10:00:00Z")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SLOT_UNAVAILABLE");
}

#[tokio::test]
async fn double_booking_the_same_slot_is_409() {
    let app = test_app();
    book(&app).await;

    let (status, body) = send(
        &app.router,
        post_json("/", &booking_body(&app, "2025-03-03T10:30:00Z")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "SLOT_UNAVAILABLE");
}

#[tokio::test]
async fn booking_with_a_non_positive_duration_is_400() {
    let app = test_app();
    let mut body = booking_body(&app, "2025-03-03T10:00:00Z");
    body["duration_minutes"] = json!(0);

    let (status, body) = send(&app.router, post_json("/", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

// =============================================================================
// Confirmation
// =============================================================================

#[tokio::test]
async fn confirming_against_a_succeeded_payment_schedules_the_session() {
    let app = test_app();
    let session_id = book(&app).await;

    let payment_id = PaymentId::new();
    app.payments.add_payment(PaymentRecord {
        id: payment_id,
        session_id: Some(SessionId::from_uuid(session_id)),
        status: PaymentStatus::Succeeded,
        amount: 80.0,
    });

    let (status, body) = send(
        &app.router,
        post_json(
            &format!("/{}/confirm", session_id),
            &json!({ "payment_id": payment_id.as_uuid() }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "SCHEDULED");
}

#[tokio::test]
async fn confirming_against_a_pending_payment_is_402() {
    let app = test_app();
    let session_id = book(&app).await;

    let payment_id = PaymentId::new();
    app.payments.add_payment(PaymentRecord {
        id: payment_id,
        session_id: Some(SessionId::from_uuid(session_id)),
        status: PaymentStatus::Pending,
        amount: 80.0,
    });

    let (status, body) = send(
        &app.router,
        post_json(
            &format!("/{}/confirm", session_id),
            &json!({ "payment_id": payment_id.as_uuid() }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["code"], "PAYMENT_NOT_SUCCESSFUL");
}

#[tokio::test]
async fn confirming_with_an_unknown_payment_is_404() {
    let app = test_app();
    let session_id = book(&app).await;

    let (status, body) = send(
        &app.router,
        post_json(
            &format!("/{}/confirm", session_id),
            &json!({ "payment_id": Uuid::new_v4() }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PAYMENT_LINK_MISSING");
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn cancelling_a_scheduled_session_returns_cancelled() {
    let app = test_app();
    let session_id = book_scheduled(&app).await;

    let (status, body) = send(
        &app.router,
        post_json(
            &format!("/{}/cancel", session_id),
            &json!({ "reason": "Travelling" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CANCELLED");
}

#[tokio::test]
async fn cancel_tolerates_an_empty_body() {
    let app = test_app();
    let session_id = book_scheduled(&app).await;

    let (status, _) = send(
        &app.router,
        post_json(&format!("/{}/cancel", session_id), &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn refund_refusal_surfaces_as_502() {
    let app = test_app();
    let session_id = book_scheduled(&app).await;
    app.payments
        .set_method_error("issue_refund", PaymentError::provider("ledger closed"));

    let (status, body) = send(
        &app.router,
        post_json(&format!("/{}/cancel", session_id), &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "REFUND_FAILED");

    // The session itself is already cancelled.
    let (_, body) = send(&app.router, get(&format!("/{}", session_id))).await;
    assert_eq!(body["status"], "CANCELLED");
}

// =============================================================================
// Completion and notes
// =============================================================================

#[tokio::test]
async fn completing_an_elapsed_session_returns_completed() {
    let app = test_app();
    let session_id = book_scheduled(&app).await;

    let (status, body) = send(
        &app.router,
        post_json(&format!("/{}/complete", session_id), &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "COMPLETED");
}

#[tokio::test]
async fn attaching_a_note_returns_it_in_the_body() {
    let app = test_app();
    let session_id = book_scheduled(&app).await;

    let (status, body) = send(
        &app.router,
        put_json(
            &format!("/{}/note", session_id),
            &json!({ "note": "Good progress on sleep hygiene" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["therapist_note"], "Good progress on sleep hygiene");
}

#[tokio::test]
async fn attaching_a_blank_note_is_400() {
    let app = test_app();
    let session_id = book_scheduled(&app).await;

    let (status, body) = send(
        &app.router,
        put_json(&format!("/{}/note", session_id), &json!({ "note": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

// =============================================================================
// Queries
// =============================================================================

#[tokio::test]
async fn fetching_an_unknown_session_is_404() {
    let app = test_app();

    let (status, body) = send(&app.router, get(&format!("/{}", Uuid::new_v4()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn listing_by_therapist_and_patient_returns_the_booking() {
    let app = test_app();
    let session_id = book(&app).await;

    let (status, body) = send(
        &app.router,
        get(&format!("/therapist/{}", app.therapist_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], session_id.to_string());

    let (status, body) =
        send(&app.router, get(&format!("/patient/{}", app.patient_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(&app.router, get(&format!("/therapist/{}", Uuid::new_v4()))).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn preview_price_quotes_from_the_hourly_rate() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        get(&format!(
            "/preview-price?therapist_id={}&duration_minutes=90",
            app.therapist_id
        )),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hourly_rate"], 80.0);
    assert_eq!(body["price"], 120.0);
}

#[tokio::test]
async fn preview_price_for_an_unknown_therapist_is_404() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        get(&format!(
            "/preview-price?therapist_id={}&duration_minutes=60",
            Uuid::new_v4()
        )),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RATE_UNAVAILABLE");
}
