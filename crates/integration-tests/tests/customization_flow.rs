//! End-to-end tests for the storefront personalization editor and preview.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use acaclick_admin::config::AdminConfig;
use acaclick_admin::drafts::{
    CustomizationController, LOAD_FAILED_MESSAGE, SAVE_FAILED_MESSAGE, SAVED_MESSAGE,
};
use acaclick_admin::media::MediaIngestor;
use acaclick_admin::routes::routes;
use acaclick_admin::state::AppState;
use acaclick_admin::ui::{FixedAnswer, MemoryNotifier, Severity};
use acaclick_core::{CustomizationDraft, CustomizationField, HexColor, NegocioId};
use acaclick_integration_tests::{StubBackend, StubResponse, negocio_record};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

const GET_PATH: &str = "/api/negocios/5/";
const SAVE_PATH: &str = "/api/negocios/5/personalizar/";

async fn open(backend: &StubBackend) -> (CustomizationController, MemoryNotifier) {
    let notifier = MemoryNotifier::new();
    let controller = CustomizationController::open(
        backend.client(),
        Arc::new(notifier.clone()),
        MediaIngestor::default(),
        Some(NegocioId::new(5)),
    )
    .await;
    (controller, notifier)
}

#[tokio::test]
async fn test_persisted_values_win_and_defaults_fill_the_rest() {
    let backend = StubBackend::start().await;
    backend.respond(
        "GET",
        GET_PATH,
        StubResponse::json(
            200,
            &negocio_record(5, "Abarrotes Juárez", &json!({"storeName": "Acme"})),
        ),
    );

    let (controller, notifier) = open(&backend).await;
    let draft = controller.draft();
    let defaults = CustomizationDraft::default();

    assert!(!controller.load_failed());
    assert_eq!(draft.store_name, "Acme");
    assert_eq!(draft.hero_title, defaults.hero_title);
    assert_eq!(draft.primary_color, defaults.primary_color);
    assert_eq!(draft.map_address, "Calle 5 de Mayo 10, CDMX");
    assert!(notifier.entries().is_empty());
}

#[tokio::test]
async fn test_record_fields_fill_missing_personalization() {
    let backend = StubBackend::start().await;
    backend.respond(
        "GET",
        GET_PATH,
        StubResponse::json(200, &negocio_record(5, "Abarrotes Juárez", &json!(null))),
    );

    let (controller, _) = open(&backend).await;

    assert_eq!(controller.draft().store_name, "Abarrotes Juárez");
    assert_eq!(controller.draft().store_logo, None);
}

#[tokio::test]
async fn test_malformed_persisted_color_keeps_default() {
    let backend = StubBackend::start().await;
    backend.respond(
        "GET",
        GET_PATH,
        StubResponse::json(
            200,
            &negocio_record(
                5,
                "Abarrotes Juárez",
                &json!({"primaryColor": "naranja", "heroTitle": "Todo para tu casa"}),
            ),
        ),
    );

    let (controller, _) = open(&backend).await;

    assert_eq!(
        controller.draft().primary_color,
        CustomizationDraft::default().primary_color
    );
    assert_eq!(controller.draft().hero_title, "Todo para tu casa");
}

#[tokio::test]
async fn test_failed_load_keeps_defaults_and_notifies() {
    let backend = StubBackend::start().await;
    backend.respond("GET", GET_PATH, StubResponse::json(500, &json!({})));

    let (controller, notifier) = open(&backend).await;

    assert!(controller.load_failed());
    assert_eq!(controller.draft(), &CustomizationDraft::default());
    assert_eq!(
        notifier.last(),
        Some((LOAD_FAILED_MESSAGE.to_string(), Severity::Error))
    );
}

#[tokio::test]
async fn test_persist_posts_edits() {
    let backend = StubBackend::start().await;
    backend.respond(
        "GET",
        GET_PATH,
        StubResponse::json(200, &negocio_record(5, "Abarrotes Juárez", &json!({}))),
    );
    backend.respond(
        "POST",
        SAVE_PATH,
        StubResponse::json(
            200,
            &json!({
                "message": "Personalización guardada exitosamente",
                "negocio": negocio_record(5, "Abarrotes Juárez", &json!({}))
            }),
        ),
    );

    let (mut controller, notifier) = open(&backend).await;
    controller.set_text(CustomizationField::HeroTitle, "Ofertas de temporada");
    controller.set_custom_color(HexColor::rgb(0x12, 0x34, 0x56));
    controller.persist().await.unwrap();

    assert_eq!(
        notifier.last(),
        Some((SAVED_MESSAGE.to_string(), Severity::Success))
    );
    let body = backend.requests_to("POST", SAVE_PATH)[0].body.clone().unwrap();
    assert_eq!(body["heroTitle"], "Ofertas de temporada");
    assert_eq!(body["primaryColor"], "#f97316");
    assert_eq!(body["customColor"], "#123456");
    assert_eq!(body["storeName"], "Abarrotes Juárez");
}

#[tokio::test]
async fn test_failed_persist_notifies_and_keeps_draft() {
    let backend = StubBackend::start().await;
    backend.respond(
        "GET",
        GET_PATH,
        StubResponse::json(200, &negocio_record(5, "Abarrotes Juárez", &json!({}))),
    );
    backend.respond(
        "POST",
        SAVE_PATH,
        StubResponse::json(400, &json!({"error": "Negocio inactivo"})),
    );

    let (mut controller, notifier) = open(&backend).await;
    controller.set_text(CustomizationField::StoreSlogan, "Siempre frescos");
    let err = controller.persist().await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(
        notifier.last(),
        Some((SAVE_FAILED_MESSAGE.to_string(), Severity::Error))
    );
    assert_eq!(controller.draft().store_slogan, "Siempre frescos");
}

#[tokio::test]
async fn test_discard_reloads_only_when_confirmed() {
    let backend = StubBackend::start().await;
    backend.respond(
        "GET",
        GET_PATH,
        StubResponse::json(200, &negocio_record(5, "Abarrotes Juárez", &json!({}))),
    );

    let (mut controller, _) = open(&backend).await;
    controller.set_text(CustomizationField::StoreName, "Borrador");

    assert!(!controller.discard_and_reload(&FixedAnswer(false)).await);
    assert_eq!(controller.draft().store_name, "Borrador");
    assert_eq!(backend.requests_to("GET", GET_PATH).len(), 1);

    assert!(controller.discard_and_reload(&FixedAnswer(true)).await);
    assert_eq!(controller.draft().store_name, "Abarrotes Juárez");
    assert_eq!(backend.requests_to("GET", GET_PATH).len(), 2);
}

fn preview_app(backend: &StubBackend) -> axum::Router {
    let config = AdminConfig {
        api: backend.api_config(),
        host: [127, 0, 0, 1].into(),
        port: 3001,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    };
    routes().with_state(AppState::new(config).unwrap())
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_preview_route_renders_stored_personalization() {
    let backend = StubBackend::start().await;
    backend.respond(
        "GET",
        GET_PATH,
        StubResponse::json(
            200,
            &negocio_record(
                5,
                "Abarrotes Juárez",
                &json!({"storeName": "Acme", "heroTitle": "Todo para tu casa"}),
            ),
        ),
    );

    let (status, html) = get(preview_app(&backend), "/negocios/5/preview").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Acme"));
    assert!(html.contains("Todo para tu casa"));
    assert!(html.contains("Explorar Productos"));
}

#[tokio::test]
async fn test_preview_route_unknown_negocio_is_404() {
    let backend = StubBackend::start().await;

    let (status, _) = get(preview_app(&backend), "/negocios/77/preview").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(backend.requests_to("GET", "/api/negocios/77/").len(), 1);
}

#[tokio::test]
async fn test_preview_route_backend_failure_is_502() {
    let backend = StubBackend::start().await;
    backend.respond(
        "GET",
        GET_PATH,
        StubResponse::html(500, "<h1>Server Error (500)</h1>"),
    );

    let (status, _) = get(preview_app(&backend), "/negocios/5/preview").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
