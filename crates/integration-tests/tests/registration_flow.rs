//! End-to-end tests for registering a negocio.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use acaclick_admin::api::{NETWORK_ERROR_MESSAGE, SERVER_ERROR_MESSAGE};
use acaclick_admin::drafts::{
    CREATE_FALLBACK_MESSAGE, CREATED_MESSAGE, MISSING_CATEGORY_MESSAGE, RegistrationController,
    SubmitError,
};
use acaclick_admin::media::MediaIngestor;
use acaclick_admin::ui::{MemoryNotifier, Severity};
use acaclick_core::{BusinessCategory, BusinessField, NegocioId};
use acaclick_integration_tests::{StubBackend, StubResponse, negocio_record};
use serde_json::json;

const CREATE_PATH: &str = "/api/negocios/crear/";

fn controller(backend: &StubBackend) -> (RegistrationController, MemoryNotifier) {
    let notifier = MemoryNotifier::new();
    let controller = RegistrationController::new(
        backend.client(),
        Arc::new(notifier.clone()),
        MediaIngestor::default(),
    );
    (controller, notifier)
}

fn fill_required(controller: &mut RegistrationController) {
    controller.select_category(BusinessCategory::Minorista);
    controller.set_text(BusinessField::BusinessName, "Papelería Norte");
    controller.set_text(BusinessField::Email, "hola@papelerianorte.mx");
    controller.set_text(BusinessField::Phone, "8112345678");
    controller.set_text(BusinessField::Address, "Av. Constitución 100, Monterrey");
}

#[tokio::test]
async fn test_missing_category_never_calls_the_backend() {
    let backend = StubBackend::start().await;
    let (mut controller, notifier) = controller(&backend);
    controller.set_text(BusinessField::BusinessName, "Papelería Norte");
    controller.set_text(BusinessField::Email, "hola@papelerianorte.mx");

    let err = controller.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Invalid(_)));
    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.last(),
        Some((MISSING_CATEGORY_MESSAGE.to_string(), Severity::Error))
    );
}

#[tokio::test]
async fn test_blank_required_field_never_calls_the_backend() {
    let backend = StubBackend::start().await;
    let (mut controller, notifier) = controller(&backend);
    fill_required(&mut controller);
    controller.set_text(BusinessField::Phone, "   ");

    controller.submit().await.unwrap_err();

    assert!(backend.requests().is_empty());
    assert_eq!(
        notifier.last().unwrap().0,
        "Por favor completa el campo: Número de Teléfono"
    );
}

#[tokio::test]
async fn test_successful_submission_redirects_to_panel() {
    let backend = StubBackend::start().await;
    backend.respond(
        "POST",
        CREATE_PATH,
        StubResponse::json(201, &negocio_record(41, "Papelería Norte", &json!(null))),
    );
    let (mut controller, notifier) = controller(&backend);
    fill_required(&mut controller);
    assert_eq!(controller.completion_percent(), 83);

    let registered = controller.submit().await.unwrap();

    assert_eq!(registered.negocio.id_negocio, NegocioId::new(41));
    assert_eq!(registered.redirect.to, "/panel");
    assert_eq!(registered.redirect.after, Duration::from_millis(1500));
    assert_eq!(
        notifier.last(),
        Some((CREATED_MESSAGE.to_string(), Severity::Success))
    );

    let requests = backend.requests_to("POST", CREATE_PATH);
    assert_eq!(requests.len(), 1);
    let body = requests[0].body.clone().unwrap();
    assert_eq!(body["businessName"], "Papelería Norte");
    assert_eq!(body["businessType"], "minorista");
    assert_eq!(body["openTime"], "09:00");
    assert!(body["website"].is_null());
    assert!(body["location"].is_null());
    assert!(body.as_object().unwrap().contains_key("logo"));
}

#[tokio::test]
async fn test_error_with_detail_is_joined() {
    let backend = StubBackend::start().await;
    backend.respond(
        "POST",
        CREATE_PATH,
        StubResponse::json(
            500,
            &json!({"error": "Error al crear el negocio", "detail": "tenant inválido"}),
        ),
    );
    let (mut controller, notifier) = controller(&backend);
    fill_required(&mut controller);

    let err = controller.submit().await.unwrap_err();

    assert!(matches!(err, SubmitError::Api(_)));
    assert_eq!(
        notifier.last(),
        Some((
            "Error al crear el negocio: tenant inválido".to_string(),
            Severity::Error
        ))
    );
    assert_eq!(controller.draft().business_name, "Papelería Norte");
}

#[tokio::test]
async fn test_field_errors_show_first_message() {
    let backend = StubBackend::start().await;
    backend.respond(
        "POST",
        CREATE_PATH,
        StubResponse::json(400, &json!({"email": ["msg1", "msg2"], "phone": ["msg3"]})),
    );
    let (mut controller, notifier) = controller(&backend);
    fill_required(&mut controller);

    controller.submit().await.unwrap_err();

    assert_eq!(notifier.last().unwrap().0, "msg1");
}

#[tokio::test]
async fn test_nested_field_error_does_not_hide_later_message() {
    let backend = StubBackend::start().await;
    backend.respond(
        "POST",
        CREATE_PATH,
        StubResponse::json(
            400,
            &json!({
                "location": {"lat": ["Valor inválido."]},
                "email": ["Introduzca un correo válido."]
            }),
        ),
    );
    let (mut controller, notifier) = controller(&backend);
    fill_required(&mut controller);

    controller.submit().await.unwrap_err();

    assert_eq!(
        notifier.last(),
        Some((
            "Introduzca un correo válido.".to_string(),
            Severity::Error
        ))
    );
}

#[tokio::test]
async fn test_unrecognized_error_body_uses_fallback() {
    let backend = StubBackend::start().await;
    backend.respond(
        "POST",
        CREATE_PATH,
        StubResponse::json(400, &json!({"codes": [1, 2]})),
    );
    let (mut controller, notifier) = controller(&backend);
    fill_required(&mut controller);

    controller.submit().await.unwrap_err();

    assert_eq!(notifier.last().unwrap().0, CREATE_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_html_response_is_a_server_error() {
    let backend = StubBackend::start().await;
    backend.respond(
        "POST",
        CREATE_PATH,
        StubResponse::html(200, "<html><body>Bad Gateway</body></html>"),
    );
    let (mut controller, notifier) = controller(&backend);
    fill_required(&mut controller);

    controller.submit().await.unwrap_err();

    assert_eq!(
        notifier.last(),
        Some((SERVER_ERROR_MESSAGE.to_string(), Severity::Error))
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let backend = StubBackend::start().await;
    let api = backend.client();
    drop(backend);
    tokio::time::sleep(Duration::from_millis(20)).await;

    let notifier = MemoryNotifier::new();
    let mut controller =
        RegistrationController::new(api, Arc::new(notifier.clone()), MediaIngestor::default());
    fill_required(&mut controller);

    controller.submit().await.unwrap_err();

    assert_eq!(notifier.last().unwrap().0, NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_completion_percent_is_monotonic() {
    let backend = StubBackend::start().await;
    let (mut controller, _) = controller(&backend);

    let mut seen = vec![controller.completion_percent()];
    controller.set_text(BusinessField::BusinessName, "Papelería Norte");
    seen.push(controller.completion_percent());
    controller.select_category(BusinessCategory::Otro);
    seen.push(controller.completion_percent());
    controller.set_text(BusinessField::Email, "hola@papelerianorte.mx");
    seen.push(controller.completion_percent());
    controller.set_text(BusinessField::Phone, "8112345678");
    seen.push(controller.completion_percent());
    controller.set_text(BusinessField::Address, "Av. Constitución 100");
    seen.push(controller.completion_percent());

    assert_eq!(seen, vec![0, 17, 33, 50, 67, 83]);
}
