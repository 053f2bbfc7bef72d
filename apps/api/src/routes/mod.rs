pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::gem::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Guided builder
        .route("/api/v1/builder", post(handlers::handle_create_builder))
        .route("/api/v1/builder/:id", delete(handlers::handle_delete_builder))
        .route("/api/v1/builder/:id/init", post(handlers::handle_initialize))
        .route(
            "/api/v1/builder/:id/slots/:slot",
            get(handlers::handle_render_slot),
        )
        .route("/api/v1/builder/:id/config", get(handlers::handle_get_config))
        .route("/api/v1/builder/:id/input", post(handlers::handle_input))
        .route("/api/v1/builder/:id/form", post(handlers::handle_form_input))
        .route("/api/v1/builder/:id/tone", post(handlers::handle_tone_select))
        .route(
            "/api/v1/builder/:id/example",
            post(handlers::handle_example_question),
        )
        .route("/api/v1/builder/:id/reveal", post(handlers::handle_reveal))
        .route("/api/v1/builder/:id/copy", post(handlers::handle_builder_copy))
        .route(
            "/api/v1/builder/:id/copy-button",
            get(handlers::handle_builder_copy_button),
        )
        .route("/api/v1/builder/:id/reset", post(handlers::handle_reset))
        // Section workshop
        .route("/api/v1/workshop", post(handlers::handle_open_workshop))
        .route(
            "/api/v1/workshop/:id",
            get(handlers::handle_get_workshop).delete(handlers::handle_delete_workshop),
        )
        .route(
            "/api/v1/workshop/:id/sections/:index/toggle",
            post(handlers::handle_toggle_section),
        )
        .route(
            "/api/v1/workshop/:id/sections/:index",
            put(handlers::handle_edit_section),
        )
        .route(
            "/api/v1/workshop/:id/special",
            put(handlers::handle_edit_special),
        )
        .route(
            "/api/v1/workshop/:id/copy",
            post(handlers::handle_workshop_copy),
        )
        .route(
            "/api/v1/workshop/:id/copy-button",
            get(handlers::handle_workshop_copy_button),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::clipboard::{Clipboard, MemoryClipboard};
    use crate::config::{ClipboardBackend, Config};
    use crate::gem::assembler::assemble;
    use crate::gem::configuration::Configuration;
    use crate::session::SessionStore;

    fn test_app() -> (Router, Arc<MemoryClipboard>) {
        let clipboard = Arc::new(MemoryClipboard::default());
        let shared: Arc<dyn Clipboard> = clipboard.clone();
        let state = AppState {
            config: Config {
                host: "127.0.0.1".into(),
                port: 0,
                rust_log: "info".into(),
                clipboard_backend: ClipboardBackend::Memory,
                session_ttl: Duration::from_secs(3600),
                session_sweep_interval: Duration::from_secs(60),
            },
            sessions: Arc::new(SessionStore::default()),
            clipboard: shared,
        };
        (build_router(state), clipboard)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, String) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn call_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, text) = call(app, method, uri, body).await;
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap()
        };
        (status, value)
    }

    async fn create_builder(app: &Router) -> String {
        let (status, body) = call_json(app, "POST", "/api/v1/builder", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app();
        let (status, body) = call_json(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["clipboard"], "memory");
    }

    #[tokio::test]
    async fn test_builder_flow_end_to_end() {
        let (app, clipboard) = test_app();
        let (status, created) = call_json(&app, "POST", "/api/v1/builder", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["slots"].as_array().unwrap().len(), 7);
        assert_eq!(created["output"], assemble(&Configuration::default()));
        let id = created["session_id"].as_str().unwrap();

        let (_, update) = call_json(
            &app,
            "POST",
            &format!("/api/v1/builder/{id}/tone"),
            Some(json!({"value": "direct-analyst"})),
        )
        .await;
        assert!(update["rerendered"][0]["html"]
            .as_str()
            .unwrap()
            .contains("builder-tone-intensity"));

        call_json(
            &app,
            "POST",
            &format!("/api/v1/builder/{id}/input"),
            Some(json!({"field": "toneIntensity", "value": 8})),
        )
        .await;
        let (status, update) = call_json(
            &app,
            "POST",
            &format!("/api/v1/builder/{id}/form"),
            Some(json!({"name": "builder-question-1", "value": "Are budgets aligned with needs?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let output = update["output"].as_str().unwrap().to_string();
        assert!(output.contains("operate at a 8"));
        assert!(output.contains("6. **Custom Analysis: Question 1**"));

        let (_, copied) =
            call_json(&app, "POST", &format!("/api/v1/builder/{id}/copy"), None).await;
        assert_eq!(copied["copied"], true);
        assert_eq!(copied["label"], "Copied!");
        assert_eq!(copied["text"], output);
        assert_eq!(clipboard.contents().as_deref(), Some(output.as_str()));

        let (_, config) =
            call_json(&app, "GET", &format!("/api/v1/builder/{id}/config"), None).await;
        assert_eq!(config["tone"], "direct-analyst");
        assert_eq!(config["toneIntensity"], 8);

        let (_, reset) =
            call_json(&app, "POST", &format!("/api/v1/builder/{id}/reset"), None).await;
        assert_eq!(reset["output"], assemble(&Configuration::default()));
        let (_, config) =
            call_json(&app, "GET", &format!("/api/v1/builder/{id}/config"), None).await;
        assert_eq!(config["toneIntensity"], 5);
        assert_eq!(config["customQuestion1"], "");
    }

    #[tokio::test]
    async fn test_slot_fetch() {
        let (app, _) = test_app();
        let id = create_builder(&app).await;

        let (status, html) =
            call(&app, "GET", &format!("/api/v1/builder/{id}/slots/final"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("gem-builder-output"));

        let (status, _) =
            call(&app, "GET", &format!("/api/v1/builder/{id}/slots/sidebar"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_undeclared_slot_is_not_found() {
        let (app, _) = test_app();
        let (_, created) = call_json(
            &app,
            "POST",
            "/api/v1/builder",
            Some(json!({"slots": ["tone", "final"]})),
        )
        .await;
        assert_eq!(created["slots"].as_array().unwrap().len(), 2);
        let id = created["session_id"].as_str().unwrap();

        let (status, _) =
            call(&app, "GET", &format!("/api/v1/builder/{id}/slots/role"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reveal_reports_first_time_only() {
        let (app, _) = test_app();
        let id = create_builder(&app).await;
        let uri = format!("/api/v1/builder/{id}/reveal");
        let (_, first) = call_json(&app, "POST", &uri, Some(json!({"slot": "questions"}))).await;
        let (_, second) = call_json(&app, "POST", &uri, Some(json!({"slot": "questions"}))).await;
        assert_eq!(first["first_reveal"], true);
        assert_eq!(second["first_reveal"], false);
    }

    #[tokio::test]
    async fn test_bad_form_input_is_rejected() {
        let (app, _) = test_app();
        let id = create_builder(&app).await;
        let (status, body) = call_json(
            &app,
            "POST",
            &format!("/api/v1/builder/{id}/form"),
            Some(json!({"name": "builder-tone-intensity", "value": "max"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_change_uses_error_envelope() {
        let (app, _) = test_app();
        let id = create_builder(&app).await;
        let uri = format!("/api/v1/builder/{id}/input");

        let (status, body) =
            call_json(&app, "POST", &uri, Some(json!({"field": "bogus", "value": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = call_json(
            &app,
            "POST",
            &uri,
            Some(json!({"field": "toneIntensity", "value": "high"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, config) =
            call_json(&app, "GET", &format!("/api/v1/builder/{id}/config"), None).await;
        assert_eq!(config["toneIntensity"], 5);
    }

    #[tokio::test]
    async fn test_unknown_declared_slot_is_rejected() {
        let (app, _) = test_app();
        let (status, body) = call_json(
            &app,
            "POST",
            "/api/v1/builder",
            Some(json!({"slots": ["tone", "sidebar"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) =
            call_json(&app, "POST", "/api/v1/workshop", Some(json!({"builder_session_id": 7})))
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, health) = call_json(&app, "GET", "/health", None).await;
        assert_eq!(health["sessions"]["builders"], 0);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let (app, _) = test_app();
        let (status, body) = call_json(
            &app,
            "POST",
            "/api/v1/builder/00000000-0000-4000-8000-000000000000/reset",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_workshop_snapshots_builder_once() {
        let (app, clipboard) = test_app();
        let builder_id = create_builder(&app).await;
        call_json(
            &app,
            "POST",
            &format!("/api/v1/builder/{builder_id}/tone"),
            Some(json!({"value": "supportive-mentor"})),
        )
        .await;

        let (status, opened) = call_json(
            &app,
            "POST",
            "/api/v1/workshop",
            Some(json!({"builder_session_id": builder_id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(opened["from_builder"], true);
        let id = opened["session_id"].as_str().unwrap().to_string();
        assert!(opened["output"].as_str().unwrap().contains("Supportive Mentor"));

        // Builder changes after opening do not reach the workshop.
        call_json(
            &app,
            "POST",
            &format!("/api/v1/builder/{builder_id}/tone"),
            Some(json!({"value": "direct-analyst"})),
        )
        .await;
        let (_, current) = call_json(&app, "GET", &format!("/api/v1/workshop/{id}"), None).await;
        assert!(current["output"].as_str().unwrap().contains("Supportive Mentor"));

        let (_, edited) = call_json(
            &app,
            "PUT",
            &format!("/api/v1/workshop/{id}/sections/4"),
            Some(json!({"text": "- Keep it short"})),
        )
        .await;
        assert!(edited["output"].as_str().unwrap().contains("## Guidelines\n- Keep it short"));

        let (_, special) = call_json(
            &app,
            "PUT",
            &format!("/api/v1/workshop/{id}/special"),
            Some(json!({"text": "Cite page numbers."})),
        )
        .await;
        let preview = special["output"].as_str().unwrap().to_string();
        assert!(preview.ends_with("## Special Instructions\nCite page numbers."));

        let (_, copied) =
            call_json(&app, "POST", &format!("/api/v1/workshop/{id}/copy"), None).await;
        assert_eq!(copied["text"], preview);
        assert_eq!(clipboard.contents().as_deref(), Some(preview.as_str()));
    }

    #[tokio::test]
    async fn test_workshop_without_builder_uses_defaults() {
        let (app, _) = test_app();
        let (_, opened) = call_json(
            &app,
            "POST",
            "/api/v1/workshop",
            Some(json!({"builder_session_id": "00000000-0000-4000-8000-000000000000"})),
        )
        .await;
        assert_eq!(opened["from_builder"], false);
        assert_eq!(opened["output"], assemble(&Configuration::default()));
    }

    #[tokio::test]
    async fn test_workshop_toggle_and_bad_index() {
        let (app, _) = test_app();
        let (_, opened) = call_json(&app, "POST", "/api/v1/workshop", None).await;
        let id = opened["session_id"].as_str().unwrap();

        let (_, toggled) = call_json(
            &app,
            "POST",
            &format!("/api/v1/workshop/{id}/sections/0/toggle"),
            None,
        )
        .await;
        assert_eq!(toggled["expanded"], true);

        let (status, _) = call_json(
            &app,
            "PUT",
            &format!("/api/v1/workshop/{id}/sections/9"),
            Some(json!({"text": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            call_json(&app, "DELETE", &format!("/api/v1/workshop/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call_json(&app, "GET", &format!("/api/v1/workshop/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
