//! Provisioning Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::ProvisioningConfig;
use crate::domain::repository::{
    ContactDirectory, ContactLinkRepository, LoginExistence, UserRepository,
};
use crate::infra::postgres::PgProvisioningRepository;
use crate::presentation::handlers::{self, ProvisioningAppState};

/// Create the provisioning router with PostgreSQL repository
pub fn provisioning_router(repo: PgProvisioningRepository, config: ProvisioningConfig) -> Router {
    provisioning_router_generic(repo, config)
}

/// Create a generic provisioning router for any repository implementation
pub fn provisioning_router_generic<R>(repo: R, config: ProvisioningConfig) -> Router
where
    R: UserRepository
        + LoginExistence
        + ContactLinkRepository
        + ContactDirectory
        + Send
        + Sync
        + 'static,
{
    let state = ProvisioningAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/users/bulk", post(handlers::bulk_create_users::<R>))
        .route(
            "/users/{user_id}/contact-sync",
            post(handlers::sync_user_contact::<R>),
        )
        .route("/username/preview", post(handlers::preview_username::<R>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::domain::value_object::{email::Email, login::Login};
    use crate::infra::memory::InMemoryDirectory;

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    mod bulk {
        use super::*;

        #[tokio::test]
        async fn test_bulk_create_reports_each_contact() {
            let store = InMemoryDirectory::new();
            store
                .insert_user(
                    Login::new("existing").unwrap(),
                    Email::new("taken@example.com").unwrap(),
                )
                .unwrap();
            let app = provisioning_router_generic(store, ProvisioningConfig::development());

            let response = app
                .oneshot(post_json(
                    "/users/bulk",
                    json!({
                        "contacts": [
                            { "contactId": 1, "displayName": "No Email" },
                            { "contactId": 2, "displayName": "Dup", "email": "taken@example.com" },
                            {
                                "contactId": 3,
                                "displayName": "Jane Doe",
                                "email": "jane@example.com",
                                "firstName": "Jane",
                                "lastName": "Doe"
                            }
                        ]
                    }),
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = read_json(response).await;

            assert_eq!(body["succeeded"], json!(["Jane Doe"]));
            assert_eq!(body["failed"], json!(["No Email", "Dup"]));
            assert_eq!(body["outcomes"][0]["status"], "skipped");
            assert_eq!(body["outcomes"][0]["reason"], "MISSING_EMAIL");
            assert_eq!(body["outcomes"][1]["reason"], "EMAIL_TAKEN");
            assert_eq!(body["outcomes"][2]["status"], "created");
            assert_eq!(body["outcomes"][2]["login"], "janedoe");
            assert_eq!(body["outcomes"][2]["contactId"], 3);
            assert!(body["outcomes"][2].get("reason").is_none());
        }

        #[tokio::test]
        async fn test_malformed_body_is_rejected() {
            let app = provisioning_router_generic(
                InMemoryDirectory::new(),
                ProvisioningConfig::development(),
            );

            let response = app
                .oneshot(post_json("/users/bulk", json!({ "people": [] })))
                .await
                .unwrap();

            assert!(response.status().is_client_error());
        }
    }

    mod preview {
        use super::*;

        #[tokio::test]
        async fn test_preview_returns_username() {
            let app = provisioning_router_generic(
                InMemoryDirectory::new(),
                ProvisioningConfig::development(),
            );

            let response = app
                .oneshot(post_json(
                    "/username/preview",
                    json!({ "displayName": "Zoë O'Brien" }),
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(read_json(response).await["username"], "zoeobrien");
        }

        #[tokio::test]
        async fn test_preview_blank_name_is_bad_request() {
            let app = provisioning_router_generic(
                InMemoryDirectory::new(),
                ProvisioningConfig::development(),
            );

            let response = app
                .oneshot(post_json("/username/preview", json!({ "displayName": "  " })))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    mod preview_invalid {
        use super::*;

        #[tokio::test]
        async fn test_preview_without_login_characters_is_unprocessable() {
            let app = provisioning_router_generic(
                InMemoryDirectory::new(),
                ProvisioningConfig::development(),
            );

            let response = app
                .oneshot(post_json(
                    "/username/preview",
                    json!({ "displayName": "王小明" }),
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(read_json(response).await["status"], 422);
        }
    }

    mod contact_sync {
        use super::*;

        #[tokio::test]
        async fn test_sync_creates_contact_for_account() {
            let store = InMemoryDirectory::new();
            let user_id = store
                .insert_user(
                    Login::new("jane").unwrap(),
                    Email::new("jane@example.com").unwrap(),
                )
                .unwrap();
            let app = provisioning_router_generic(store, ProvisioningConfig::development());

            let response = app
                .oneshot(post_json(
                    &format!("/users/{}/contact-sync", user_id),
                    json!({}),
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let body = read_json(response).await;
            assert_eq!(body["outcome"], "created_contact");
            assert_eq!(body["contactId"], 1);
        }

        #[tokio::test]
        async fn test_sync_unknown_user_is_not_found() {
            let app = provisioning_router_generic(
                InMemoryDirectory::new(),
                ProvisioningConfig::development(),
            );

            let response = app
                .oneshot(post_json(
                    "/users/6f1c1c3e-8a2b-4a8e-9d57-0c6f2b1e9a11/contact-sync",
                    json!({}),
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }
}
