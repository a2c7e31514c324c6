use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use entity::user;
use feastly_service::{Query as QueryCore, ServiceError};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// The user behind the request's `Authorization: Bearer <token>` header.
/// Tokens are provisioned out of band; this layer only resolves them.
#[derive(Debug)]
pub struct CurrentUser(pub user::Model);

/// Marker guard admitting only requests whose [`CurrentUser`] has the
/// `is_staff` flag set.
#[derive(Debug)]
pub struct AdminUser;

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized(
                "Authentication credentials were not provided",
            ))?;
        let token = header
            .strip_prefix("Bearer ")
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .ok_or(ApiError::Unauthorized("Invalid token"))?;

        let user = QueryCore::find_user_by_token(&state.conn, token)
            .await?
            .ok_or(ApiError::Unauthorized("Invalid token"))?;
        Ok(CurrentUser(user))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_staff {
            return Err(ServiceError::PermissionDenied(
                "You do not have permission to perform this action".to_owned(),
            )
            .into());
        }
        Ok(AdminUser)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use entity::access_token;
    use entity::sea_orm::prelude::DateTimeUtc;
    use feastly_service::sea_orm::{
        ActiveModelTrait, ConnectionTrait, Database, Schema, Set,
    };
    use feastly_service::{CallbackUrls, SslCommerzGateway};

    use super::*;

    async fn setup_state() -> AppState {
        let conn = Database::connect("sqlite::memory:").await.unwrap();

        let backend = conn.get_database_backend();
        let schema = Schema::new(backend);
        for stmt in [
            schema.create_table_from_entity(entity::user::Entity),
            schema.create_table_from_entity(entity::access_token::Entity),
        ] {
            conn.execute(backend.build(&stmt)).await.unwrap();
        }

        AppState {
            conn,
            // Never called by the guards; they only touch the database.
            gateway: Arc::new(SslCommerzGateway::new("test", "test", true)),
            callback_urls: CallbackUrls {
                success: "http://localhost:8000/api/v1/payment/success/".to_owned(),
                fail: "http://localhost:8000/api/v1/payment/fail/".to_owned(),
                cancel: "http://localhost:8000/api/v1/payment/cancel/".to_owned(),
            },
            frontend_url: "http://localhost:5173".to_owned(),
        }
    }

    async fn seed_user_with_token(
        state: &AppState,
        email: &str,
        is_staff: bool,
    ) -> (user::Model, Uuid) {
        let found = user::ActiveModel {
            email: Set(email.to_owned()),
            first_name: Set("Test".to_owned()),
            last_name: Set("User".to_owned()),
            phone_number: Set("+880 1700-000000".to_owned()),
            address: Set("12 Green Road, Dhaka".to_owned()),
            is_staff: Set(is_staff),
            created_at: Set(DateTimeUtc::default()),
            ..Default::default()
        }
        .insert(&state.conn)
        .await
        .unwrap();

        let token = Uuid::new_v4();
        access_token::ActiveModel {
            user_id: Set(found.id),
            token: Set(token),
            created_at: Set(DateTimeUtc::default()),
            ..Default::default()
        }
        .insert(&state.conn)
        .await
        .unwrap();

        (found, token)
    }

    fn bearer_parts(token: &str) -> Parts {
        Request::builder()
            .uri("/")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn bearer_tokens_resolve_the_current_user() {
        let state = setup_state().await;
        let (seeded, token) = seed_user_with_token(&state, "member@feastly.dev", false).await;

        let mut parts = bearer_parts(&token.to_string());
        let current = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(current.0.id, seeded.id);

        let mut parts = Request::builder().uri("/").body(()).unwrap().into_parts().0;
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        let mut parts = bearer_parts(&Uuid::new_v4().to_string());
        let err = CurrentUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn admin_guard_admits_staff_only() {
        let state = setup_state().await;
        let (_, member_token) = seed_user_with_token(&state, "member@feastly.dev", false).await;
        let (_, staff_token) = seed_user_with_token(&state, "staff@feastly.dev", true).await;

        let mut parts = bearer_parts(&member_token.to_string());
        let err = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Service(ServiceError::PermissionDenied(_))
        ));

        let mut parts = bearer_parts(&staff_token.to_string());
        AdminUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
    }
}
