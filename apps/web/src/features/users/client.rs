//! Client for the users listing and mutation endpoints. Endpoint paths live
//! here; the view-models only see the [`UsersApi`] trait so they can run
//! against an in-memory fake in tests. There is no get-by-id endpoint.

use crate::{
    app_lib::{ApiClient, AppError, TokenStorage},
    features::users::types::{UserUpdate, UsersPage},
};

pub trait UsersApi {
    /// `GET /users?page=N`. The page number is not bounds-checked locally.
    async fn list_users(&self, page: u32) -> Result<UsersPage, AppError>;

    /// `PATCH /users/{id}`; the response body is ignored.
    async fn update_user(&self, id: u64, update: &UserUpdate) -> Result<(), AppError>;

    /// `DELETE /users/{id}`.
    async fn delete_user(&self, id: u64) -> Result<(), AppError>;
}

impl<S: TokenStorage> UsersApi for ApiClient<S> {
    async fn list_users(&self, page: u32) -> Result<UsersPage, AppError> {
        self.get_json("/users", &[("page", page.to_string())]).await
    }

    async fn update_user(&self, id: u64, update: &UserUpdate) -> Result<(), AppError> {
        self.patch_json(&format!("/users/{id}"), update).await
    }

    async fn delete_user(&self, id: u64) -> Result<(), AppError> {
        self.delete(&format!("/users/{id}")).await
    }
}


#[cfg(test)]
mod tests {
    use super::UsersApi;
    use crate::{
        app_lib::{ApiClient, AppError, SessionStore, session::MemoryStorage},
        features::users::types::UserUpdate,
    };
    use anyhow::Result;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn signed_in_client(server: &MockServer) -> Result<ApiClient<MemoryStorage>> {
        let session = SessionStore::new(MemoryStorage::default());
        session.set_token("QpwL5tke4Pnpja7X4")?;
        Ok(ApiClient::with_base_url(&server.uri(), session))
    }

    #[tokio::test]
    async fn list_users_requests_page_with_token() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("page", "2"))
            .and(header("Authorization", "Bearer QpwL5tke4Pnpja7X4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 2,
                "per_page": 6,
                "total": 12,
                "total_pages": 2,
                "data": [{
                    "id": 7,
                    "email": "michael.lawson@reqres.in",
                    "first_name": "Michael",
                    "last_name": "Lawson",
                    "avatar": "https://reqres.in/img/faces/7-image.jpg"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = signed_in_client(&server)?.list_users(2).await?;
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, 7);
        Ok(())
    }

    #[tokio::test]
    async fn list_users_surfaces_http_errors() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "Missing API key"
            })))
            .mount(&server)
            .await;

        let err = signed_in_client(&server)?.list_users(1).await.err();
        assert!(err.as_ref().is_some_and(AppError::is_unauthorized));
        Ok(())
    }

    #[tokio::test]
    async fn update_user_patches_partial_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/2"))
            .and(body_json(json!({ "first_name": "Janet", "email": "janet@reqres.in" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "first_name": "Janet",
                "updatedAt": "2024-01-01T00:00:00.000Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let update = UserUpdate {
            first_name: Some("Janet".to_string()),
            last_name: None,
            email: Some("janet@reqres.in".to_string()),
        };
        signed_in_client(&server)?.update_user(2, &update).await?;
        Ok(())
    }

    #[tokio::test]
    async fn delete_user_accepts_no_content() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        signed_in_client(&server)?.delete_user(3).await?;
        Ok(())
    }

    #[tokio::test]
    async fn delete_user_fails_on_server_error() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/3"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = signed_in_client(&server)?.delete_user(3).await;
        assert!(matches!(result, Err(AppError::Http { status: 503, .. })));
        Ok(())
    }
}
