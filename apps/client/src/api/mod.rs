//! API Client — the single point of entry for all backend calls.
//!
//! ARCHITECTURAL RULE: no other module may perform HTTP directly. Every
//! request goes through [`ApiClient`], which attaches the bearer credential
//! from the Session Store when one is present, and applies the global 401
//! policy: any unauthorized response — whichever endpoint produced it —
//! forces a logout, drops the whole query cache, and broadcasts
//! [`AuthEvent::ForcedLogout`] so the shell can navigate to `/login`.

pub mod transport;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::warn;

use crate::cache::QueryCache;
use crate::errors::{api_error_message, ClientError};
use crate::models::resume::UploadFile;
use crate::session::SessionStore;

use self::transport::{ApiRequest, Method, RequestBody, Transport};

/// Broadcast on the auth watch channel. Views that own navigation subscribe
/// and route to `/login` on `ForcedLogout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    Idle,
    ForcedLogout,
}

pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
    cache: Arc<QueryCache>,
    auth_events: watch::Sender<AuthEvent>,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
        cache: Arc<QueryCache>,
    ) -> Self {
        let (auth_events, _) = watch::channel(AuthEvent::Idle);
        Self {
            transport,
            session,
            cache,
            auth_events,
        }
    }

    pub fn subscribe_auth_events(&self) -> watch::Receiver<AuthEvent> {
        self.auth_events.subscribe()
    }

    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.execute(Method::Get, path, Vec::new(), RequestBody::Empty)
            .await
    }

    pub async fn get_query(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<Value, ClientError> {
        self.execute(Method::Get, path, query, RequestBody::Empty)
            .await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        self.execute(
            Method::Post,
            path,
            Vec::new(),
            RequestBody::Json(serde_json::to_value(body)?),
        )
        .await
    }

    pub async fn post_empty(&self, path: &str) -> Result<Value, ClientError> {
        self.execute(Method::Post, path, Vec::new(), RequestBody::Empty)
            .await
    }

    pub async fn post_query(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<Value, ClientError> {
        self.execute(Method::Post, path, query, RequestBody::Empty)
            .await
    }

    /// Form-encoded POST (`/auth/change-password` is the only consumer).
    pub async fn post_form(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
    ) -> Result<Value, ClientError> {
        self.execute(Method::Post, path, Vec::new(), RequestBody::Form(fields))
            .await
    }

    /// Multipart upload for resume and voice files.
    pub async fn post_multipart(
        &self,
        path: &str,
        field: &str,
        file: UploadFile,
    ) -> Result<Value, ClientError> {
        self.execute(
            Method::Post,
            path,
            Vec::new(),
            RequestBody::Multipart {
                field: field.to_string(),
                file,
            },
        )
        .await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        self.execute(
            Method::Put,
            path,
            Vec::new(),
            RequestBody::Json(serde_json::to_value(body)?),
        )
        .await
    }

    pub async fn put_query(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<Value, ClientError> {
        self.execute(Method::Put, path, query, RequestBody::Empty)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.execute(Method::Delete, path, Vec::new(), RequestBody::Empty)
            .await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: RequestBody,
    ) -> Result<Value, ClientError> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            query,
            body,
            bearer: self.session.token(),
        };
        let response = self.transport.execute(request).await?;

        if response.status == 401 {
            warn!("401 from {} {path}; forcing logout", method.as_str());
            self.session.logout();
            self.cache.clear();
            let _ = self.auth_events.send(AuthEvent::ForcedLogout);
            return Err(ClientError::Unauthorized);
        }
        if !(200..300).contains(&response.status) {
            return Err(api_error_message(response.status, &response.body));
        }
        Ok(response.body)
    }
}
