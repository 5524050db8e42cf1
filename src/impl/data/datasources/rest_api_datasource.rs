use std::sync::Arc;

use fractic_server_error::ServerError;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::ApiConfig,
    data::datasources::secure_token_datasource::SecureTokenStorage,
    entities::RequestFailure,
    errors::{HttpClientInit, InvalidResponse, RequestFailed, Unauthorized},
};

/// Which backend a call targets. Only the main service receives the bearer
/// token; the auth service issues it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Service {
    Auth,
    Main,
}

pub(crate) struct RestApiDatasource {
    client: Client,
    config: ApiConfig,
    tokens: Arc<dyn SecureTokenStorage>,
}

impl RestApiDatasource {
    pub(crate) fn new(
        config: ApiConfig,
        tokens: Arc<dyn SecureTokenStorage>,
    ) -> Result<Self, ServerError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| HttpClientInit::with_debug(&e))?;
        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    pub(crate) fn tokens(&self) -> &Arc<dyn SecureTokenStorage> {
        &self.tokens
    }

    pub(crate) async fn get<R: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
    ) -> Result<R, RequestFailure> {
        let response = self.send(service, Method::GET, path, None::<&()>).await?;
        parse(path, response).await
    }

    pub(crate) async fn post<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<R, RequestFailure> {
        let response = self.send(service, Method::POST, path, Some(body)).await?;
        parse(path, response).await
    }

    pub(crate) async fn put<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<R, RequestFailure> {
        let response = self.send(service, Method::PUT, path, Some(body)).await?;
        parse(path, response).await
    }

    /// Any response body is ignored.
    pub(crate) async fn delete(&self, service: Service, path: &str) -> Result<(), RequestFailure> {
        self.send(service, Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    fn url(&self, service: Service, path: &str) -> String {
        let base = match service {
            Service::Auth => &self.config.auth_base_url,
            Service::Main => &self.config.main_base_url,
        };
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    async fn send<B: Serialize + Sync>(
        &self,
        service: Service,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, RequestFailure> {
        debug!(?service, %method, path, "Sending request.");
        let mut builder: RequestBuilder = self
            .client
            .request(method, self.url(service, path))
            .header(reqwest::header::ACCEPT, "application/json");
        if service == Service::Main {
            if let Some(token) = self.tokens.get_token().await? {
                builder = builder.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            RequestFailure::network(RequestFailed::with_debug(RequestFailure::NETWORK_ERROR, &e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = error_message(status, response.text().await.ok());
        if status == StatusCode::UNAUTHORIZED {
            warn!(path, "Unauthorized response; removing stored session token.");
            if let Err(e) = self.tokens.remove_token().await {
                warn!(error = %e, "Failed to remove stored session token.");
            }
            return Err(RequestFailure::new(message, Unauthorized::new(path)));
        }
        let error = RequestFailed::new(&message);
        Err(RequestFailure::new(message, error))
    }
}

async fn parse<R: DeserializeOwned>(path: &str, response: Response) -> Result<R, RequestFailure> {
    response.json::<R>().await.map_err(|e| {
        RequestFailure::new(
            "Unexpected response from server",
            InvalidResponse::with_debug(path, &e),
        )
    })
}

/// Prefers a `message` field from a JSON error body.
fn error_message(status: StatusCode, body: Option<String>) -> String {
    body.and_then(|b| serde_json::from_str::<Value>(&b).ok())
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}
