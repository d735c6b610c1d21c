use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::{ClientConfig, GatewayEndpoints};
use crate::gateway::{decode_response, ApiResponse, SESSION_TOKEN_HEADER};
use crate::models::auth::requests::{LoginRequest, RegisterRequest};
use crate::models::auth::responses::{LoginResponse, ProfileResponse, RegisterResponse};
use crate::models::music::{
    QueryFilters, QueryResponse, RemoveSubscriptionRequest, RemoveSubscriptionResponse,
    SubscribeRequest, SubscribeResponse, SubscriptionListResponse,
};
use crate::models::session::{mask_token, SessionContext};
use crate::repositories::errors::gateway_errors::GatewayError;

#[cfg(test)]
use mockall::automock;

/// The remote gateway. Every call returns the normalized envelope with its status.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MusicApiRepository: Send + Sync {
    async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<ApiResponse<LoginResponse>, GatewayError>;
    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<ApiResponse<RegisterResponse>, GatewayError>;
    async fn profile(
        &self,
        ctx: &SessionContext,
    ) -> Result<ApiResponse<ProfileResponse>, GatewayError>;
    async fn query(
        &self,
        ctx: &SessionContext,
        filters: &QueryFilters,
    ) -> Result<ApiResponse<QueryResponse>, GatewayError>;
    async fn list_subscriptions(
        &self,
        ctx: &SessionContext,
    ) -> Result<ApiResponse<SubscriptionListResponse>, GatewayError>;
    async fn subscribe(
        &self,
        ctx: &SessionContext,
        request: &SubscribeRequest,
    ) -> Result<ApiResponse<SubscribeResponse>, GatewayError>;
    async fn remove_subscription(
        &self,
        ctx: &SessionContext,
        request: &RemoveSubscriptionRequest,
    ) -> Result<ApiResponse<RemoveSubscriptionResponse>, GatewayError>;
}

pub struct HttpMusicApiRepository {
    client: Client,
    endpoints: GatewayEndpoints,
}

impl HttpMusicApiRepository {
    pub fn new(endpoints: GatewayEndpoints, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, GatewayError> {
        Self::new(config.endpoints.clone(), config.request_timeout)
    }

    fn with_json_headers(builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
    }

    fn authorized(builder: RequestBuilder, ctx: &SessionContext) -> RequestBuilder {
        Self::with_json_headers(builder).header(SESSION_TOKEN_HEADER, ctx.token.as_str())
    }

    async fn execute<T>(&self, builder: RequestBuilder) -> Result<ApiResponse<T>, GatewayError>
    where
        T: DeserializeOwned + Default,
    {
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let raw = response.text().await?;
        debug!("Gateway answered {} ({} bytes)", status, raw.len());
        decode_response(status, &raw)
    }
}

#[async_trait]
impl MusicApiRepository for HttpMusicApiRepository {
    async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<ApiResponse<LoginResponse>, GatewayError> {
        debug!("POST {} for {}", self.endpoints.login_url, request.email);
        let builder = Self::with_json_headers(self.client.post(&self.endpoints.login_url))
            .json(request);
        self.execute(builder).await
    }

    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<ApiResponse<RegisterResponse>, GatewayError> {
        debug!("POST {} for {}", self.endpoints.register_url, request.email);
        let builder = Self::with_json_headers(self.client.post(&self.endpoints.register_url))
            .json(request);
        self.execute(builder).await
    }

    async fn profile(
        &self,
        ctx: &SessionContext,
    ) -> Result<ApiResponse<ProfileResponse>, GatewayError> {
        debug!(
            "GET {} with token {}",
            self.endpoints.profile_url,
            mask_token(&ctx.token)
        );
        let builder = Self::authorized(self.client.get(&self.endpoints.profile_url), ctx);
        self.execute(builder).await
    }

    async fn query(
        &self,
        ctx: &SessionContext,
        filters: &QueryFilters,
    ) -> Result<ApiResponse<QueryResponse>, GatewayError> {
        debug!("POST {} with filters {:?}", self.endpoints.query_url, filters);
        let builder =
            Self::authorized(self.client.post(&self.endpoints.query_url), ctx).json(filters);
        self.execute(builder).await
    }

    async fn list_subscriptions(
        &self,
        ctx: &SessionContext,
    ) -> Result<ApiResponse<SubscriptionListResponse>, GatewayError> {
        debug!("GET {}", self.endpoints.subscription_url);
        let builder = Self::authorized(self.client.get(&self.endpoints.subscription_url), ctx);
        self.execute(builder).await
    }

    async fn subscribe(
        &self,
        ctx: &SessionContext,
        request: &SubscribeRequest,
    ) -> Result<ApiResponse<SubscribeResponse>, GatewayError> {
        debug!(
            "POST {} for {} ({})",
            self.endpoints.subscription_url, request.title, request.year
        );
        let builder = Self::authorized(self.client.post(&self.endpoints.subscription_url), ctx)
            .json(request);
        self.execute(builder).await
    }

    async fn remove_subscription(
        &self,
        ctx: &SessionContext,
        request: &RemoveSubscriptionRequest,
    ) -> Result<ApiResponse<RemoveSubscriptionResponse>, GatewayError> {
        debug!(
            "DELETE {} for {}",
            self.endpoints.subscription_url, request.uuid
        );
        let builder = Self::authorized(self.client.delete(&self.endpoints.subscription_url), ctx)
            .json(request);
        self.execute(builder).await
    }
}
