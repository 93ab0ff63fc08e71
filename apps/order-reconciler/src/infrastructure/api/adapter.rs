//! Central API adapter implementing CentralApiPort.

use async_trait::async_trait;

use crate::application::ports::{ApiError, CentralApiPort, Credentials, OrdersPage};
use crate::domain::{BearerToken, OrderRecord, ServerToken, StoreId, StoreUuid, TimeWindow};

use super::api_types::{
    ConfigurationResponse, LoginRequest, LoginResponse, OrdersResponse,
    StoreConfigurationResponse, AUTH_TYPE_USER,
};
use super::config::ApiConfig;
use super::error::CentralError;
use super::http_client::ApiHttpClient;

/// Adapter for the Central platform API and its delivery-platform
/// orders endpoint.
#[derive(Debug, Clone)]
pub struct CentralApiAdapter {
    http: ApiHttpClient,
    config: ApiConfig,
}

impl CentralApiAdapter {
    /// Create a new adapter from config.
    pub fn new(config: ApiConfig) -> Result<Self, CentralError> {
        let http = ApiHttpClient::new(config.timeout)?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl CentralApiPort for CentralApiAdapter {
    async fn login(&self, credentials: &Credentials) -> Result<BearerToken, ApiError> {
        let url = self.config.auth_url();
        let body = LoginRequest {
            username: &credentials.username,
            psw: &credentials.password,
            auth_type: AUTH_TYPE_USER,
        };

        let response: LoginResponse = self.http.post(&url, &body).await?;

        let token = response.token.ok_or(CentralError::MissingField {
            url,
            field: "token",
        })?;

        tracing::info!("Bearer token retrieved");
        Ok(BearerToken::new(token))
    }

    async fn server_token(&self, bearer: &BearerToken) -> Result<ServerToken, ApiError> {
        let url = self.config.configuration_url();

        let response: ConfigurationResponse =
            self.http.get(&url, bearer.as_str(), &[]).await?;

        let token = response
            .data
            .and_then(|data| data.integrations)
            .and_then(|integrations| integrations.uber)
            .and_then(|uber| uber.server_token)
            .ok_or(CentralError::MissingField {
                url,
                field: "data.INTEGRATIONS.UBER.server_token",
            })?;

        tracing::info!("Delivery-platform server token retrieved");
        Ok(ServerToken::new(token))
    }

    async fn store_uuid(
        &self,
        bearer: &BearerToken,
        store_id: &StoreId,
    ) -> Result<StoreUuid, ApiError> {
        let url = self.config.store_configuration_url(store_id);

        let response: StoreConfigurationResponse =
            self.http.get(&url, bearer.as_str(), &[]).await?;

        let uuid = response
            .data
            .into_iter()
            .next()
            .and_then(|entry| entry.uber_uuid)
            .ok_or(CentralError::MissingField {
                url,
                field: "data[0].uber_uuid",
            })?;

        Ok(StoreUuid::new(uuid))
    }

    async fn orders_page(
        &self,
        token: &ServerToken,
        store_uuid: &StoreUuid,
        window: &TimeWindow,
        page_token: Option<&str>,
    ) -> Result<OrdersPage, ApiError> {
        let url = self.config.orders_url(store_uuid);

        let mut query: Vec<(&str, &str)> = vec![
            ("start_time", window.start.as_str()),
            ("end_time", window.end.as_str()),
        ];
        if let Some(page_token) = page_token {
            query.push(("next_page_token", page_token));
        }

        let response: OrdersResponse = self.http.get(&url, token.as_str(), &query).await?;
        let next_page_token = response.next_page_token().map(str::to_string);
        let raw_count = response.data.len();

        let mut orders = Vec::with_capacity(raw_count);
        for value in response.data {
            match serde_json::from_value::<OrderRecord>(value) {
                Ok(order) => orders.push(order),
                Err(e) => {
                    tracing::warn!(
                        store_uuid = %store_uuid,
                        error = %e,
                        "Skipping malformed order entry"
                    );
                }
            }
        }

        Ok(OrdersPage {
            orders,
            raw_count,
            next_page_token,
        })
    }
}
