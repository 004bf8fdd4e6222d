//! The Orderly backend API client.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use moka::future::Cache;
use orderly_core::{OrderEditPayload, Settings};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use crate::address::OptimisticAddress;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::types::{
    AddressInput, AddressUpdateRequest, CompleteStepRequest, OrderLookupResponse, RemoteOrder,
    SettingsEnvelope,
};

/// Cache key for the settings document. Settings are fetched once and are
/// immutable for the rest of the session.
const SETTINGS_CACHE_KEY: &str = "settings";

/// Client for the Orderly merchant backend.
///
/// Cheap to clone; all clones share the HTTP connection pool and the
/// settings cache.
#[derive(Clone)]
pub struct OrderlyClient {
    inner: Arc<OrderlyClientInner>,
}

struct OrderlyClientInner {
    client: reqwest::Client,
    base_url: String,
    session_token: SecretString,
    settings_cache: Cache<&'static str, Settings>,
    /// Onboarding steps already reported, so repeat calls stay local.
    completed_steps: Mutex<HashSet<u32>>,
}

impl std::fmt::Debug for OrderlyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderlyClient")
            .field("base_url", &self.inner.base_url)
            .field("session_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl OrderlyClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let settings_cache = Cache::builder().max_capacity(1).build();

        Self {
            inner: Arc::new(OrderlyClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_base_url.clone(),
                session_token: config.session_token.clone(),
                settings_cache,
                completed_steps: Mutex::new(HashSet::new()),
            }),
        }
    }

    /// Fetch the merchant settings, cached after the first call.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend responds non-2xx.
    #[instrument(skip(self))]
    pub async fn fetch_settings(&self) -> Result<Settings, ClientError> {
        if let Some(settings) = self.inner.settings_cache.get(SETTINGS_CACHE_KEY).await {
            debug!("settings served from cache");
            return Ok(settings);
        }

        let url = format!("{}/settings", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(self.inner.session_token.expose_secret())
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let envelope: SettingsEnvelope = Self::parse_json(response).await?;
        self.inner
            .settings_cache
            .insert(SETTINGS_CACHE_KEY, envelope.settings.clone())
            .await;

        Ok(envelope.settings)
    }

    /// Look up an order's line items and creation time.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::OrderNotFound` when the backend reports no such
    /// order, and the usual transport/API errors otherwise.
    #[instrument(skip(self), fields(order_gid = %order_gid))]
    pub async fn fetch_order(&self, order_gid: &str) -> Result<RemoteOrder, ClientError> {
        let url = format!("{}/orders", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .query(&[("order_gid", order_gid)])
            .bearer_auth(self.inner.session_token.expose_secret())
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let lookup: OrderLookupResponse = Self::parse_json(response).await?;
        if !lookup.success {
            return Err(ClientError::OrderNotFound(order_gid.to_string()));
        }
        lookup
            .order
            .ok_or_else(|| ClientError::OrderNotFound(order_gid.to_string()))
    }

    /// Submit an order-edit payload.
    ///
    /// The payload should be built with
    /// [`build_payload`](orderly_core::build_payload); an empty payload is
    /// accepted by the backend as a no-op but callers normally guard with
    /// [`OrderEditPayload::is_empty`].
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend responds non-2xx.
    #[instrument(skip(self, payload), fields(order_gid = %payload.order_gid))]
    pub async fn submit_edit(&self, payload: &OrderEditPayload) -> Result<(), ClientError> {
        let url = format!("{}/orders", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(self.inner.session_token.expose_secret())
            .json(payload)
            .send()
            .await?;

        Self::check_status(response).await?;
        debug!("order edit submitted");
        Ok(())
    }

    /// Update the order's shipping address.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend responds non-2xx.
    #[instrument(skip(self, address), fields(order_gid = %order_gid))]
    pub async fn update_shipping_address(
        &self,
        order_gid: &str,
        address: &AddressInput,
    ) -> Result<(), ClientError> {
        self.post_address("orders/shipping-address", order_gid, address)
            .await
    }

    /// Update the order's billing address.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend responds non-2xx.
    #[instrument(skip(self, address), fields(order_gid = %order_gid))]
    pub async fn update_billing_address(
        &self,
        order_gid: &str,
        address: &AddressInput,
    ) -> Result<(), ClientError> {
        self.post_address("orders/billing-address", order_gid, address)
            .await
    }

    /// Update the shipping address optimistically.
    ///
    /// The new value is applied to `state` before the request goes out; on
    /// failure the previous value is restored and the error returned for the
    /// caller to display.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails; `state` is rolled back first.
    pub async fn update_shipping_address_optimistic(
        &self,
        state: &mut OptimisticAddress,
        order_gid: &str,
        address: AddressInput,
    ) -> Result<(), ClientError> {
        state.begin(address.clone());
        match self.update_shipping_address(order_gid, &address).await {
            Ok(()) => {
                state.commit();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "shipping address update failed, rolling back");
                state.roll_back();
                Err(err)
            }
        }
    }

    /// Report an onboarding step as completed.
    ///
    /// Idempotent per client instance: a step already reported successfully
    /// is not sent again. Failures are safe to ignore; nothing else depends
    /// on this call.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend responds non-2xx.
    #[instrument(skip(self))]
    pub async fn complete_onboarding_step(&self, step_number: u32) -> Result<(), ClientError> {
        {
            let completed = self
                .inner
                .completed_steps
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if completed.contains(&step_number) {
                debug!(step_number, "onboarding step already reported");
                return Ok(());
            }
        }

        let url = format!("{}/onboarding/complete-step", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(self.inner.session_token.expose_secret())
            .json(&CompleteStepRequest { step_number })
            .send()
            .await?;

        Self::check_status(response).await?;

        self.inner
            .completed_steps
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(step_number);
        debug!(step_number, "onboarding step reported");
        Ok(())
    }

    async fn post_address(
        &self,
        path: &str,
        order_gid: &str,
        address: &AddressInput,
    ) -> Result<(), ClientError> {
        let url = format!("{}/{path}", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .bearer_auth(self.inner.session_token.expose_secret())
            .json(&AddressUpdateRequest { order_gid, address })
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    /// Turn a non-2xx response into `ClientError::Api`.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Check the status, then parse the body as JSON.
    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::check_status(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(ClientError::Parse("empty response body".to_string()));
        }
        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}
