// --- File: crates/padel_playtomic/src/client.rs ---
//! HTTP client for the remote booking service.
//!
//! Three base URLs are involved: the public catalogue (venues, resources,
//! availability), the authenticated API (matches, payment intents) and the
//! auth endpoint. Only requests against the authenticated API carry the
//! bearer token.

use std::time::Duration;

use chrono::{DateTime, Utc};
use padel_config::ApiConfig;
use reqwest::{header, Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::error::PlaytomicError;
use crate::models::{
    AuthResponse, AvailabilityResource, ConfirmationResponse, GeocodeHit, LoginRequest, Match,
    PaymentIntentRequest, PaymentIntentResponse, PaymentIntentUpdateRequest, Resource, Tenant,
    SPORT_ID,
};

/// Layout of the `start_min` / `start_max` query parameters.
const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Copy)]
enum Base {
    Public,
    Api,
    Auth,
}

/// Client for the remote booking service.
#[derive(Debug, Clone)]
pub struct PlaytomicClient {
    http: Client,
    config: ApiConfig,
    access_token: Option<String>,
}

impl PlaytomicClient {
    /// Builds a client with the configured request timeout.
    pub fn new(config: ApiConfig) -> Result<Self, PlaytomicError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config,
            access_token: None,
        })
    }

    /// Sets the bearer token used for authenticated API calls.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.access_token = (!token.is_empty()).then_some(token);
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.set_access_token(token);
        self
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // --- Public catalogue ---

    pub async fn get_tenants(
        &self,
        lat: f64,
        lon: f64,
        radius: u32,
    ) -> Result<Vec<Tenant>, PlaytomicError> {
        let query = [
            ("sport_id", SPORT_ID.to_string()),
            ("coordinate", format!("{:.6},{:.6}", lat, lon)),
            ("radius", radius.to_string()),
        ];
        let request = self.request(Method::GET, Base::Public, &["tenants"], &query)?;
        self.send_json(request).await
    }

    pub async fn get_tenant(&self, tenant_id: &str) -> Result<Tenant, PlaytomicError> {
        let request = self.request(Method::GET, Base::Public, &["tenants", tenant_id], &[])?;
        self.send_json(request).await
    }

    pub async fn get_resources(&self, tenant_id: &str) -> Result<Vec<Resource>, PlaytomicError> {
        let request = self.request(
            Method::GET,
            Base::Public,
            &["tenants", tenant_id, "resources"],
            &[],
        )?;
        self.send_json(request).await
    }

    /// Availability between two UTC instants, both sent without offset.
    pub async fn get_availability(
        &self,
        tenant_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AvailabilityResource>, PlaytomicError> {
        let query = [
            ("sport_id", SPORT_ID.to_string()),
            ("tenant_id", tenant_id.to_string()),
            ("start_min", start.format(QUERY_TIME_FORMAT).to_string()),
            ("start_max", end.format(QUERY_TIME_FORMAT).to_string()),
        ];
        let request = self.request(Method::GET, Base::Public, &["availability"], &query)?;
        self.send_json(request).await
    }

    /// Resolves a free-text place to `(lat, lon)` through the geocoder.
    pub async fn geocode(&self, query: &str) -> Result<(f64, f64), PlaytomicError> {
        let url = Url::parse(&self.config.geocode_url)
            .map_err(|e| PlaytomicError::UrlError(format!("{}: {}", self.config.geocode_url, e)))?;
        debug!("Geocoding {:?}", query);
        let response = self
            .http
            .get(url)
            .query(&[("format", "json"), ("limit", "1"), ("q", query)])
            .header(header::USER_AGENT, &self.config.user_agent)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!("Geocoder returned {}", status);
            return Err(PlaytomicError::GeocodeError {
                status: status.to_string(),
                body: body.trim().to_string(),
            });
        }

        let hits: Vec<GeocodeHit> = serde_json::from_str(&body)?;
        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| PlaytomicError::NoGeocodeResults(query.to_string()))?;
        let lat = hit
            .lat
            .parse::<f64>()
            .map_err(|e| PlaytomicError::InvalidResponse(format!("lat {:?}: {}", hit.lat, e)))?;
        let lon = hit
            .lon
            .parse::<f64>()
            .map_err(|e| PlaytomicError::InvalidResponse(format!("lon {:?}: {}", hit.lon, e)))?;
        Ok((lat, lon))
    }

    // --- Auth ---

    /// Logs in and keeps the returned access token for later API calls.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, PlaytomicError> {
        let request = self
            .request(Method::POST, Base::Auth, &["auth", "login"], &[])?
            .json(&LoginRequest { email, password });
        let response: AuthResponse = self.send_json(request).await?;
        if response.access_token.is_empty() {
            return Err(PlaytomicError::MissingAccessToken);
        }
        self.set_access_token(response.access_token.clone());
        info!("Logged in as user {}", response.user_id);
        Ok(response)
    }

    // --- Authenticated API ---

    pub async fn create_payment_intent(
        &self,
        payload: &PaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, PlaytomicError> {
        let request = self
            .request(Method::POST, Base::Api, &["payment_intents"], &[])?
            .json(payload);
        let response: PaymentIntentResponse = self.send_json(request).await?;
        if response.payment_intent_id.is_empty() {
            return Err(PlaytomicError::MissingPaymentIntentId);
        }
        Ok(response)
    }

    pub async fn update_payment_intent(
        &self,
        payment_intent_id: &str,
        payload: &PaymentIntentUpdateRequest,
    ) -> Result<(), PlaytomicError> {
        let request = self
            .request(
                Method::PATCH,
                Base::Api,
                &["payment_intents", payment_intent_id],
                &[],
            )?
            .json(payload);
        self.send_status(request).await
    }

    pub async fn confirm_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<ConfirmationResponse, PlaytomicError> {
        let request = self.request(
            Method::POST,
            Base::Api,
            &["payment_intents", payment_intent_id, "confirmation"],
            &[],
        )?;
        self.send_json(request).await
    }

    /// Matches owned by `owner_id`, one page of `size` entries.
    pub async fn get_matches(
        &self,
        size: u32,
        sort: &str,
        owner_id: &str,
    ) -> Result<Vec<Match>, PlaytomicError> {
        let query = [
            ("size", size.to_string()),
            ("sort", sort.to_string()),
            ("owner_id", owner_id.to_string()),
        ];
        let request = self.request(Method::GET, Base::Api, &["matches"], &query)?;
        self.send_json(request).await
    }

    // --- Plumbing ---

    fn base_url(&self, base: Base) -> &str {
        match base {
            Base::Public => &self.config.public_base_url,
            Base::Api => &self.config.api_base_url,
            Base::Auth => &self.config.auth_base_url,
        }
    }

    fn request(
        &self,
        method: Method,
        base: Base,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<RequestBuilder, PlaytomicError> {
        let base_url = self.base_url(base);
        let mut url = Url::parse(base_url)
            .map_err(|e| PlaytomicError::UrlError(format!("{}: {}", base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| PlaytomicError::UrlError(format!("{} cannot be a base", base_url)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        debug!("{} {}", method, url.path());
        let mut builder = self
            .http
            .request(method, url)
            .header(header::USER_AGENT, &self.config.user_agent)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");
        if !self.config.requested_with.is_empty() {
            builder = builder.header("X-Requested-With", &self.config.requested_with);
        }
        if let (Base::Api, Some(token)) = (base, &self.access_token) {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Sends the request and decodes the body; an empty body decodes to the default value.
    async fn send_json<T>(&self, request: RequestBuilder) -> Result<T, PlaytomicError>
    where
        T: DeserializeOwned + Default,
    {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!("Remote request failed with {}", status);
            return Err(PlaytomicError::ApiError {
                status: status.to_string(),
                body: body.trim().to_string(),
            });
        }
        if body.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to decode response body: {}", e);
            PlaytomicError::ParseError(e)
        })
    }

    async fn send_status(&self, request: RequestBuilder) -> Result<(), PlaytomicError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Remote request failed with {}", status);
            return Err(PlaytomicError::ApiError {
                status: status.to_string(),
                body: body.trim().to_string(),
            });
        }
        Ok(())
    }
}
