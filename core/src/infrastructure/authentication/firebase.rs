use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use jsonwebtoken::{
    Algorithm, DecodingKey, Validation, decode, decode_header,
    errors::ErrorKind,
    jwk::{Jwk, JwkSet},
};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::domain::{
    authentication::{ports::TokenVerifier, value_objects::Identity},
    common::entities::app_errors::CoreError,
};

pub const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

const JWKS_TTL: Duration = Duration::from_secs(60 * 60);
const MIN_REFETCH_INTERVAL: Duration = Duration::from_secs(60);

/// Verifies Firebase ID tokens against Google's published signing keys.
#[derive(Clone)]
pub struct FirebaseTokenVerifier {
    project_id: String,
    jwks_url: String,
    client: Client,
    keys: Arc<RwLock<Option<CachedKeys>>>,
    min_refetch_interval: Duration,
}

struct CachedKeys {
    set: JwkSet,
    fetched_at: Instant,
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    phone_number: Option<String>,
}

impl FirebaseTokenVerifier {
    pub fn new(project_id: String, jwks_url: String) -> Self {
        Self {
            project_id,
            jwks_url,
            client: Client::new(),
            keys: Arc::new(RwLock::new(None)),
            min_refetch_interval: MIN_REFETCH_INTERVAL,
        }
    }

    fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }

    async fn fetch_keys(&self) -> Result<JwkSet, CoreError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to fetch signing keys: {}", e);
                CoreError::ExternalServiceError(format!("Failed to fetch signing keys: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!("Signing key endpoint returned {}", status);
            return Err(CoreError::ExternalServiceError(format!(
                "Signing key endpoint returned {}",
                status
            )));
        }

        response.json::<JwkSet>().await.map_err(|e| {
            error!("Failed to parse signing keys: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse signing keys: {}", e))
        })
    }

    /// Looks `kid` up in the cached key set, refetching when the cache is
    /// stale or does not know the key. Unknown keys trigger at most one
    /// refetch per `min_refetch_interval`.
    async fn find_key(&self, kid: &str) -> Result<Option<Jwk>, CoreError> {
        {
            let cached = self.keys.read().await;
            if let Some(lookup) = self.lookup_cached(cached.as_ref(), kid) {
                return Ok(lookup);
            }
        }

        let mut cached = self.keys.write().await;
        if let Some(lookup) = self.lookup_cached(cached.as_ref(), kid) {
            return Ok(lookup);
        }

        debug!("Refreshing signing keys for kid {}", kid);
        let set = self.fetch_keys().await?;
        let key = set.find(kid).cloned();

        *cached = Some(CachedKeys {
            set,
            fetched_at: Instant::now(),
        });

        Ok(key)
    }

    /// `Some` when the cache can answer without a refetch.
    fn lookup_cached(&self, cached: Option<&CachedKeys>, kid: &str) -> Option<Option<Jwk>> {
        let cached = cached?;
        let age = cached.fetched_at.elapsed();
        if age >= JWKS_TTL {
            return None;
        }

        match cached.set.find(kid) {
            Some(key) => Some(Some(key.clone())),
            None if age < self.min_refetch_interval => Some(None),
            None => None,
        }
    }
}

impl TokenVerifier for FirebaseTokenVerifier {
    async fn verify_token(&self, token: &str) -> Result<Identity, CoreError> {
        let header = decode_header(token).map_err(|e| {
            debug!("Malformed token header: {}", e);
            CoreError::InvalidToken
        })?;
        let kid = header.kid.ok_or(CoreError::InvalidToken)?;

        let jwk = self.find_key(&kid).await?.ok_or_else(|| {
            warn!("Token signed with unknown key {}", kid);
            CoreError::InvalidToken
        })?;

        let decoding_key = DecodingKey::from_jwk(&jwk).map_err(|e| {
            error!("Unusable signing key {}: {}", kid, e);
            CoreError::InvalidToken
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[self.issuer()]);

        let data = decode::<FirebaseClaims>(token, &decoding_key, &validation).map_err(|e| {
            debug!("Token rejected: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => CoreError::TokenExpired,
                _ => CoreError::InvalidToken,
            }
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(CoreError::InvalidToken);
        }

        Ok(Identity::new(data.claims.sub, data.claims.phone_number))
    }
}
