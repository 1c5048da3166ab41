//! beaconcha.in Client
//!
//! Validator lookups against the beaconcha.in v1 API.

use async_trait::async_trait;
use reqwest::{header::ACCEPT, StatusCode};
use serde::Deserialize;

use super::ValidatorFetcher;
use crate::error::{Result, StakingError};
use crate::model::ValidatorSnapshot;

pub const BEACONCHAIN_API_URL: &str = "https://beaconcha.in";

const PROVIDER_OK: &str = "OK";

/// beaconcha.in validator fetcher
pub struct BeaconChainClient {
    http: reqwest::Client,
    base_url: String,
}

impl BeaconChainClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: BEACONCHAIN_API_URL.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct ValidatorResponse {
    status: String,
    data: Option<ValidatorData>,
}

/// Subset of the provider's validator object
#[derive(Debug, Deserialize)]
struct ValidatorData {
    balance: u64,
    effectivebalance: u64,
    status: String,
    slashed: bool,
    validatorindex: u64,
}

impl From<ValidatorData> for ValidatorSnapshot {
    fn from(data: ValidatorData) -> Self {
        Self {
            validator_index: data.validatorindex,
            status: data.status,
            slashed: data.slashed,
            balance: data.balance,
            effective_balance: data.effectivebalance,
        }
    }
}

fn parse_validator(body: &str) -> Result<ValidatorSnapshot> {
    let response: ValidatorResponse = serde_json::from_str(body)
        .map_err(|e| StakingError::ValidatorUnavailable(format!("malformed response: {e}")))?;

    if response.status != PROVIDER_OK {
        return Err(StakingError::ValidatorUnavailable(format!(
            "provider status {}",
            response.status
        )));
    }

    response
        .data
        .map(ValidatorSnapshot::from)
        .ok_or_else(|| StakingError::ValidatorUnavailable("response has no data".into()))
}

#[async_trait]
impl ValidatorFetcher for BeaconChainClient {
    async fn fetch_validator(&self, index: u64) -> Result<ValidatorSnapshot> {
        let url = format!("{}/api/v1/validator/{index}", self.base_url.trim_end_matches('/'));

        let response = self.http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| StakingError::ValidatorUnavailable(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(StakingError::ValidatorUnavailable(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StakingError::ValidatorUnavailable(e.to_string()))?;

        let snapshot = parse_validator(&body)?;
        tracing::debug!(
            validator = snapshot.validator_index,
            status = %snapshot.status,
            balance = snapshot.balance,
            "Fetched validator"
        );
        Ok(snapshot)
    }

    fn name(&self) -> &str {
        "beaconcha.in"
    }
}
