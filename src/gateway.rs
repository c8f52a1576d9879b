/*
 * This file is part of EcoSense.
 *
 * Copyright (C) 2025 EcoSense contributors
 *
 * EcoSense is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * EcoSense is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with EcoSense. If not, see <https://www.gnu.org/licenses/>.
 */

//! Outbound requests to the optimization backend.
//!
//! The gateway performs no retries, caching or deduplication. Every call is
//! independent and a failure is handed straight back to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::model::{
    DailyMetrics, EnergyComparison, FeatureImportance, Mode, RetrainResult, Room, ScheduleSlot,
    SimulationContext, SimulationResult, StatusSummary,
};

pub const STATUS_PATH: &str = "/api/status";
pub const DAILY_METRICS_PATH: &str = "/api/metrics/daily";
pub const SCHEDULE_PATH: &str = "/api/schedule/24h";
pub const ENERGY_COMPARISON_PATH: &str = "/api/energy/comparison";
pub const ROOMS_PATH: &str = "/api/rooms";
pub const FEATURES_PATH: &str = "/api/features";
pub const OPTIMIZATION_PATH: &str = "/api/optimization";
pub const PREDICT_PATH: &str = "/api/predict";
pub const RETRAIN_PATH: &str = "/api/retrain";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("malformed response from {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// One async operation per backend resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn status(&self) -> Result<StatusSummary, GatewayError>;
    async fn daily_metrics(&self) -> Result<DailyMetrics, GatewayError>;
    async fn schedule(&self, mode: &Mode) -> Result<Vec<ScheduleSlot>, GatewayError>;
    async fn energy_comparison(&self, mode: &Mode) -> Result<EnergyComparison, GatewayError>;
    async fn rooms(&self) -> Result<Vec<Room>, GatewayError>;
    async fn feature_importance(&self) -> Result<FeatureImportance, GatewayError>;
    async fn set_optimization(&self, enabled: bool) -> Result<(), GatewayError>;
    async fn run_simulation(&self, context: SimulationContext) -> Result<SimulationResult, GatewayError>;
    async fn trigger_retrain(&self) -> Result<RetrainResult, GatewayError>;
}

/// Parse and normalize a backend base URL (scheme must be http or https).
pub fn parse_base_url(base_url: &str) -> Result<Url, GatewayError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| GatewayError::InvalidBaseUrl(format!("{trimmed}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(GatewayError::InvalidBaseUrl(format!("unsupported scheme '{other}'"))),
    }
}

pub struct HttpGateway {
    client: Client,
    base: String,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let base = parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| GatewayError::Transport { path: base.to_string(), source })?;
        Ok(Self {
            client,
            base: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        let raw = format!("{}{}", self.base, path);
        Url::parse(&raw).map_err(|e| GatewayError::InvalidBaseUrl(format!("{raw}: {e}")))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
    ) -> Result<Vec<u8>, GatewayError> {
        let url = self.endpoint(path)?;
        debug!(%method, path, ?query, "backend request");

        let mut request = self.client.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let transport = |source| GatewayError::Transport { path: path.to_string(), source };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status { path: path.to_string(), status: status.as_u16() });
        }
        let bytes = response.bytes().await.map_err(transport)?;
        Ok(bytes.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, GatewayError> {
        let bytes = self.send(Method::GET, path, query, None).await?;
        decode(path, &bytes)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: Option<&B>) -> Result<T, GatewayError> {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|source| GatewayError::Malformed { path: path.to_string(), source })?;
        let bytes = self.send(Method::POST, path, &[], body).await?;
        decode(path, &bytes)
    }
}

fn decode<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(bytes).map_err(|source| GatewayError::Malformed { path: path.to_string(), source })
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn status(&self) -> Result<StatusSummary, GatewayError> {
        self.get_json(STATUS_PATH, &[]).await
    }

    async fn daily_metrics(&self) -> Result<DailyMetrics, GatewayError> {
        self.get_json(DAILY_METRICS_PATH, &[]).await
    }

    async fn schedule(&self, mode: &Mode) -> Result<Vec<ScheduleSlot>, GatewayError> {
        self.get_json(SCHEDULE_PATH, &[("mode", mode.as_str())]).await
    }

    async fn energy_comparison(&self, mode: &Mode) -> Result<EnergyComparison, GatewayError> {
        self.get_json(ENERGY_COMPARISON_PATH, &[("mode", mode.as_str())]).await
    }

    async fn rooms(&self) -> Result<Vec<Room>, GatewayError> {
        self.get_json(ROOMS_PATH, &[]).await
    }

    async fn feature_importance(&self) -> Result<FeatureImportance, GatewayError> {
        self.get_json(FEATURES_PATH, &[]).await
    }

    async fn set_optimization(&self, enabled: bool) -> Result<(), GatewayError> {
        // The acknowledgement body is not part of the contract.
        self.send(Method::POST, OPTIMIZATION_PATH, &[], Some(json!({ "enabled": enabled })))
            .await
            .map(|_| ())
    }

    async fn run_simulation(&self, context: SimulationContext) -> Result<SimulationResult, GatewayError> {
        self.post_json(PREDICT_PATH, Some(&context)).await
    }

    async fn trigger_retrain(&self) -> Result<RetrainResult, GatewayError> {
        self.post_json::<(), _>(RETRAIN_PATH, None).await
    }
}
