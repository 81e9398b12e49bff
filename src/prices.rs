//! Price source client: fetches the latest close per asset from the upstream
//! market-data service and appends the rows to the price history.
//!
//! The upstream contract is opaque to this service; all we rely on is a
//! `{symbol, close, date}` quote per asset. Refresh fetches with bounded
//! concurrency and a per-request timeout; individual failures are logged and
//! skipped so one slow or broken symbol never sinks the whole refresh.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::types::holding::PricePoint;

/// Quotes fetched in flight at once during a refresh.
const REFRESH_CONCURRENCY: usize = 4;

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[allow(dead_code)]
    symbol: String,
    close: Decimal,
    #[serde(default = "Utc::now")]
    date: DateTime<Utc>,
}

#[derive(Clone)]
pub struct PriceClient {
    http: reqwest::Client,
    base_url: String,
}

impl PriceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the latest close for one symbol.
    pub async fn fetch_latest_close(
        &self,
        asset_id: Uuid,
        symbol: &str,
    ) -> Result<PricePoint, reqwest::Error> {
        let url = format!("{}/quotes/latest", self.base_url);
        let quote: QuoteResponse = self
            .http
            .get(url)
            .query(&[("symbol", symbol)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(PricePoint {
            asset_id,
            close_price: quote.close,
            date: quote.date,
        })
    }

    /// Fetch latest closes for a set of assets with bounded concurrency.
    /// Returns the quotes that succeeded; failures are logged and skipped.
    pub async fn fetch_many(&self, assets: &[(Uuid, String)]) -> Vec<PricePoint> {
        let fetched: Vec<Option<PricePoint>> = futures::stream::iter(assets.iter().cloned())
            .map(|(asset_id, symbol)| {
                let client = self.clone();
                async move {
                    match client.fetch_latest_close(asset_id, &symbol).await {
                        Ok(point) => Some(point),
                        Err(e) => {
                            tracing::warn!(%symbol, error = %e, "price fetch failed, skipping");
                            None
                        }
                    }
                }
            })
            .buffer_unordered(REFRESH_CONCURRENCY)
            .collect()
            .await;
        fetched.into_iter().flatten().collect()
    }
}
