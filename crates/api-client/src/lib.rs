// In crates/api-client/src/lib.rs

use app_config::types::BinanceSettings;
use chrono::Utc;
use core_types::{Kline, Side, Symbol};
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::Sha256;
// Create a type alias for the HMAC-SHA256 implementation.
type HmacSha256 = Hmac<Sha256>;

pub mod candles;
pub mod error;
pub mod types;

// Re-export public types
pub use candles::CandleSource;
pub use error::{Error, Result};
pub use types::*;

/// Binance caps `limit` on the klines endpoint.
pub const MAX_KLINES_PER_REQUEST: usize = 1500;

impl ApiClient {
    /// Constructs a new ApiClient from BinanceSettings.
    pub fn new(settings: &BinanceSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(ApiClient {
            http_client,
            api_key: settings.api_key.clone(),
            secret_key: settings.secret_key.clone(),
            base_url: settings.rest_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Generates a hex encoded HMAC-SHA256 signature for a query string.
    fn sign(&self, query_string: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| Error::ClientBuildError(format!("invalid secret key: {e}")))?;
        mac.update(query_string.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Appends the timestamp and signature to `params`.
    fn create_signed_query(&self, params: &mut String) -> Result<()> {
        let timestamp = Utc::now().timestamp_millis();

        if !params.is_empty() {
            params.push('&');
        }
        params.push_str(&format!("timestamp={}", timestamp));

        let signature = self.sign(params)?;
        params.push_str(&format!("&signature={}", signature));
        Ok(())
    }

    /// Fetches the most recent klines, oldest first.
    ///
    /// This corresponds to the `GET /fapi/v1/klines` endpoint. The last kline
    /// returned by Binance is usually still forming.
    pub async fn get_klines(&self, symbol: &Symbol, interval: &str, limit: usize) -> Result<Vec<Kline>> {
        let limit = limit.clamp(1, MAX_KLINES_PER_REQUEST);
        let url = format!(
            "{}/fapi/v1/klines?symbol={}&interval={}&limit={}",
            self.base_url, symbol.0, interval, limit
        );

        let response_body = self
            .http_client
            .get(&url)
            .send()
            .await?
            .text()
            .await?;

        let raw_klines: Vec<RawKline> = parse_response(&response_body)?;
        raw_klines.into_iter().map(kline_from_raw).collect()
    }

    /// Places a market order. Corresponds to `POST /fapi/v1/order`.
    pub async fn place_market_order(
        &self,
        symbol: &Symbol,
        side: Side,
        quantity: Decimal,
    ) -> Result<NewOrderResponse> {
        let params = format!(
            "symbol={}&side={}&type=MARKET&quantity={}&newOrderRespType=RESULT",
            symbol.0,
            side.as_str(),
            quantity.normalize()
        );
        self.post_signed("/fapi/v1/order", params).await
    }

    /// Places a reduce-only stop or target that closes the whole position.
    ///
    /// `side` is the side of the protective order, i.e. opposite to the entry.
    pub async fn place_protective_order(
        &self,
        symbol: &Symbol,
        side: Side,
        kind: ProtectiveKind,
        stop_price: Decimal,
    ) -> Result<NewOrderResponse> {
        let params = format!(
            "symbol={}&side={}&type={}&stopPrice={}&closePosition=true&workingType=MARK_PRICE",
            symbol.0,
            side.as_str(),
            kind.order_type(),
            stop_price.normalize()
        );
        self.post_signed("/fapi/v1/order", params).await
    }

    async fn post_signed<T: DeserializeOwned>(&self, path: &str, mut params: String) -> Result<T> {
        self.create_signed_query(&mut params)?;
        let url = format!("{}{}", self.base_url, path);

        let text = self
            .http_client
            .post(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(params)
            .send()
            .await?
            .text()
            .await?;

        parse_response(&text)
    }
}

/// Deserializes a Binance response body, surfacing Binance error objects
/// (`{"code": -1121, "msg": "..."}`) as `Error::ApiError`.
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: Value = serde_json::from_str(body)?;

    if let Some(code) = value.get("code").and_then(Value::as_i64) {
        if code != 0 && value.get("msg").is_some() {
            let msg = value.get("msg").and_then(Value::as_str).unwrap_or("Unknown error").to_string();
            return Err(Error::ApiError { code, msg });
        }
    }

    Ok(serde_json::from_value(value)?)
}

fn kline_from_raw(raw: RawKline) -> Result<Kline> {
    let price = |field: &str| {
        field
            .parse::<f64>()
            .map_err(|_| Error::DataUnavailable(format!("malformed kline field '{field}'")))
    };

    Ok(Kline {
        open_time: raw.0,
        open: price(&raw.1)?,
        high: price(&raw.2)?,
        low: price(&raw.3)?,
        close: price(&raw.4)?,
        volume: price(&raw.5)?,
        close_time: raw.6,
    })
}

// Free function to allow api_client::new usage
pub fn new(settings: &BinanceSettings) -> Result<ApiClient> {
    ApiClient::new(settings)
}
