//! WASM HTTP client for a chain node endpoint.
//!
//! Talks to the node a `NetworkDescriptor` points at: `/wallet/balance` and
//! `/wallet/transfer`. Amounts cross this boundary in base units; the dialog
//! side of the client speaks display-unit decimal strings, so conversion
//! happens here in both directions.

use serde::{Deserialize, Serialize};

use saldo_common::amount::{self, NATIVE_DECIMALS};
use saldo_common::chain::{ChainClient, ChainError, TransferReceipt};

// ─── Request/Response types ──────────────────────────────────────────────────

#[derive(Serialize)]
struct BalanceRequest<'a> {
    address: &'a str,
}

#[derive(Deserialize)]
struct BalanceResponse {
    /// Base-unit amount as a decimal string (too wide for JSON numbers).
    balance: String,
}

#[derive(Serialize)]
struct TransferRequest<'a> {
    secret: &'a str,
    to: &'a str,
    /// Base-unit amount as a decimal string.
    amount: String,
}

#[derive(Deserialize)]
struct TransferResponse {
    tx_hash: String,
}

/// Error envelope the node attaches to 4xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(default)]
    available: Option<String>,
    #[serde(default)]
    requested: Option<String>,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Chain node client bound to one endpoint URL.
pub struct ChainRemote {
    endpoint: String,
}

impl ChainRemote {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    async fn post(&self, path: &str, body: &str) -> Result<String, ChainError> {
        let (status, text) = post_json(&self.endpoint, path, body)
            .await
            .map_err(ChainError::Transport)?;
        if status >= 400 {
            return Err(map_error_body(status, &text));
        }
        Ok(text)
    }
}

impl ChainClient for ChainRemote {
    async fn query_balance(&self, address: &str) -> Result<String, ChainError> {
        let body = serde_json::to_string(&BalanceRequest { address })
            .map_err(|e| ChainError::Transport(e.to_string()))?;
        let text = self.post("/wallet/balance", &body).await?;
        let resp: BalanceResponse = serde_json::from_str(&text)
            .map_err(|e| ChainError::Transport(format!("parse balance response: {e}")))?;
        let base: u128 = resp
            .balance
            .parse()
            .map_err(|_| ChainError::Transport(format!("bad balance from node: {}", resp.balance)))?;
        Ok(amount::from_base_units(base, NATIVE_DECIMALS))
    }

    async fn submit_transfer(
        &self,
        secret: &str,
        to: &str,
        amount: &str,
    ) -> Result<TransferReceipt, ChainError> {
        let base = amount::to_base_units(amount, NATIVE_DECIMALS)
            .map_err(|e| ChainError::InvalidAmount(e.to_string()))?;
        let body = serde_json::to_string(&TransferRequest {
            secret,
            to,
            amount: base.to_string(),
        })
        .map_err(|e| ChainError::Transport(e.to_string()))?;
        let text = self.post("/wallet/transfer", &body).await?;
        let resp: TransferResponse = serde_json::from_str(&text)
            .map_err(|e| ChainError::Transport(format!("parse transfer response: {e}")))?;
        Ok(TransferReceipt {
            tx_hash: resp.tx_hash,
            amount: amount.to_string(),
            to: to.to_string(),
        })
    }
}

/// Map a non-2xx response onto the error taxonomy. The node uses a JSON
/// envelope with a machine-readable code; anything else is a rejection with
/// the raw body as the message.
fn map_error_body(status: u16, text: &str) -> ChainError {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(text) {
        return match body.code.as_str() {
            "invalid-address" => ChainError::InvalidAddress(body.message),
            "insufficient-funds" => ChainError::InsufficientFunds {
                available: body.available.unwrap_or_default(),
                requested: body.requested.unwrap_or_default(),
            },
            _ => ChainError::Rejected(body.message),
        };
    }
    if status >= 500 {
        ChainError::Transport(format!("HTTP {status}: {text}"))
    } else {
        ChainError::Rejected(format!("HTTP {status}: {text}"))
    }
}

// ─── HTTP helpers (WASM) ─────────────────────────────────────────────────────

#[cfg(target_family = "wasm")]
async fn post_json(base_url: &str, path: &str, body: &str) -> Result<(u16, String), String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let url = format!("{}{}", base_url.trim_end_matches('/'), path);

    let opts = web_sys::RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(web_sys::RequestMode::Cors);
    opts.set_body(&wasm_bindgen::JsValue::from_str(body));

    let request = web_sys::Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| format!("Failed to create request: {:?}", e))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| format!("Failed to set header: {:?}", e))?;

    let window = web_sys::window().ok_or("No window")?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("Fetch failed: {:?}", e))?;

    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| "Response is not a Response object".to_string())?;

    let text = JsFuture::from(
        resp.text()
            .map_err(|e| format!("Failed to get text: {:?}", e))?,
    )
    .await
    .map_err(|e| format!("Failed to read body: {:?}", e))?;

    let text_str = text
        .as_string()
        .ok_or("Response body is not a string".to_string())?;

    Ok((resp.status(), text_str))
}

// Non-WASM stub for type checking
#[cfg(not(target_family = "wasm"))]
async fn post_json(
    _base_url: &str,
    _path: &str,
    _body: &str,
) -> Result<(u16, String), String> {
    Err("Chain client only available in WASM".to_string())
}
