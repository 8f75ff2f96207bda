//! admin-ajax client.
//!
//! Every call is a form-encoded POST to a single endpoint, told apart by the
//! `action` field. Responses use the WordPress envelope:
//!
//! ```text
//! { "success": true,  "data": { ... } }
//! { "success": false, "data": { "message": "..." } }   // or "data": "..."
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use mediakit_editor::LayoutState;

use crate::error::{ApiError, ApiResult};

/// Server-side handlers reachable through admin-ajax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AjaxAction {
    SaveMediaKit,
    LoadMediaKit,
    LoadComponent,
}

impl AjaxAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AjaxAction::SaveMediaKit => "gmkb_save_media_kit",
            AjaxAction::LoadMediaKit => "gmkb_load_media_kit",
            AjaxAction::LoadComponent => "gmkb_load_component",
        }
    }

    /// Prefix for error messages
    fn operation(&self) -> &'static str {
        match self {
            AjaxAction::SaveMediaKit => "Save",
            AjaxAction::LoadMediaKit => "Load",
            AjaxAction::LoadComponent => "Component load",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub ajax_url: String,
    pub nonce: String,
    pub post_id: String,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            ajax_url: String::new(),
            nonce: String::new(),
            post_id: String::new(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AjaxEnvelope {
    success: bool,
    #[serde(default)]
    data: Value,
}

/// What the server reports after a save
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveReceipt {
    #[serde(default)]
    pub media_kit_id: Option<u64>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub edit_url: Option<String>,
}

/// A stored layout plus the post metadata sent along with it
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMediaKit {
    pub state: LayoutState,
    pub media_kit_id: Option<u64>,
    pub title: Option<String>,
    pub preview_url: Option<String>,
}

/// Persistence client for one media kit post
#[derive(Clone, Debug)]
pub struct ApiService {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiService {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| ApiError::Http {
            operation: "Client setup",
            source,
        })?;

        Ok(Self { client, config })
    }

    /// Reuse an existing connection pool
    pub fn with_client(client: reqwest::Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        !self.config.ajax_url.is_empty()
    }

    /// Persist the whole layout
    pub async fn save(&self, state: &LayoutState) -> ApiResult<SaveReceipt> {
        let body = serde_json::to_string(state)?;
        let data = self
            .post(AjaxAction::SaveMediaKit, &[("state", body.as_str())])
            .await?;

        let receipt = match data {
            Value::Object(_) => serde_json::from_value(data).unwrap_or_default(),
            _ => SaveReceipt::default(),
        };
        info!(
            components = state.components.len(),
            media_kit_id = ?receipt.media_kit_id,
            "Media kit saved"
        );
        Ok(receipt)
    }

    /// Fetch the stored layout for this post
    pub async fn load(&self) -> ApiResult<LoadedMediaKit> {
        let data = self.post(AjaxAction::LoadMediaKit, &[]).await?;
        let loaded = parse_loaded(data)?;
        info!(
            components = loaded.state.components.len(),
            sections = loaded.state.sections.len(),
            "Media kit loaded"
        );
        Ok(loaded)
    }

    /// Fetch server-side data for one component; the payload shape is up to the component type
    pub async fn load_component(&self, component_id: &str) -> ApiResult<Value> {
        self.post(AjaxAction::LoadComponent, &[("component_id", component_id)])
            .await
    }

    async fn post(&self, action: AjaxAction, extra: &[(&str, &str)]) -> ApiResult<Value> {
        if !self.is_configured() {
            return Err(ApiError::NotConfigured);
        }
        let operation = action.operation();

        let mut form: Vec<(&str, &str)> = vec![
            ("action", action.as_str()),
            ("nonce", self.config.nonce.as_str()),
            ("post_id", self.config.post_id.as_str()),
        ];
        form.extend_from_slice(extra);

        debug!(action = action.as_str(), url = %self.config.ajax_url, "POST admin-ajax");

        let response = self
            .client
            .post(&self.config.ajax_url)
            .form(&form)
            .send()
            .await
            .map_err(|source| {
                error!(action = action.as_str(), error = %source, "Request failed");
                ApiError::Http { operation, source }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(action = action.as_str(), status = status.as_u16(), "Request failed");
            return Err(ApiError::Status {
                operation,
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| ApiError::Http { operation, source })?;
        let envelope: AjaxEnvelope = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{} response: {}", operation, e)))?;

        if !envelope.success {
            let message = rejection_message(&envelope.data)
                .unwrap_or_else(|| format!("{} failed", operation));
            error!(action = action.as_str(), %message, "Request rejected");
            return Err(ApiError::Rejected { message });
        }

        Ok(envelope.data)
    }
}

/// `data.message`, or `data` itself when the server sent a bare string
fn rejection_message(data: &Value) -> Option<String> {
    match data {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        },
        _ => None,
    }
}

fn parse_loaded(data: Value) -> ApiResult<LoadedMediaKit> {
    let Value::Object(mut map) = data else {
        return Err(ApiError::InvalidResponse("load response without data".into()));
    };

    let state = match map.remove("state") {
        // Post meta may come back double-encoded
        Some(Value::String(raw)) => serde_json::from_str(&raw)?,
        Some(value @ Value::Object(_)) => serde_json::from_value(value)?,
        Some(other) => {
            return Err(ApiError::InvalidResponse(format!(
                "state is not an object: {}",
                other
            )))
        }
        // Older endpoints answer with the layout itself
        None if map.contains_key("components") => {
            serde_json::from_value(Value::Object(map.clone()))?
        }
        None => return Err(ApiError::InvalidResponse("load response without state".into())),
    };

    Ok(LoadedMediaKit {
        state,
        media_kit_id: map.get("media_kit_id").and_then(Value::as_u64),
        title: map.get("title").and_then(Value::as_str).map(String::from),
        preview_url: map.get("preview_url").and_then(Value::as_str).map(String::from),
    })
}
