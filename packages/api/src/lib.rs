//! # Media Kit API
//!
//! Persistence for media kit layouts over WordPress admin-ajax.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mediakit_api::{ApiConfig, ApiService};
//!
//! let api = ApiService::new(ApiConfig {
//!     ajax_url: "https://example.com/wp-admin/admin-ajax.php".into(),
//!     nonce: "abc123".into(),
//!     post_id: "42".into(),
//!     ..ApiConfig::default()
//! })?;
//!
//! let loaded = api.load().await?;
//! api.save(&loaded.state).await?;
//! ```

pub mod autosave;
pub mod client;
pub mod error;

pub use autosave::{AutoSaver, DEFAULT_AUTOSAVE_DELAY};
pub use client::{AjaxAction, ApiConfig, ApiService, LoadedMediaKit, SaveReceipt};
pub use error::{ApiError, ApiResult};
