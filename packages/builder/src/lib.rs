//! # Media Kit Builder
//!
//! Wires the editor, renderer and persistence client into one page context.
//!
//! ```text
//! gesture → BuilderContext → StateManager::dispatch → subscribers
//!                                   │                    ├─ page re-render (Renderer + diff)
//!                                   │                    └─ AutoSaver (debounced)
//!                                   └─ toolbar save/load → ApiService → toast
//! ```

pub mod config;
pub mod context;
pub mod error;

pub use config::{BuilderConfig, DEFAULT_CONFIG_NAME};
pub use context::BuilderContext;
pub use error::{BuilderError, BuilderResult};
