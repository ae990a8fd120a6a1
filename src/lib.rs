//! # Modi Prompt
//!
//! Turns a short concept plus cinematic preferences into a structured
//! text-to-video prompt by calling one of several LLM providers.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Provider Adapters**: Gemini, OpenAI-compatible (OpenAI, OpenRouter), Anthropic,
//!   and a backend aggregator, each with its own endpoint, credential placement, and
//!   response shape.
//! - **Static Registry**: Models are looked up by display name; the table is fixed at
//!   construction.
//! - **Shared Key Pool**: Optional pool of interchangeable keys with a failed set,
//!   injected into the dispatcher.
//! - **Pluggable Transport**: All network traffic goes through `HttpTransport`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modi_prompt::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dispatcher = AppConfig::from_env()?.build_dispatcher()?;
//!     let options = GenerationOptions::new().with_pacing("Slow burn");
//!     let prompt = dispatcher
//!         .generate("Gemini 2.5 Flash", "a lighthouse in a storm", &options, "your-api-key")
//!         .await?;
//!     println!("{}", render::format_json_output(&prompt));
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod execution;
pub mod key_pool;
pub mod prompt;
pub mod providers;
pub mod registry;
pub mod render;
pub mod telemetry;
pub mod types;

pub use aggregator::AggregatorClient;
pub use config::{AppConfig, DispatchMode, ProviderEndpoints};
pub use dispatcher::Dispatcher;
pub use error::{ErrorCategory, PromptError, Result};
pub use key_pool::KeyPool;
pub use registry::{DEFAULT_MODEL, ProviderRegistry};
pub use types::{GenerationOptions, HttpConfig, KeyStats, ModelInfo};

pub mod prelude {
    pub use crate::execution::http::{HttpTransport, ReqwestTransport};
    pub use crate::providers::{CredentialPlacement, ProviderAdapter, Vendor};
    pub use crate::render;
    pub use crate::types::{
        CameraDirection, CameraStyle, Pacing, PromptLength, SpecialEffects, VisualStyle,
    };
    pub use crate::{
        AggregatorClient, AppConfig, DEFAULT_MODEL, DispatchMode, Dispatcher, ErrorCategory,
        GenerationOptions, HttpConfig, KeyPool, KeyStats, ModelInfo, PromptError,
        ProviderEndpoints, ProviderRegistry,
    };
}
