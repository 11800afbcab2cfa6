//! Model infrastructure module
//!
//! LLM providers behind the [`ModelProvider`] trait, built from configuration
//! by [`factory::ProviderFactory`].
//!
//! # Structure
//! - `types` - Request, Response, Error types
//! - `traits` - ModelProvider, ModelClient traits
//! - `adapter` - Message format adapters
//! - `factory` - Provider factory for creating clients
//! - `clients` - Individual client implementations
//! - `provider` - DynamicModelProvider for routing

pub mod adapter;
pub mod clients;
pub mod factory;
pub mod provider;
pub mod traits;
pub mod types;

pub use provider::DynamicModelProvider;
pub use traits::{ModelClient, ModelProvider};
pub use types::{ModelError, ModelRequest, ModelResponse};
