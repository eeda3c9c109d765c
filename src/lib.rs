pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ResolverConfig;

pub use adapters::{BindingSnapshot, HttpBindingStore, InMemoryBindingStore};
pub use core::{conflict::ConflictReport, context::ResolutionContext, resolver::ConfigResolver};
pub use domain::model::{ResolvedAction, ResolvedConfig};
pub use domain::ports::BindingStore;
pub use utils::error::{ResolverError, Result};
