// Adapters layer: concrete binding stores behind the domain port.

pub mod http;
pub mod memory;

pub use http::HttpBindingStore;
pub use memory::{BindingSnapshot, InMemoryBindingStore};
