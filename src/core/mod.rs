pub mod assembler;
pub mod conflict;
pub mod context;
pub mod precedence;
pub mod resolver;

pub use crate::domain::model::{CandidateRow, GestureMapping, ResolvedAction, ResolvedConfig};
pub use crate::domain::ports::BindingStore;
pub use crate::utils::error::Result;
