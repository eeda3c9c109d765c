use crate::core::context::ResolutionContext;
use crate::domain::model::CandidateRow;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of candidate bindings for a resolution context.
///
/// Implementations must only return rows for enabled bindings whose user,
/// application and OS scope admit the context. Failures are returned as-is
/// and are never retried by the resolver.
#[async_trait]
pub trait BindingStore: Send + Sync {
    async fn query_candidates(&self, context: &ResolutionContext) -> Result<Vec<CandidateRow>>;
}

#[async_trait]
impl<S: BindingStore + ?Sized> BindingStore for std::sync::Arc<S> {
    async fn query_candidates(&self, context: &ResolutionContext) -> Result<Vec<CandidateRow>> {
        (**self).query_candidates(context).await
    }
}
