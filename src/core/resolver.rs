use crate::core::assembler::assemble;
use crate::core::conflict::ConflictReport;
use crate::core::context::ResolutionContext;
use crate::core::precedence::rank_candidates;
use crate::domain::model::{CandidateRow, ResolvedConfig};
use crate::domain::ports::BindingStore;
use crate::utils::error::Result;
use std::time::Instant;

/// Resolves one winning action per gesture for a request context.
///
/// Stateless apart from the store handle: every call queries the store once
/// and nothing is cached between calls.
pub struct ConfigResolver<S: BindingStore> {
    store: S,
}

impl<S: BindingStore> ConfigResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn resolve_configuration(
        &self,
        username: Option<&str>,
        application_code: Option<&str>,
        os: Option<&str>,
    ) -> Result<ResolvedConfig> {
        let context = ResolutionContext::new(username, application_code, os);
        self.resolve(&context).await
    }

    #[tracing::instrument(
        skip(self),
        fields(
            username = context.username().unwrap_or("-"),
            application = context.application_code().unwrap_or("-"),
            os = context.os(),
        )
    )]
    pub async fn resolve(&self, context: &ResolutionContext) -> Result<ResolvedConfig> {
        let started = Instant::now();
        let ranked = self.ranked_candidates(context).await?;
        let mappings = assemble(&ranked)?;

        tracing::info!(
            candidates = ranked.len(),
            mappings = mappings.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "resolved gesture configuration"
        );

        Ok(ResolvedConfig {
            username: context.username().map(str::to_string),
            application_code: context.application_code().map(str::to_string),
            os: context.os().to_string(),
            mappings,
        })
    }

    /// Lists the gestures whose candidates compete in this context.
    pub async fn explain(
        &self,
        username: Option<&str>,
        application_code: Option<&str>,
        os: Option<&str>,
    ) -> Result<ConflictReport> {
        let context = ResolutionContext::new(username, application_code, os);
        let ranked = self.ranked_candidates(&context).await?;
        let report = ConflictReport::from_ranked(&ranked)?;

        if report.has_conflicts() {
            tracing::warn!(
                conflicts = report.conflicts.len(),
                "⚠️ competing bindings found for {} gesture(s)",
                report.conflicts.len()
            );
        }

        Ok(report)
    }

    async fn ranked_candidates(&self, context: &ResolutionContext) -> Result<Vec<CandidateRow>> {
        let mut rows = self.store.query_candidates(context).await.map_err(|e| {
            tracing::error!("❌ binding store query failed: {}", e);
            e
        })?;
        tracing::debug!("store returned {} candidate rows", rows.len());

        rank_candidates(&mut rows, context);
        Ok(rows)
    }
}
