//! Transformation stage applying a frozen transformer set to specifications

use anyhow::{anyhow, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::specification::Specification;
use crate::transformer::TransformerSet;
use crate::TransformError;

/// Outcome of applying a stage to one specification
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    /// Names of the transformers that ran
    pub applied: Vec<String>,

    /// Time spent applying the transformers
    pub duration: Duration,
}

/// Applies every transformer of a frozen set.
///
/// An empty set makes the stage a no-op.
#[derive(Debug, Clone, Default)]
pub struct TransformStage {
    transformers: TransformerSet,
}

impl TransformStage {
    pub fn new(transformers: TransformerSet) -> Self {
        Self { transformers }
    }

    pub fn transformers(&self) -> &TransformerSet {
        &self.transformers
    }

    /// Run every transformer against one specification
    pub fn apply(&self, specification: &mut Specification) -> Result<StageReport, TransformError> {
        let start = Instant::now();
        let mut applied = Vec::with_capacity(self.transformers.len());

        for transformer in self.transformers.resolve_all() {
            debug!(
                "Applying transformer {} to specification '{}'",
                transformer.name(),
                specification.name
            );
            transformer
                .transform(specification)
                .map_err(|source| TransformError {
                    transformer: transformer.name().to_string(),
                    specification: specification.name.clone(),
                    source,
                })?;
            applied.push(transformer.name().to_string());
        }

        Ok(StageReport {
            applied,
            duration: start.elapsed(),
        })
    }

    /// Transform many specifications concurrently, preserving input order
    pub async fn apply_all(&self, specifications: Vec<Specification>) -> Result<Vec<Specification>> {
        let count = specifications.len();
        let stage = Arc::new(self.clone());
        let mut tasks = JoinSet::new();

        for (index, mut specification) in specifications.into_iter().enumerate() {
            let stage = Arc::clone(&stage);
            tasks.spawn_blocking(move || {
                stage
                    .apply(&mut specification)
                    .map(|_| (index, specification))
            });
        }

        let mut results: Vec<Option<Specification>> = vec![None; count];
        while let Some(joined) = tasks.join_next().await {
            let (index, specification) = joined??;
            results[index] = Some(specification);
        }

        info!(
            "Applied {} transformer(s) to {} specification(s)",
            self.transformers.len(),
            count
        );

        results
            .into_iter()
            .map(|s| s.ok_or_else(|| anyhow!("Transformation task did not complete")))
            .collect()
    }
}
