//! CV Generation: runs the pipeline for one request.
//!
//! Flow: build_prompt → llm_client::generate (one call, bounded by timeout) →
//!       normalize → return.
//!
//! No retries, no partial documents. Either a schema-valid `GeneratedCv` comes
//! back or a typed error does.

use std::time::Duration;

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::models::{CvRequest, GeneratedCv};
use crate::generation::normalizer::normalize;
use crate::generation::prompt_builder::build_prompt;
use crate::llm_client::{self, CompletionOptions, CompletionProvider};

/// Per-call constraints applied to every generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub options: CompletionOptions,
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            options: CompletionOptions::default(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Runs Prompt Builder → Generation Client → Response Normalizer.
pub async fn generate_cv(
    provider: &dyn CompletionProvider,
    settings: &GenerationSettings,
    request: &CvRequest,
) -> Result<GeneratedCv, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "generate_cv",
        %request_id,
        experience_level = %request.experience_level(),
    );

    async move {
        let prompt = build_prompt(request);
        info!(
            "Built prompt: {} chars (job description {} chars)",
            prompt.user.len(),
            request.job_description().len()
        );

        let raw = llm_client::generate(
            provider,
            &prompt,
            request.credential(),
            &settings.options,
            settings.timeout,
        )
        .await?;

        let cv = normalize(&raw).map_err(|e| {
            warn!("Provider response rejected: {e}");
            e
        })?;

        info!(
            "Generated CV: format={:?}, ats_score={}, {} experience entries, {} warnings",
            cv.format,
            cv.ats_score,
            cv.experience.len(),
            cv.warnings.len()
        );

        Ok(cv)
    }
    .instrument(span)
    .await
}
