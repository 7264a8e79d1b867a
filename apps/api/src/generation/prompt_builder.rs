//! Prompt Builder: maps a validated `CvRequest` to the instruction text.
//!
//! Pure and deterministic. All semantic judgment (language detection, domain
//! overlap, scoring) is requested from the model here, never computed locally.

use crate::generation::models::CvRequest;
use crate::generation::prompts::{
    CV_GENERATION_PROMPT_TEMPLATE, CV_GENERATION_SYSTEM, CV_OUTPUT_SCHEMA,
    EXPERIENCE_POLICY_NO_FIELD, EXPERIENCE_POLICY_WITH_FIELD,
};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::Prompt;

const FIELD_NOT_SPECIFIED: &str = "Not specified";

/// Builds the generation prompt. Every candidate fact is embedded verbatim;
/// the credential is not a fact and never appears in the prompt.
pub fn build_prompt(request: &CvRequest) -> Prompt {
    let profile = request.profile();

    let experience_policy = match request.experience_field() {
        Some(field) => {
            fill_template(EXPERIENCE_POLICY_WITH_FIELD, &[("experience_field", field)])
        }
        None => EXPERIENCE_POLICY_NO_FIELD.to_string(),
    };

    let user = fill_template(
        CV_GENERATION_PROMPT_TEMPLATE,
        &[
            ("name", profile.name()),
            ("email", profile.email()),
            ("phone", profile.phone()),
            ("location", profile.location()),
            ("education", profile.education()),
            ("experience_level", request.experience_level().describe()),
            (
                "experience_field",
                request.experience_field().unwrap_or(FIELD_NOT_SPECIFIED),
            ),
            ("job_description", request.job_description()),
            ("experience_policy", experience_policy.as_str()),
            ("output_schema", CV_OUTPUT_SCHEMA),
        ],
    );

    Prompt {
        system: format!("{CV_GENERATION_SYSTEM} {JSON_ONLY_INSTRUCTION}"),
        user,
        output_schema: CV_OUTPUT_SCHEMA,
    }
}

/// Substitutes `{key}` placeholders in one pass over `template`.
/// Substituted values are never rescanned, so user text containing `{...}` is
/// embedded as-is. Unknown `{...}` sequences (e.g. JSON braces) are kept literally.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let replacement = after_open.find('}').and_then(|close| {
            let key = &after_open[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}
