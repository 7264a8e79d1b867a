//! Request validation: turns a raw form body into an immutable `CvRequest`.

use serde::Deserialize;
use thiserror::Error;

use crate::generation::models::{CandidateProfile, CvRequest, ExperienceLevel};
use crate::llm_client::ProviderCredential;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("experienceLevel must be one of fresh-graduate, junior, mid, senior (got '{value}')")]
    UnknownExperienceLevel { value: String },
}

/// Candidate facts as submitted by the form. Missing keys deserialize as empty
/// strings so they are reported as validation errors rather than JSON rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileBody {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub education: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCvBody {
    #[serde(flatten)]
    pub profile: ProfileBody,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub experience_field: Option<String>,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub api_key: String,
}

pub fn validate_profile(body: &ProfileBody) -> Result<CandidateProfile, ValidationError> {
    Ok(CandidateProfile {
        name: required("name", &body.name)?,
        email: required("email", &body.email)?,
        phone: required("phone", &body.phone)?,
        location: required("location", &body.location)?,
        education: required("education", &body.education)?,
    })
}

/// Checks every required field in a fixed order and reports the first failure.
pub fn validate_request(body: &GenerateCvBody) -> Result<CvRequest, ValidationError> {
    let api_key = required("apiKey", &body.api_key)?;
    let profile = validate_profile(&body.profile)?;

    let level = required("experienceLevel", &body.experience_level)?;
    let experience_level = ExperienceLevel::parse(&level)
        .ok_or(ValidationError::UnknownExperienceLevel { value: level })?;

    let job_description = required("jobDescription", &body.job_description)?;

    let experience_field = body
        .experience_field
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string);

    Ok(CvRequest {
        profile,
        experience_level,
        experience_field,
        job_description,
        credential: ProviderCredential::new(api_key),
    })
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn jane_doe_body() -> GenerateCvBody {
        GenerateCvBody {
            profile: ProfileBody {
                name: "Jane Doe".to_string(),
                email: "jane@x.com".to_string(),
                phone: "+1 555 0100".to_string(),
                location: "Remote".to_string(),
                education: "BSc CS".to_string(),
            },
            experience_level: "junior".to_string(),
            experience_field: None,
            job_description: "We are hiring a data engineer. Must know Python, SQL and Airflow."
                .to_string(),
            api_key: "gsk_jane_secret".to_string(),
        }
    }

    #[test]
    fn test_valid_body_builds_request() {
        let request = validate_request(&jane_doe_body()).unwrap();
        assert_eq!(request.profile().name(), "Jane Doe");
        assert_eq!(request.experience_level(), ExperienceLevel::Junior);
        assert_eq!(request.experience_field(), None);
        assert_eq!(request.credential().expose(), "gsk_jane_secret");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut body = jane_doe_body();
        body.profile.name = "  Jane Doe \n".to_string();
        body.experience_field = Some("  Data engineering ".to_string());

        let request = validate_request(&body).unwrap();
        assert_eq!(request.profile().name(), "Jane Doe");
        assert_eq!(request.experience_field(), Some("Data engineering"));
    }

    #[test]
    fn test_blank_experience_field_is_none() {
        let mut body = jane_doe_body();
        body.experience_field = Some("   ".to_string());
        assert_eq!(validate_request(&body).unwrap().experience_field(), None);
    }

    #[test]
    fn test_whitespace_only_field_is_missing() {
        let mut body = jane_doe_body();
        body.profile.phone = "   ".to_string();
        assert_eq!(
            validate_request(&body).unwrap_err(),
            ValidationError::MissingField { field: "phone" }
        );
    }

    #[test]
    fn test_api_key_checked_first() {
        let body = GenerateCvBody::default();
        assert_eq!(
            validate_request(&body).unwrap_err(),
            ValidationError::MissingField { field: "apiKey" }
        );
    }

    #[test]
    fn test_missing_job_description() {
        let mut body = jane_doe_body();
        body.job_description = String::new();
        assert_eq!(
            validate_request(&body).unwrap_err().to_string(),
            "jobDescription is required"
        );
    }

    #[test]
    fn test_unknown_experience_level() {
        let mut body = jane_doe_body();
        body.experience_level = "principal".to_string();
        assert!(matches!(
            validate_request(&body).unwrap_err(),
            ValidationError::UnknownExperienceLevel { value } if value == "principal"
        ));
    }

    #[test]
    fn test_body_deserializes_from_form_json() {
        let body: GenerateCvBody = serde_json::from_value(serde_json::json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "phone": "+1 555 0100",
            "location": "Remote",
            "education": "BSc CS",
            "experienceLevel": "fresh-graduate",
            "experienceField": "",
            "jobDescription": "Python, SQL",
            "apiKey": "k"
        }))
        .unwrap();

        assert_eq!(body.profile.education, "BSc CS");
        let request = validate_request(&body).unwrap();
        assert_eq!(request.experience_level(), ExperienceLevel::FreshGraduate);
        assert_eq!(request.experience_field(), None);
    }
}
