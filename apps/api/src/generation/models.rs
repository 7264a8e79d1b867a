//! Request and document types for CV generation.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::llm_client::ProviderCredential;

// ────────────────────────────────────────────────────────────────────────────
// Request side
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    FreshGraduate,
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::FreshGraduate,
        ExperienceLevel::Junior,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::FreshGraduate => "fresh-graduate",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }

    /// Human description used inside the prompt.
    pub fn describe(&self) -> &'static str {
        match self {
            ExperienceLevel::FreshGraduate => "Fresh graduate (no professional experience yet)",
            ExperienceLevel::Junior => "Junior (1-2 years of experience)",
            ExperienceLevel::Mid => "Mid-level (3-5 years of experience)",
            ExperienceLevel::Senior => "Senior (6+ years of experience)",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and education facts, shared by generation and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProfile {
    pub(super) name: String,
    pub(super) email: String,
    pub(super) phone: String,
    pub(super) location: String,
    pub(super) education: String,
}

impl CandidateProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn education(&self) -> &str {
        &self.education
    }
}

/// A validated generation request. Only `validation::validate_request` builds
/// one, and nothing downstream can mutate it.
#[derive(Debug, Clone)]
pub struct CvRequest {
    pub(super) profile: CandidateProfile,
    pub(super) experience_level: ExperienceLevel,
    pub(super) experience_field: Option<String>,
    pub(super) job_description: String,
    pub(super) credential: ProviderCredential,
}

impl CvRequest {
    pub fn profile(&self) -> &CandidateProfile {
        &self.profile
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        self.experience_level
    }

    pub fn experience_field(&self) -> Option<&str> {
        self.experience_field.as_deref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn credential(&self) -> &ProviderCredential {
        &self.credential
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document side
// ────────────────────────────────────────────────────────────────────────────

/// Market convention the provider chose, decided by the job description's language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CvFormat {
    LocalMarket,
    International,
}

impl CvFormat {
    pub const VARIANTS: &'static [&'static str] = &["local-market", "international"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub period: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvWarning {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

/// The validated output document. Everything here was decided by the provider;
/// nothing is recomputed locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCv {
    pub format: CvFormat,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<SkillCategory>,
    pub keywords: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub matched_skills: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub missing_skills: BTreeSet<String>,
    pub ats_score: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CvWarning>,
}
