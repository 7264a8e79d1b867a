//! Plain-text rendering of a generated CV.
//!
//! ATS parsers read plain text best: fixed English headings, one fact per line,
//! `- ` bullets, no tables or columns. Headings follow the same policy the
//! prompt gives the model, while all content stays in the document's language.

use crate::generation::models::{CandidateProfile, GeneratedCv};

pub const SUMMARY_HEADING: &str = "PROFESSIONAL SUMMARY";
pub const EXPERIENCE_HEADING: &str = "WORK EXPERIENCE";
pub const EDUCATION_HEADING: &str = "EDUCATION";
pub const SKILLS_HEADING: &str = "SKILLS";

/// Renders the CV body. Score, keywords and warnings are advisory and are not
/// part of the document a recruiter sees.
pub fn render_plain_text(profile: &CandidateProfile, cv: &GeneratedCv) -> String {
    let mut out = String::new();

    line(&mut out, profile.name());
    line(&mut out, &format!("{} | {}", profile.email(), profile.phone()));
    line(&mut out, profile.location());

    section(&mut out, SUMMARY_HEADING);
    line(&mut out, &cv.summary);

    section(&mut out, EXPERIENCE_HEADING);
    for (index, entry) in cv.experience.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        line(&mut out, &entry.title);
        line(
            &mut out,
            &join_present(&[entry.company.as_str(), entry.location.as_str()]),
        );
        if !entry.period.trim().is_empty() {
            line(&mut out, &entry.period);
        }
        for achievement in &entry.achievements {
            line(&mut out, &format!("- {achievement}"));
        }
    }

    section(&mut out, EDUCATION_HEADING);
    line(&mut out, profile.education());

    section(&mut out, SKILLS_HEADING);
    for category in &cv.skills {
        line(
            &mut out,
            &format!("{}: {}", category.category, category.skills.join(", ")),
        );
    }

    out
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn section(out: &mut String, heading: &str) {
    out.push('\n');
    line(out, heading);
}

fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::normalizer::tests::valid_document;
    use crate::generation::normalizer::validate_document;
    use crate::generation::validation::tests::jane_doe_body;
    use crate::generation::validation::validate_profile;

    fn rendered() -> String {
        let profile = validate_profile(&jane_doe_body().profile).unwrap();
        let cv = validate_document(valid_document()).unwrap();
        render_plain_text(&profile, &cv)
    }

    #[test]
    fn test_header_lines() {
        let text = rendered();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Jane Doe"));
        assert_eq!(lines.next(), Some("jane@x.com | +1 555 0100"));
        assert_eq!(lines.next(), Some("Remote"));
    }

    #[test]
    fn test_sections_in_order() {
        let text = rendered();
        let positions: Vec<usize> = [
            SUMMARY_HEADING,
            EXPERIENCE_HEADING,
            EDUCATION_HEADING,
            SKILLS_HEADING,
        ]
        .iter()
        .map(|h| text.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_experience_and_skills_content() {
        let text = rendered();
        assert!(text.contains(
            "Data Engineering Intern\nNorthwind Analytics | Remote\nJun 2024 - Dec 2024\n"
        ));
        assert!(text.contains("- Cut SQL report runtime by 40% through index tuning\n"));
        assert!(text.contains("Technical Skills: Python, Structured Query Language (SQL)\n"));
        assert!(text.contains("EDUCATION\nBSc CS\n"));
    }

    #[test]
    fn test_advisory_fields_are_not_rendered() {
        let text = rendered();
        assert!(!text.contains("72"));
        assert!(!text.contains("No production Airflow experience"));
    }

    #[test]
    fn test_entries_are_separated_and_blank_parts_skipped() {
        let profile = validate_profile(&jane_doe_body().profile).unwrap();
        let mut cv = validate_document(valid_document()).unwrap();
        let mut second = cv.experience[0].clone();
        second.title = "Teaching Assistant".to_string();
        second.company = "State University".to_string();
        second.location = "  ".to_string();
        second.period = String::new();
        second.achievements = vec!["Graded 120 SQL assignments".to_string()];
        cv.experience.push(second);

        let text = render_plain_text(&profile, &cv);
        assert!(text.contains(
            "through index tuning\n\nTeaching Assistant\nState University\n- Graded 120 SQL assignments\n\nEDUCATION\n"
        ));
        assert!(text.ends_with("Tools & Software: Git, Airflow\n"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        assert_eq!(rendered(), rendered());
    }
}
