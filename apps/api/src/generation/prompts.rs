// LLM prompt constants for CV generation.
// Placeholders are `{name}`-style and filled by prompt_builder in a single pass.

/// System prompt for CV generation. `JSON_ONLY_INSTRUCTION` is appended by the builder.
pub const CV_GENERATION_SYSTEM: &str = "You are an expert CV/resume writer and ATS \
    (Applicant Tracking System) optimization specialist.";

/// Exact output contract. Embedded in the user prompt and carried on `Prompt`.
pub const CV_OUTPUT_SCHEMA: &str = r#"{
  "format": "local-market" | "international",
  "summary": "2-3 sentence professional summary tailored to the job description",
  "experience": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "location": "City, Country",
      "period": "Month Year - Month Year",
      "achievements": [
        "Achievement with a metric",
        "Achievement with measurable impact"
      ]
    }
  ],
  "skills": [
    { "category": "Technical Skills", "skills": ["Skill 1", "Skill 2"] },
    { "category": "Soft Skills", "skills": ["Skill 1", "Skill 2"] },
    { "category": "Tools & Software", "skills": ["Tool 1", "Tool 2"] }
  ],
  "keywords": ["keyword1", "keyword2"],
  "matchedSkills": ["skill1", "skill2"],
  "missingSkills": ["skill3"],
  "atsScore": 85,
  "warnings": [
    {
      "type": "skill-gap",
      "message": "What is missing for this position",
      "recommendations": ["Course A", "Certification B"]
    }
  ]
}"#;

/// CV generation prompt template.
/// Replace: {name}, {email}, {phone}, {location}, {education}, {experience_level},
///          {experience_field}, {job_description}, {experience_policy}, {output_schema}
pub const CV_GENERATION_PROMPT_TEMPLATE: &str = r#"Generate a complete, ATS-friendly CV from the following information.

CANDIDATE:
- Name: {name}
- Email: {email}
- Phone: {phone}
- Location: {location}
- Education: {education}
- Experience Level: {experience_level}
- Experience Field: {experience_field}

JOB DESCRIPTION (target position):
<<<
{job_description}
>>>

INSTRUCTIONS:

1. LANGUAGE & FORMAT
   - Detect the natural language and regional idiom of the job description.
   - Write ALL narrative content (summary, achievements, skill labels and skill names, warning messages) in that language and idiom, including action verbs.
   - Section headings stay in English for ATS compatibility: PROFESSIONAL SUMMARY, WORK EXPERIENCE, EDUCATION, SKILLS.
   - Set "format" to "local-market" when the job description is written in a language other than English; set it to "international" when it is written in English. No other values are allowed.
   - For "local-market" CVs use realistic local company names; for "international" CVs use international company names.

2. EXPERIENCE
{experience_policy}
   - Order experience entries in reverse chronological order (most recent first).
   - Every achievement is a plain bullet with a quantified result (number, percentage, time or money).

3. KEYWORDS & ATS OPTIMIZATION
   - Extract ALL technical keywords from the job description into "keywords".
   - Cover at least 80% of them across the skills and achievements.
   - Use both the spelled-out term and its abbreviation where one exists, e.g. "Search Engine Optimization (SEO)".
   - Integrate keywords naturally. No keyword stuffing.

4. SKILLS
   - Group skills into exactly these categories, in this order: technical skills, soft skills, tools & software. Category labels follow the language rule above.
   - Prioritize skills named in the job description.

5. MATCH SCORE
   - "atsScore" is a whole number from 0 to 100 estimating how well this CV matches the job description.
   - "matchedSkills" lists required skills the candidate demonstrably covers; "missingSkills" lists required skills the candidate lacks.

6. WARNINGS
   - Whenever the candidate's experience level or field falls short of the job's apparent requirements, add a warning with honest feedback.
   - Every warning carries concrete recommendations: courses, certifications, projects or preparation.
   - Use "type" values such as "skill-gap", "experience-level" or "field-mismatch".

OUTPUT CONTRACT:
Return a single JSON object with exactly this shape. No prose before or after it. No markdown code fences.
- Every list you include must contain at least one item; leave out "missingSkills" or "warnings" entirely when there is nothing to report.
{output_schema}

Generate the complete CV now. Be specific, realistic, and ATS-optimized."#;

/// Experience policy when the stated field overlaps the job's domain.
pub const EXPERIENCE_POLICY_WITH_FIELD: &str = "\
   - The candidate states experience in: {experience_field}.
   - If that field overlaps the job description's domain: create 2-3 detailed work experiences in that field, closely aligned with the job's responsibilities.
   - Otherwise: create 1-2 internship or entry-level experiences AND add a \"skill-gap\" warning explaining the mismatch.";

/// Experience policy when the candidate stated no field.
pub const EXPERIENCE_POLICY_NO_FIELD: &str = "\
   - The candidate did not state an experience field, so it cannot overlap the job's domain.
   - Create 1-2 internship or entry-level experiences relevant to the job AND add a \"skill-gap\" warning describing what the candidate must build up.";
