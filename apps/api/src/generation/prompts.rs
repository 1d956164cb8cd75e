// Prompt constants for statement generation.

/// System prompt — fixes the assistant's role and output shape.
pub const STATEMENT_SYSTEM: &str =
    "You are a career assistant who specializes in writing resume summary statements. \
    Your goal is to write a short (3-4 sentences), impactful, professional summary that \
    connects the candidate's qualifications to the requirements of a specific job posting. \
    Respond with the summary text only. \
    Do NOT include headings, quotes, or any text besides the summary itself.";

/// Generation prompt template. Replace `{curriculum}` and `{job_description}`
/// before sending.
pub const STATEMENT_PROMPT_TEMPLATE: &str = r#"Analyze the candidate's curriculum and the job description below.

Write a summary statement that highlights how the candidate's experience, skills, and projects make them a strong fit for this specific position. Be direct and use professional language.

---
Candidate's curriculum (JSON):
{curriculum}
---
Job description:
{job_description}
---

Generated summary (text only):"#;

/// Fills the generation template.
pub fn build_statement_prompt(curriculum_text: &str, job_description: &str) -> String {
    STATEMENT_PROMPT_TEMPLATE
        .replace("{curriculum}", curriculum_text)
        .replace("{job_description}", job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_fills_both_placeholders() {
        let prompt = build_statement_prompt("{\"title\":\"CV1\"}", "Senior Rust engineer");
        assert!(prompt.contains("{\"title\":\"CV1\"}"));
        assert!(prompt.contains("Senior Rust engineer"));
        assert!(!prompt.contains("{curriculum}"));
        assert!(!prompt.contains("{job_description}"));
    }
}
