use crate::analysis::sections::AnalysisConfig;
use crate::analysis::word_count;

pub const TOO_SHORT: &str = "Resume is too short. Consider adding more details.";
pub const NO_EXPERIENCE: &str = "No work experience section found. Add your work history.";
pub const NO_SKILLS: &str = "No skills section found. List your technical and soft skills.";

/// Returns improvement suggestions for a resume.
///
/// Checks are independent and always reported in this order:
/// 1. fewer than `short_resume_words` words
/// 2. no "experience" / "work" anywhere in the text
/// 3. no "skills" / "technical" anywhere in the text
pub fn suggest_improvements(text: &str, config: &AnalysisConfig) -> Vec<String> {
    let mut improvements = Vec::new();

    if word_count(text) < config.short_resume_words {
        improvements.push(TOO_SHORT.to_string());
    }
    if !config.experience_check.is_match(text) {
        improvements.push(NO_EXPERIENCE.to_string());
    }
    if !config.skills_check.is_match(text) {
        improvements.push(NO_SKILLS.to_string());
    }

    improvements
}
