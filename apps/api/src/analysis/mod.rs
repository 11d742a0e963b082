//! Resume analysis pipeline: extract text, score sections, suggest improvements.
//!
//! The headline `overall_score` is derived from word count alone. Section
//! scores are computed and returned next to it but never folded into it.

pub mod advisor;
pub mod extractor;
pub mod sections;

use std::path::Path;

use serde::Serialize;

use crate::analysis::advisor::suggest_improvements;
use crate::analysis::extractor::{ExtractionError, TextExtractor};
use crate::analysis::sections::{score_sections, AnalysisConfig, SectionScores};

/// Metrics returned under `analysis` in the upload response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResumeAnalysis {
    pub word_count: usize,
    pub section_scores: SectionScores,
    pub overall_score: f64,
}

/// Everything one upload produces. `analysis` and `improvements` stay
/// separate top-level values.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub text: String,
    pub analysis: ResumeAnalysis,
    pub improvements: Vec<String>,
}

/// Number of whitespace-delimited tokens. The ASCII separators
/// `\x1c`..=`\x1f` also delimit words.
pub fn word_count(text: &str) -> usize {
    text.split(is_word_separator)
        .filter(|token| !token.is_empty())
        .count()
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// `min(100, word_count / target * 100)`.
pub fn overall_score(word_count: usize, config: &AnalysisConfig) -> f64 {
    (word_count as f64 / config.target_word_count as f64 * 100.0).min(100.0)
}

pub fn analyze_text(text: &str, config: &AnalysisConfig) -> ResumeAnalysis {
    let word_count = word_count(text);
    ResumeAnalysis {
        word_count,
        section_scores: score_sections(text, config),
        overall_score: overall_score(word_count, config),
    }
}

/// Runs the full pipeline over a file on disk. The extractor is called once.
pub async fn analyze_file(
    extractor: &dyn TextExtractor,
    config: &AnalysisConfig,
    path: &Path,
) -> Result<AnalysisOutcome, ExtractionError> {
    let text = extractor.extract(path).await?;
    let analysis = analyze_text(&text, config);
    let improvements = suggest_improvements(&text, config);
    Ok(AnalysisOutcome {
        text,
        analysis,
        improvements,
    })
}
