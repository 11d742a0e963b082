//! Counts keyword hits per resume section.
//!
//! Patterns are not anchored to headings: any occurrence of a synonym anywhere
//! in the text counts toward its section.

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Points awarded per keyword match.
pub const POINTS_PER_MATCH: u64 = 20;
/// Word count at which the length-based overall score saturates at 100.
pub const TARGET_WORD_COUNT: usize = 500;
/// Below this many words the advisor flags the resume as too short.
pub const SHORT_RESUME_WORDS: usize = 200;

/// The five fixed resume sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Education,
    Experience,
    Skills,
    Projects,
    Achievements,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Education,
        Section::Experience,
        Section::Skills,
        Section::Projects,
        Section::Achievements,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Achievements => "achievements",
        }
    }

    /// Case-insensitive synonym alternation for this section.
    fn pattern(self) -> &'static str {
        match self {
            Section::Education => r"(?i)(education|academic|qualification)",
            Section::Experience => r"(?i)(experience|work|employment)",
            Section::Skills => r"(?i)(skills|technical|competencies)",
            Section::Projects => r"(?i)(projects|portfolio)",
            Section::Achievements => r"(?i)(achievements|awards|accomplishments)",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SectionPattern {
    pub section: Section,
    pub pattern: Regex,
}

/// Immutable analysis configuration, compiled once at startup and shared
/// read-only by the scorer and the advisor.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub sections: Vec<SectionPattern>,
    pub points_per_match: u64,
    pub target_word_count: usize,
    pub short_resume_words: usize,
    /// Presence check for a work history section.
    pub experience_check: Regex,
    /// Presence check for a skills section.
    pub skills_check: Regex,
}

impl AnalysisConfig {
    pub fn standard() -> Result<Self, regex::Error> {
        let sections = Section::ALL
            .iter()
            .map(|&section| {
                Ok(SectionPattern {
                    section,
                    pattern: Regex::new(section.pattern())?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            sections,
            points_per_match: POINTS_PER_MATCH,
            target_word_count: TARGET_WORD_COUNT,
            short_resume_words: SHORT_RESUME_WORDS,
            experience_check: Regex::new(r"(?i)(experience|work)")?,
            skills_check: Regex::new(r"(?i)(skills|technical)")?,
        })
    }
}

/// Per-section scores, kept in configuration order.
///
/// Serializes as a JSON object keyed by section name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionScores(Vec<(Section, u64)>);

impl SectionScores {
    pub fn get(&self, section: Section) -> u64 {
        self.0
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, score)| *score)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, u64)> + '_ {
        self.0.iter().copied()
    }
}

impl Serialize for SectionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (section, score) in &self.0 {
            map.serialize_entry(section.key(), score)?;
        }
        map.end()
    }
}

/// Scores every configured section as `points_per_match` times the number of
/// non-overlapping matches of its pattern. Not clamped.
pub fn score_sections(text: &str, config: &AnalysisConfig) -> SectionScores {
    SectionScores(
        config
            .sections
            .iter()
            .map(|sp| {
                let matches = sp.pattern.find_iter(text).count() as u64;
                (sp.section, matches * config.points_per_match)
            })
            .collect(),
    )
}
