use crate::grading::domain::{HiringRecommendation, RecommendedLevel};
use serde::{Deserialize, Serialize};

/// Feedback wording for one percentage band (inclusive lower bound).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackBand {
    pub min_percentage: f64,
    pub text: String,
}

/// Hiring verdict for one percentage band (inclusive lower bound).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiringBand {
    pub min_percentage: f64,
    pub recommendation: HiringRecommendation,
}

/// Percentage cut points feeding the level ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelLadder {
    pub top: f64,
    pub upper: f64,
    pub middle: f64,
}

/// Band policy backing the qualitative half of a report.
///
/// Band sets are data rather than code so deployments can re-tune thresholds
/// without touching the aggregation. Construction sorts bands descending and
/// forces a floor band at zero, so lookups are exhaustive over [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPolicy {
    feedback_bands: Vec<FeedbackBand>,
    hiring_bands: Vec<HiringBand>,
    level_ladder: LevelLadder,
}

impl ReportPolicy {
    pub fn new(
        feedback_bands: Vec<FeedbackBand>,
        hiring_bands: Vec<HiringBand>,
        level_ladder: LevelLadder,
    ) -> Self {
        let mut feedback_bands = if feedback_bands.is_empty() {
            Self::standard().feedback_bands
        } else {
            feedback_bands
        };
        let mut hiring_bands = if hiring_bands.is_empty() {
            Self::standard().hiring_bands
        } else {
            hiring_bands
        };

        feedback_bands.sort_by(|a, b| b.min_percentage.total_cmp(&a.min_percentage));
        hiring_bands.sort_by(|a, b| b.min_percentage.total_cmp(&a.min_percentage));

        if let Some(last) = feedback_bands.last_mut() {
            last.min_percentage = 0.0;
        }
        if let Some(last) = hiring_bands.last_mut() {
            last.min_percentage = 0.0;
        }

        Self {
            feedback_bands,
            hiring_bands,
            level_ladder,
        }
    }

    pub fn standard() -> Self {
        Self {
            feedback_bands: vec![
                FeedbackBand {
                    min_percentage: 90.0,
                    text: "Exceptional performance! Demonstrated expert-level knowledge and problem-solving skills.".to_string(),
                },
                FeedbackBand {
                    min_percentage: 80.0,
                    text: "Strong performance! Solid technical competency with room for refinement in advanced areas.".to_string(),
                },
                FeedbackBand {
                    min_percentage: 70.0,
                    text: "Good performance! Adequate understanding with clear areas for development.".to_string(),
                },
                FeedbackBand {
                    min_percentage: 60.0,
                    text: "Satisfactory performance. Basic competency shown; additional training and hands-on work would help.".to_string(),
                },
                FeedbackBand {
                    min_percentage: 0.0,
                    text: "Performance needs improvement. Consider revisiting the fundamentals and gaining more practical experience.".to_string(),
                },
            ],
            hiring_bands: vec![
                HiringBand {
                    min_percentage: 85.0,
                    recommendation: HiringRecommendation::StrongHire,
                },
                HiringBand {
                    min_percentage: 75.0,
                    recommendation: HiringRecommendation::Hire,
                },
                HiringBand {
                    min_percentage: 65.0,
                    recommendation: HiringRecommendation::Maybe,
                },
                HiringBand {
                    min_percentage: 0.0,
                    recommendation: HiringRecommendation::NoHire,
                },
            ],
            level_ladder: LevelLadder {
                top: 90.0,
                upper: 80.0,
                middle: 70.0,
            },
        }
    }

    pub fn feedback_for(&self, percentage: f64) -> &str {
        self.feedback_bands
            .iter()
            .find(|band| percentage >= band.min_percentage)
            .map(|band| band.text.as_str())
            .unwrap_or("")
    }

    pub fn hiring_for(&self, percentage: f64) -> HiringRecommendation {
        self.hiring_bands
            .iter()
            .find(|band| percentage >= band.min_percentage)
            .map(|band| band.recommendation)
            .unwrap_or(HiringRecommendation::NoHire)
    }

    /// Level suggestion shifts one rung with the candidate's declared
    /// experience, mirroring how reviewers read the same score differently
    /// for an entry-level applicant versus a senior one.
    pub fn level_for(&self, percentage: f64, experience: &str) -> RecommendedLevel {
        let experience = experience.to_lowercase();
        let entry = experience.contains("entry");
        let junior = experience.contains("junior");
        let mid = experience.contains("mid");

        if percentage >= self.level_ladder.top {
            if entry || junior {
                RecommendedLevel::MidLevel
            } else if mid {
                RecommendedLevel::Senior
            } else {
                RecommendedLevel::Expert
            }
        } else if percentage >= self.level_ladder.upper {
            if entry {
                RecommendedLevel::Junior
            } else if junior {
                RecommendedLevel::MidLevel
            } else {
                RecommendedLevel::Senior
            }
        } else if percentage >= self.level_ladder.middle {
            if entry {
                RecommendedLevel::Entry
            } else {
                RecommendedLevel::Junior
            }
        } else {
            RecommendedLevel::Entry
        }
    }
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
