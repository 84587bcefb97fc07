use serde::{Deserialize, Serialize};

use crate::render::{lenient, lenient_score, lenient_vec};

/// Structured evaluation of a resume against a job description, as returned by the model.
///
/// Every field is optional. Badly shaped fields deserialize as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0 – 100
    #[serde(default, deserialize_with = "lenient_score")]
    pub match_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub keyword_analysis: Option<KeywordAnalysis>,
    #[serde(default, deserialize_with = "lenient")]
    pub overall_suggestions: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub experience_analysis: Vec<ExperienceAnalysis>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub project_analysis: Vec<ProjectAnalysis>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    /// 0 – 100
    #[serde(default, deserialize_with = "lenient_score")]
    pub coverage_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub needed_keywords: Vec<NeededKeyword>,
}

/// A concrete technical skill from the job description and whether the resume shows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeededKeyword {
    pub keyword: String,
    /// Missing `found` counts as not found.
    #[serde(default, deserialize_with = "lenient")]
    pub found: Option<bool>,
}

impl NeededKeyword {
    pub fn is_found(&self) -> bool {
        self.found.unwrap_or(false)
    }
}

impl KeywordAnalysis {
    /// Splits the keywords into (found, missing), preserving model order.
    pub fn partition(&self) -> (Vec<&str>, Vec<&str>) {
        let (found, missing): (Vec<&NeededKeyword>, Vec<&NeededKeyword>) =
            self.needed_keywords.iter().partition(|k| k.is_found());
        (
            found.iter().map(|k| k.keyword.as_str()).collect(),
            missing.iter().map(|k| k.keyword.as_str()).collect(),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceAnalysis {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// 0 – 10
    #[serde(default, deserialize_with = "lenient_score")]
    pub relevance_score: Option<f64>,
    /// 0 – 10
    #[serde(default, deserialize_with = "lenient_score")]
    pub depth_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// 0 – 10
    #[serde(default, deserialize_with = "lenient_score")]
    pub relevance_score: Option<f64>,
    /// 0 – 8
    #[serde(default, deserialize_with = "lenient_score")]
    pub complexity_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub suggestions: Vec<String>,
}
