use serde::{Deserialize, Serialize};

use crate::render::{lenient, lenient_vec};

/// Number of options every question is supposed to carry.
pub const EXPECTED_OPTIONS: usize = 4;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McqSet {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub mcqs: Vec<Mcq>,
}

/// One multiple-choice question, as returned by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mcq {
    #[serde(default, deserialize_with = "lenient")]
    pub question: Option<String>,
    /// Labeled options, e.g. "A. Option text".
    #[serde(default, deserialize_with = "lenient_vec")]
    pub options: Vec<String>,
    /// Single letter, e.g. "B".
    #[serde(default, deserialize_with = "lenient")]
    pub correct_answer: Option<String>,
}

impl Mcq {
    pub fn has_expected_options(&self) -> bool {
        self.options.len() == EXPECTED_OPTIONS
    }
}
