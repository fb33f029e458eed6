use std::env;
use thiserror::Error;

use crate::models::{PathsAnalysis, UtilityMap, BUYER_EXPERIENCE_STAGES};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid session name: {name}")]
    InvalidSessionName { name: String },

    #[error("Utility map must have exactly 6 stages, got {actual}")]
    WrongStageCount { actual: usize },

    #[error("Stage {position} must be '{expected}', got '{actual}'")]
    UnexpectedStage {
        position: usize,
        expected: String,
        actual: String,
    },

    #[error("Score for {lever} in stage '{stage}' must be 1-10, got {score}")]
    ScoreOutOfRange {
        stage: String,
        lever: String,
        score: i32,
    },

    #[error("Entry too long: {actual} chars (max: {max})")]
    EntryTooLong { actual: usize, max: usize },

    #[error("Entry cannot be empty")]
    EmptyEntry,
}

#[derive(Clone)]
pub struct InputValidator {
    max_entry_length: usize,
    max_session_name_length: usize,
}

impl InputValidator {
    pub fn new() -> Self {
        Self {
            max_entry_length: env::var("MAX_ENTRY_LENGTH")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()
                .unwrap_or(2000),
            max_session_name_length: env::var("MAX_SESSION_NAME_LENGTH")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
        }
    }

    pub fn validate_session_name(&self, name: &str) -> std::result::Result<(), ValidationError> {
        if name.is_empty() || name.len() > self.max_session_name_length {
            return Err(ValidationError::InvalidSessionName {
                name: name.to_string(),
            });
        }

        // Alphanumeric plus hyphen, underscore and space; no path separators
        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == ' ')
        {
            return Err(ValidationError::InvalidSessionName {
                name: name.to_string(),
            });
        }

        Ok(())
    }

    /// Upstream contract: exactly 6 stages with the canonical ordered names,
    /// every lever score an integer in [1,10]
    pub fn validate_utility_map(&self, map: &UtilityMap) -> std::result::Result<(), ValidationError> {
        if map.stages.len() != BUYER_EXPERIENCE_STAGES.len() {
            return Err(ValidationError::WrongStageCount {
                actual: map.stages.len(),
            });
        }

        for (position, (stage, expected)) in
            map.stages.iter().zip(BUYER_EXPERIENCE_STAGES).enumerate()
        {
            if stage.stage != expected {
                return Err(ValidationError::UnexpectedStage {
                    position,
                    expected: expected.to_string(),
                    actual: stage.stage.clone(),
                });
            }

            for (lever, score) in stage.levers() {
                if !(1..=10).contains(&score) {
                    return Err(ValidationError::ScoreOutOfRange {
                        stage: stage.stage.clone(),
                        lever: lever.to_string(),
                        score,
                    });
                }
            }
        }

        for entry in &map.utility_blocks {
            self.validate_entry(entry)?;
        }

        Ok(())
    }

    /// Bound the free-text list fields of a paths analysis
    pub fn validate_paths_analysis(
        &self,
        paths: &PathsAnalysis,
    ) -> std::result::Result<(), ValidationError> {
        let lists = [
            &paths.alternative_industries,
            &paths.strategic_groups,
            &paths.buyer_groups,
            &paths.complementary_products,
            &paths.insights,
            &paths.opportunities,
        ];

        for list in lists {
            for entry in list {
                self.validate_entry(entry)?;
            }
        }

        if paths.time_evolution.len() > self.max_entry_length {
            return Err(ValidationError::EntryTooLong {
                actual: paths.time_evolution.len(),
                max: self.max_entry_length,
            });
        }

        Ok(())
    }

    fn validate_entry(&self, entry: &str) -> std::result::Result<(), ValidationError> {
        if entry.trim().is_empty() {
            return Err(ValidationError::EmptyEntry);
        }

        if entry.len() > self.max_entry_length {
            return Err(ValidationError::EntryTooLong {
                actual: entry.len(),
                max: self.max_entry_length,
            });
        }

        Ok(())
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StageScores;

    #[test]
    fn test_valid_session_name() {
        let validator = InputValidator::new();
        assert!(validator.validate_session_name("q3-planning").is_ok());
        assert!(validator.validate_session_name("Launch draft 2").is_ok());
    }

    #[test]
    fn test_invalid_session_name() {
        let validator = InputValidator::new();
        assert!(matches!(
            validator.validate_session_name(""),
            Err(ValidationError::InvalidSessionName { .. })
        ));
        assert!(matches!(
            validator.validate_session_name("../traversal"),
            Err(ValidationError::InvalidSessionName { .. })
        ));
        assert!(matches!(
            validator.validate_session_name("slash/name"),
            Err(ValidationError::InvalidSessionName { .. })
        ));
        let too_long = "x".repeat(101);
        assert!(validator.validate_session_name(&too_long).is_err());
    }

    #[test]
    fn test_default_utility_map_is_valid() {
        let validator = InputValidator::new();
        assert!(validator.validate_utility_map(&UtilityMap::default()).is_ok());
    }

    #[test]
    fn test_wrong_stage_count() {
        let validator = InputValidator::new();
        let mut map = UtilityMap::default();
        map.stages.pop();
        assert!(matches!(
            validator.validate_utility_map(&map),
            Err(ValidationError::WrongStageCount { actual: 5 })
        ));
    }

    #[test]
    fn test_stage_order_is_enforced() {
        let validator = InputValidator::new();
        let mut map = UtilityMap::default();
        map.stages.swap(0, 1);
        assert!(matches!(
            validator.validate_utility_map(&map),
            Err(ValidationError::UnexpectedStage { position: 0, .. })
        ));
    }

    #[test]
    fn test_score_bounds() {
        let validator = InputValidator::new();

        let mut map = UtilityMap::default();
        map.stages[2].risk = 0;
        assert!(matches!(
            validator.validate_utility_map(&map),
            Err(ValidationError::ScoreOutOfRange { score: 0, .. })
        ));

        let mut map = UtilityMap::default();
        map.stages[5].fun_and_image = 11;
        assert!(matches!(
            validator.validate_utility_map(&map),
            Err(ValidationError::ScoreOutOfRange { score: 11, .. })
        ));

        let mut map = UtilityMap::default();
        map.stages[0] = StageScores::neutral("Purchase");
        map.stages[0].productivity = 10;
        assert!(validator.validate_utility_map(&map).is_ok());
    }

    #[test]
    fn test_paths_entry_bounds() {
        let validator = InputValidator::new();

        let mut paths = PathsAnalysis::default();
        paths.buyer_groups = vec!["SMB".to_string()];
        assert!(validator.validate_paths_analysis(&paths).is_ok());

        paths.insights = vec!["   ".to_string()];
        assert!(matches!(
            validator.validate_paths_analysis(&paths),
            Err(ValidationError::EmptyEntry)
        ));

        let mut paths = PathsAnalysis::default();
        paths.opportunities = vec!["x".repeat(2001)];
        assert!(matches!(
            validator.validate_paths_analysis(&paths),
            Err(ValidationError::EntryTooLong { .. })
        ));
    }
}
