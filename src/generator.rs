use crate::models::{
    FrameworkState, Insight, InsightSource, Orientation, PrimaryAnalysis, TargetFramework,
};

/// Pure derivation of insights from the primary analysis.
///
/// Each rule is evaluated against the current snapshot rather than a diff,
/// so a condition that keeps holding across repeated updates produces a new
/// insight each time. Callers that want dedup have to do it themselves.
pub struct InsightGenerator;

impl InsightGenerator {
    /// Run all derivation rules and return the new insights, if any.
    /// `source_data` on each insight is a structural copy of the relevant
    /// sub-record, detached from the live state.
    pub fn generate(new_primary: &PrimaryAnalysis, _previous: &FrameworkState) -> Vec<Insight> {
        let mut insights = Vec::new();

        if let Some(insight) = Self::marketing_targeting(new_primary) {
            insights.push(insight);
        }
        if let Some(insight) = Self::hr_emotional_capability(new_primary) {
            insights.push(insight);
        }
        if let Some(insight) = Self::process_utility(new_primary) {
            insights.push(insight);
        }

        insights
    }

    /// Path-analysis insights plus identified buyer groups imply a
    /// segmentation opportunity for marketing
    fn marketing_targeting(primary: &PrimaryAnalysis) -> Option<Insight> {
        let paths = &primary.paths_analysis;
        if paths.insights.is_empty() || paths.buyer_groups.is_empty() {
            return None;
        }

        let first_group = &paths.buyer_groups[0];
        let recommendations = vec![
            format!("Prioritize the '{}' buyer group in the first campaign wave", first_group),
            "Segment campaigns by buyer group and tailor messaging to each segment".to_string(),
            "Reuse the path-analysis insights as campaign positioning themes".to_string(),
        ];

        Some(Insight::new(
            "Buyer groups identified for targeted campaigns",
            format!(
                "The paths analysis surfaced {} buyer group(s); marketing can target them directly",
                paths.buyer_groups.len()
            ),
            recommendations,
            vec![TargetFramework::Marketing],
            InsightSource::PathsAnalysis(paths.clone()),
        ))
    }

    /// An emotional market orientation implies an HR capability gap around
    /// emotional branding
    fn hr_emotional_capability(primary: &PrimaryAnalysis) -> Option<Insight> {
        let paths = &primary.paths_analysis;
        if paths.insights.is_empty() {
            return None;
        }

        let emotional_shift = paths.functional_emotional == Orientation::Emotional
            || paths.opportunities.iter().any(|o| o.contains("emotional"));
        if !emotional_shift {
            return None;
        }

        let recommendations = vec![
            "Recruit or develop roles with emotional branding expertise".to_string(),
            "Train customer-facing teams on emotionally oriented messaging".to_string(),
            "Align hiring criteria with the emotional positioning shift".to_string(),
        ];

        Some(Insight::new(
            "Emotional positioning requires new HR capabilities",
            "The strategy leans emotional; HR should plan for emotional branding skills",
            recommendations,
            vec![TargetFramework::Hr],
            InsightSource::PathsAnalysis(paths.clone()),
        ))
    }

    /// Flagged utility blocks map one-to-one onto process improvement
    /// recommendations
    fn process_utility(primary: &PrimaryAnalysis) -> Option<Insight> {
        let map = &primary.utility_map;
        if map.utility_blocks.is_empty() {
            return None;
        }

        Some(Insight::new(
            "Utility blocks point at process improvements",
            format!(
                "The buyer utility map flags {} customer-value block(s)",
                map.utility_blocks.len()
            ),
            map.utility_blocks.clone(),
            vec![TargetFramework::Process],
            InsightSource::UtilityMap(map.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PathsAnalysis, UtilityMap};

    fn primary_with(paths: PathsAnalysis, map: UtilityMap) -> PrimaryAnalysis {
        PrimaryAnalysis {
            paths_analysis: paths,
            utility_map: map,
        }
    }

    fn empty_state() -> FrameworkState {
        FrameworkState::default_state()
    }

    #[test]
    fn test_no_rules_fire_on_defaults() {
        let primary = PrimaryAnalysis::default();
        assert!(InsightGenerator::generate(&primary, &empty_state()).is_empty());
    }

    #[test]
    fn test_marketing_rule_selectivity() {
        // insights + buyer groups, nothing emotional, no utility blocks:
        // exactly one insight, targeting marketing only
        let paths = PathsAnalysis {
            insights: vec!["x".to_string()],
            buyer_groups: vec!["A".to_string(), "B".to_string()],
            ..Default::default()
        };
        let primary = primary_with(paths, UtilityMap::default());

        let insights = InsightGenerator::generate(&primary, &empty_state());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].target_frameworks, vec![TargetFramework::Marketing]);
        // Recommendations reference the first buyer group
        assert!(insights[0].recommendations[0].contains("'A'"));
    }

    #[test]
    fn test_marketing_rule_needs_both_conditions() {
        let paths = PathsAnalysis {
            buyer_groups: vec!["A".to_string()],
            ..Default::default()
        };
        let primary = primary_with(paths, UtilityMap::default());
        assert!(InsightGenerator::generate(&primary, &empty_state()).is_empty());

        let paths = PathsAnalysis {
            insights: vec!["x".to_string()],
            ..Default::default()
        };
        let primary = primary_with(paths, UtilityMap::default());
        assert!(InsightGenerator::generate(&primary, &empty_state()).is_empty());
    }

    #[test]
    fn test_hr_rule_fires_on_emotional_orientation() {
        let paths = PathsAnalysis {
            insights: vec!["x".to_string()],
            functional_emotional: Orientation::Emotional,
            ..Default::default()
        };
        let primary = primary_with(paths, UtilityMap::default());

        let insights = InsightGenerator::generate(&primary, &empty_state());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].target_frameworks, vec![TargetFramework::Hr]);
    }

    #[test]
    fn test_hr_rule_fires_on_emotional_opportunity_text() {
        let paths = PathsAnalysis {
            insights: vec!["x".to_string()],
            functional_emotional: Orientation::Functional,
            opportunities: vec!["shift to emotional branding".to_string()],
            ..Default::default()
        };
        let primary = primary_with(paths, UtilityMap::default());

        let insights = InsightGenerator::generate(&primary, &empty_state());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].target_frameworks, vec![TargetFramework::Hr]);
    }

    #[test]
    fn test_process_rule_maps_blocks_one_to_one() {
        let map = UtilityMap {
            utility_blocks: vec![
                "Block1".to_string(),
                "Block2".to_string(),
                "Block3".to_string(),
            ],
            ..Default::default()
        };
        let primary = primary_with(PathsAnalysis::default(), map);

        let insights = InsightGenerator::generate(&primary, &empty_state());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].target_frameworks, vec![TargetFramework::Process]);
        assert_eq!(
            insights[0].recommendations,
            vec!["Block1", "Block2", "Block3"]
        );
    }

    #[test]
    fn test_all_rules_fire_with_unique_ids() {
        let paths = PathsAnalysis {
            insights: vec!["x".to_string()],
            buyer_groups: vec!["A".to_string()],
            functional_emotional: Orientation::Emotional,
            ..Default::default()
        };
        let map = UtilityMap {
            utility_blocks: vec!["slow onboarding".to_string()],
            ..Default::default()
        };
        let primary = primary_with(paths, map);

        let insights = InsightGenerator::generate(&primary, &empty_state());
        assert_eq!(insights.len(), 3);
        let mut ids: Vec<_> = insights.iter().map(|i| i.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_source_data_is_detached_copy() {
        let paths = PathsAnalysis {
            insights: vec!["noted".to_string()],
            buyer_groups: vec!["SMB".to_string()],
            ..Default::default()
        };
        let mut primary = primary_with(paths, UtilityMap::default());

        let insights = InsightGenerator::generate(&primary, &empty_state());
        primary.paths_analysis.buyer_groups.push("Enterprise".to_string());

        match &insights[0].source_data {
            InsightSource::PathsAnalysis(snapshot) => {
                assert_eq!(snapshot.buyer_groups, vec!["SMB"]);
            }
            InsightSource::UtilityMap(_) => panic!("expected paths-analysis snapshot"),
        }
    }

    #[test]
    fn test_repeated_generation_fires_again() {
        // Snapshot-based rules, not diff-based: the same qualifying state
        // keeps producing insights on every call
        let paths = PathsAnalysis {
            insights: vec!["x".to_string()],
            buyer_groups: vec!["A".to_string()],
            ..Default::default()
        };
        let primary = primary_with(paths, UtilityMap::default());

        let first = InsightGenerator::generate(&primary, &empty_state());
        let second = InsightGenerator::generate(&primary, &empty_state());
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_ne!(first[0].id, second[0].id);
    }
}
