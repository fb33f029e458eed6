use chrono::Utc;
use serde::Serialize;

use crate::error::{Result, StrategicInsightError};
use crate::models::{
    AppliedResult, Campaign, FrameworkState, InsightSource, Orientation, ProcessImprovement,
    StrategicRole, TargetFramework,
};

/// Summary of one apply operation
#[derive(Debug, Clone, Serialize)]
pub struct ApplyOutcome {
    pub insight_id: String,
    pub target: TargetFramework,
    pub records_created: usize,
    pub applied_at: String,
}

/// Materializes an insight's recommendations into a target framework's
/// collections and appends to the insight's audit trail.
///
/// Deliberately not idempotent: applying the same insight to the same target
/// twice duplicates the generated records and appends a second audit entry.
/// At-most-once semantics, where wanted, belong to the caller.
pub struct InsightApplicator;

impl InsightApplicator {
    pub fn apply(
        state: &mut FrameworkState,
        insight_id: &str,
        target: TargetFramework,
    ) -> Result<ApplyOutcome> {
        let index = state
            .insights
            .iter()
            .position(|i| i.id == insight_id)
            .ok_or_else(|| StrategicInsightError::InsightNotFound(insight_id.to_string()))?;

        let (target_frameworks, recommendations, source_data) = {
            let insight = &state.insights[index];
            (
                insight.target_frameworks.clone(),
                insight.recommendations.clone(),
                insight.source_data.clone(),
            )
        };

        if !target_frameworks.contains(&target) {
            return Err(StrategicInsightError::InvalidTarget {
                insight_id: insight_id.to_string(),
                target: target.name().to_string(),
            });
        }

        let (action, records_created) = match target {
            TargetFramework::Marketing => {
                let paths = match &source_data {
                    InsightSource::PathsAnalysis(paths) => paths,
                    InsightSource::UtilityMap(_) => {
                        return Err(StrategicInsightError::Internal(format!(
                            "insight {} targets marketing without a paths-analysis snapshot",
                            insight_id
                        )));
                    }
                };

                let emotional = paths.functional_emotional == Orientation::Emotional;
                for group in &paths.buyer_groups {
                    state.marketing.campaigns.push(Campaign {
                        name: format!("{} outreach campaign", group),
                        target_buyer_group: group.clone(),
                        emotional_appeal: emotional,
                        messaging: format!("Value-innovation positioning for {}", group),
                        status: "draft".to_string(),
                    });
                }
                state
                    .marketing
                    .generated_from_blue_ocean
                    .push(insight_id.to_string());

                ("generated_campaigns", paths.buyer_groups.len())
            }
            TargetFramework::Hr => {
                state.hr.strategic_roles.push(StrategicRole {
                    title: "Emotional Branding Lead".to_string(),
                    required_capabilities: recommendations.clone(),
                    emotional_branding_skills: true,
                    status: "planning".to_string(),
                });
                state
                    .hr
                    .generated_from_blue_ocean
                    .push(insight_id.to_string());

                ("created_strategic_role", 1)
            }
            TargetFramework::Process => {
                for recommendation in &recommendations {
                    state.process.improvements.push(ProcessImprovement {
                        description: recommendation.clone(),
                        impact: "Unblocks customer utility".to_string(),
                        status: "identified".to_string(),
                    });
                }
                state
                    .process
                    .generated_from_blue_ocean
                    .push(insight_id.to_string());

                ("generated_improvements", recommendations.len())
            }
        };

        let applied_at = Utc::now().to_rfc3339();
        let insight = &mut state.insights[index];
        insight.applied_results.push(AppliedResult {
            framework: target,
            action: action.to_string(),
            outcome: format!("Created {} record(s) in {}", records_created, target),
            timestamp: applied_at.clone(),
        });
        insight.auto_applied = true;

        tracing::info!(
            "Applied insight {} to {}: {} record(s) created",
            insight_id,
            target,
            records_created
        );

        Ok(ApplyOutcome {
            insight_id: insight_id.to_string(),
            target,
            records_created,
            applied_at,
        })
    }
}
