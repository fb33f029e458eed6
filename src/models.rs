use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The six buyer-experience-cycle stages, in canonical order.
/// `UtilityMap.stages` always contains exactly these, in this order.
pub const BUYER_EXPERIENCE_STAGES: [&str; 6] = [
    "Purchase",
    "Delivery",
    "Use",
    "Supplements",
    "Maintenance",
    "Disposal",
];

/// Downstream frameworks an insight can be materialized into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TargetFramework {
    Marketing,
    Hr,
    Process,
}

impl TargetFramework {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Marketing => "marketing",
            Self::Hr => "hr",
            Self::Process => "process",
        }
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Functional vs emotional market orientation from the paths analysis.
/// `Unset` round-trips as the empty string for compatibility with the
/// persisted format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Functional,
    Emotional,
    #[default]
    #[serde(rename = "")]
    Unset,
}

/// Six-paths analysis sub-record of the primary analysis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PathsAnalysis {
    pub alternative_industries: Vec<String>,
    pub strategic_groups: Vec<String>,
    pub buyer_groups: Vec<String>,
    pub complementary_products: Vec<String>,
    pub functional_emotional: Orientation,
    pub time_evolution: String,
    pub insights: Vec<String>,
    pub opportunities: Vec<String>,
    pub completed_at: Option<String>,
}

/// Lever scores for a single buyer-experience stage, each in [1,10]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct StageScores {
    pub stage: String,
    pub productivity: i32,
    pub simplicity: i32,
    pub convenience: i32,
    pub risk: i32,
    pub fun_and_image: i32,
    pub environmental_friendliness: i32,
}

impl StageScores {
    /// A stage with every utility lever at the neutral midpoint
    pub fn neutral(stage: &str) -> Self {
        Self {
            stage: stage.to_string(),
            productivity: 5,
            simplicity: 5,
            convenience: 5,
            risk: 5,
            fun_and_image: 5,
            environmental_friendliness: 5,
        }
    }

    /// Lever scores paired with their names, for validation and reporting
    pub fn levers(&self) -> [(&'static str, i32); 6] {
        [
            ("productivity", self.productivity),
            ("simplicity", self.simplicity),
            ("convenience", self.convenience),
            ("risk", self.risk),
            ("fun_and_image", self.fun_and_image),
            ("environmental_friendliness", self.environmental_friendliness),
        ]
    }
}

/// Buyer utility map sub-record of the primary analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UtilityMap {
    pub stages: Vec<StageScores>,
    pub utility_blocks: Vec<String>,
    pub innovation_opportunities: Vec<String>,
    pub completed_at: Option<String>,
}

impl Default for UtilityMap {
    fn default() -> Self {
        Self {
            stages: BUYER_EXPERIENCE_STAGES
                .iter()
                .map(|s| StageScores::neutral(s))
                .collect(),
            utility_blocks: Vec::new(),
            innovation_opportunities: Vec::new(),
            completed_at: None,
        }
    }
}

/// The primary market-positioning analysis: two independently replaceable
/// sub-records
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrimaryAnalysis {
    pub paths_analysis: PathsAnalysis,
    pub utility_map: UtilityMap,
}

/// Deep snapshot of the sub-record an insight was derived from, taken at
/// generation time and never updated afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsightSource {
    PathsAnalysis(PathsAnalysis),
    UtilityMap(UtilityMap),
}

/// Audit entry recording one occasion an insight was materialized into a
/// target framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedResult {
    pub framework: TargetFramework,
    pub action: String,
    pub outcome: String,
    pub timestamp: String,
}

/// A derived record linking primary-analysis data to recommended actions in
/// one or more target frameworks. Append-only: never deleted, only extended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub source_framework: String,
    pub source_data: InsightSource,
    pub target_frameworks: Vec<TargetFramework>,
    pub title: String,
    pub description: String,
    pub recommendations: Vec<String>,
    /// Means "has been applied at least once", not "applied without user
    /// action" (inherited naming)
    pub auto_applied: bool,
    pub created_at: String,
    pub applied_results: Vec<AppliedResult>,
}

impl Insight {
    /// Create a new insight with generated ID and timestamp
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        recommendations: Vec<String>,
        target_frameworks: Vec<TargetFramework>,
        source_data: InsightSource,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_framework: "primary".to_string(),
            source_data,
            target_frameworks,
            title: title.into(),
            description: description.into(),
            recommendations,
            auto_applied: false,
            created_at: Utc::now().to_rfc3339(),
            applied_results: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub name: String,
    pub target_buyer_group: String,
    pub emotional_appeal: bool,
    pub messaging: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketingData {
    pub campaigns: Vec<Campaign>,
    pub generated_from_blue_ocean: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicRole {
    pub title: String,
    pub required_capabilities: Vec<String>,
    pub emotional_branding_skills: bool,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HrData {
    pub strategic_roles: Vec<StrategicRole>,
    pub generated_from_blue_ocean: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessImprovement {
    pub description: String,
    pub impact: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessData {
    pub improvements: Vec<ProcessImprovement>,
    pub generated_from_blue_ocean: Vec<String>,
}

/// Root state: all framework data plus the insight ledger. One live instance,
/// mutated only through the store, the applicator, and session load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkState {
    pub primary_analysis: PrimaryAnalysis,
    pub marketing: MarketingData,
    pub hr: HrData,
    pub process: ProcessData,
    pub insights: Vec<Insight>,
    pub last_updated: String,
}

impl FrameworkState {
    /// Documented zero-value default: all lists empty, utility-map stages
    /// seeded at the neutral score
    pub fn default_state() -> Self {
        Self {
            primary_analysis: PrimaryAnalysis::default(),
            marketing: MarketingData::default(),
            hr: HrData::default(),
            process: ProcessData::default(),
            insights: Vec::new(),
            last_updated: Utc::now().to_rfc3339(),
        }
    }
}

/// Partial replacement of the primary analysis: whichever sub-records are
/// present replace the live ones wholesale (no deep merge)
#[derive(Debug, Clone, Default)]
pub struct PrimaryAnalysisPatch {
    pub paths_analysis: Option<PathsAnalysis>,
    pub utility_map: Option<UtilityMap>,
}

/// Named point-in-time copy of the entire engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: FrameworkState,
    pub saved_at: String,
}

/// Session registry persisted under its own storage key
pub type SessionRegistry = HashMap<String, SessionSnapshot>;

// ===== TOOL PARAMETERS =====

/// Parameters for the bo_update_analysis tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateAnalysisParams {
    #[schemars(description = "Replacement six-paths analysis; omit to leave unchanged")]
    pub paths_analysis: Option<PathsAnalysis>,

    #[schemars(description = "Replacement buyer utility map; omit to leave unchanged")]
    pub utility_map: Option<UtilityMap>,
}

/// Parameters for the bo_apply_insight tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ApplyInsightParams {
    #[schemars(description = "ID of the insight to materialize")]
    pub insight_id: String,

    #[schemars(description = "Target framework to materialize into: marketing, hr, or process")]
    pub target_framework: TargetFramework,
}

/// Parameters for the bo_get_state tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetStateParams {
    // No parameters needed for this tool
}

/// Parameters for the bo_list_insights tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListInsightsParams {
    // No parameters needed for this tool
}

/// Parameters for the bo_save_session tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveSessionParams {
    #[schemars(description = "Slot name to save under; overwrites an existing slot of the same name")]
    pub name: String,
}

/// Parameters for the bo_load_session tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoadSessionParams {
    #[schemars(description = "Slot name to restore")]
    pub name: String,
}

/// Parameters for the bo_list_sessions tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListSessionsParams {
    // No parameters needed for this tool
}

// ===== TOOL RESPONSES =====

/// Compact insight view returned from bo_update_analysis
#[derive(Debug, Serialize)]
pub struct InsightSummary {
    pub id: String,
    pub title: String,
    pub target_frameworks: Vec<TargetFramework>,
}

impl From<&Insight> for InsightSummary {
    fn from(insight: &Insight) -> Self {
        Self {
            id: insight.id.clone(),
            title: insight.title.clone(),
            target_frameworks: insight.target_frameworks.clone(),
        }
    }
}

/// Response from bo_update_analysis
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub status: String,
    pub new_insights: Vec<InsightSummary>,
    pub total_insights: usize,
    pub last_updated: String,
}

/// Response from bo_apply_insight
#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub status: String,
    pub insight_id: String,
    pub target_framework: TargetFramework,
    pub records_created: usize,
    pub applied_at: String,
}

/// Response from bo_list_insights
#[derive(Debug, Serialize)]
pub struct InsightListResponse {
    pub insights: Vec<Insight>,
    pub total: usize,
}

/// Response from bo_save_session
#[derive(Debug, Serialize)]
pub struct SaveSessionResponse {
    pub status: String,
    pub name: String,
    pub saved_at: String,
}

/// Response from bo_load_session
#[derive(Debug, Serialize)]
pub struct LoadSessionResponse {
    pub loaded: bool,
    pub name: String,
}

/// One slot in the session registry listing
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub name: String,
    pub saved_at: String,
    pub has_primary_data: bool,
}

/// Response from bo_list_sessions
#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummary>,
    pub total: usize,
}
