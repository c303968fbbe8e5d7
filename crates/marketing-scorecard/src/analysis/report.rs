use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dimension::{Confidence, DeficitFlag, Dimension};
use super::profile::BusinessProfile;
use super::scorecard::{OutlookStatus, RatingBand, Scorecard};
use super::solutions::{InvestmentEstimate, Recommendation, SolutionPlan};

pub const EXPORT_SCHEMA_VERSION: u32 = 1;
const QUICK_ISSUE_LIMIT: usize = 3;

/// Outcome of the optional narrative enrichment step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Narrative {
    NotRequested,
    Augmented { provider: String, text: String },
    Unavailable { reason: String },
}

impl Narrative {
    pub fn text(&self) -> Option<&str> {
        match self {
            Narrative::Augmented { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Complete deterministic analysis for one business.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub profile: BusinessProfile,
    pub scorecard: Scorecard,
    pub plan: SolutionPlan,
    pub narrative: Narrative,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(profile: BusinessProfile, scorecard: Scorecard, plan: SolutionPlan) -> Self {
        Self {
            profile,
            scorecard,
            plan,
            narrative: Narrative::NotRequested,
            generated_at: Utc::now(),
        }
    }

    pub fn with_narrative(mut self, narrative: Narrative) -> Self {
        self.narrative = narrative;
        self
    }

    pub fn export(&self) -> ReportExport {
        ReportExport::from(self)
    }

    pub fn quick_assessment(&self) -> QuickAssessment {
        QuickAssessment::from(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionExport {
    pub key: Dimension,
    pub label: String,
    pub weight: f64,
    pub score: u8,
    pub rating: RatingBand,
    pub confidence: Confidence,
    pub flags: Vec<DeficitFlag>,
}

/// Flattened, versioned report used for session history and JSON responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportExport {
    pub schema_version: u32,
    pub business_name: String,
    pub industry: String,
    pub generated_at: DateTime<Utc>,
    pub overall_score: u8,
    pub rating: RatingBand,
    pub dimensions: Vec<DimensionExport>,
    pub deficit_flags: Vec<DeficitFlag>,
    pub recommendations: Vec<Recommendation>,
    pub commendation: Option<String>,
    pub estimated_investment: InvestmentEstimate,
    pub narrative: Narrative,
}

impl From<&Report> for ReportExport {
    fn from(report: &Report) -> Self {
        let dimensions = report
            .scorecard
            .breakdown()
            .iter()
            .map(|entry| DimensionExport {
                key: entry.dimension,
                label: entry.label.to_string(),
                weight: entry.weight,
                score: entry.score,
                rating: entry.rating,
                confidence: entry.confidence,
                flags: entry.flags.clone(),
            })
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            business_name: report.profile.business_name().to_string(),
            industry: report.profile.industry().to_string(),
            generated_at: report.generated_at,
            overall_score: report.scorecard.overall_score(),
            rating: report.scorecard.rating(),
            dimensions,
            deficit_flags: report.scorecard.deficit_flags().to_vec(),
            recommendations: report.plan.recommendations.clone(),
            commendation: report.plan.commendation.clone(),
            estimated_investment: report.plan.estimated_investment,
            narrative: report.narrative.clone(),
        }
    }
}

/// Condensed view for the quick-assessment mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAssessment {
    pub business_name: String,
    pub overall_score: u8,
    pub rating: RatingBand,
    pub top_issues: Vec<String>,
    pub priority_action: String,
    pub revenue_outlook: OutlookStatus,
}

impl From<&Report> for QuickAssessment {
    fn from(report: &Report) -> Self {
        let top_issues = report
            .scorecard
            .critical_issues()
            .into_iter()
            .take(QUICK_ISSUE_LIMIT)
            .map(str::to_string)
            .collect();

        let priority_action = report
            .scorecard
            .priority_actions()
            .into_iter()
            .next()
            .unwrap_or_default();

        Self {
            business_name: report.profile.business_name().to_string(),
            overall_score: report.scorecard.overall_score(),
            rating: report.scorecard.rating(),
            top_issues,
            priority_action,
            revenue_outlook: report.scorecard.outlook().status,
        }
    }
}
