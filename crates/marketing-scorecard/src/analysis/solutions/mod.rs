mod catalog;

pub use catalog::{
    CostCadence, CostRange, ImpactRange, RecommendationId, RecommendationTemplate, TemplateCatalog,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::dimension::{DeficitFlag, Dimension};
use super::scorecard::{DimensionBreakdown, Scorecard};

pub const COMMENDATION: &str = "Excellent work: every marketing dimension is performing well. \
Keep monitoring results and revisit the strategy each quarter.";

/// Urgency bucket assigned from the owning dimension's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Immediate,
    ShortTerm,
    LongTerm,
}

impl Tier {
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=29 => Tier::Immediate,
            30..=69 => Tier::ShortTerm,
            _ => Tier::LongTerm,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Tier::Immediate => "Immediate",
            Tier::ShortTerm => "Short-term",
            Tier::LongTerm => "Long-term",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub rank: usize,
    pub id: RecommendationId,
    pub tier: Tier,
    pub title: String,
    pub description: String,
    pub priority_score: f64,
    pub cost: CostRange,
    pub timeline: String,
    pub revenue_impact: ImpactRange,
    pub dimensions: Vec<Dimension>,
    pub flags: Vec<DeficitFlag>,
}

/// Totals of the recommended cost ranges, split by cadence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentEstimate {
    pub one_time_low: u32,
    pub one_time_high: u32,
    pub monthly_low: u32,
    pub monthly_high: u32,
}

impl InvestmentEstimate {
    fn add(&mut self, cost: &CostRange) {
        match cost.cadence {
            CostCadence::OneTime => {
                self.one_time_low = self.one_time_low.saturating_add(cost.low);
                self.one_time_high = self.one_time_high.saturating_add(cost.high);
            }
            CostCadence::Monthly => {
                self.monthly_low = self.monthly_low.saturating_add(cost.low);
                self.monthly_high = self.monthly_high.saturating_add(cost.high);
            }
        }
    }

    pub fn one_time(&self) -> CostRange {
        CostRange::one_time(self.one_time_low, self.one_time_high)
    }

    pub fn monthly(&self) -> CostRange {
        CostRange::monthly(self.monthly_low, self.monthly_high)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionPlan {
    pub recommendations: Vec<Recommendation>,
    /// Present only when there is nothing to recommend.
    pub commendation: Option<String>,
    pub estimated_investment: InvestmentEstimate,
}

impl SolutionPlan {
    pub fn immediate(&self) -> impl Iterator<Item = &Recommendation> {
        self.recommendations
            .iter()
            .filter(|recommendation| recommendation.tier == Tier::Immediate)
    }

    pub fn by_tier(&self, tier: Tier) -> Vec<&Recommendation> {
        self.recommendations
            .iter()
            .filter(|recommendation| recommendation.tier == tier)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no recommendation template is mapped for deficit flag `{}`", .flag.key())]
    UnmappedFlag { flag: DeficitFlag },
}

struct Candidate<'a> {
    template: &'a RecommendationTemplate,
    lead_flag: DeficitFlag,
    priority: f64,
    tier: Tier,
    dimensions: Vec<Dimension>,
    flags: Vec<DeficitFlag>,
}

impl<'a> Candidate<'a> {
    fn new(template: &'a RecommendationTemplate, flag: DeficitFlag, owner: &DimensionBreakdown) -> Self {
        Self {
            template,
            lead_flag: flag,
            priority: priority_score(owner),
            tier: Tier::from_score(owner.score),
            dimensions: vec![owner.dimension],
            flags: vec![flag],
        }
    }

    /// Earlier flags win ties, so only a strictly higher priority replaces the lead.
    fn merge(&mut self, flag: DeficitFlag, owner: &DimensionBreakdown) {
        let priority = priority_score(owner);
        if priority > self.priority {
            self.priority = priority;
            self.lead_flag = flag;
            self.tier = Tier::from_score(owner.score);
        }
        if !self.dimensions.contains(&owner.dimension) {
            self.dimensions.push(owner.dimension);
            self.dimensions.sort();
        }
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
            self.flags.sort();
        }
    }
}

fn priority_score(owner: &DimensionBreakdown) -> f64 {
    owner.weight * f64::from(100 - owner.score.min(100))
}

/// Maps scorecard deficits to a ranked, deduplicated recommendation plan.
pub struct SolutionEngine {
    catalog: TemplateCatalog,
}

impl Default for SolutionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SolutionEngine {
    pub fn new() -> Self {
        Self::with_catalog(TemplateCatalog::standard())
    }

    pub fn with_catalog(catalog: TemplateCatalog) -> Self {
        Self { catalog }
    }

    pub fn plan(&self, scorecard: &Scorecard) -> Result<SolutionPlan, ConfigurationError> {
        let mut candidates: Vec<Candidate<'_>> = Vec::new();

        for &flag in scorecard.deficit_flags() {
            let Some(template) = self.catalog.template_for(flag) else {
                error!(flag = flag.key(), "deficit flag has no recommendation template");
                return Err(ConfigurationError::UnmappedFlag { flag });
            };
            let owner = scorecard.dimension(flag.dimension());

            match candidates
                .iter_mut()
                .find(|candidate| candidate.template.id == template.id)
            {
                Some(existing) => existing.merge(flag, owner),
                None => candidates.push(Candidate::new(template, flag, owner)),
            }
        }

        candidates.sort_by(|left, right| {
            right
                .priority
                .total_cmp(&left.priority)
                .then(left.lead_flag.cmp(&right.lead_flag))
        });

        let mut estimated_investment = InvestmentEstimate::default();
        let recommendations: Vec<Recommendation> = candidates
            .into_iter()
            .enumerate()
            .map(|(position, candidate)| {
                estimated_investment.add(&candidate.template.cost);
                Recommendation {
                    rank: position + 1,
                    id: candidate.template.id,
                    tier: candidate.tier,
                    title: candidate.template.title.to_string(),
                    description: candidate.template.description.to_string(),
                    priority_score: candidate.priority,
                    cost: candidate.template.cost,
                    timeline: candidate.template.timeline.to_string(),
                    revenue_impact: candidate.template.revenue_impact,
                    dimensions: candidate.dimensions,
                    flags: candidate.flags,
                }
            })
            .collect();

        debug!(
            recommendations = recommendations.len(),
            overall_score = scorecard.overall_score(),
            "solution plan assembled"
        );

        let commendation = recommendations
            .is_empty()
            .then(|| COMMENDATION.to_string());

        Ok(SolutionPlan {
            recommendations,
            commendation,
            estimated_investment,
        })
    }
}
