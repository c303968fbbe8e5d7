use serde::{Deserialize, Serialize};

use super::dimension::{Confidence, DeficitFlag, Dimension, DimensionScore};
use super::profile::BusinessProfile;
use super::scoring::score_profile;

/// Rating band derived from a 0-100 score. Each band is closed on its low end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl RatingBand {
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=29 => RatingBand::Critical,
            30..=49 => RatingBand::Poor,
            50..=69 => RatingBand::Fair,
            70..=89 => RatingBand::Good,
            _ => RatingBand::Excellent,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RatingBand::Critical => "Critical",
            RatingBand::Poor => "Poor",
            RatingBand::Fair => "Fair",
            RatingBand::Good => "Good",
            RatingBand::Excellent => "Excellent",
        }
    }
}

/// How strongly a dimension's weakness is expected to weigh on revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    High,
    Medium,
    Low,
}

impl ImpactLevel {
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=39 => ImpactLevel::High,
            40..=69 => ImpactLevel::Medium,
            _ => ImpactLevel::Low,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ImpactLevel::High => "HIGH",
            ImpactLevel::Medium => "MEDIUM",
            ImpactLevel::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlookStatus {
    Positive,
    Neutral,
    Concerning,
    Critical,
}

impl OutlookStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OutlookStatus::Positive => "POSITIVE",
            OutlookStatus::Neutral => "NEUTRAL",
            OutlookStatus::Concerning => "CONCERNING",
            OutlookStatus::Critical => "CRITICAL",
        }
    }
}

/// Narrative revenue outlook attached to the overall rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueOutlook {
    pub status: OutlookStatus,
    pub description: &'static str,
    pub potential_improvement: &'static str,
}

impl RevenueOutlook {
    pub const fn for_band(band: RatingBand) -> Self {
        match band {
            RatingBand::Excellent => RevenueOutlook {
                status: OutlookStatus::Positive,
                description: "Strong marketing practices supporting revenue growth",
                potential_improvement: "5-10% with optimization",
            },
            RatingBand::Good => RevenueOutlook {
                status: OutlookStatus::Neutral,
                description: "Marketing practices are adequate but have room for improvement",
                potential_improvement: "15-25% with strategic improvements",
            },
            RatingBand::Fair | RatingBand::Poor => RevenueOutlook {
                status: OutlookStatus::Concerning,
                description: "Marketing weaknesses likely impacting revenue negatively",
                potential_improvement: "30-50% with comprehensive improvements",
            },
            RatingBand::Critical => RevenueOutlook {
                status: OutlookStatus::Critical,
                description: "Severe marketing deficiencies significantly impacting revenue",
                potential_improvement: "50-100%+ with complete marketing overhaul",
            },
        }
    }
}

/// Scored dimension with its narrative labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionBreakdown {
    pub dimension: Dimension,
    pub label: &'static str,
    pub weight: f64,
    pub score: u8,
    pub rating: RatingBand,
    pub impact: ImpactLevel,
    pub confidence: Confidence,
    pub flags: Vec<DeficitFlag>,
}

impl DimensionBreakdown {
    fn from_score(score: DimensionScore) -> Self {
        Self {
            dimension: score.dimension,
            label: score.dimension.label(),
            weight: score.dimension.weight(),
            score: score.score,
            rating: RatingBand::from_score(score.score),
            impact: ImpactLevel::from_score(score.score),
            confidence: score.confidence,
            flags: score.flags,
        }
    }

    pub fn issues(&self) -> Vec<&'static str> {
        self.flags.iter().map(|flag| flag.issue()).collect()
    }
}

/// Weighted, rated summary of the eight dimension scores. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    overall_score: u8,
    weighted_total: f64,
    rating: RatingBand,
    breakdown: Vec<DimensionBreakdown>,
    deficit_flags: Vec<DeficitFlag>,
    outlook: RevenueOutlook,
}

const CRITICAL_ISSUE_THRESHOLD: u8 = 50;

impl Scorecard {
    /// Score a profile and aggregate the result.
    pub fn evaluate(profile: &BusinessProfile) -> Self {
        Self::aggregate(score_profile(profile))
    }

    /// Combine one score per dimension into a scorecard.
    ///
    /// The input always originates from the scorer; a missing or duplicated dimension
    /// is a programming error and trips a debug assertion.
    pub fn aggregate(mut scores: [DimensionScore; Dimension::COUNT]) -> Self {
        scores.sort_by_key(|score| score.dimension);
        debug_assert!(
            scores
                .iter()
                .zip(Dimension::ALL)
                .all(|(score, dimension)| score.dimension == dimension),
            "scorecard requires exactly one score per dimension"
        );

        let weighted_total: f64 = scores
            .iter()
            .map(|score| score.dimension.weight() * f64::from(score.score))
            .sum();
        let overall_score = weighted_total.round().clamp(0.0, 100.0) as u8;
        let rating = RatingBand::from_score(overall_score);

        let mut deficit_flags: Vec<DeficitFlag> = scores
            .iter()
            .flat_map(|score| score.flags.iter().copied())
            .collect();
        deficit_flags.sort();
        deficit_flags.dedup();

        let breakdown = scores
            .into_iter()
            .map(DimensionBreakdown::from_score)
            .collect();

        Self {
            overall_score,
            weighted_total,
            rating,
            breakdown,
            deficit_flags,
            outlook: RevenueOutlook::for_band(rating),
        }
    }

    pub fn overall_score(&self) -> u8 {
        self.overall_score
    }

    /// Unrounded weighted sum backing the overall score.
    pub fn weighted_total(&self) -> f64 {
        self.weighted_total
    }

    pub fn rating(&self) -> RatingBand {
        self.rating
    }

    pub fn breakdown(&self) -> &[DimensionBreakdown] {
        &self.breakdown
    }

    pub fn dimension(&self, dimension: Dimension) -> &DimensionBreakdown {
        &self.breakdown[dimension.index()]
    }

    /// Union of all dimension flags in declaration order.
    pub fn deficit_flags(&self) -> &[DeficitFlag] {
        &self.deficit_flags
    }

    pub fn outlook(&self) -> &RevenueOutlook {
        &self.outlook
    }

    /// Issues raised by dimensions scoring below 50, weakest dimension first.
    pub fn critical_issues(&self) -> Vec<&'static str> {
        let mut weak: Vec<&DimensionBreakdown> = self
            .breakdown
            .iter()
            .filter(|entry| entry.score < CRITICAL_ISSUE_THRESHOLD)
            .collect();
        weak.sort_by_key(|entry| (entry.score, entry.dimension));
        weak.into_iter().flat_map(|entry| entry.issues()).collect()
    }

    /// Headline actions for dimensions below 50, weakest first.
    pub fn priority_actions(&self) -> Vec<String> {
        let mut weak: Vec<&DimensionBreakdown> = self
            .breakdown
            .iter()
            .filter(|entry| entry.score < CRITICAL_ISSUE_THRESHOLD)
            .collect();
        weak.sort_by_key(|entry| (entry.score, entry.dimension));

        if weak.is_empty() {
            return vec!["Continue monitoring current marketing strategies".to_string()];
        }

        weak.into_iter()
            .map(|entry| {
                format!(
                    "Immediately address {} (Score: {})",
                    entry.label, entry.score
                )
            })
            .collect()
    }
}
