use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw, possibly partial business attributes as supplied by a form, CLI or CSV row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessInput {
    pub business_name: String,
    pub industry: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub social_media: BTreeMap<String, String>,
    #[serde(default)]
    pub monthly_revenue: Option<f64>,
    #[serde(default)]
    pub marketing_budget: Option<f64>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default, alias = "current_marketing_channels")]
    pub channels: Vec<String>,
    #[serde(default, alias = "competitor_info")]
    pub competitors: Vec<String>,
}

/// Minimal attributes for a quick assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickInput {
    pub business_name: String,
    pub industry: String,
    #[serde(default)]
    pub has_website: bool,
    #[serde(default)]
    pub social_media_count: u8,
    #[serde(default)]
    pub monthly_revenue: Option<f64>,
    #[serde(default)]
    pub marketing_budget: Option<f64>,
}

const QUICK_PLACEHOLDER_WEBSITE: &str = "https://example.com";

impl From<QuickInput> for BusinessInput {
    fn from(quick: QuickInput) -> Self {
        // Counted platforms carry no handle, so they score as unverified listings.
        let social_media = (1..=quick.social_media_count)
            .map(|index| (format!("platform_{index}"), String::new()))
            .collect();

        BusinessInput {
            business_name: quick.business_name,
            industry: quick.industry,
            website: quick
                .has_website
                .then(|| QUICK_PLACEHOLDER_WEBSITE.to_string()),
            social_media,
            monthly_revenue: quick.monthly_revenue,
            marketing_budget: quick.marketing_budget,
            ..BusinessInput::default()
        }
    }
}

/// Reasons a raw input is rejected before any scoring happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("business name must not be empty")]
    EmptyBusinessName,
    #[error("industry must not be empty")]
    EmptyIndustry,
    #[error("{field} must be non-negative (found {value})")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFiniteAmount { field: &'static str },
}

/// Validated, immutable snapshot of a business used by every scoring rule.
///
/// Optional attributes stay optional: a missing revenue figure is `None`, never `0.0`,
/// and a platform listed without a handle is kept as `None` so the scorer can tell
/// "listed but unverified" apart from "absent".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessProfile {
    business_name: String,
    industry: String,
    website: Option<String>,
    social_media: BTreeMap<String, Option<String>>,
    monthly_revenue: Option<f64>,
    marketing_budget: Option<f64>,
    target_audience: Option<String>,
    channels: Vec<String>,
    competitors: Vec<String>,
}

impl BusinessProfile {
    pub fn build(input: BusinessInput) -> Result<Self, ValidationError> {
        let business_name = input.business_name.trim().to_string();
        if business_name.is_empty() {
            return Err(ValidationError::EmptyBusinessName);
        }

        let industry = input.industry.trim().to_string();
        if industry.is_empty() {
            return Err(ValidationError::EmptyIndustry);
        }

        let monthly_revenue = validate_amount("monthly_revenue", input.monthly_revenue)?;
        let marketing_budget = validate_amount("marketing_budget", input.marketing_budget)?;

        let mut social_media: BTreeMap<String, Option<String>> = BTreeMap::new();
        for (platform, handle) in input.social_media {
            let platform = platform.trim().to_ascii_lowercase();
            if platform.is_empty() {
                continue;
            }
            let handle = non_blank(Some(handle));
            // Platforms differing only in case collapse; a real handle beats a blank one.
            let slot = social_media.entry(platform).or_insert(None);
            if slot.is_none() {
                *slot = handle;
            }
        }

        Ok(Self {
            business_name,
            industry,
            website: non_blank(input.website),
            social_media,
            monthly_revenue,
            marketing_budget,
            target_audience: non_blank(input.target_audience),
            channels: dedupe_case_insensitive(input.channels),
            competitors: dedupe_case_insensitive(input.competitors),
        })
    }

    pub fn business_name(&self) -> &str {
        &self.business_name
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn social_media(&self) -> &BTreeMap<String, Option<String>> {
        &self.social_media
    }

    /// Handles for platforms listed with a non-empty handle.
    pub fn verified_handles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.social_media
            .iter()
            .filter_map(|(platform, handle)| handle.as_deref().map(|h| (platform.as_str(), h)))
    }

    pub fn verified_social_count(&self) -> usize {
        self.verified_handles().count()
    }

    pub fn unverified_social_count(&self) -> usize {
        self.social_media
            .values()
            .filter(|handle| handle.is_none())
            .count()
    }

    pub fn monthly_revenue(&self) -> Option<f64> {
        self.monthly_revenue
    }

    pub fn marketing_budget(&self) -> Option<f64> {
        self.marketing_budget
    }

    /// True when a budget larger than revenue was supplied. Flagged by the scorer, not rejected.
    pub fn overspends(&self) -> bool {
        matches!(
            (self.marketing_budget, self.monthly_revenue),
            (Some(budget), Some(revenue)) if budget > revenue
        )
    }

    pub fn target_audience(&self) -> Option<&str> {
        self.target_audience.as_deref()
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn competitors(&self) -> &[String] {
        &self.competitors
    }
}

impl TryFrom<BusinessInput> for BusinessProfile {
    type Error = ValidationError;

    fn try_from(input: BusinessInput) -> Result<Self, Self::Error> {
        Self::build(input)
    }
}

fn validate_amount(field: &'static str, value: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match value {
        None => Ok(None),
        Some(amount) if !amount.is_finite() => Err(ValidationError::NonFiniteAmount { field }),
        Some(amount) if amount < 0.0 => Err(ValidationError::NegativeAmount {
            field,
            value: amount,
        }),
        Some(amount) => Ok(Some(amount)),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn dedupe_case_insensitive(values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    let mut kept = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        let folded = trimmed.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        kept.push(trimmed.to_string());
    }
    kept
}
