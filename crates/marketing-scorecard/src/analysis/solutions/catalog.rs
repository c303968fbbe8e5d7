use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::dimension::DeficitFlag;
use super::Tier;

/// Canonical recommendation identity. Several deficit flags may share one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationId {
    WebsiteBuild,
    WebsiteAddressFix,
    HttpsUpgrade,
    SocialStrategy,
    SocialExpansion,
    SocialProfileAudit,
    BudgetReallocation,
    BudgetIncrease,
    AnalyticsSetup,
    ContentStrategy,
    ContentCalendar,
    SeoOptimization,
    RetentionProgram,
    FeedbackSystem,
    BrandIdentity,
    AudienceResearch,
    ChannelDiversification,
}

impl RecommendationId {
    pub const fn key(self) -> &'static str {
        match self {
            RecommendationId::WebsiteBuild => "website_build",
            RecommendationId::WebsiteAddressFix => "website_address_fix",
            RecommendationId::HttpsUpgrade => "https_upgrade",
            RecommendationId::SocialStrategy => "social_strategy",
            RecommendationId::SocialExpansion => "social_expansion",
            RecommendationId::SocialProfileAudit => "social_profile_audit",
            RecommendationId::BudgetReallocation => "budget_reallocation",
            RecommendationId::BudgetIncrease => "budget_increase",
            RecommendationId::AnalyticsSetup => "analytics_setup",
            RecommendationId::ContentStrategy => "content_strategy",
            RecommendationId::ContentCalendar => "content_calendar",
            RecommendationId::SeoOptimization => "seo_optimization",
            RecommendationId::RetentionProgram => "retention_program",
            RecommendationId::FeedbackSystem => "feedback_system",
            RecommendationId::BrandIdentity => "brand_identity",
            RecommendationId::AudienceResearch => "audience_research",
            RecommendationId::ChannelDiversification => "channel_diversification",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCadence {
    OneTime,
    Monthly,
}

/// Estimated cost in whole US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRange {
    pub low: u32,
    pub high: u32,
    pub cadence: CostCadence,
}

impl CostRange {
    pub const fn one_time(low: u32, high: u32) -> Self {
        Self {
            low,
            high,
            cadence: CostCadence::OneTime,
        }
    }

    pub const fn monthly(low: u32, high: u32) -> Self {
        Self {
            low,
            high,
            cadence: CostCadence::Monthly,
        }
    }

    pub fn describe(&self) -> String {
        if self.high == 0 {
            return "No additional cost".to_string();
        }
        let range = format!("{}-{}", format_usd(self.low), format_usd(self.high));
        match self.cadence {
            CostCadence::OneTime => range,
            CostCadence::Monthly => format!("{range}/month"),
        }
    }
}

/// Expected revenue uplift in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactRange {
    pub low_pct: u8,
    pub high_pct: u8,
}

impl ImpactRange {
    pub const fn percent(low_pct: u8, high_pct: u8) -> Self {
        Self { low_pct, high_pct }
    }

    pub fn describe(&self) -> String {
        format!("{}-{}% revenue", self.low_pct, self.high_pct)
    }
}

/// Static recommendation content shared by every flag mapped to the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationTemplate {
    pub id: RecommendationId,
    pub title: &'static str,
    pub description: &'static str,
    pub cost: CostRange,
    pub timeline: &'static str,
    pub revenue_impact: ImpactRange,
    /// Nominal urgency of the template. Plans tier by the owning dimension's score instead.
    pub base_tier: Tier,
}

/// Lookup table from deficit flag to recommendation template.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: BTreeMap<RecommendationId, RecommendationTemplate>,
    routes: BTreeMap<DeficitFlag, RecommendationId>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template and route the given flags to it.
    pub fn with_template(mut self, template: RecommendationTemplate, flags: &[DeficitFlag]) -> Self {
        for flag in flags {
            self.routes.insert(*flag, template.id);
        }
        self.templates.insert(template.id, template);
        self
    }

    pub fn template_for(&self, flag: DeficitFlag) -> Option<&RecommendationTemplate> {
        self.routes
            .get(&flag)
            .and_then(|id| self.templates.get(id))
    }

    pub fn unmapped_flags(&self) -> Vec<DeficitFlag> {
        DeficitFlag::ALL
            .into_iter()
            .filter(|flag| self.template_for(*flag).is_none())
            .collect()
    }

    /// Catalog covering every deficit flag.
    pub fn standard() -> Self {
        use DeficitFlag as F;

        Self::new()
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::WebsiteBuild,
                    title: "Website Development or Redesign",
                    description: "Create a professional, mobile-responsive website on a custom domain",
                    cost: CostRange::one_time(2_000, 10_000),
                    timeline: "4-8 weeks",
                    revenue_impact: ImpactRange::percent(10, 25),
                    base_tier: Tier::Immediate,
                },
                &[
                    F::NoWebsite,
                    F::SocialPageAsWebsite,
                    F::BuilderSubdomain,
                    F::NoIndexableSite,
                    F::ContentWithoutHub,
                ],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::WebsiteAddressFix,
                    title: "Website Address Correction",
                    description: "Fix the published website address so customers and search engines can reach it",
                    cost: CostRange::one_time(0, 200),
                    timeline: "1 week",
                    revenue_impact: ImpactRange::percent(2, 5),
                    base_tier: Tier::Immediate,
                },
                &[F::MalformedWebsiteUrl],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::HttpsUpgrade,
                    title: "HTTPS Upgrade",
                    description: "Install a TLS certificate and redirect all traffic to HTTPS",
                    cost: CostRange::one_time(0, 300),
                    timeline: "1 week",
                    revenue_impact: ImpactRange::percent(2, 5),
                    base_tier: Tier::Immediate,
                },
                &[F::InsecureWebsite, F::UnconfirmedHttps],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::SocialStrategy,
                    title: "Social Media Strategy Development",
                    description: "Create accounts and a content strategy for the platforms your customers use",
                    cost: CostRange::one_time(1_000, 3_000),
                    timeline: "2-4 weeks setup, ongoing management",
                    revenue_impact: ImpactRange::percent(5, 15),
                    base_tier: Tier::Immediate,
                },
                &[F::NoSocialPresence, F::SingleSocialChannel],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::SocialExpansion,
                    title: "Social Channel Expansion",
                    description: "Extend to additional platforms and run targeted paid campaigns",
                    cost: CostRange::monthly(500, 5_000),
                    timeline: "Ongoing",
                    revenue_impact: ImpactRange::percent(5, 12),
                    base_tier: Tier::ShortTerm,
                },
                &[F::LimitedSocialCoverage],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::SocialProfileAudit,
                    title: "Social Profile Audit",
                    description: "Claim and complete every listed social profile under a consistent handle",
                    cost: CostRange::one_time(0, 500),
                    timeline: "1-2 weeks",
                    revenue_impact: ImpactRange::percent(1, 4),
                    base_tier: Tier::ShortTerm,
                },
                &[F::UnverifiedSocialHandles],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::BudgetReallocation,
                    title: "Marketing Budget Reallocation",
                    description: "Shift spend away from underperforming channels toward those with measurable returns",
                    cost: CostRange::one_time(0, 0),
                    timeline: "Immediate",
                    revenue_impact: ImpactRange::percent(5, 15),
                    base_tier: Tier::Immediate,
                },
                &[
                    F::BudgetExceedsRevenue,
                    F::InefficientSpend,
                    F::ElevatedSpend,
                ],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::BudgetIncrease,
                    title: "Marketing Budget Increase",
                    description: "Raise marketing spend toward 5-12% of revenue, starting with proven channels",
                    cost: CostRange::monthly(500, 2_000),
                    timeline: "1-3 months",
                    revenue_impact: ImpactRange::percent(10, 20),
                    base_tier: Tier::ShortTerm,
                },
                &[F::UnderInvestment],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::AnalyticsSetup,
                    title: "Marketing Analytics Implementation",
                    description: "Set up tracking and analytics to measure marketing effectiveness",
                    cost: CostRange::one_time(500, 2_000),
                    timeline: "1-2 weeks",
                    revenue_impact: ImpactRange::percent(5, 10),
                    base_tier: Tier::Immediate,
                },
                &[F::RoiUnmeasured],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::ContentStrategy,
                    title: "Content Marketing Strategy",
                    description: "Create valuable content to attract and engage the target audience",
                    cost: CostRange::monthly(1_000, 5_000),
                    timeline: "6-12 months for significant results",
                    revenue_impact: ImpactRange::percent(8, 20),
                    base_tier: Tier::ShortTerm,
                },
                &[F::NoContentProgram],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::ContentCalendar,
                    title: "Content Creation Program",
                    description: "Publish on a regular schedule across more than one content format",
                    cost: CostRange::monthly(500, 2_000),
                    timeline: "Ongoing",
                    revenue_impact: ImpactRange::percent(5, 10),
                    base_tier: Tier::ShortTerm,
                },
                &[F::SingleContentFormat],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::SeoOptimization,
                    title: "Basic SEO Optimization",
                    description: "Optimize the website for search engines to increase visibility",
                    cost: CostRange::monthly(500, 2_000),
                    timeline: "3-6 months for results",
                    revenue_impact: ImpactRange::percent(10, 20),
                    base_tier: Tier::ShortTerm,
                },
                &[F::NoSearchStrategy, F::WeakSearchFoundation],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::RetentionProgram,
                    title: "Customer Retention Program",
                    description: "Keep repeat customers engaged through email, loyalty and referral programs",
                    cost: CostRange::monthly(500, 2_000),
                    timeline: "Ongoing",
                    revenue_impact: ImpactRange::percent(5, 15),
                    base_tier: Tier::LongTerm,
                },
                &[F::NoDirectEngagement, F::ThinEngagement],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::FeedbackSystem,
                    title: "Customer Feedback System",
                    description: "Collect and act on customer feedback to improve offerings",
                    cost: CostRange::one_time(500, 2_000),
                    timeline: "Ongoing",
                    revenue_impact: ImpactRange::percent(2, 6),
                    base_tier: Tier::LongTerm,
                },
                &[F::EngagementUnmeasured],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::BrandIdentity,
                    title: "Brand Identity Development",
                    description: "Develop consistent brand messaging, visual identity, and voice",
                    cost: CostRange::one_time(2_000, 10_000),
                    timeline: "3-6 months",
                    revenue_impact: ImpactRange::percent(5, 10),
                    base_tier: Tier::LongTerm,
                },
                &[F::InconsistentBranding, F::BrandUnmeasured],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::AudienceResearch,
                    title: "Target Audience Research",
                    description: "Define customer segments with demographics, needs and buying triggers",
                    cost: CostRange::one_time(500, 3_000),
                    timeline: "2-4 weeks",
                    revenue_impact: ImpactRange::percent(5, 15),
                    base_tier: Tier::ShortTerm,
                },
                &[
                    F::NoTargetAudience,
                    F::BroadAudience,
                    F::VagueAudience,
                    F::ShallowAudienceDefinition,
                ],
            )
            .with_template(
                RecommendationTemplate {
                    id: RecommendationId::ChannelDiversification,
                    title: "Marketing Channel Diversification",
                    description: "Add complementary channels so no single channel carries all acquisition",
                    cost: CostRange::monthly(500, 3_000),
                    timeline: "1-3 months",
                    revenue_impact: ImpactRange::percent(8, 15),
                    base_tier: Tier::ShortTerm,
                },
                &[F::NoMarketingChannels, F::SingleMarketingChannel],
            )
    }
}

fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}")
}
