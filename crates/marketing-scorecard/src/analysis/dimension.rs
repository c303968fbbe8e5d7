use serde::{Deserialize, Serialize};

/// Marketing dimensions evaluated for every business, in canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    WebsiteQuality,
    SocialMediaPresence,
    MarketingRoi,
    ContentMarketing,
    Seo,
    CustomerEngagement,
    BrandConsistency,
    AudienceAlignment,
}

impl Dimension {
    pub const COUNT: usize = 8;

    pub const ALL: [Dimension; Dimension::COUNT] = [
        Dimension::WebsiteQuality,
        Dimension::SocialMediaPresence,
        Dimension::MarketingRoi,
        Dimension::ContentMarketing,
        Dimension::Seo,
        Dimension::CustomerEngagement,
        Dimension::BrandConsistency,
        Dimension::AudienceAlignment,
    ];

    /// Fixed aggregation weight. Weights sum to 1.0 and none exceeds 0.20.
    pub const fn weight(self) -> f64 {
        match self {
            Dimension::WebsiteQuality => 0.15,
            Dimension::SocialMediaPresence => 0.15,
            Dimension::MarketingRoi => 0.15,
            Dimension::ContentMarketing => 0.125,
            Dimension::Seo => 0.125,
            Dimension::CustomerEngagement => 0.10,
            Dimension::BrandConsistency => 0.10,
            Dimension::AudienceAlignment => 0.10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Dimension::WebsiteQuality => "Website Quality",
            Dimension::SocialMediaPresence => "Social Media Presence",
            Dimension::MarketingRoi => "Marketing ROI",
            Dimension::ContentMarketing => "Content Marketing",
            Dimension::Seo => "SEO",
            Dimension::CustomerEngagement => "Customer Engagement",
            Dimension::BrandConsistency => "Brand Consistency",
            Dimension::AudienceAlignment => "Audience Alignment",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Dimension::WebsiteQuality => "website_quality",
            Dimension::SocialMediaPresence => "social_media_presence",
            Dimension::MarketingRoi => "marketing_roi",
            Dimension::ContentMarketing => "content_marketing",
            Dimension::Seo => "seo",
            Dimension::CustomerEngagement => "customer_engagement",
            Dimension::BrandConsistency => "brand_consistency",
            Dimension::AudienceAlignment => "audience_alignment",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Named deficit signals raised by the scorer.
///
/// Declaration order is significant: it is the tie-break order used by the solution
/// engine when two candidates carry the same priority score, and `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeficitFlag {
    NoWebsite,
    MalformedWebsiteUrl,
    SocialPageAsWebsite,
    BuilderSubdomain,
    InsecureWebsite,
    UnconfirmedHttps,
    NoSocialPresence,
    SingleSocialChannel,
    LimitedSocialCoverage,
    UnverifiedSocialHandles,
    BudgetExceedsRevenue,
    InefficientSpend,
    ElevatedSpend,
    UnderInvestment,
    RoiUnmeasured,
    NoContentProgram,
    ContentWithoutHub,
    SingleContentFormat,
    NoIndexableSite,
    NoSearchStrategy,
    WeakSearchFoundation,
    NoDirectEngagement,
    ThinEngagement,
    EngagementUnmeasured,
    InconsistentBranding,
    BrandUnmeasured,
    NoTargetAudience,
    BroadAudience,
    VagueAudience,
    ShallowAudienceDefinition,
    NoMarketingChannels,
    SingleMarketingChannel,
}

impl DeficitFlag {
    pub const ALL: [DeficitFlag; 32] = [
        DeficitFlag::NoWebsite,
        DeficitFlag::MalformedWebsiteUrl,
        DeficitFlag::SocialPageAsWebsite,
        DeficitFlag::BuilderSubdomain,
        DeficitFlag::InsecureWebsite,
        DeficitFlag::UnconfirmedHttps,
        DeficitFlag::NoSocialPresence,
        DeficitFlag::SingleSocialChannel,
        DeficitFlag::LimitedSocialCoverage,
        DeficitFlag::UnverifiedSocialHandles,
        DeficitFlag::BudgetExceedsRevenue,
        DeficitFlag::InefficientSpend,
        DeficitFlag::ElevatedSpend,
        DeficitFlag::UnderInvestment,
        DeficitFlag::RoiUnmeasured,
        DeficitFlag::NoContentProgram,
        DeficitFlag::ContentWithoutHub,
        DeficitFlag::SingleContentFormat,
        DeficitFlag::NoIndexableSite,
        DeficitFlag::NoSearchStrategy,
        DeficitFlag::WeakSearchFoundation,
        DeficitFlag::NoDirectEngagement,
        DeficitFlag::ThinEngagement,
        DeficitFlag::EngagementUnmeasured,
        DeficitFlag::InconsistentBranding,
        DeficitFlag::BrandUnmeasured,
        DeficitFlag::NoTargetAudience,
        DeficitFlag::BroadAudience,
        DeficitFlag::VagueAudience,
        DeficitFlag::ShallowAudienceDefinition,
        DeficitFlag::NoMarketingChannels,
        DeficitFlag::SingleMarketingChannel,
    ];

    /// The dimension whose rule raises this flag.
    pub const fn dimension(self) -> Dimension {
        match self {
            DeficitFlag::NoWebsite
            | DeficitFlag::MalformedWebsiteUrl
            | DeficitFlag::SocialPageAsWebsite
            | DeficitFlag::BuilderSubdomain
            | DeficitFlag::InsecureWebsite
            | DeficitFlag::UnconfirmedHttps => Dimension::WebsiteQuality,
            DeficitFlag::NoSocialPresence
            | DeficitFlag::SingleSocialChannel
            | DeficitFlag::LimitedSocialCoverage
            | DeficitFlag::UnverifiedSocialHandles => Dimension::SocialMediaPresence,
            DeficitFlag::BudgetExceedsRevenue
            | DeficitFlag::InefficientSpend
            | DeficitFlag::ElevatedSpend
            | DeficitFlag::UnderInvestment
            | DeficitFlag::RoiUnmeasured => Dimension::MarketingRoi,
            DeficitFlag::NoContentProgram
            | DeficitFlag::ContentWithoutHub
            | DeficitFlag::SingleContentFormat => Dimension::ContentMarketing,
            DeficitFlag::NoIndexableSite
            | DeficitFlag::NoSearchStrategy
            | DeficitFlag::WeakSearchFoundation => Dimension::Seo,
            DeficitFlag::NoDirectEngagement
            | DeficitFlag::ThinEngagement
            | DeficitFlag::EngagementUnmeasured => Dimension::CustomerEngagement,
            DeficitFlag::InconsistentBranding | DeficitFlag::BrandUnmeasured => {
                Dimension::BrandConsistency
            }
            DeficitFlag::NoTargetAudience
            | DeficitFlag::BroadAudience
            | DeficitFlag::VagueAudience
            | DeficitFlag::ShallowAudienceDefinition
            | DeficitFlag::NoMarketingChannels
            | DeficitFlag::SingleMarketingChannel => Dimension::AudienceAlignment,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            DeficitFlag::NoWebsite => "no_website",
            DeficitFlag::MalformedWebsiteUrl => "malformed_website_url",
            DeficitFlag::SocialPageAsWebsite => "social_page_as_website",
            DeficitFlag::BuilderSubdomain => "builder_subdomain",
            DeficitFlag::InsecureWebsite => "insecure_website",
            DeficitFlag::UnconfirmedHttps => "unconfirmed_https",
            DeficitFlag::NoSocialPresence => "no_social_presence",
            DeficitFlag::SingleSocialChannel => "single_social_channel",
            DeficitFlag::LimitedSocialCoverage => "limited_social_coverage",
            DeficitFlag::UnverifiedSocialHandles => "unverified_social_handles",
            DeficitFlag::BudgetExceedsRevenue => "budget_exceeds_revenue",
            DeficitFlag::InefficientSpend => "inefficient_spend",
            DeficitFlag::ElevatedSpend => "elevated_spend",
            DeficitFlag::UnderInvestment => "under_investment",
            DeficitFlag::RoiUnmeasured => "roi_unmeasured",
            DeficitFlag::NoContentProgram => "no_content_program",
            DeficitFlag::ContentWithoutHub => "content_without_hub",
            DeficitFlag::SingleContentFormat => "single_content_format",
            DeficitFlag::NoIndexableSite => "no_indexable_site",
            DeficitFlag::NoSearchStrategy => "no_search_strategy",
            DeficitFlag::WeakSearchFoundation => "weak_search_foundation",
            DeficitFlag::NoDirectEngagement => "no_direct_engagement",
            DeficitFlag::ThinEngagement => "thin_engagement",
            DeficitFlag::EngagementUnmeasured => "engagement_unmeasured",
            DeficitFlag::InconsistentBranding => "inconsistent_branding",
            DeficitFlag::BrandUnmeasured => "brand_unmeasured",
            DeficitFlag::NoTargetAudience => "no_target_audience",
            DeficitFlag::BroadAudience => "broad_audience",
            DeficitFlag::VagueAudience => "vague_audience",
            DeficitFlag::ShallowAudienceDefinition => "shallow_audience_definition",
            DeficitFlag::NoMarketingChannels => "no_marketing_channels",
            DeficitFlag::SingleMarketingChannel => "single_marketing_channel",
        }
    }

    /// One-line issue description used in scorecard narratives.
    pub const fn issue(self) -> &'static str {
        match self {
            DeficitFlag::NoWebsite => "No website detected",
            DeficitFlag::MalformedWebsiteUrl => "Website address could not be parsed",
            DeficitFlag::SocialPageAsWebsite => "A social profile is standing in for a website",
            DeficitFlag::BuilderSubdomain => "Website runs on a site-builder subdomain",
            DeficitFlag::InsecureWebsite => "Website is served without HTTPS",
            DeficitFlag::UnconfirmedHttps => "Website address does not confirm a secure connection",
            DeficitFlag::NoSocialPresence => "No social media presence",
            DeficitFlag::SingleSocialChannel => "Social presence limited to a single platform",
            DeficitFlag::LimitedSocialCoverage => "Social coverage below the expected platforms",
            DeficitFlag::UnverifiedSocialHandles => "Listed social platforms are missing handles",
            DeficitFlag::BudgetExceedsRevenue => "Marketing budget exceeds monthly revenue",
            DeficitFlag::InefficientSpend => "Marketing spend is high relative to revenue",
            DeficitFlag::ElevatedSpend => "Marketing spend is above the efficient range",
            DeficitFlag::UnderInvestment => "Marketing budget is low relative to revenue",
            DeficitFlag::RoiUnmeasured => "Insufficient data to evaluate marketing ROI",
            DeficitFlag::NoContentProgram => "No content marketing channel in use",
            DeficitFlag::ContentWithoutHub => "Content is published without an owned website",
            DeficitFlag::SingleContentFormat => "Content program relies on a single format",
            DeficitFlag::NoIndexableSite => "Nothing for search engines to index",
            DeficitFlag::NoSearchStrategy => "No search optimization activity",
            DeficitFlag::WeakSearchFoundation => "Website lacks HTTPS or a custom domain for search ranking",
            DeficitFlag::NoDirectEngagement => "No direct customer engagement channel",
            DeficitFlag::ThinEngagement => "Few channels for reaching existing customers",
            DeficitFlag::EngagementUnmeasured => "Customer engagement could not be measured",
            DeficitFlag::InconsistentBranding => "Brand identity differs across channels",
            DeficitFlag::BrandUnmeasured => "Brand consistency could not be measured",
            DeficitFlag::NoTargetAudience => "No target audience defined",
            DeficitFlag::BroadAudience => "Target audience is too broad",
            DeficitFlag::VagueAudience => "Target audience description lacks detail",
            DeficitFlag::ShallowAudienceDefinition => "Target audience needs sharper segmentation",
            DeficitFlag::NoMarketingChannels => "No active marketing channels",
            DeficitFlag::SingleMarketingChannel => "Marketing depends on a single channel",
        }
    }
}

/// Whether a score reflects observed signals or the neutral midpoint default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Measured,
    Unmeasured,
}

/// Output of a single dimension rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub score: u8,
    pub confidence: Confidence,
    pub flags: Vec<DeficitFlag>,
}

impl DimensionScore {
    pub const NEUTRAL_MIDPOINT: u8 = 50;

    /// A measured score with no deficits. Scores above 100 are clamped.
    pub fn new(dimension: Dimension, score: u8) -> Self {
        Self {
            dimension,
            score: score.min(100),
            confidence: Confidence::Measured,
            flags: Vec::new(),
        }
    }

    /// Neutral midpoint for a dimension with no direct signal.
    pub fn unmeasured(dimension: Dimension, flag: DeficitFlag) -> Self {
        Self {
            dimension,
            score: Self::NEUTRAL_MIDPOINT,
            confidence: Confidence::Unmeasured,
            flags: vec![flag],
        }
    }

    pub fn with_flag(mut self, flag: DeficitFlag) -> Self {
        debug_assert_eq!(flag.dimension(), self.dimension);
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
            self.flags.sort();
        }
        self
    }

    pub fn is_unmeasured(&self) -> bool {
        self.confidence == Confidence::Unmeasured
    }
}
