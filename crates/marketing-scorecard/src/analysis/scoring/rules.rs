use super::super::dimension::{DeficitFlag, Dimension, DimensionScore};
use super::super::profile::BusinessProfile;
use super::signals::{
    classify_website, count_channels, describe_audience, largest_related_group, normalize_token,
    Scheme, WebsiteSignal, CONTENT_KEYWORDS, ENGAGEMENT_KEYWORDS, SEARCH_KEYWORDS,
};

const NEEDS_ATTENTION_BELOW: u8 = 70;

const MALFORMED_WEBSITE_SCORE: u32 = 15;
const SOCIAL_PAGE_WEBSITE_SCORE: u32 = 25;
const WEBSITE_BASE: u32 = 40;
const HTTPS_BONUS: u32 = 20;
const SCHEMELESS_BONUS: u32 = 10;
const CUSTOM_DOMAIN_BONUS: u32 = 15;

const EXPECTED_SOCIAL_PLATFORMS: f64 = 4.0;
const UNVERIFIED_HANDLE_WEIGHT: f64 = 0.5;

const UNDER_INVESTMENT_SEVERE: f64 = 0.02;
const UNDER_INVESTMENT: f64 = 0.05;
const HEALTHY_SPEND_CEILING: f64 = 0.12;
const ELEVATED_SPEND_CEILING: f64 = 0.20;

const CONTENT_HUB_POINTS: u32 = 20;
const CONTENT_CHANNEL_POINTS: u32 = 30;

const SEO_BASE: u32 = 20;
const SEO_HTTPS_POINTS: u32 = 20;
const SEO_CUSTOM_DOMAIN_POINTS: u32 = 20;
const SEO_SEARCH_CHANNEL_POINTS: u32 = 40;

const ENGAGEMENT_BASE: u32 = 20;
const ENGAGEMENT_CHANNEL_POINTS: u32 = 25;
const ENGAGEMENT_SOCIAL_POINTS: u32 = 10;
const ENGAGEMENT_SOCIAL_CAP: usize = 3;

const BRAND_FLOOR: u32 = 40;
const BRAND_SPAN: u32 = 60;
const BRAND_CONSISTENCY_THRESHOLD: f64 = 0.75;

const AUDIENCE_MISSING_SCORE: i32 = 10;
const AUDIENCE_BASE: i32 = 35;
const AUDIENCE_WORD_POINTS: i32 = 9;
const AUDIENCE_WORD_CAP: i32 = 45;
const AUDIENCE_NUMBER_POINTS: i32 = 10;
const AUDIENCE_BROAD_CAP: i32 = 30;
const AUDIENCE_MIN_WORDS: usize = 3;
const NO_CHANNEL_PENALTY: i32 = 20;
const SINGLE_CHANNEL_PENALTY: i32 = 10;

fn scored(dimension: Dimension, score: u32, flags: &[DeficitFlag]) -> DimensionScore {
    flags.iter().fold(
        DimensionScore::new(dimension, score.min(100) as u8),
        |acc, flag| acc.with_flag(*flag),
    )
}

/// Like [`scored`], but a score below the attention line always names a deficit.
fn scored_or(
    dimension: Dimension,
    score: u32,
    flags: &[DeficitFlag],
    fallback: DeficitFlag,
) -> DimensionScore {
    let result = scored(dimension, score, flags);
    if result.flags.is_empty() && result.score < NEEDS_ATTENTION_BELOW {
        result.with_flag(fallback)
    } else {
        result
    }
}

pub(crate) fn website_quality(profile: &BusinessProfile) -> DimensionScore {
    let dimension = Dimension::WebsiteQuality;

    match classify_website(profile.website()) {
        WebsiteSignal::Absent => scored(dimension, 0, &[DeficitFlag::NoWebsite]),
        WebsiteSignal::Malformed => scored(
            dimension,
            MALFORMED_WEBSITE_SCORE,
            &[DeficitFlag::MalformedWebsiteUrl],
        ),
        WebsiteSignal::SocialPage => scored(
            dimension,
            SOCIAL_PAGE_WEBSITE_SCORE,
            &[DeficitFlag::SocialPageAsWebsite],
        ),
        WebsiteSignal::Site(site) => {
            let mut score = WEBSITE_BASE;
            let mut flags = Vec::new();

            match site.scheme {
                Scheme::Https => score += HTTPS_BONUS,
                Scheme::Missing => score += SCHEMELESS_BONUS,
                Scheme::Http => flags.push(DeficitFlag::InsecureWebsite),
            }

            if site.custom_domain {
                score += CUSTOM_DOMAIN_BONUS;
            } else {
                flags.push(DeficitFlag::BuilderSubdomain);
            }

            scored_or(dimension, score, &flags, DeficitFlag::UnconfirmedHttps)
        }
    }
}

pub(crate) fn social_media_presence(profile: &BusinessProfile) -> DimensionScore {
    let dimension = Dimension::SocialMediaPresence;

    if profile.social_media().is_empty() {
        return scored(dimension, 0, &[DeficitFlag::NoSocialPresence]);
    }

    let verified = profile.verified_social_count() as f64;
    let unverified = profile.unverified_social_count();
    let effective = verified + UNVERIFIED_HANDLE_WEIGHT * unverified as f64;
    let coverage = (effective / EXPECTED_SOCIAL_PLATFORMS).min(1.0);
    let score = (coverage * 100.0).round() as u32;

    let mut flags = Vec::new();
    if effective < 2.0 {
        flags.push(DeficitFlag::SingleSocialChannel);
    } else if effective < EXPECTED_SOCIAL_PLATFORMS {
        flags.push(DeficitFlag::LimitedSocialCoverage);
    }
    if unverified > 0 {
        flags.push(DeficitFlag::UnverifiedSocialHandles);
    }

    scored(dimension, score, &flags)
}

pub(crate) fn marketing_roi(profile: &BusinessProfile) -> DimensionScore {
    let dimension = Dimension::MarketingRoi;

    let (Some(revenue), Some(budget)) = (profile.monthly_revenue(), profile.marketing_budget())
    else {
        return DimensionScore::unmeasured(dimension, DeficitFlag::RoiUnmeasured);
    };

    if revenue == 0.0 {
        if budget == 0.0 {
            return DimensionScore::unmeasured(dimension, DeficitFlag::RoiUnmeasured);
        }
        return scored(
            dimension,
            10,
            &[DeficitFlag::BudgetExceedsRevenue, DeficitFlag::InefficientSpend],
        );
    }

    let ratio = budget / revenue;
    if ratio < UNDER_INVESTMENT_SEVERE {
        scored(dimension, 20, &[DeficitFlag::UnderInvestment])
    } else if ratio < UNDER_INVESTMENT {
        scored(dimension, 45, &[DeficitFlag::UnderInvestment])
    } else if ratio < HEALTHY_SPEND_CEILING {
        scored(dimension, 85, &[])
    } else if ratio < ELEVATED_SPEND_CEILING {
        scored(dimension, 65, &[DeficitFlag::ElevatedSpend])
    } else if !profile.overspends() {
        scored(dimension, 35, &[DeficitFlag::InefficientSpend])
    } else {
        scored(
            dimension,
            15,
            &[DeficitFlag::BudgetExceedsRevenue, DeficitFlag::InefficientSpend],
        )
    }
}

pub(crate) fn content_marketing(profile: &BusinessProfile) -> DimensionScore {
    let dimension = Dimension::ContentMarketing;

    let has_hub = classify_website(profile.website()).site().is_some();
    let content_channels = count_channels(profile.channels(), CONTENT_KEYWORDS) as u32;

    let mut score = content_channels.saturating_mul(CONTENT_CHANNEL_POINTS);
    if has_hub {
        score += CONTENT_HUB_POINTS;
    }

    let mut flags = Vec::new();
    match content_channels {
        0 => flags.push(DeficitFlag::NoContentProgram),
        1 => flags.push(DeficitFlag::SingleContentFormat),
        _ => {}
    }
    if content_channels > 0 && !has_hub {
        flags.push(DeficitFlag::ContentWithoutHub);
    }

    scored(dimension, score, &flags)
}

pub(crate) fn seo(profile: &BusinessProfile) -> DimensionScore {
    let dimension = Dimension::Seo;

    let signal = classify_website(profile.website());
    let Some(site) = signal.site() else {
        return scored(dimension, 0, &[DeficitFlag::NoIndexableSite]);
    };

    let mut score = SEO_BASE;
    if site.scheme == Scheme::Https {
        score += SEO_HTTPS_POINTS;
    }
    if site.custom_domain {
        score += SEO_CUSTOM_DOMAIN_POINTS;
    }

    let mut flags = Vec::new();
    if count_channels(profile.channels(), SEARCH_KEYWORDS) > 0 {
        score += SEO_SEARCH_CHANNEL_POINTS;
    } else {
        flags.push(DeficitFlag::NoSearchStrategy);
    }

    scored_or(dimension, score, &flags, DeficitFlag::WeakSearchFoundation)
}

pub(crate) fn customer_engagement(profile: &BusinessProfile) -> DimensionScore {
    let dimension = Dimension::CustomerEngagement;

    let engagement_channels = count_channels(profile.channels(), ENGAGEMENT_KEYWORDS) as u32;
    let verified_social = profile.verified_social_count();

    if engagement_channels == 0 && verified_social == 0 {
        return DimensionScore::unmeasured(dimension, DeficitFlag::EngagementUnmeasured);
    }

    let social_points = verified_social.min(ENGAGEMENT_SOCIAL_CAP) as u32 * ENGAGEMENT_SOCIAL_POINTS;
    let score = ENGAGEMENT_BASE
        + engagement_channels.saturating_mul(ENGAGEMENT_CHANNEL_POINTS)
        + social_points;

    let flags: &[DeficitFlag] = if engagement_channels == 0 {
        &[DeficitFlag::NoDirectEngagement]
    } else {
        &[]
    };

    scored_or(dimension, score, flags, DeficitFlag::ThinEngagement)
}

pub(crate) fn brand_consistency(profile: &BusinessProfile) -> DimensionScore {
    let dimension = Dimension::BrandConsistency;

    let mut tokens = Vec::new();
    if let Some(label) = classify_website(profile.website())
        .site()
        .and_then(|site| site.brand_label())
    {
        tokens.push(label);
    }
    tokens.extend(
        profile
            .verified_handles()
            .map(|(_, handle)| normalize_token(handle))
            .filter(|token| !token.is_empty()),
    );

    if tokens.len() < 2 {
        return DimensionScore::unmeasured(dimension, DeficitFlag::BrandUnmeasured);
    }

    let related = largest_related_group(&tokens) as u32;
    let total = tokens.len() as u32;
    let score = BRAND_FLOOR as f64 + (BRAND_SPAN * related) as f64 / total as f64;
    let consistency = related as f64 / total as f64;

    let flags: &[DeficitFlag] = if consistency < BRAND_CONSISTENCY_THRESHOLD {
        &[DeficitFlag::InconsistentBranding]
    } else {
        &[]
    };

    scored(dimension, score.round() as u32, flags)
}

pub(crate) fn audience_alignment(profile: &BusinessProfile) -> DimensionScore {
    let dimension = Dimension::AudienceAlignment;
    let mut flags = Vec::new();

    let mut score = match profile.target_audience() {
        None => {
            flags.push(DeficitFlag::NoTargetAudience);
            AUDIENCE_MISSING_SCORE
        }
        Some(description) => {
            let wording = describe_audience(description);
            let word_points =
                (wording.meaningful_words as i32 * AUDIENCE_WORD_POINTS).min(AUDIENCE_WORD_CAP);
            let mut score = AUDIENCE_BASE + word_points;
            if wording.has_number {
                score += AUDIENCE_NUMBER_POINTS;
            }
            if wording.broad {
                flags.push(DeficitFlag::BroadAudience);
                score = score.min(AUDIENCE_BROAD_CAP);
            }
            if wording.meaningful_words < AUDIENCE_MIN_WORDS {
                flags.push(DeficitFlag::VagueAudience);
            }
            score
        }
    };

    match profile.channels().len() {
        0 => {
            flags.push(DeficitFlag::NoMarketingChannels);
            score -= NO_CHANNEL_PENALTY;
        }
        1 => {
            flags.push(DeficitFlag::SingleMarketingChannel);
            score -= SINGLE_CHANNEL_PENALTY;
        }
        _ => {}
    }

    scored_or(
        dimension,
        score.clamp(0, 100) as u32,
        &flags,
        DeficitFlag::ShallowAudienceDefinition,
    )
}
