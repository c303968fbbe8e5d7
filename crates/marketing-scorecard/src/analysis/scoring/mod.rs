//! Per-dimension scoring rules.
//!
//! Every rule is a pure function of the [`BusinessProfile`] returning a score and the
//! deficit flags that explain it. Rules never see each other's output.

mod rules;
mod signals;

use super::dimension::{Dimension, DimensionScore};
use super::profile::BusinessProfile;

/// Score a single dimension.
pub fn score_dimension(dimension: Dimension, profile: &BusinessProfile) -> DimensionScore {
    match dimension {
        Dimension::WebsiteQuality => rules::website_quality(profile),
        Dimension::SocialMediaPresence => rules::social_media_presence(profile),
        Dimension::MarketingRoi => rules::marketing_roi(profile),
        Dimension::ContentMarketing => rules::content_marketing(profile),
        Dimension::Seo => rules::seo(profile),
        Dimension::CustomerEngagement => rules::customer_engagement(profile),
        Dimension::BrandConsistency => rules::brand_consistency(profile),
        Dimension::AudienceAlignment => rules::audience_alignment(profile),
    }
}

/// Score all eight dimensions in canonical order.
pub fn score_profile(profile: &BusinessProfile) -> [DimensionScore; Dimension::COUNT] {
    Dimension::ALL.map(|dimension| score_dimension(dimension, profile))
}
