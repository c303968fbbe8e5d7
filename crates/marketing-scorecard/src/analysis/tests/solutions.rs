use std::collections::BTreeSet;

use super::common::*;
use crate::analysis::scoring::score_profile;
use crate::analysis::solutions::COMMENDATION;
use crate::analysis::{
    AnalysisError, ConfigurationError, CostRange, DeficitFlag, Dimension, DimensionScore,
    ImpactRange, MarketingAnalyzer, RatingBand, RecommendationId, RecommendationTemplate,
    Scorecard, SolutionEngine, TemplateCatalog, Tier,
};

fn plan_for(scorecard: &Scorecard) -> crate::analysis::SolutionPlan {
    SolutionEngine::new()
        .plan(scorecard)
        .expect("standard catalog covers every flag")
}

#[test]
fn scenario_a_leads_with_immediate_website_build() {
    let scorecard = Scorecard::evaluate(&profile(scenario_a_input()));
    let plan = plan_for(&scorecard);

    let ids: Vec<RecommendationId> = plan.recommendations.iter().map(|r| r.id).collect();
    assert_eq!(
        ids,
        vec![
            RecommendationId::WebsiteBuild,
            RecommendationId::SocialStrategy,
            RecommendationId::ContentStrategy,
            RecommendationId::AudienceResearch,
            RecommendationId::ChannelDiversification,
            RecommendationId::BudgetIncrease,
            RecommendationId::FeedbackSystem,
            RecommendationId::BrandIdentity,
        ]
    );

    let top = &plan.recommendations[0];
    assert_eq!(top.rank, 1);
    assert_eq!(top.tier, Tier::Immediate);
    assert_eq!(
        top.dimensions,
        vec![Dimension::WebsiteQuality, Dimension::Seo]
    );
    assert_eq!(
        top.flags,
        vec![DeficitFlag::NoWebsite, DeficitFlag::NoIndexableSite]
    );
    assert!((top.priority_score - 15.0).abs() < 1e-9);
    assert!(plan.commendation.is_none());
}

#[test]
fn equal_priorities_follow_flag_declaration_order() {
    let scorecard = Scorecard::evaluate(&profile(scenario_a_input()));
    let plan = plan_for(&scorecard);

    // Website and social both score 0 with weight 0.15.
    assert_eq!(
        plan.recommendations[0].priority_score,
        plan.recommendations[1].priority_score
    );
    assert_eq!(plan.recommendations[0].id, RecommendationId::WebsiteBuild);
    assert_eq!(plan.recommendations[1].id, RecommendationId::SocialStrategy);
}

#[test]
fn scenario_a_investment_totals_split_by_cadence() {
    let scorecard = Scorecard::evaluate(&profile(scenario_a_input()));
    let estimate = plan_for(&scorecard).estimated_investment;
    assert_eq!(estimate.one_time(), CostRange::one_time(6_000, 28_000));
    assert_eq!(estimate.monthly(), CostRange::monthly(2_000, 10_000));
}

#[test]
fn scenario_b_has_no_immediate_entries() {
    let scorecard = Scorecard::evaluate(&profile(scenario_b_input()));
    assert_eq!(scorecard.rating(), RatingBand::Fair);
    let plan = plan_for(&scorecard);

    assert_eq!(plan.immediate().count(), 0);
    assert!(plan
        .recommendations
        .iter()
        .all(|r| r.id != RecommendationId::WebsiteBuild));

    let ordered: Vec<(RecommendationId, Tier)> = plan
        .recommendations
        .iter()
        .map(|r| (r.id, r.tier))
        .collect();
    assert_eq!(
        ordered,
        vec![
            (RecommendationId::SocialExpansion, Tier::ShortTerm),
            (RecommendationId::ContentCalendar, Tier::ShortTerm),
            (RecommendationId::SeoOptimization, Tier::ShortTerm),
            (RecommendationId::AudienceResearch, Tier::ShortTerm),
            (RecommendationId::RetentionProgram, Tier::ShortTerm),
            (RecommendationId::BrandIdentity, Tier::LongTerm),
        ]
    );
}

#[test]
fn weak_engagement_and_elevated_spend_get_recommendations() {
    let plan = plan_for(&Scorecard::evaluate(&profile(direct_mail_input())));
    let ids: Vec<RecommendationId> = plan.recommendations.iter().map(|r| r.id).collect();

    assert!(ids.contains(&RecommendationId::RetentionProgram));
    assert!(ids.contains(&RecommendationId::BudgetReallocation));
    assert!(plan.commendation.is_none());
}

#[test]
fn scenario_c_excellent_without_flags_gets_commendation() {
    let scorecard = uniform_scorecard(95);
    assert_eq!(scorecard.rating(), RatingBand::Excellent);
    let plan = plan_for(&scorecard);
    assert!(plan.recommendations.is_empty());
    assert_eq!(plan.commendation.as_deref(), Some(COMMENDATION));
    assert_eq!(plan.estimated_investment.one_time().high, 0);
}

#[test]
fn recommendation_ids_are_unique() {
    for input in [scenario_a_input(), scenario_b_input()] {
        let plan = plan_for(&Scorecard::evaluate(&profile(input)));
        let unique: BTreeSet<RecommendationId> =
            plan.recommendations.iter().map(|r| r.id).collect();
        assert_eq!(unique.len(), plan.recommendations.len());
        let ranks: Vec<usize> = plan.recommendations.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (1..=plan.recommendations.len()).collect::<Vec<_>>());
    }
}

#[test]
fn duplicate_id_keeps_higher_priority_flag() {
    let mut scores = Dimension::ALL.map(|dimension| DimensionScore::new(dimension, 80));
    scores[Dimension::WebsiteQuality.index()] =
        DimensionScore::new(Dimension::WebsiteQuality, 60).with_flag(DeficitFlag::BuilderSubdomain);
    scores[Dimension::ContentMarketing.index()] = DimensionScore::new(Dimension::ContentMarketing, 10)
        .with_flag(DeficitFlag::ContentWithoutHub);

    let plan = plan_for(&Scorecard::aggregate(scores));

    assert_eq!(plan.recommendations.len(), 1);
    let merged = &plan.recommendations[0];
    assert_eq!(merged.id, RecommendationId::WebsiteBuild);
    assert!((merged.priority_score - 11.25).abs() < 1e-9);
    assert_eq!(merged.tier, Tier::Immediate);
    assert_eq!(
        merged.dimensions,
        vec![Dimension::WebsiteQuality, Dimension::ContentMarketing]
    );
}

#[test]
fn tier_follows_score_not_template() {
    for (score, tier) in [(29, Tier::Immediate), (30, Tier::ShortTerm), (69, Tier::ShortTerm), (70, Tier::LongTerm)] {
        let mut scores = Dimension::ALL.map(|dimension| DimensionScore::new(dimension, 95));
        scores[Dimension::Seo.index()] =
            DimensionScore::new(Dimension::Seo, score).with_flag(DeficitFlag::NoSearchStrategy);
        let plan = plan_for(&Scorecard::aggregate(scores));
        assert_eq!(plan.recommendations[0].tier, tier, "score {score}");
    }
}

#[test]
fn template_base_tier_does_not_override_score() {
    let template = RecommendationTemplate {
        id: RecommendationId::SeoOptimization,
        title: "SEO",
        description: "Search work",
        cost: CostRange::monthly(100, 200),
        timeline: "Ongoing",
        revenue_impact: ImpactRange::percent(1, 2),
        base_tier: Tier::LongTerm,
    };
    let catalog = TemplateCatalog::new().with_template(template, &[DeficitFlag::NoSearchStrategy]);

    let mut scores = Dimension::ALL.map(|dimension| DimensionScore::new(dimension, 95));
    scores[Dimension::Seo.index()] =
        DimensionScore::new(Dimension::Seo, 10).with_flag(DeficitFlag::NoSearchStrategy);
    let plan = SolutionEngine::with_catalog(catalog)
        .plan(&Scorecard::aggregate(scores))
        .expect("catalog covers the only flag");

    assert_eq!(plan.recommendations[0].tier, Tier::Immediate);
}

#[test]
fn lowering_a_score_never_worsens_its_rank() {
    let baseline = score_profile(&profile(scenario_b_input()));
    let baseline_plan = plan_for(&Scorecard::aggregate(baseline.clone()));

    for dimension in [
        Dimension::SocialMediaPresence,
        Dimension::ContentMarketing,
        Dimension::Seo,
        Dimension::BrandConsistency,
    ] {
        let rank_of = |plan: &crate::analysis::SolutionPlan| {
            plan.recommendations
                .iter()
                .find(|r| r.dimensions.contains(&dimension))
                .map(|r| r.rank)
                .expect("dimension has a recommendation")
        };

        let before = rank_of(&baseline_plan);
        for lowered in [40u8, 20, 0] {
            let mut scores = baseline.clone();
            let entry = &mut scores[dimension.index()];
            entry.score = entry.score.min(lowered);
            let plan = plan_for(&Scorecard::aggregate(scores));
            assert!(
                rank_of(&plan) <= before,
                "{dimension:?} lowered to {lowered} moved from {before} to {}",
                rank_of(&plan)
            );
        }
    }
}

#[test]
fn unmapped_flag_is_a_configuration_error() {
    let template = RecommendationTemplate {
        id: RecommendationId::SeoOptimization,
        title: "SEO",
        description: "Search work",
        cost: CostRange::monthly(100, 200),
        timeline: "Ongoing",
        revenue_impact: ImpactRange::percent(1, 2),
        base_tier: Tier::ShortTerm,
    };
    let catalog = TemplateCatalog::new().with_template(template, &[DeficitFlag::NoSearchStrategy]);
    let engine = SolutionEngine::with_catalog(catalog);

    let scorecard = Scorecard::evaluate(&profile(scenario_b_input()));
    assert_eq!(
        engine.plan(&scorecard),
        Err(ConfigurationError::UnmappedFlag {
            flag: DeficitFlag::LimitedSocialCoverage
        })
    );
}

#[test]
fn analyzer_surfaces_scorecard_with_configuration_error() {
    let analyzer = MarketingAnalyzer::with_engine(SolutionEngine::with_catalog(TemplateCatalog::new()));

    match analyzer.analyze(scenario_b_input()) {
        Err(AnalysisError::Configuration { scorecard, source }) => {
            assert_eq!(scorecard.overall_score(), 66);
            assert!(matches!(source, ConfigurationError::UnmappedFlag { .. }));
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}
