//! Marketing posture analysis: profile normalization, per-dimension scoring, weighted
//! scorecard aggregation and the recommendation engine.
//!
//! The pipeline up to the finished [`Report`] is synchronous and free of side effects.
//! Narrative augmentation and session history sit behind capability traits so the
//! service can run fully offline.

pub mod augment;
pub mod batch;
pub mod dimension;
pub mod history;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod router;
pub mod scorecard;
pub mod scoring;
pub mod service;
pub mod solutions;

#[cfg(test)]
mod tests;

pub use augment::{augment_report, AugmentationError, InsightAugmenter, NoopAugmenter};
pub use batch::{BatchImportError, BatchImporter};
pub use dimension::{Confidence, DeficitFlag, Dimension, DimensionScore};
pub use history::{HistoryError, ReportHistory};
pub use pipeline::{AnalysisError, MarketingAnalyzer};
pub use profile::{BusinessInput, BusinessProfile, QuickInput, ValidationError};
pub use report::{DimensionExport, Narrative, QuickAssessment, Report, ReportExport};
pub use router::analysis_router;
pub use scorecard::{
    DimensionBreakdown, ImpactLevel, OutlookStatus, RatingBand, RevenueOutlook, Scorecard,
};
pub use service::{AnalysisService, AnalysisServiceError};
pub use solutions::{
    ConfigurationError, CostCadence, CostRange, ImpactRange, InvestmentEstimate, Recommendation,
    RecommendationId, RecommendationTemplate, SolutionEngine, SolutionPlan, TemplateCatalog, Tier,
};
