use tracing::{debug, error, info};

use super::profile::{BusinessInput, BusinessProfile, QuickInput, ValidationError};
use super::report::{QuickAssessment, Report};
use super::scorecard::Scorecard;
use super::solutions::{ConfigurationError, SolutionEngine};

/// Failure of the deterministic pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The scorecard was computed but no plan could be derived from it. The scorecard is
    /// returned so callers can decide whether to show it.
    #[error("recommendation catalog is inconsistent: {source}")]
    Configuration {
        scorecard: Box<Scorecard>,
        #[source]
        source: ConfigurationError,
    },
}

impl AnalysisError {
    pub fn scorecard(&self) -> Option<&Scorecard> {
        match self {
            AnalysisError::Configuration { scorecard, .. } => Some(scorecard),
            AnalysisError::Validation(_) => None,
        }
    }
}

/// Stateless profile → scorecard → plan pipeline.
#[derive(Default)]
pub struct MarketingAnalyzer {
    engine: SolutionEngine,
}

impl MarketingAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: SolutionEngine) -> Self {
        Self { engine }
    }

    pub fn analyze(&self, input: BusinessInput) -> Result<Report, AnalysisError> {
        let profile = BusinessProfile::build(input).map_err(|err| {
            debug!(error = %err, "business input rejected");
            err
        })?;
        self.analyze_profile(profile)
    }

    pub fn analyze_profile(&self, profile: BusinessProfile) -> Result<Report, AnalysisError> {
        let scorecard = Scorecard::evaluate(&profile);

        let plan = match self.engine.plan(&scorecard) {
            Ok(plan) => plan,
            Err(source) => {
                error!(
                    business = profile.business_name(),
                    error = %source,
                    "solution engine aborted after scoring"
                );
                return Err(AnalysisError::Configuration {
                    scorecard: Box::new(scorecard),
                    source,
                });
            }
        };

        info!(
            business = profile.business_name(),
            overall_score = scorecard.overall_score(),
            rating = scorecard.rating().label(),
            recommendations = plan.recommendations.len(),
            "marketing analysis complete"
        );

        Ok(Report::new(profile, scorecard, plan))
    }

    pub fn quick(&self, input: QuickInput) -> Result<QuickAssessment, AnalysisError> {
        let report = self.analyze(BusinessInput::from(input))?;
        Ok(report.quick_assessment())
    }
}
