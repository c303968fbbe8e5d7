use crate::infra::JsonFileHistory;
use clap::{Args, ValueEnum};
use marketing_scorecard::analysis::{
    AnalysisService, BatchImporter, BusinessInput, Confidence, MarketingAnalyzer, Narrative,
    NoopAugmenter, QuickAssessment, QuickInput, Report, ReportExport, ReportHistory, Tier,
};
use marketing_scorecard::config::AppConfig;
use marketing_scorecard::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Business name
    #[arg(long)]
    pub(crate) name: String,
    /// Industry or vertical (e.g. Restaurant, Retail)
    #[arg(long)]
    pub(crate) industry: String,
    /// Website URL, if any
    #[arg(long)]
    pub(crate) website: Option<String>,
    /// Social presence as platform:handle (repeatable; omit the handle if unknown)
    #[arg(long, value_parser = crate::infra::parse_social_handle)]
    pub(crate) social: Vec<(String, String)>,
    /// Monthly revenue in USD
    #[arg(long)]
    pub(crate) revenue: Option<f64>,
    /// Monthly marketing budget in USD
    #[arg(long)]
    pub(crate) budget: Option<f64>,
    /// Free-text target audience description
    #[arg(long)]
    pub(crate) audience: Option<String>,
    /// Marketing channel in use (repeatable)
    #[arg(long)]
    pub(crate) channel: Vec<String>,
    /// Known competitor (repeatable)
    #[arg(long)]
    pub(crate) competitor: Vec<String>,
    /// Print the report export as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Request narrative augmentation from the configured provider
    #[arg(long)]
    pub(crate) augment: bool,
}

impl AnalyzeArgs {
    fn input(&self) -> BusinessInput {
        BusinessInput {
            business_name: self.name.clone(),
            industry: self.industry.clone(),
            website: self.website.clone(),
            social_media: self.social.iter().cloned().collect(),
            monthly_revenue: self.revenue,
            marketing_budget: self.budget,
            target_audience: self.audience.clone(),
            channels: self.channel.clone(),
            competitors: self.competitor.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct QuickArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) industry: String,
    /// The business has a website
    #[arg(long)]
    pub(crate) has_website: bool,
    /// Number of active social media platforms
    #[arg(long, default_value_t = 0)]
    pub(crate) social_count: u8,
    #[arg(long)]
    pub(crate) revenue: Option<f64>,
    #[arg(long)]
    pub(crate) budget: Option<f64>,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with one business per row
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print every export as a JSON array instead of a summary table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct HistoryArgs {
    /// Number of reports to show, newest first
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only run the named sample business
    #[arg(long, value_enum)]
    pub(crate) business: Option<DemoBusiness>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoBusiness {
    Pizza,
    Techstart,
    Boutique,
}

impl DemoBusiness {
    const ALL: [DemoBusiness; 3] = [
        DemoBusiness::Pizza,
        DemoBusiness::Techstart,
        DemoBusiness::Boutique,
    ];

    fn input(self) -> BusinessInput {
        match self {
            DemoBusiness::Pizza => BusinessInput {
                business_name: "Joe's Pizza Shop".to_string(),
                industry: "Restaurant".to_string(),
                monthly_revenue: Some(15_000.0),
                marketing_budget: Some(500.0),
                ..BusinessInput::default()
            },
            DemoBusiness::Techstart => BusinessInput {
                business_name: "TechStart Solutions".to_string(),
                industry: "Technology".to_string(),
                website: Some("https://www.techstartsolutions.io".to_string()),
                social_media: [
                    ("linkedin", "techstart-solutions"),
                    ("twitter", "@techstart"),
                    ("youtube", "TechStartTV"),
                ]
                .into_iter()
                .map(|(platform, handle)| (platform.to_string(), handle.to_string()))
                .collect(),
                monthly_revenue: Some(50_000.0),
                marketing_budget: Some(5_000.0),
                target_audience: Some(
                    "Operations managers at logistics companies with 50-200 employees".to_string(),
                ),
                channels: ["LinkedIn", "Blog", "Email newsletter", "Google Ads", "Webinars"]
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                competitors: vec!["RouteWise".to_string(), "FleetLogic".to_string()],
            },
            DemoBusiness::Boutique => BusinessInput {
                business_name: "Bella's Boutique".to_string(),
                industry: "Retail".to_string(),
                website: Some("bellasboutique.wixsite.com/shop".to_string()),
                social_media: [("instagram".to_string(), "bellas_boutique".to_string())]
                    .into_iter()
                    .collect(),
                monthly_revenue: Some(25_000.0),
                marketing_budget: Some(1_500.0),
                target_audience: Some(
                    "Women aged 25-45 interested in affordable fashion".to_string(),
                ),
                channels: vec!["Instagram".to_string(), "Word of mouth".to_string()],
                competitors: vec!["Main Street Apparel".to_string()],
            },
        }
    }
}

pub(crate) async fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let history = Arc::new(JsonFileHistory::new(config.history.path.clone()));
    let service = AnalysisService::new(history)
        .with_augmenter(Arc::new(NoopAugmenter), config.augmentation.timeout);

    let report = service.analyze(args.input(), args.augment).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.export())?);
    } else {
        render_report(&report);
    }
    Ok(())
}

pub(crate) fn run_quick(args: QuickArgs) -> Result<(), AppError> {
    let QuickArgs {
        name,
        industry,
        has_website,
        social_count,
        revenue,
        budget,
        json,
    } = args;

    let assessment = MarketingAnalyzer::new().quick(QuickInput {
        business_name: name,
        industry,
        has_website,
        social_media_count: social_count,
        monthly_revenue: revenue,
        marketing_budget: budget,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        render_quick(&assessment);
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let inputs = BatchImporter::from_path(&args.input)?;
    let analyzer = MarketingAnalyzer::new();

    let mut exports = Vec::with_capacity(inputs.len());
    let mut skipped = Vec::new();
    for (index, input) in inputs.into_iter().enumerate() {
        // Row numbers are 1-based and skip the header line.
        let row = index + 2;
        match analyzer.analyze(input) {
            Ok(report) => exports.push(report.export()),
            Err(err) => skipped.push((row, err.to_string())),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&exports)?);
    } else {
        println!(
            "Batch analysis of {} ({} analyzed, {} skipped)",
            args.input.display(),
            exports.len(),
            skipped.len()
        );
        for export in &exports {
            render_export_line(export);
        }
    }

    for (row, reason) in &skipped {
        eprintln!("Skipped row {row}: {reason}");
    }
    Ok(())
}

pub(crate) fn run_history(args: HistoryArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let history = JsonFileHistory::new(config.history.path.clone());
    let entries = history.recent(args.limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No reports recorded in {}", history.path().display());
        return Ok(());
    }
    println!("Recent reports ({})", history.path().display());
    for export in &entries {
        render_export_line(export);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let analyzer = MarketingAnalyzer::new();
    let businesses: Vec<DemoBusiness> = match args.business {
        Some(business) => vec![business],
        None => DemoBusiness::ALL.to_vec(),
    };

    println!("Marketing scorecard demo");
    for business in businesses {
        let report = analyzer.analyze(business.input())?;
        println!();
        render_report(&report);
    }
    Ok(())
}

fn render_report(report: &Report) {
    let scorecard = &report.scorecard;
    let outlook = scorecard.outlook();

    println!(
        "{} ({})",
        report.profile.business_name(),
        report.profile.industry()
    );
    println!(
        "Overall score: {}/100 ({})",
        scorecard.overall_score(),
        scorecard.rating().label()
    );
    println!(
        "Revenue outlook: {} - {}",
        outlook.status.label(),
        outlook.description
    );
    println!("Potential improvement: {}", outlook.potential_improvement);

    println!("\nDimension breakdown:");
    for entry in scorecard.breakdown() {
        let measured = if entry.confidence == Confidence::Unmeasured {
            " (not measured)"
        } else {
            ""
        };
        println!(
            "  - {} [{:.0}%]: {}/100 {} | impact {}{}",
            entry.label,
            entry.weight * 100.0,
            entry.score,
            entry.rating.label(),
            entry.impact.label(),
            measured
        );
        for issue in entry.issues() {
            println!("      * {issue}");
        }
    }

    render_solutions(report);

    match &report.narrative {
        Narrative::NotRequested => {}
        Narrative::Augmented { provider, text } => {
            println!("\nInsights ({provider}):\n{text}");
        }
        Narrative::Unavailable { reason } => {
            println!("\nInsights unavailable: {reason}");
        }
    }
}

fn render_solutions(report: &Report) {
    let plan = &report.plan;

    if let Some(commendation) = &plan.commendation {
        println!("\n{commendation}");
        return;
    }

    println!("\nRecommended solutions:");
    for tier in [Tier::Immediate, Tier::ShortTerm, Tier::LongTerm] {
        let entries = plan.by_tier(tier);
        if entries.is_empty() {
            continue;
        }
        println!("{}", tier.label().to_uppercase());
        for recommendation in entries {
            println!(
                "  {}. {} (priority {:.2})",
                recommendation.rank, recommendation.title, recommendation.priority_score
            );
            println!("     {}", recommendation.description);
            println!(
                "     Cost: {} | Timeline: {} | Impact: {}",
                recommendation.cost.describe(),
                recommendation.timeline,
                recommendation.revenue_impact.describe()
            );
        }
    }

    let estimate = &plan.estimated_investment;
    println!(
        "\nEstimated investment: {} one-time, {} ongoing",
        estimate.one_time().describe(),
        estimate.monthly().describe()
    );
}

fn render_quick(assessment: &QuickAssessment) {
    println!(
        "{}: {}/100 ({}) | outlook {}",
        assessment.business_name,
        assessment.overall_score,
        assessment.rating.label(),
        assessment.revenue_outlook.label()
    );
    println!("Top issues:");
    for issue in &assessment.top_issues {
        println!("  - {issue}");
    }
    println!("Priority action: {}", assessment.priority_action);
}

fn render_export_line(export: &ReportExport) {
    let lead = match export.recommendations.first() {
        Some(recommendation) => recommendation.title.as_str(),
        None => "no action required",
    };
    println!(
        "- {} [{}] {}/100 {} | lead: {} | generated {}",
        export.business_name,
        export.industry,
        export.overall_score,
        export.rating.label(),
        lead,
        export.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
}
