use crate::demo::{
    run_analyze, run_batch, run_demo, run_history, run_quick, AnalyzeArgs, BatchArgs, DemoArgs,
    HistoryArgs, QuickArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use marketing_scorecard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Marketing Scorecard",
    about = "Score small-business marketing posture and plan remediation from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Analyze a single business and print its scorecard and solution plan
    Analyze(AnalyzeArgs),
    /// Produce a quick assessment from minimal attributes
    Quick(QuickArgs),
    /// Analyze every business listed in a CSV file
    Batch(BatchArgs),
    /// Show recently recorded reports
    History(HistoryArgs),
    /// Run the analyzer against the bundled sample businesses
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args).await,
        Command::Quick(args) => run_quick(args),
        Command::Batch(args) => run_batch(args),
        Command::History(args) => run_history(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["marketing-scorecard-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn analyze_collects_repeated_flags() {
        let cli = Cli::try_parse_from([
            "marketing-scorecard-api",
            "analyze",
            "--name",
            "Joe's Pizza Shop",
            "--industry",
            "Restaurant",
            "--social",
            "instagram:joes_pizza",
            "--social",
            "facebook",
            "--channel",
            "Flyers",
            "--revenue",
            "15000",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Analyze(args)) => {
                assert_eq!(args.social.len(), 2);
                assert_eq!(
                    args.social[0],
                    ("instagram".to_string(), "joes_pizza".to_string())
                );
                assert_eq!(args.social[1], ("facebook".to_string(), String::new()));
                assert_eq!(args.channel, vec!["Flyers".to_string()]);
                assert_eq!(args.revenue, Some(15_000.0));
                assert!(!args.augment);
            }
            other => panic!("expected analyze command, got {other:?}"),
        }
    }

    #[test]
    fn malformed_social_flag_is_rejected() {
        let result = Cli::try_parse_from([
            "marketing-scorecard-api",
            "analyze",
            "--name",
            "Joe's Pizza Shop",
            "--industry",
            "Restaurant",
            "--social",
            ":joes_pizza",
        ]);
        assert!(result.is_err());
    }
}
