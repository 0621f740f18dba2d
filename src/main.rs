use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobsearch::form::{InputCollector, Preset, PromptForm, TerminalForm};
use jobsearch::model::parse_search_terms;
use jobsearch::states::{bundled_states, load_states};
use jobsearch::{
    BrowserLauncher, HttpFetcher, Pipeline, RunOutcome, SearchRequest, SiteConfig,
    StdoutLauncher, SystemBrowser,
};

#[derive(Parser, Debug)]
#[command(name = "jobsearch", version, about = "Open the top Indeed.com job postings for a location")]
struct Cli {
    /// JSON file overriding the search URL template, home URL or job-title marker
    #[arg(long)]
    config: Option<PathBuf>,

    /// State abbreviation list, one code per line (defaults to the bundled US list)
    #[arg(long)]
    states: Option<PathBuf>,

    /// Ask for each field on the command line instead of showing the form
    #[arg(long)]
    prompt: bool,

    /// Print the posting URLs instead of opening them in the browser
    #[arg(long)]
    print_only: bool,

    /// Debug logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    state: Option<String>,

    /// Comma separated search terms
    #[arg(long)]
    terms: Option<String>,

    /// Number of postings to open
    #[arg(long)]
    count: Option<usize>,
}

impl Cli {
    fn preset_request(&self) -> anyhow::Result<Option<SearchRequest>> {
        match (&self.city, &self.state, &self.terms, self.count) {
            (Some(city), Some(state), Some(terms), Some(count)) => Ok(Some(SearchRequest::new(
                city.trim(),
                state.trim(),
                parse_search_terms(terms),
                count,
            )?)),
            (None, None, None, None) => Ok(None),
            _ => anyhow::bail!("--city, --state, --terms and --count must be given together"),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "jobsearch=debug" } else { "jobsearch=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let site = match &cli.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SiteConfig::default(),
    };

    let collector: Box<dyn InputCollector> = match cli.preset_request()? {
        Some(request) => Box::new(Preset::new(request)),
        None if cli.prompt => Box::new(PromptForm::new(io::stdin().lock(), io::stdout())),
        None => {
            let states = match &cli.states {
                Some(path) => load_states(path)?,
                None => bundled_states(),
            };
            Box::new(TerminalForm::new(states))
        }
    };

    let launcher: Box<dyn BrowserLauncher> = if cli.print_only {
        Box::new(StdoutLauncher)
    } else {
        Box::new(SystemBrowser)
    };

    let mut pipeline = Pipeline::new(collector, HttpFetcher::new(), launcher, &site)?;

    match pipeline.run() {
        Ok(RunOutcome::Cancelled) => Ok(ExitCode::SUCCESS),
        Ok(RunOutcome::Completed(listings)) => {
            if listings.is_empty() {
                eprintln!("No job listings found.");
            } else {
                eprintln!("Opened {} job listing(s).", listings.len());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
