//! CLI binary for sales-proposal.
//!
//! A thin shim over the library crate: `render` turns a JSON proposal into
//! the HTML document, `draft` asks a model for section text, `form` prints
//! the notebook widget descriptors.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use sales_proposal::{
    draft_proposal, draft_section, render_html, save_and_download_html, save_html_to,
    DraftProgressCallback, GenerationConfig, ProgressCallback, ProposalData, ProposalHeader,
    ProposalSection, ProviderGenerator, SectionNotes,
};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner with one log line per drafted section.
struct SpinnerCallback {
    bar: ProgressBar,
}

impl SpinnerCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Drafting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl DraftProgressCallback for SpinnerCallback {
    fn on_section_start(&self, section: ProposalSection, index: usize, total: usize) {
        self.bar.set_message(format!("{section} ({index}/{total})"));
    }

    fn on_section_complete(&self, section: ProposalSection, index: usize, total: usize, len: usize) {
        self.bar.println(format!(
            "  {} {:<18} {}/{}  {}",
            green("✓"),
            section.heading(),
            index,
            total,
            dim(&format!("{len:>5} chars")),
        ));
    }

    fn on_section_error(&self, section: ProposalSection, index: usize, total: usize, error: &str) {
        self.bar.println(format!(
            "  {} {:<18} {}/{}  {}",
            red("✗"),
            section.heading(),
            index,
            total,
            red(error),
        ));
        self.bar.finish_and_clear();
    }

    fn on_draft_complete(&self, _total: usize, _drafted: usize) {
        self.bar.finish_and_clear();
    }
}

/// Draft sales proposals with an LLM and render them to HTML.
#[derive(Parser, Debug)]
#[command(name = "proposal", version, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PROPOSAL_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "PROPOSAL_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a JSON proposal (ten string fields) to HTML.
    Render {
        /// JSON file with the proposal fields.
        input: PathBuf,

        /// Write here instead of ./sales_proposal.html.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Draft proposal text with a language model.
    Draft(DraftArgs),

    /// Print the proposal form's widget descriptors as JSON.
    Form,
}

#[derive(Args, Debug)]
struct DraftArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    customer: String,

    #[arg(long)]
    salesperson: String,

    #[arg(long)]
    date: String,

    /// Draft only this section (e.g. executive-summary). Default: all six.
    #[arg(long)]
    section: Option<String>,

    /// Notes for a section as SECTION=TEXT. Repeatable.
    #[arg(long = "notes", value_name = "SECTION=TEXT")]
    notes: Vec<String>,

    /// Also render the drafted proposal to this HTML file.
    #[arg(long)]
    render: Option<PathBuf>,

    /// LLM model ID (e.g. gpt-4.1-nano).
    #[arg(long, env = "EDGEQUAKE_MODEL")]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(long, env = "EDGEQUAKE_PROVIDER")]
    provider: Option<String>,

    /// Path to a text file containing a custom system prompt.
    #[arg(long, env = "PROPOSAL_SYSTEM_PROMPT")]
    system_prompt: Option<PathBuf>,

    /// Tokens to generate beyond the prompt.
    #[arg(long, env = "PROPOSAL_MAX_NEW_TOKENS", default_value_t = 500)]
    max_new_tokens: usize,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, env = "PROPOSAL_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Nucleus sampling probability.
    #[arg(long, env = "PROPOSAL_TOP_P", default_value_t = 0.9)]
    top_p: f32,

    /// Strip leaked chat markers from generated text.
    #[arg(long)]
    clean: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Render { input, output } => run_render(input, output, cli.quiet).await,
        Command::Draft(args) => run_draft(args, cli.quiet).await,
        Command::Form => {
            let json = serde_json::to_string_pretty(&sales_proposal::widgets::proposal_form())
                .context("Failed to serialise form")?;
            println!("{json}");
            Ok(())
        }
    }
}

async fn run_render(input: PathBuf, output: Option<PathBuf>, quiet: bool) -> Result<()> {
    let raw = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read {:?}", input))?;
    let map: HashMap<String, String> =
        serde_json::from_str(&raw).context("Proposal JSON must be an object of strings")?;
    let data = ProposalData::from_map(&map)?;

    let html = render_html(&data);
    let link = match output {
        Some(path) => save_html_to(&html, path)?,
        None => save_and_download_html(&html)?,
    };

    if !quiet {
        eprintln!("{} {}", green("✔"), link);
    }
    Ok(())
}

async fn run_draft(args: DraftArgs, quiet: bool) -> Result<()> {
    let header = ProposalHeader {
        title: args.title.clone(),
        customer: args.customer.clone(),
        salesperson: args.salesperson.clone(),
        date: args.date.clone(),
    };
    let notes = parse_notes(&args.notes)?;

    let progress: Option<ProgressCallback> = if wants_spinner(&args, quiet) {
        Some(SpinnerCallback::new() as ProgressCallback)
    } else {
        None
    };
    let config = build_config(&args, progress).await?;
    let generator = ProviderGenerator::from_config(&config)?;

    if let Some(ref key) = args.section {
        let section = ProposalSection::from_key(key)
            .with_context(|| format!("Unknown section '{key}'"))?;
        let section_notes = notes.get(&section).map(String::as_str).unwrap_or("");
        let text = draft_section(&generator, section, &header, section_notes, &config)
            .await
            .context("Drafting failed")?;
        println!("{text}");
        return Ok(());
    }

    let data = draft_proposal(&generator, &header, &notes, &config)
        .await
        .context("Drafting failed")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&data).context("Failed to serialise proposal")?
    );

    if let Some(path) = args.render {
        let link = save_html_to(&render_html(&data), path)?;
        if !quiet {
            eprintln!("{} {}", green("✔"), link);
        }
    }
    Ok(())
}

/// Only whole-proposal drafts report progress; a single section never
/// reaches the per-section callbacks.
fn wants_spinner(args: &DraftArgs, quiet: bool) -> bool {
    !quiet && args.section.is_none()
}

/// Map CLI args to `GenerationConfig`.
async fn build_config(args: &DraftArgs, progress: Option<ProgressCallback>) -> Result<GenerationConfig> {
    let mut builder = GenerationConfig::builder()
        .max_new_tokens(args.max_new_tokens)
        .temperature(args.temperature)
        .top_p(args.top_p)
        .clean_output(args.clean);

    if let Some(ref path) = args.system_prompt {
        let prompt = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read system prompt from {:?}", path))?;
        builder = builder.system_prompt(prompt);
    }
    if let Some(ref model) = args.model {
        builder = builder.model(model);
    }
    if let Some(ref provider) = args.provider {
        builder = builder.provider_name(provider);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Parse repeated `--notes SECTION=TEXT` values.
fn parse_notes(raw: &[String]) -> Result<SectionNotes> {
    let mut notes = SectionNotes::new();
    for entry in raw {
        let (key, text) = entry
            .split_once('=')
            .with_context(|| format!("Expected SECTION=TEXT, got '{entry}'"))?;
        let section = ProposalSection::from_key(key)
            .with_context(|| format!("Unknown section '{}'", key.trim()))?;
        notes
            .entry(section)
            .and_modify(|existing: &mut String| {
                existing.push('\n');
                existing.push_str(text);
            })
            .or_insert_with(|| text.to_string());
    }
    Ok(notes)
}
