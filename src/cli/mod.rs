// src/cli/mod.rs
pub mod progress;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, bail};

use crate::api::YouTubeApi;
use crate::config::{
    Config,
    consts::{SHORTS_MAX_PER_CHANNEL, SHORTS_MIN_VIEWS},
    options::{AppOptions, ExportFormat, ExportOptions, ExportType, ShortsOptions},
};
use crate::directory::{ChannelDirectory, Registration, Roster};
use crate::file::export_dataset;
use crate::metrics::MetricsFetcher;
use crate::ranking::{RankingEngine, Snapshot};
use crate::resolver::HandleResolver;
use crate::shorts::{PageScanListing, ShortsReport, collect_shorts};
use crate::snapshot::SnapshotCache;
use crate::store::{Store, Table};

use self::progress::ConsoleProgress;

#[derive(Parser, Debug)]
#[command(
    name = "gtube",
    version,
    about = "Register YouTube channels, rank them by estimated revenue, benchmark their shorts"
)]
pub struct Cli {
    /// Directory holding the CSV tables and debug.log.
    #[arg(long, global = true, env = "GTUBE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Echo this crate's debug log lines on stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// `--data-dir`, else the configured one.
    pub fn data_dir(&self, cfg: &Config) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| cfg.data_dir())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the competitor and benchmark rosters
    Channels {
        #[command(subcommand)]
        action: ChannelsCmd,
    },
    /// Rank competitor channels by estimated monthly revenue
    Ranking {
        #[command(subcommand)]
        action: RankingCmd,
    },
    /// Latest shorts of the benchmark channels
    Shorts {
        #[command(subcommand)]
        action: ShortsCmd,
    },
    /// Write a table to CSV/TSV
    Export(ExportArgs),
}

#[derive(Subcommand, Debug)]
pub enum ChannelsCmd {
    /// Register channels from URLs or @handles (stdin when none given)
    Add {
        #[arg(long, value_enum, default_value_t = RosterArg::Competitor)]
        roster: RosterArg,
        /// Read one URL/handle per line from this file.
        #[arg(long)]
        file: Option<PathBuf>,
        urls: Vec<String>,
    },
    List {
        #[arg(long, value_enum, default_value_t = RosterArg::Competitor)]
        roster: RosterArg,
    },
    Remove {
        /// Channel id as shown by `channels list`.
        id: String,
        #[arg(long, value_enum, default_value_t = RosterArg::Competitor)]
        roster: RosterArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum RankingCmd {
    /// Fetch metrics for every competitor and replace the cached ranking
    Refresh {
        /// Overrides GTUBE_REVENUE_RATE.
        #[arg(long)]
        revenue_rate: Option<f64>,
    },
    /// Print the cached ranking
    Show,
}

#[derive(Subcommand, Debug)]
pub enum ShortsCmd {
    /// Collect and cache the latest shorts of every benchmark channel
    Collect {
        /// Latest shorts considered per channel (1-20).
        #[arg(long, default_value_t = SHORTS_MAX_PER_CHANNEL)]
        max_per_channel: usize,
        /// Minimum views, in units of 10,000 (1-100).
        #[arg(long, default_value_t = SHORTS_MIN_VIEWS)]
        min_views: u64,
    },
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    #[arg(value_enum)]
    pub table: TableArg,
    /// File, or directory when it ends with a separator.
    #[arg(short, long)]
    pub out: Option<String>,
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,
    #[arg(long, default_value_t = false)]
    pub include_headers: bool,
    /// One file per channel (shorts only).
    #[arg(long, default_value_t = false)]
    pub per_channel: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RosterArg {
    Competitor,
    Benchmark,
}

impl From<RosterArg> for Roster {
    fn from(r: RosterArg) -> Self {
        match r {
            RosterArg::Competitor => Roster::Competitor,
            RosterArg::Benchmark => Roster::Benchmark,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    Competitors,
    Benchmarks,
    Ranking,
    Shorts,
}

impl From<TableArg> for Table {
    fn from(t: TableArg) -> Self {
        match t {
            TableArg::Competitors => Table::CompetitorChannels,
            TableArg::Benchmarks => Table::BenchmarkChannels,
            TableArg::Ranking => Table::RankingSnapshot,
            TableArg::Shorts => Table::ShortsResults,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

pub fn run(cli: Cli, cfg: &Config) -> Result<()> {
    let store = Store::new(cli.data_dir(cfg));
    let mut opts = AppOptions::default();
    tracing::debug!(data_dir = %store.root().display(), "starting");

    match cli.command {
        Command::Channels { action } => run_channels(action, &store, cfg),
        Command::Ranking { action: RankingCmd::Refresh { revenue_rate } } => {
            opts.rank = cfg.rank_options()?;
            if let Some(rate) = revenue_rate {
                if !rate.is_finite() || rate < 0.0 {
                    bail!("--revenue-rate must be a non-negative number, got {rate}");
                }
                opts.rank.revenue_rate = rate;
            }
            refresh_ranking(&store, cfg, &opts)
        }
        Command::Ranking { action: RankingCmd::Show } => {
            match SnapshotCache::new(store).load()? {
                Some(snap) => print_snapshot(&snap),
                None => println!("No ranking yet. Run `gtube ranking refresh` first."),
            }
            Ok(())
        }
        Command::Shorts { action: ShortsCmd::Collect { max_per_channel, min_views } } => {
            opts.shorts = ShortsOptions::new(max_per_channel, min_views);
            run_shorts(&store, cfg, &opts)
        }
        Command::Export(args) => run_export(args, &store),
    }
}

fn platform(cfg: &Config) -> Result<YouTubeApi> {
    let key = cfg
        .api_key()
        .wrap_err("set YOUTUBE_API_KEY in the environment, .env or the secrets file")?;
    Ok(YouTubeApi::new(key, cfg.api_base())?)
}

fn run_channels(action: ChannelsCmd, store: &Store, cfg: &Config) -> Result<()> {
    match action {
        ChannelsCmd::Add { roster, file, urls } => {
            let inputs = gather_inputs(urls, file)?;
            let api = platform(cfg)?;
            let directory = ChannelDirectory::new(store.clone(), roster.into());
            let mut progress = ConsoleProgress::new("Resolving channels");
            let reg = directory
                .register(&HandleResolver::new(&api), &inputs, &mut progress)
                .wrap_err("saving the channel table")?;
            print_registration(&reg);
        }
        ChannelsCmd::List { roster } => {
            let directory = ChannelDirectory::new(store.clone(), roster.into());
            let records = directory.list()?;
            if records.is_empty() {
                println!("No {} channels registered.", directory.roster());
            }
            for r in records {
                println!("{}\t{}\t{}", r.id, r.name, r.url);
            }
        }
        ChannelsCmd::Remove { id, roster } => {
            let directory = ChannelDirectory::new(store.clone(), roster.into());
            match directory.remove(&id)? {
                Some(r) => println!("Removed {} ({})", r.name, r.id),
                None => println!("No {} channel with id {id}", directory.roster()),
            }
        }
    }
    Ok(())
}

/// Positional URLs, then `--file`; stdin only when neither was given.
fn gather_inputs(urls: Vec<String>, file: Option<PathBuf>) -> Result<Vec<String>> {
    let mut inputs = urls;
    if let Some(path) = file {
        let text = fs::read_to_string(&path).wrap_err_with(|| format!("reading {}", path.display()))?;
        inputs.push(text);
    } else if inputs.is_empty() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).wrap_err("reading stdin")?;
        inputs.push(text);
    }
    Ok(inputs)
}

fn print_registration(reg: &Registration) {
    println!("Accepted ({}):", reg.accepted.len());
    for r in &reg.accepted {
        println!("  {}\t{}\t{}", r.id, r.name, r.url);
    }
    for (label, items) in [
        ("Duplicates", &reg.duplicates),
        ("Failed", &reg.failed),
    ] {
        println!("{label} ({}):", items.len());
        for item in items {
            println!("  {item}");
        }
    }
}

fn refresh_ranking(store: &Store, cfg: &Config, opts: &AppOptions) -> Result<()> {
    let channels = ChannelDirectory::new(store.clone(), Roster::Competitor).list()?;
    if channels.is_empty() {
        println!("No competitor channels registered. Add some with `gtube channels add`.");
        return Ok(());
    }

    let api = platform(cfg)?;
    let engine = RankingEngine::new(MetricsFetcher::new(&api), opts.rank);
    let report = engine.rank_with_report(&channels, &mut ConsoleProgress::new("Ranking channels"));

    SnapshotCache::new(store.clone())
        .save(&report.snapshot)
        .wrap_err("saving the ranking snapshot")?;

    print_snapshot(&report.snapshot);
    if !report.skipped.is_empty() {
        println!("\nSkipped ({}):", report.skipped.len());
        for e in &report.skipped {
            println!("  {e}");
        }
    }
    Ok(())
}

fn print_snapshot(snap: &Snapshot) {
    if snap.is_empty() {
        println!("Ranking is empty.");
        return;
    }
    println!(
        "{:>4}  {:<32} {:>12} {:>8} {:>12} {:>14}  {}",
        "#", "channel", "subscribers", "videos", "avg/day", "est. revenue", "url"
    );
    for (i, r) in snap.records.iter().enumerate() {
        println!(
            "{:>4}  {:<32} {:>12} {:>8} {:>12} {:>14.0}  {}",
            i + 1,
            r.channel_name,
            r.subscriber_count,
            r.video_count,
            r.avg_daily_views,
            r.estimated_monthly_revenue,
            r.channel_url
        );
    }
}

fn run_shorts(store: &Store, cfg: &Config, opts: &AppOptions) -> Result<()> {
    let channels = ChannelDirectory::new(store.clone(), Roster::Benchmark).list()?;
    if channels.is_empty() {
        println!("No benchmark channels registered. Add some with `gtube channels add --roster benchmark`.");
        return Ok(());
    }

    let api = platform(cfg)?;
    let listing = PageScanListing::with_client(api.client().clone());
    let report = collect_shorts(
        &api,
        &listing,
        &channels,
        &opts.shorts,
        &mut ConsoleProgress::new("Collecting shorts"),
    );
    report.save(store).wrap_err("saving shorts results")?;
    print_shorts(&report);
    Ok(())
}

fn print_shorts(report: &ShortsReport) {
    for row in report.to_dataset().rows {
        println!("{}", row.join("\t"));
    }
    if !report.failed.is_empty() {
        println!("\nFailed ({}):", report.failed.len());
        for (name, reason) in &report.failed {
            println!("  {name}: {reason}");
        }
    }
}

fn run_export(args: ExportArgs, store: &Store) -> Result<()> {
    let table = Table::from(args.table);

    let mut export = ExportOptions::for_table(table);
    export.format = args.format.into();
    export.include_headers = args.include_headers;
    if args.per_channel {
        export.export_type = ExportType::PerChannel;
    }
    if let Some(out) = args.out.as_deref() {
        export.set_path(out);
    }

    let Some(ds) = store.load(table)? else {
        bail!("{} has not been written yet", store.path(table).display());
    };
    for path in export_dataset(&export, table, &ds)? {
        println!("{}", path.display());
    }
    Ok(())
}
