use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use polars::prelude::*;

use primerpair::benchmark::{self, DEFAULT_WIDTHS};
use primerpair::input::{DEFAULT_AMPLICON_SLACK, DEFAULT_PRIMER_SIZE, DEFAULT_SODIUM, DEFAULT_SUFFIX, DEFAULT_TM_RANGE};
use primerpair::window::DEFAULT_WINDOW_HALF_WIDTH;
use primerpair::topk::DEFAULT_MAX_PAIRS;
use primerpair::{dimer, seqio, PrimerDesignInput, PrimerPairFinder, Range, SearchOutcome};

/// primerpair CLI
#[derive(Parser)]
#[command(name = "primerpair")]
#[command(version)]
#[command(about = "PCR primer-pair design, dimer and Tm tools", long_about = None)]
struct Cli {
    /// Log progress (info level); RUST_LOG overrides
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a template for the best primer pairs
    Design {
        #[command(flatten)]
        input: InputArgs,
        /// Reverse candidates tried on each side of the closest Tm
        #[arg(long, default_value_t = DEFAULT_WINDOW_HALF_WIDTH)]
        window: usize,
        /// Pairs reported at most
        #[arg(long, default_value_t = DEFAULT_MAX_PAIRS)]
        max_pairs: usize,
        /// Keep forward primers whose sequence occurs more than once in the amplicon
        #[arg(long)]
        allow_repeated_forward: bool,
        /// Cancel the search after this many milliseconds and report what was found so far
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Emit CSV to stdout
        #[arg(long)]
        csv: bool,
    },

    /// Dimer score of two primers (higher pairs more strongly)
    Dimer {
        first: String,
        second: String,
    },

    /// Nearest-neighbour melting temperature of a sequence
    Tm {
        sequence: String,
        /// Na+ concentration (M)
        #[arg(long, default_value_t = DEFAULT_SODIUM)]
        sodium: f64,
    },

    /// Time the search across Tm window half-widths
    Benchmark {
        #[command(flatten)]
        input: InputArgs,
        /// Comma-separated half-widths (default: 0,1,5,10,25,50,100,250,1000)
        #[arg(long, value_delimiter = ',')]
        widths: Vec<usize>,
        /// Runs per width
        #[arg(long, default_value_t = 3)]
        repeats: usize,
        /// Threads (None = all)
        #[arg(long)]
        threads: Option<usize>,
        /// Emit CSV to stdout
        #[arg(long)]
        csv: bool,
    },
}

/// Template and design parameters shared by `design` and `benchmark`.
#[derive(Args)]
struct InputArgs {
    /// Template sequence given inline
    #[arg(long, conflicts_with = "fasta", required_unless_present = "fasta")]
    sequence: Option<String>,
    /// Template file (FASTA/FASTQ, optionally gzipped); the first record is used
    #[arg(long)]
    fasta: Option<String>,
    /// First base of the target region (1-based, default 1)
    #[arg(long)]
    start: Option<usize>,
    /// Last base of the target region (1-based, default: sequence end)
    #[arg(long)]
    end: Option<usize>,
    /// Shortest amplicon (default: region length - 20)
    #[arg(long)]
    min_amplicon: Option<usize>,
    /// Longest amplicon (default: region length)
    #[arg(long)]
    max_amplicon: Option<usize>,
    #[arg(long, default_value_t = DEFAULT_PRIMER_SIZE)]
    min_primer: usize,
    #[arg(long, default_value_t = DEFAULT_PRIMER_SIZE)]
    max_primer: usize,
    #[arg(long, default_value_t = DEFAULT_TM_RANGE.min())]
    min_tm: f64,
    #[arg(long, default_value_t = DEFAULT_TM_RANGE.max())]
    max_tm: f64,
    /// Bases added 5' of every forward primer
    #[arg(long, default_value = "")]
    forward_prefix: String,
    /// Bases added 5' of every reverse primer
    #[arg(long, default_value = "")]
    reverse_prefix: String,
    /// 3' pattern for forward primers, e.g. "**G/C"
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    forward_suffix: String,
    /// 3' pattern for reverse primers
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    reverse_suffix: String,
    /// Na+ concentration (M)
    #[arg(long, default_value_t = DEFAULT_SODIUM)]
    sodium: f64,
}

impl InputArgs {
    fn into_input(self) -> Result<PrimerDesignInput> {
        let sequence = match (self.sequence, self.fasta) {
            (Some(s), _) => seqio::normalize(s.as_bytes()),
            (None, Some(path)) => {
                let t = seqio::load_template(&path)?;
                log::info!("template {} ({} bp)", t.id, t.sequence.len());
                t.sequence
            }
            (None, None) => bail!("one of --sequence or --fasta is required"),
        };
        let mut input = PrimerDesignInput::new(sequence);
        let start = self.start.unwrap_or(1);
        let end = self.end.unwrap_or(input.sequence.len());
        input.amplicon_bounds = Range::new(start, end);
        let region = (end + 1).saturating_sub(start);
        input.amplicon_size_range = Range::new(
            self.min_amplicon.unwrap_or(region.saturating_sub(DEFAULT_AMPLICON_SLACK).max(1)),
            self.max_amplicon.unwrap_or(region),
        );
        input.primer_size_range = Range::new(self.min_primer, self.max_primer);
        input.tm_range = Range::new(self.min_tm, self.max_tm);
        input.forward_prefix = self.forward_prefix.to_ascii_uppercase();
        input.reverse_prefix = self.reverse_prefix.to_ascii_uppercase();
        input.forward_suffix = self.forward_suffix;
        input.reverse_suffix = self.reverse_suffix;
        input.sodium_concentration = self.sodium;
        Ok(input)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Design { input, window, max_pairs, allow_repeated_forward, timeout_ms, csv } => {
            let finder = PrimerPairFinder::new(input.into_input()?)
                .with_window_half_width(window)
                .with_max_pairs(max_pairs)
                .with_unique_forward(!allow_repeated_forward);
            cmd_design(finder, timeout_ms, csv)?;
        }

        Commands::Dimer { first, second } => {
            println!("{}", dimer::score_str(&first, &second));
        }

        Commands::Tm { sequence, sodium } => {
            println!("{:.1}", primerpair::melting_temperature(&sequence, sodium));
        }

        Commands::Benchmark { input, widths, repeats, threads, csv } => {
            let widths = if widths.is_empty() { DEFAULT_WIDTHS.to_vec() } else { widths };
            let rows = benchmark::run_window_benchmark(&input.into_input()?, &widths, repeats, threads)?;
            let mut df = df!(
                "half_width"      => rows.iter().map(|r| r.half_width as u64).collect::<Vec<_>>(),
                "repeats"         => rows.iter().map(|r| r.repeats as u64).collect::<Vec<_>>(),
                "mean_us"         => rows.iter().map(|r| r.mean_elapsed.as_micros() as u64).collect::<Vec<_>>(),
                "pairs_evaluated" => rows.iter().map(|r| r.pairs_evaluated as u64).collect::<Vec<_>>(),
                "pairs_kept"      => rows.iter().map(|r| r.pairs_kept as u64).collect::<Vec<_>>(),
                "best_score"      => rows.iter().map(|r| r.best_score).collect::<Vec<_>>(),
            )?;
            emit(&mut df, csv)?;
        }
    }

    Ok(())
}

fn cmd_design(finder: PrimerPairFinder, timeout_ms: Option<u64>, csv: bool) -> Result<()> {
    let (outcome, stats) = match timeout_ms {
        None => {
            let outcome = finder.find_primer_pairs();
            (outcome, finder.stats())
        }
        Some(ms) => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_time()
                .build()
                .context("cannot start timer runtime")?;
            rt.block_on(async move {
                let token = finder.cancel_token();
                let timer = tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    log::warn!("timeout of {ms} ms reached, cancelling search");
                    token.cancel();
                });
                let search = tokio::task::spawn_blocking(move || {
                    let outcome = finder.find_primer_pairs();
                    (outcome, finder.stats())
                });
                let done = search.await;
                timer.abort();
                done
            })
            .context("search task failed")?
        }
    };

    let outcome = outcome?;
    if let SearchOutcome::Cancelled(pairs) = &outcome {
        eprintln!("search cancelled; reporting {} partial pair(s)", pairs.len());
    }
    log::info!(
        "{} forward / {} reverse candidates, {} pairs evaluated",
        stats.forward_candidates,
        stats.reverse_candidates,
        stats.pairs_evaluated
    );

    let rows = primerpair::pair_rows(outcome.pairs());
    let mut df = df!(
        "rank"            => rows.iter().map(|r| r.0 as u64).collect::<Vec<_>>(),
        "forward"         => rows.iter().map(|r| r.1.clone()).collect::<Vec<_>>(),
        "forward_tm"      => rows.iter().map(|r| r.2).collect::<Vec<_>>(),
        "forward_pos"     => rows.iter().map(|r| r.3 as u64).collect::<Vec<_>>(),
        "reverse"         => rows.iter().map(|r| r.4.clone()).collect::<Vec<_>>(),
        "reverse_tm"      => rows.iter().map(|r| r.5).collect::<Vec<_>>(),
        "reverse_pos"     => rows.iter().map(|r| r.6 as u64).collect::<Vec<_>>(),
        "amplicon_length" => rows.iter().map(|r| r.7 as u64).collect::<Vec<_>>(),
        "score"           => rows.iter().map(|r| r.8).collect::<Vec<_>>(),
    )?;
    emit(&mut df, csv)
}

fn emit(df: &mut DataFrame, csv: bool) -> Result<()> {
    if csv {
        CsvWriter::new(std::io::stdout()).include_header(true).finish(df)?;
        return Ok(());
    }
    // Show every row and column at full width.
    std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
    std::env::set_var("POLARS_FMT_MAX_COLS", "100000");
    std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
    std::env::set_var("POLARS_FMT_STR_LEN", "100000");
    println!("{df}");
    Ok(())
}
