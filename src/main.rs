use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bstr::ByteSlice;
use clap::{ArgAction, Parser, Subcommand};

use msagfa::{
    mmap::MmapGFA,
    msa::{msa_to_gfa, read_fasta_msa, Compaction, MsaConfig, CONSENSUS_NAME},
    writer::GFAWriter,
};

#[derive(Parser)]
#[command(name = "msagfa")]
#[command(
    about = "Build GFA1 variation graphs from multiple sequence alignments",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an aligned FASTA file to GFA
    Convert {
        #[arg(value_name = "MSA.FA")]
        msa: PathBuf,

        /// Output file [default: stdout]
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Squash chains once instead of until nothing is left to merge
        #[arg(long)]
        single_pass: bool,

        /// Name of the consensus rows to drop
        #[arg(long, value_name = "NAME", default_value = CONSENSUS_NAME)]
        consensus: String,
    },
    /// Print record counts of a GFA file
    Stats {
        #[arg(value_name = "GRAPH.GFA")]
        gfa: PathBuf,
    },
    /// Print the sequence spelled by a path
    Sequence {
        #[arg(value_name = "GRAPH.GFA")]
        gfa: PathBuf,

        #[arg(value_name = "PATH")]
        path: String,
    },
}

fn init_logger(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose > 0 || std::env::var_os("RUST_LOG").is_none() {
        let level = match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(false).init();
}

fn convert(
    msa: PathBuf,
    output: Option<PathBuf>,
    single_pass: bool,
    consensus: String,
) -> Result<()> {
    let mut alignment = read_fasta_msa(&msa)
        .with_context(|| format!("failed to read alignment {}", msa.display()))?;

    let config = MsaConfig {
        consensus_name: consensus.into(),
        compaction: if single_pass {
            Compaction::SinglePass
        } else {
            Compaction::FixedPoint
        },
        ..Default::default()
    };
    let gfa = msa_to_gfa(&mut alignment, &config)?;

    let out: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(io::stdout()),
    };
    let mut writer = GFAWriter::new(BufWriter::new(out));
    writer.write_gfa(&gfa)?;
    Ok(())
}

fn stats(path: PathBuf) -> Result<()> {
    let gfa = MmapGFA::new(&path)
        .and_then(|mmap| mmap.parse_gfa())
        .with_context(|| format!("failed to load {}", path.display()))?;

    println!("# version: {}", gfa.version().unwrap_or(0));
    println!("# comments: {}", gfa.comments().len());
    println!("# segments: {}", gfa.segment_count());
    println!("# links: {}", gfa.link_count());
    println!("# paths: {}", gfa.path_count());
    Ok(())
}

fn sequence(path: PathBuf, name: String) -> Result<()> {
    let gfa = MmapGFA::new(&path)
        .and_then(|mmap| mmap.parse_gfa())
        .with_context(|| format!("failed to load {}", path.display()))?;

    let seq = gfa.sequence_for_path(name.as_bytes())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(seq.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Convert {
            msa,
            output,
            single_pass,
            consensus,
        } => convert(msa, output, single_pass, consensus),
        Commands::Stats { gfa } => stats(gfa),
        Commands::Sequence { gfa, path } => sequence(gfa, path),
    }
}
