//! ExonMap CLI entry point
//!
//! Coordinate conversion, transcript splicing and assembly remapping from
//! the command line.

use clap::{Parser, Subcommand};
use exonmap::core::{
    aa_interval_to_nt, aa_to_nt, nt_interval_to_aa, nt_to_aa, AssemblyIndex, AssemblyMapper,
    GenomicInterval, Interval, MapperConfig, RegionId, SplicedTranscript, Strand,
    DEFAULT_MAX_DEPTH,
};
use exonmap::formats;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "exonmap")]
#[command(about = "Interval algebra and coordinate mapping for genomic features")]
#[command(version)]
#[command(author = "ExonMap Contributors")]
struct Cli {
    /// Maximum number of assembly hops before giving up
    #[arg(long = "max-depth", global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert amino-acid positions to nucleotide positions
    Aa2nt {
        /// First amino acid (1-based)
        start: i64,
        /// Last amino acid (defaults to start)
        end: Option<i64>,
        /// Nucleotide offset of the first codon
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        offset: i64,
    },
    /// Convert nucleotide positions to amino-acid positions
    Nt2aa {
        /// First nucleotide (1-based)
        start: i64,
        /// Last nucleotide (defaults to start)
        end: Option<i64>,
        /// Amino-acid offset added to the result
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        offset: i64,
    },
    /// Describe spliced transcripts from an exon list
    Splice {
        /// Exon list: region start end strand [transcript]
        exons: PathBuf,
        /// Report the first K transcript bases
        #[arg(long = "first")]
        first: Option<u64>,
        /// Coding region as START-END, enables UTR reporting
        #[arg(long, value_parser = parse_range)]
        cds: Option<GenomicInterval>,
        /// Amino-acid range as START-END to lift onto the genome (needs --cds)
        #[arg(long, value_parser = parse_range, requires = "cds")]
        protein: Option<GenomicInterval>,
    },
    /// Remap one interval to its sequence-level region
    Remap {
        /// Assembly table
        table: PathBuf,
        /// Source region id
        region: RegionId,
        /// Start (1-based, inclusive)
        start: i64,
        /// End (1-based, inclusive)
        end: i64,
        /// Strand of the interval
        #[arg(short = 's', long, default_value = "+", value_parser = parse_strand_arg)]
        strand: Strand,
        /// Extra regions to treat as sequence-level
        #[arg(long = "seq-level")]
        seq_level: Vec<RegionId>,
    },
    /// Remap every line of a region file
    RemapFile {
        /// Assembly table
        table: PathBuf,
        /// Input file: region start end [strand]
        input: PathBuf,
        /// Output file (default: remapped.tsv)
        output: Option<PathBuf>,
        /// Number of threads (1 = sequential)
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
        /// Extra regions to treat as sequence-level
        #[arg(long = "seq-level")]
        seq_level: Vec<RegionId>,
    },
}

fn parse_range(value: &str) -> Result<GenomicInterval, String> {
    let (start, end) = value
        .split_once('-')
        .ok_or_else(|| format!("expected START-END, got '{}'", value))?;
    let start = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid start '{}'", start))?;
    let end = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid end '{}'", end))?;
    Ok(GenomicInterval::new(start, end))
}

fn parse_strand_arg(value: &str) -> Result<Strand, String> {
    Strand::parse(value).ok_or_else(|| format!("invalid strand '{}'", value))
}

fn load_mapper(
    table: &Path,
    seq_level: &[RegionId],
    max_depth: usize,
) -> anyhow::Result<AssemblyMapper<AssemblyIndex>> {
    let start = Instant::now();
    eprintln!("Loading assembly table: {:?}", table);

    let mut index = AssemblyIndex::from_table_file(table)
        .map_err(|e| anyhow::anyhow!("Failed to load assembly table: {}", e))?;
    for region in seq_level {
        index.mark_sequence_level(*region);
    }

    let mapper = AssemblyMapper::with_config(index, MapperConfig { max_depth });
    eprintln!(
        "Assembly table loaded in {:.2}s",
        start.elapsed().as_secs_f64()
    );
    Ok(mapper)
}

fn format_pieces(interval: &Interval) -> String {
    let pieces: Vec<String> = GenomicInterval::from_interval(interval)
        .iter()
        .map(ToString::to_string)
        .collect();
    if pieces.is_empty() {
        "-".to_string()
    } else {
        pieces.join(",")
    }
}

fn describe_transcript(
    name: &str,
    transcript: &SplicedTranscript,
    first: Option<u64>,
    cds: Option<GenomicInterval>,
    protein: Option<GenomicInterval>,
) -> anyhow::Result<()> {
    let label = if name.is_empty() { "." } else { name };
    let exons: Vec<String> = transcript.exons().iter().map(ToString::to_string).collect();
    let introns: Vec<String> = transcript.introns().iter().map(ToString::to_string).collect();

    println!("{}\tregion\t{}{}", label, transcript.region(), transcript.strand());
    if let (Some(start), Some(end)) = (transcript.start_site(), transcript.end_site()) {
        println!("{}\tsites\t{}\t{}", label, start, end);
    }
    println!("{}\tlength\t{}", label, transcript.spliced_length());
    println!("{}\texons\t{}", label, exons.join(","));
    println!(
        "{}\tintrons\t{}",
        label,
        if introns.is_empty() { "-".to_string() } else { introns.join(",") }
    );

    if let Some(k) = first {
        println!("{}\tfirst_{}\t{}", label, k, format_pieces(&transcript.leading_bases(k)?));
    }

    if let Some(cds) = cds {
        let cds = cds.to_interval();
        let (five_prime, three_prime) = transcript.utr_regions(&cds);
        println!("{}\tutr5\t{}", label, format_pieces(&five_prime));
        println!("{}\tutr3\t{}", label, format_pieces(&three_prime));

        if let Some(protein) = protein {
            let genomic = transcript.protein_to_genomic(&cds, &protein.to_interval())?;
            let supporting: Vec<String> = transcript
                .supporting_exons(&genomic)
                .iter()
                .map(|i| (i + 1).to_string())
                .collect();
            println!("{}\tprotein_{}\t{}", label, protein, format_pieces(&genomic));
            println!("{}\tprotein_exons\t{}", label, supporting.join(","));
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let timer = Instant::now();

    match cli.command {
        Commands::Aa2nt { start, end, offset } => {
            let aa = Interval::closed(start, end.unwrap_or(start));
            if aa.is_empty() {
                anyhow::bail!("end ({}) is before start ({})", end.unwrap_or(start), start);
            }
            println!(
                "{}\t{}",
                aa_to_nt(start, offset),
                format_pieces(&aa_interval_to_nt(&aa, offset))
            );
        }

        Commands::Nt2aa { start, end, offset } => {
            let nt = Interval::closed(start, end.unwrap_or(start));
            let lifted = nt_interval_to_aa(&nt, offset).ok_or_else(|| {
                anyhow::anyhow!("empty nucleotide range {}-{}", start, end.unwrap_or(start))
            })?;
            let (aa, remainder) = nt_to_aa(start, offset);
            println!(
                "{}\t{}\t{}\t{}\t{}",
                aa,
                remainder,
                format_pieces(&lifted.interval),
                lifted.lower_remainder,
                lifted.upper_remainder
            );
        }

        Commands::Splice { exons, first, cds, protein } => {
            let transcripts = formats::read_transcripts(&exons)?;
            info!("Read {} transcripts from {:?}", transcripts.len(), exons);
            for record in &transcripts {
                describe_transcript(&record.name, &record.transcript, first, cds, protein)?;
            }
        }

        Commands::Remap { table, region, start, end, strand, seq_level } => {
            let mapper = load_mapper(&table, &seq_level, cli.max_depth)?;
            let remapped = mapper.remap(region, &Interval::closed(start, end), strand)?;
            match formats::format_remapped(&remapped) {
                Some(line) => println!("{}", line),
                None => anyhow::bail!("interval {}-{} covers no position", start, end),
            }
        }

        Commands::RemapFile { table, input, output, threads, seq_level } => {
            let mapper = load_mapper(&table, &seq_level, cli.max_depth)?;
            let output_path = output.unwrap_or_else(|| PathBuf::from("remapped.tsv"));
            let unmap_path = output_path.with_extension("unmap");

            eprintln!("Remapping file: {:?} -> {:?}", input, output_path);
            let stats =
                formats::convert_remap_file(&input, &output_path, &unmap_path, &mapper, threads)?;

            eprintln!("\n=== Remapping Statistics ===");
            eprintln!("Total records:   {}", stats.total);
            eprintln!("Successful:      {}", stats.success);
            eprintln!("Failed:          {}", stats.failed);
            eprintln!("Time elapsed:    {:.2}s", timer.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
