use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use aphasiagen::{
    Annotator, AphasicSynthesizer, ConlluAnnotator, DialectConfig, NormalizerConfig,
    RunMetadata, SelectorConfig, SynthesisConfig, TextNormalizer, UdpipeClient, UdpipeConfig,
    Utterance, execute_synthesis, normalize_utterances, read_jsonl, read_sentences,
    read_transcript_dir, write_jsonl,
};

#[derive(Parser)]
#[command(name = "aphasiagen")]
#[command(author, version, about = "Synthetic aphasic speech data pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Dialect {
    /// AphasiaBank CHAT transcripts
    AphasiaBank,
    /// Santa Barbara Corpus transcripts
    Sbcsae,
}

impl Dialect {
    fn config(self) -> DialectConfig {
        match self {
            Dialect::AphasiaBank => DialectConfig::aphasia_bank(),
            Dialect::Sbcsae => DialectConfig::sbcsae(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a directory of transcripts into utterance records (JSON Lines)
    Parse {
        /// Directory of .cha/.txt transcripts
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Output file for utterance records
        #[arg(short, long)]
        output: PathBuf,

        /// Transcript annotation dialect
        #[arg(long, value_enum, default_value = "aphasia-bank")]
        dialect: Dialect,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Normalize participant utterances into clean sentences
    Preprocess {
        /// Utterance records produced by `parse`
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for normalized sentences (JSON Lines)
        #[arg(short, long)]
        output: PathBuf,

        /// Replace pause placeholders with the mask token
        #[arg(long)]
        mask_pauses: bool,

        /// Remove repeated words and word pairs
        #[arg(long)]
        remove_repetitions: bool,

        /// Remove mask tokens from the result
        #[arg(long)]
        remove_masks: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Select well-formed sentences and generate agrammatic counterparts
    Synthesize {
        /// Sentences (.jsonl, .json or .txt)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the sentence pairs and run metadata
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Pre-computed CoNLL-U annotations to use instead of the UDPipe service
        #[arg(long)]
        conllu: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            input_dir,
            output,
            dialect,
            verbose,
        } => {
            setup_logging(verbose);
            parse_corpus(&input_dir, &output, dialect.config())
        }
        Commands::Preprocess {
            input,
            output,
            mask_pauses,
            remove_repetitions,
            remove_masks,
            verbose,
        } => {
            setup_logging(verbose);
            let config = NormalizerConfig {
                mask_pauses,
                remove_repetitions,
                remove_masks,
                ..Default::default()
            };
            preprocess(&input, &output, config)
        }
        Commands::Synthesize {
            input,
            output_dir,
            seed,
            conllu,
            verbose,
        } => {
            setup_logging(verbose);
            match conllu {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read file: {:?}", path))?;
                    let annotator = ConlluAnnotator::from_conllu(&content)
                        .context("Failed to load CoNLL-U annotations")?;
                    info!("Using {} pre-computed annotations", annotator.len());
                    synthesize(&annotator, &input, &output_dir, seed).await
                }
                None => {
                    let config = UdpipeConfig::from_env();
                    info!("Using UDPipe service at {} ({})", config.url, config.model);
                    synthesize(&UdpipeClient::new(config), &input, &output_dir, seed).await
                }
            }
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn metadata_path(output: &Path) -> PathBuf {
    output.with_extension("meta.json")
}

fn parse_corpus(input_dir: &Path, output: &Path, dialect: DialectConfig) -> Result<()> {
    info!("Parsing transcripts in {:?}", input_dir);
    let (files, utterances) = read_transcript_dir(input_dir, &dialect)?;

    write_jsonl(output, &utterances)?;
    info!("Wrote {} records to {:?}", utterances.len(), output);

    let mut meta = RunMetadata::new("parse");
    meta.files = files;
    meta.records = utterances.len();
    meta.accepted = utterances.iter().filter(|u| u.participant).count();
    meta.write(&metadata_path(output))
}

fn preprocess(input: &Path, output: &Path, config: NormalizerConfig) -> Result<()> {
    info!("Loading utterance records from {:?}", input);
    let utterances: Vec<Utterance> = read_jsonl(input)?;

    let normalizer = TextNormalizer::with_config(config);
    let sentences = normalize_utterances(&utterances, &normalizer);

    write_jsonl(output, &sentences)?;
    info!(
        "Wrote {} normalized sentences to {:?} ({} records dropped)",
        sentences.len(),
        output,
        utterances.len() - sentences.len()
    );

    let mut meta = RunMetadata::new("preprocess");
    meta.records = utterances.len();
    meta.accepted = sentences.len();
    meta.rejected = utterances.len() - sentences.len();
    meta.write(&metadata_path(output))
}

async fn synthesize<A: Annotator>(
    annotator: &A,
    input: &Path,
    output_dir: &Path,
    seed: u64,
) -> Result<()> {
    let texts = read_sentences(input)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let synthesizer = AphasicSynthesizer::new(SynthesisConfig::default());

    let result = execute_synthesis(
        annotator,
        &texts,
        &SelectorConfig::default(),
        &synthesizer,
        &mut rng,
    )
    .await?;

    let pairs_path = output_dir.join("syn_data.jsonl");
    write_jsonl(&pairs_path, &result.pairs)?;
    info!("Wrote {} sentence pairs to {:?}", result.pairs.len(), pairs_path);

    let mut meta = RunMetadata::new("synthesize");
    meta.seed = Some(seed);
    meta.records = texts.len();
    meta.selected = result.selection.selected.len();
    meta.accepted = result.pairs.len();
    meta.rejected = result.selection.rejected()
        + result.duplicates
        + result.length_rejections
        + result.too_short;
    meta.write(&output_dir.join("metadata.json"))
}
