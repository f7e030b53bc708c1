pub mod error;
pub mod io;
pub mod models;
pub mod nlp;
pub mod rules;
pub mod stages;

pub use error::PipelineError;
pub use io::{RunMetadata, read_jsonl, read_sentences, read_transcript_dir, write_jsonl};
pub use models::{
    AnnotatedDoc, AnnotatedSentence, DialectConfig, NormalizedSentence, SentencePair, Token,
    Utterance,
};
pub use nlp::{Annotator, ConlluAnnotator, UdpipeClient, UdpipeConfig};
pub use rules::RuleTables;
pub use stages::{
    AphasicSynthesizer, NormalizerConfig, SelectorConfig, SynthesisConfig, TextNormalizer,
    execute_synthesis, normalize_utterances, parse_transcript,
};
