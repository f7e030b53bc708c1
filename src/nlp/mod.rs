pub mod client;
pub mod conllu;

pub use client::*;
pub use conllu::*;

use std::future::Future;

use anyhow::Result;

use crate::models::AnnotatedDoc;

/// Segments, tags and parses raw text
pub trait Annotator {
    fn annotate(&self, text: &str) -> impl Future<Output = Result<AnnotatedDoc>> + Send;
}
