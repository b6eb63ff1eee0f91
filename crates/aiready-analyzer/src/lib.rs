//! Analysis and comparison engine: fetch a page, extract normalized
//! readiness signals, score them against the fixed rubric, assemble a
//! versioned [`aiready_core::Report`], and diff Reports into a
//! [`aiready_core::Comparison`].

mod canonical;
mod compare;
mod error;
mod export;
mod extract;
mod fetch;
mod jsonld;
mod markup;
mod pipeline;
mod report;
mod score;

pub use canonical::canonicalize;
pub use compare::compare;
pub use error::{AnalyzerError, FetchFailure};
pub use export::{comparison_markdown, report_markdown};
pub use extract::extract;
pub use fetch::{FetchResult, PageFetcher};
pub use pipeline::Analyzer;
pub use score::score;
