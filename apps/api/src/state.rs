use std::sync::Arc;

use crate::analysis::extractor::TextExtractor;
use crate::analysis::sections::AnalysisConfig;
use crate::config::Config;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    /// PDF text extraction backend. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
    /// Section patterns and scoring constants, built once at startup.
    pub analysis: Arc<AnalysisConfig>,
    pub config: Config,
}
