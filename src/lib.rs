//! Workspace umbrella crate for docmeta.
//!
//! Re-exports the extraction and rights stages so callers can classify a
//! metadata bag into a typed record through one API entry point, loads the
//! YAML configuration used by the `docmeta` binary, and exposes an optional
//! metrics hook around extraction.

pub mod config;

pub use config::{ConfigLoadError, DocmetaConfig, LoggingConfig};
pub use extract::{
    AdditionalMetadata, BaseMetadata, BuildContext, BuildFn, CURRENT_CONFIG_VERSION,
    ClimateForecastMetadata, ConfigError, CreativeCommonsMetadata, CreativeCommonsRights,
    DatabaseMetadata, DetectionReason, DocumentMetadata, DocumentRecord, DocumentType,
    DublinCore, EmailMetadata, EpubMetadata, ExifMetadata, ExtractConfig, ExtractError,
    FontMetadata, GenericMetadata, GpsMetadata, HtmlMetadata, ImageMetadata, IptcMetadata,
    MediaMetadata, MetadataBag, OfficeMetadata, OpenGraphMetadata, OverlayError, PdfMetadata,
    RawDocument, RtfMetadata, WarcMetadata, builder_for, claimed_fields, detect,
    detect_with_reason, extract, extract_many,
};
pub use rights::{RightsError, RightsExtractor, RightsFields, RightsSink, extract_rights};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

/// Metrics observer for extraction.
pub trait ExtractMetrics: Send + Sync {
    fn record_extract(
        &self,
        latency: Duration,
        result: Result<DocumentType, ExtractError>,
        overlay: bool,
    );
}

/// Install or clear the global extraction metrics recorder.
pub fn set_extract_metrics(recorder: Option<Arc<dyn ExtractMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn ExtractMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn ExtractMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn ExtractMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn ExtractMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record(self, result: &Result<DocumentRecord, ExtractError>) {
        let (outcome, overlay) = match result {
            Ok(record) => (Ok(record.document_type()), record.creative_commons.is_some()),
            Err(err) => (Err(err.clone()), false),
        };
        self.recorder
            .record_extract(self.start.elapsed(), outcome, overlay);
    }
}

/// Extract one document, reporting to the installed metrics recorder.
pub fn process_document(
    raw: RawDocument,
    cfg: &ExtractConfig,
) -> Result<DocumentRecord, ExtractError> {
    let metrics = MetricsSpan::start();
    let result = extract(raw, cfg);
    if let Some(span) = metrics {
        span.record(&result);
    }
    result
}

/// Extract a batch with the settings of a loaded [`DocmetaConfig`].
pub fn process_batch<I>(docs: I, cfg: &DocmetaConfig) -> Vec<Result<DocumentRecord, ExtractError>>
where
    I: IntoIterator<Item = RawDocument>,
{
    docs.into_iter()
        .map(|doc| process_document(doc, &cfg.extract))
        .collect()
}
