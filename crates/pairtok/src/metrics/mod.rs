//! # Metrics
//!
//! The tokenizer reports into a write-only [`MetricsSink`]:
//! * [`TokenizerMetrics`] - the default in-memory collector,
//! * [`NoopMetrics`] - discards everything.
//!
//! Timed operations are scoped with [`measure_operation`].

mod metrics_sink;
mod tokenizer_metrics;

#[doc(inline)]
pub use metrics_sink::{MetricsSink, NoopMetrics, OperationTimer, measure_operation};
#[doc(inline)]
pub use tokenizer_metrics::{MetricsSummary, OperationStats, TokenizerMetrics};
