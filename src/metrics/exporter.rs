use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::WindowMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for window metrics snapshots.
///
/// This exporter writes in the Prometheus text exposition format so it can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, name: &str, value: impl std::fmt::Display) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: impl std::fmt::Display) {
        self.write_metric("gauge", &self.metric_name(suffix), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<WindowMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &WindowMetricsSnapshot) {
        self.write_counter("advance_calls_total", snapshot.advance_calls);
        self.write_counter("set_bits_total", snapshot.set_bits);
        self.write_counter("admitted_buckets_total", snapshot.admitted_buckets);
        self.write_counter("expired_buckets_total", snapshot.expired_buckets);
        self.write_counter("expired_mass_total", snapshot.expired_mass);
        self.write_counter("merges_total", snapshot.merges);
        self.write_counter("cascades_total", snapshot.cascades);
        self.write_counter("resets_total", snapshot.resets);
        self.write_counter("estimate_calls_total", snapshot.estimate_calls);
        self.write_counter("describe_calls_total", snapshot.describe_calls);

        self.write_gauge("max_cascade_depth", snapshot.max_cascade_depth);
        self.write_gauge("live_buckets", snapshot.live_buckets);
        self.write_gauge("peak_live_buckets", snapshot.peak_live_buckets);
        self.write_gauge("capacity", snapshot.capacity);
        self.write_gauge("total_sum", snapshot.total_sum);
        self.write_gauge("current_time", snapshot.current_time);
    }
}
