use {
    axum_prometheus::metrics,
    std::{
        fmt::Debug,
        time::Instant,
    },
    tracing::{
        field::{
            Field,
            Visit,
        },
        span::Record,
        Id,
        Metadata,
    },
    tracing_subscriber::{
        layer::Context,
        Layer,
    },
};

pub const AUCTION_EXPIRY_TOTAL: &str = "auction_expiry_total";

pub const DB_QUERIES_BUCKETS: &[f64; 12] = &[
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

/// Timing data of a span emitted with the `metrics` target.
#[derive(Debug, Clone)]
pub struct MetricsLayerData {
    category:   String,
    started_at: Instant,
    result:     String,
    name:       String,
}

/// Turns every `metrics` span into a `<category>_duration_seconds` histogram and a
/// `<category>_total` counter labeled by the span name and its result.
pub struct MetricsLayer;

impl Visit for MetricsLayerData {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "result" {
            self.result = format!("{:?}", value);
        }
    }
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "category" => self.category = value.to_string(),
            "result" => self.result = value.to_string(),
            "name" => self.name = value.to_string(),
            _ => {}
        }
    }
}

impl Default for MetricsLayerData {
    fn default() -> MetricsLayerData {
        MetricsLayerData {
            category:   "unknown".to_string(),
            started_at: Instant::now(),
            result:     "unknown".to_string(),
            name:       "unknown".to_string(),
        }
    }
}

impl MetricsLayerData {
    fn new(name: String) -> MetricsLayerData {
        MetricsLayerData {
            name,
            ..MetricsLayerData::default()
        }
    }

    fn labels(&self) -> [(&'static str, String); 2] {
        [("name", self.name.clone()), ("result", self.result.clone())]
    }
}

pub fn is_metrics(metadata: &Metadata) -> bool {
    metadata.target().starts_with("metrics")
}

impl<S> Layer<S> for MetricsLayer
where
    S: tracing::Subscriber,
    S: for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &tracing::span::Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        if !is_metrics(attrs.metadata()) {
            return;
        }
        match ctx.span(id) {
            Some(span) => {
                let mut data = MetricsLayerData::new(span.metadata().name().to_string());
                attrs.record(&mut data);
                span.extensions_mut().replace(data);
            }
            None => tracing::error!("span not found: {:?}", id),
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            let mut extensions = span.extensions_mut();
            if let Some(data) = extensions.get_mut::<MetricsLayerData>() {
                values.record(data);
            }
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            tracing::error!("span not found: {:?}", id);
            return;
        };
        let extensions = span.extensions();
        if let Some(data) = extensions.get::<MetricsLayerData>() {
            let latency = data.started_at.elapsed().as_secs_f64();
            let labels = data.labels();
            metrics::histogram!(format!("{}_duration_seconds", data.category), &labels)
                .record(latency);
            metrics::counter!(format!("{}_total", data.category), &labels).increment(1);
        }
    }
}
