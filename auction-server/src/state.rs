use {
    crate::auction::service::Service,
    axum_prometheus::metrics_exporter_prometheus::PrometheusHandle,
};

pub struct Store {
    pub auction_service:  Service,
    pub metrics_recorder: PrometheusHandle,
}
