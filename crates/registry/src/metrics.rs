use lazy_static::lazy_static;
use prometheus::{core::Collector, IntCounter, IntGauge, Registry};
use tracing::error;

lazy_static! {
    static ref REGISTRY_RENDERERS_TOTAL: IntGauge = IntGauge::new(
        "spotlight_registry_renderers_total",
        "Renderers currently registered"
    )
    .unwrap();
    static ref REGISTRY_SOURCE_SEARCHES: IntCounter = IntCounter::new(
        "spotlight_registry_source_searches_total",
        "File/line searches dispatched across renderers",
    )
    .unwrap();
    static ref REGISTRY_SOURCE_MISSES: IntCounter = IntCounter::new(
        "spotlight_registry_source_misses_total",
        "File/line searches no renderer could answer",
    )
    .unwrap();
    static ref REGISTRY_NODE_LOOKUPS: IntCounter = IntCounter::new(
        "spotlight_registry_node_lookups_total",
        "Reverse node-to-element lookups",
    )
    .unwrap();
}

fn register<C>(registry: &Registry, collector: C)
where
    C: Collector + Clone + Send + Sync + 'static,
{
    if let Err(err) = registry.register(Box::new(collector.clone())) {
        if !matches!(err, prometheus::Error::AlreadyReg) {
            error!(?err, "failed to register registry metric");
        }
    }
}

pub fn register_metrics(registry: &Registry) {
    register(registry, REGISTRY_RENDERERS_TOTAL.clone());
    register(registry, REGISTRY_SOURCE_SEARCHES.clone());
    register(registry, REGISTRY_SOURCE_MISSES.clone());
    register(registry, REGISTRY_NODE_LOOKUPS.clone());
}

pub fn set_renderer_count(count: usize) {
    REGISTRY_RENDERERS_TOTAL.set(count as i64);
}

pub fn record_source_search(hit: bool) {
    REGISTRY_SOURCE_SEARCHES.inc();
    if !hit {
        REGISTRY_SOURCE_MISSES.inc();
    }
}

pub fn record_node_lookup() {
    REGISTRY_NODE_LOOKUPS.inc();
}
