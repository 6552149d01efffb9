use crate::ability::types::DecisionEvent;

/// Receives one event per evaluated check when logging is enabled.
pub trait DecisionLog: Send + Sync {
    fn log(&self, event: &DecisionEvent);
}

/// Emits decisions as `tracing` events under the `cancan` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDecisionLog;

impl DecisionLog for TracingDecisionLog {
    fn log(&self, event: &DecisionEvent) {
        tracing::info!(
            target: "cancan",
            action = %event.action,
            type_name = %event.type_name,
            allow = event.allow,
            cache = %event.cache,
            "can {} {} result {}, {} cache",
            event.action,
            event.type_name,
            event.allow,
            event.cache
        );
    }
}
