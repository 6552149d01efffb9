use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cancan::{BoxError, DecisionEvent, DecisionLog, Options, RuleEvaluator};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub action: String,
    pub resource: Value,
    pub options: Options,
}

/// Allows `read` only, and remembers every call it receives.
#[derive(Default)]
pub struct CountingRules {
    calls: Mutex<Vec<Call>>,
    count: AtomicUsize,
    fail: bool,
}

impl CountingRules {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// An evaluator whose every call fails.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RuleEvaluator<Value> for CountingRules {
    async fn evaluate(
        &self,
        _actor: Option<&Value>,
        action: &str,
        resource: &Value,
        options: &Options,
    ) -> Result<bool, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(Call {
            action: action.to_string(),
            resource: resource.clone(),
            options: options.clone(),
        });
        tokio::task::yield_now().await;
        if self.fail {
            return Err("policy store unavailable".into());
        }
        Ok(action == "read")
    }
}

#[derive(Default)]
pub struct RecordingLog {
    events: Mutex<Vec<DecisionEvent>>,
}

impl RecordingLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<DecisionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DecisionLog for RecordingLog {
    fn log(&self, event: &DecisionEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
