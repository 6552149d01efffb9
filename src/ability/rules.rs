use async_trait::async_trait;
use serde_json::Value;

use crate::ability::types::Options;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The policy behind every decision.
///
/// `action` is already normalized and `options.type_name` is always set.
/// Implementations may suspend (e.g. to look something up in a database);
/// an `Err` is surfaced to the caller and never memoized.
#[async_trait]
pub trait RuleEvaluator<A>: Send + Sync {
    async fn evaluate(
        &self,
        actor: Option<&A>,
        action: &str,
        resource: &Value,
        options: &Options,
    ) -> Result<bool, BoxError>;
}

/// Allows everything. Real deployments supply their own policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl<A: Sync> RuleEvaluator<A> for AllowAll {
    async fn evaluate(
        &self,
        _actor: Option<&A>,
        _action: &str,
        _resource: &Value,
        _options: &Options,
    ) -> Result<bool, BoxError> {
        Ok(true)
    }
}

/// Policy backed by a synchronous closure. See [`rules_fn`].
pub struct RulesFn<F>(F);

/// Wrap a closure as a [`RuleEvaluator`].
pub fn rules_fn<A, F>(f: F) -> RulesFn<F>
where
    F: Fn(Option<&A>, &str, &Value, &Options) -> Result<bool, BoxError> + Send + Sync,
{
    RulesFn(f)
}

#[async_trait]
impl<A, F> RuleEvaluator<A> for RulesFn<F>
where
    A: Sync,
    F: Fn(Option<&A>, &str, &Value, &Options) -> Result<bool, BoxError> + Send + Sync,
{
    async fn evaluate(
        &self,
        actor: Option<&A>,
        action: &str,
        resource: &Value,
        options: &Options,
    ) -> Result<bool, BoxError> {
        (self.0)(actor, action, resource, options)
    }
}
