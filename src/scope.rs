//! Request-scope wiring: one [`Ability`] per scope, built on first use.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::ability::{
    Abilities, Ability, Check, DecisionLog, Options, Resource, Result, RuleEvaluator,
    TracingDecisionLog,
};
use crate::settings::Settings;

/// Where a scope finds its current actor.
///
/// `field` is the configured `context_user_method`, `"user"` unless overridden.
/// `None` means the request is anonymous.
pub trait ActorLookup: Send + Sync {
    type Actor: Send + Sync + 'static;

    fn actor(&self, field: &str) -> Option<Self::Actor>;
}

impl<A: Clone + Send + Sync + 'static> ActorLookup for HashMap<String, A> {
    type Actor = A;

    fn actor(&self, field: &str) -> Option<A> {
        self.get(field).cloned()
    }
}

/// A request scope owning its context and, once asked for, its ability.
pub struct Scope<C: ActorLookup> {
    context: C,
    settings: Arc<Settings>,
    rules: Arc<dyn RuleEvaluator<C::Actor>>,
    log: Arc<dyn DecisionLog>,
    ability: OnceLock<Arc<Ability<C::Actor>>>,
}

impl<C: ActorLookup> Scope<C> {
    pub fn new(
        context: C,
        settings: Arc<Settings>,
        rules: Arc<dyn RuleEvaluator<C::Actor>>,
    ) -> Self {
        Self {
            context,
            settings,
            rules,
            log: Arc::new(TracingDecisionLog),
            ability: OnceLock::new(),
        }
    }

    /// Replace the decision log. Only affects an ability not yet built.
    pub fn with_log(mut self, log: Arc<dyn DecisionLog>) -> Self {
        self.log = log;
        self
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether the ability has been built yet.
    pub fn is_bound(&self) -> bool {
        self.ability.get().is_some()
    }

    /// The ability for this scope's actor. Built on the first call, then reused.
    pub fn ability(&self) -> &Arc<Ability<C::Actor>> {
        self.ability.get_or_init(|| {
            let field = &self.settings.context_user_method;
            let actor = self.context.actor(field);
            tracing::debug!(
                target: "cancan",
                field = %field,
                anonymous = actor.is_none(),
                "binding ability to scope"
            );
            let ability = Ability::new(actor, Arc::clone(&self.rules), &self.settings)
                .with_log(Arc::clone(&self.log));
            Arc::new(ability)
        })
    }

    pub async fn check(
        &self,
        action: &str,
        resource: Option<&dyn Resource>,
        options: &Options,
    ) -> Result<Check> {
        self.ability().check(action, resource, options).await
    }

    pub async fn can(
        &self,
        action: &str,
        resource: Option<&dyn Resource>,
        options: &Options,
    ) -> Result<bool> {
        self.ability().can(action, resource, options).await
    }

    pub async fn authorize(
        &self,
        action: &str,
        resource: Option<&dyn Resource>,
        options: &Options,
    ) -> Result<()> {
        self.ability().authorize(action, resource, options).await
    }

    pub async fn abilities(
        &self,
        resource: Option<&dyn Resource>,
        options: &Options,
    ) -> Result<Abilities> {
        self.ability().abilities(resource, options).await
    }
}
