pub mod engine;
pub mod errors;
pub mod log;
pub mod rules;
pub mod types;
pub mod web;

pub use engine::{cache_key, normalize_action, Ability};
pub use errors::{AbilityError, Result};
pub use log::{DecisionLog, TracingDecisionLog};
pub use rules::{rules_fn, AllowAll, BoxError, RuleEvaluator, RulesFn};
pub use types::{Abilities, CacheStatus, Check, DecisionEvent, Model, Options, Resource};
