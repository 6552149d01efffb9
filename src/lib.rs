//! Cancan - per-request authorization decisions
//!
//! An [`Ability`] answers "may this actor do that to this resource" through a
//! pluggable [`RuleEvaluator`], normalizing action aliases and memoizing
//! decisions for the lifetime of one request [`Scope`].

pub mod ability;
pub mod scope;
pub mod settings;

pub use ability::{
    Abilities, Ability, AbilityError, AllowAll, BoxError, CacheStatus, Check, DecisionEvent,
    DecisionLog, Model, Options, Resource, RuleEvaluator,
};
pub use scope::{ActorLookup, Scope};
pub use settings::Settings;
