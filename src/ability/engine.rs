use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::{Map, Value};

use crate::ability::errors::{AbilityError, Result};
use crate::ability::log::{DecisionLog, TracingDecisionLog};
use crate::ability::rules::RuleEvaluator;
use crate::ability::types::{Abilities, CacheStatus, Check, DecisionEvent, Options, Resource};
use crate::settings::Settings;

/// Map action aliases onto create/read/update/delete. Unknown actions pass through.
pub fn normalize_action(action: &str) -> &str {
    match action {
        "show" => "read",
        "new" => "create",
        "edit" => "update",
        "destroy" => "delete",
        other => other,
    }
}

/// Derive the memoization key for a check, e.g. `read-{"id":1}-{"type":"foo"}`.
///
/// Mapping keys are sorted at every level, so structurally equal inputs give
/// equal keys no matter how they were built. The `type` entry always comes
/// from `options.type_name`, never from an extra key of the same name.
pub fn cache_key(action: &str, resource: &Value, options: &Options) -> Result<String> {
    let mut opts = Map::new();
    for (k, v) in &options.extra {
        if k != "type" {
            opts.insert(k.clone(), v.clone());
        }
    }
    if let Some(type_name) = &options.type_name {
        opts.insert("type".to_string(), Value::String(type_name.clone()));
    }
    let resource = serde_json::to_string(&canonical(resource))?;
    let options = serde_json::to_string(&canonical(&Value::Object(opts)))?;
    Ok(format!("{action}-{resource}-{options}"))
}

fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k.clone(), canonical(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

/// Decision engine for a single actor, living as long as one request scope.
pub struct Ability<A> {
    actor: Option<A>,
    rules: Arc<dyn RuleEvaluator<A>>,
    log: Arc<dyn DecisionLog>,
    cache_enabled: bool,
    log_enabled: bool,
    cache: RwLock<HashMap<String, bool>>,
}

impl<A: Send + Sync + 'static> Ability<A> {
    /// Build an engine for `actor`. Cache and log flags are read from
    /// `settings` once, here.
    pub fn new(actor: Option<A>, rules: Arc<dyn RuleEvaluator<A>>, settings: &Settings) -> Self {
        Self {
            actor,
            rules,
            log: Arc::new(TracingDecisionLog),
            cache_enabled: settings.cache,
            log_enabled: settings.log,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_log(mut self, log: Arc<dyn DecisionLog>) -> Self {
        self.log = log;
        self
    }

    pub fn actor(&self) -> Option<&A> {
        self.actor.as_ref()
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    pub fn log_enabled(&self) -> bool {
        self.log_enabled
    }

    /// Number of memoized decisions.
    pub fn cached_decisions(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub async fn check(
        &self,
        action: &str,
        resource: Option<&dyn Resource>,
        options: &Options,
    ) -> Result<Check> {
        if action.is_empty() {
            return Err(AbilityError::action_required());
        }

        let absent = Check {
            allow: false,
            action: action.to_string(),
            type_name: None,
            resource: None,
        };
        let Some(resource) = resource else {
            return Ok(absent);
        };
        let record = resource.to_record()?;
        if record.is_null() {
            return Ok(absent);
        }

        let type_name = options
            .type_name
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| resource.type_name().filter(|t| !t.is_empty()))
            .ok_or_else(AbilityError::type_required)?;

        let action = normalize_action(action);
        let mut options = options.clone();
        options.type_name = Some(type_name.clone());
        options.extra.remove("type");

        let (allow, cache) = if self.cache_enabled {
            let key = cache_key(action, &record, &options)?;
            match self.cached(&key) {
                Some(allow) => (allow, CacheStatus::Hit),
                None => {
                    let allow = self.evaluate(action, &record, &options).await?;
                    self.remember(key, allow);
                    (allow, CacheStatus::Miss)
                }
            }
        } else {
            (
                self.evaluate(action, &record, &options).await?,
                CacheStatus::Unused,
            )
        };

        if self.log_enabled {
            self.log.log(&DecisionEvent {
                action: action.to_string(),
                type_name: type_name.clone(),
                allow,
                cache,
                resource: record.clone(),
            });
        }

        Ok(Check {
            allow,
            action: action.to_string(),
            type_name: Some(type_name),
            resource: Some(record),
        })
    }

    pub async fn can(
        &self,
        action: &str,
        resource: Option<&dyn Resource>,
        options: &Options,
    ) -> Result<bool> {
        Ok(self.check(action, resource, options).await?.allow)
    }

    /// Like [`can`](Self::can), but a denial is an [`AbilityError::AccessDenied`].
    pub async fn authorize(
        &self,
        action: &str,
        resource: Option<&dyn Resource>,
        options: &Options,
    ) -> Result<()> {
        let check = self.check(action, resource, options).await?;
        if !check.allow {
            return Err(AbilityError::AccessDenied {
                action: check.action,
                type_name: check.type_name,
                resource: check.resource,
            });
        }
        Ok(())
    }

    /// Read, update and delete decisions for one resource, checked concurrently.
    pub async fn abilities(
        &self,
        resource: Option<&dyn Resource>,
        options: &Options,
    ) -> Result<Abilities> {
        let (read, update, delete) = tokio::try_join!(
            self.can("read", resource, options),
            self.can("update", resource, options),
            self.can("delete", resource, options),
        )?;
        Ok(Abilities {
            read,
            update,
            delete,
        })
    }

    async fn evaluate(&self, action: &str, record: &Value, options: &Options) -> Result<bool> {
        self.rules
            .evaluate(self.actor.as_ref(), action, record, options)
            .await
            .map_err(AbilityError::Evaluation)
    }

    fn cached(&self, key: &str) -> Option<bool> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    fn remember(&self, key: String, allow: bool) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, allow);
    }
}
