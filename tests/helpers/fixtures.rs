use async_trait::async_trait;
use cancan::{BoxError, Model, Options, RuleEvaluator, Settings};
use serde_json::{json, Value};

/// A model instance whose type comes from its model name.
pub fn model_instance() -> Model<Value> {
    Model::new("user", json!({ "id": "123", "name": "Jason Lee" }))
}

pub fn settings(cache: bool, log: bool) -> Settings {
    Settings {
        cache,
        log,
        ..Settings::default()
    }
}

/// Topic policy: everyone may read, the author or an admin may update,
/// only admins may create or delete. Everything else is allowed.
pub struct TopicRules;

impl TopicRules {
    fn is_admin(actor: Option<&Value>) -> bool {
        actor
            .and_then(|u| u.get("admin"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    fn is_author(actor: Option<&Value>, topic: &Value) -> bool {
        match (actor.and_then(|u| u.get("id")), topic.get("user_id")) {
            (Some(id), Some(author)) => id == author,
            _ => false,
        }
    }
}

#[async_trait]
impl RuleEvaluator<Value> for TopicRules {
    async fn evaluate(
        &self,
        actor: Option<&Value>,
        action: &str,
        resource: &Value,
        options: &Options,
    ) -> Result<bool, BoxError> {
        if options.type_name.as_deref() != Some("topic") {
            return Ok(true);
        }
        let allowed = match action {
            "create" | "delete" => Self::is_admin(actor),
            "update" => Self::is_admin(actor) || Self::is_author(actor, resource),
            _ => true,
        };
        Ok(allowed)
    }
}
