#![allow(dead_code)]

pub mod fixtures;
pub mod recorders;

pub use fixtures::{model_instance, settings, TopicRules};
pub use recorders::{CountingRules, RecordingLog};
