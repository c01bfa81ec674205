use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use super::Automation;
use crate::errors::AgentResult;

/// Records every payload and replays scripted results, defaulting to `{"status": "ok"}`
#[derive(Clone, Default)]
pub struct MockAutomation {
    results: Arc<Mutex<Vec<AgentResult<Value>>>>,
    payloads: Arc<Mutex<Vec<Value>>>,
}

impl MockAutomation {
    pub fn new(results: Vec<AgentResult<Value>>) -> Self {
        Self {
            results: Arc::new(Mutex::new(results)),
            payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn payloads(&self) -> Vec<Value> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Automation for MockAutomation {
    async fn trigger(&self, payload: Value) -> AgentResult<Value> {
        self.payloads.lock().unwrap().push(payload);
        let mut results = self.results.lock().unwrap();
        if results.is_empty() {
            Ok(json!({"status": "ok"}))
        } else {
            results.remove(0)
        }
    }
}
