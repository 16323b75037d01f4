use std::collections::{HashMap, HashSet};

use super::types::{Evaluation, NodeReport, NodeStatus};
use crate::error::ConfigError;

/// The operator-configured node keys and their 1-based display positions.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ExpectedKeys {
    keys: Vec<String>,
    index: HashMap<String, usize>,
}

impl ExpectedKeys {
    /// Rejects an empty list, blank keys and duplicates.
    pub fn new<I, S>(keys: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(|key| key.into().trim().to_string()).collect();

        if keys.is_empty() {
            return Err(ConfigError::Missing("keys"));
        }

        let mut index = HashMap::with_capacity(keys.len());
        for (position, key) in keys.iter().enumerate() {
            if key.is_empty() {
                return Err(ConfigError::Invalid {
                    field: "keys",
                    reason: format!("key #{} is empty", position + 1),
                });
            }
            if index.insert(key.clone(), position + 1).is_some() {
                return Err(ConfigError::Invalid {
                    field: "keys",
                    reason: format!("key {key:?} is listed more than once"),
                });
            }
        }

        Ok(Self { keys, index })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// 1-based display position of `key`, if it is monitored.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Compare a status response against the expected keys.
    ///
    /// Records for keys outside the list are skipped. A key counts as found at most
    /// once, even if the response repeats it.
    pub fn evaluate(&self, nodes: &[NodeStatus]) -> Evaluation {
        let mut online = HashSet::new();
        let mut reports = Vec::new();

        for node in nodes {
            let Some(index) = self.position(&node.key) else {
                continue;
            };
            if node.online {
                online.insert(index);
            }
            reports.push(NodeReport { index, online: node.online, percentage: node.percentage });
        }

        Evaluation { found: online.len(), total: self.len(), reports }
    }
}
