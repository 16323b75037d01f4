use std::fmt;

use serde::Deserialize;

/// One entry of the status endpoint's response.
///
/// Field names follow the endpoint (`Key`, `Online`, ...); lowercase spellings are
/// accepted as well. The counters are informational and default to zero when absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeStatus {
    #[serde(rename = "Key", alias = "key")]
    pub key: String,

    /// Seconds the node has been seen online
    #[serde(rename = "Uptime", alias = "uptime", default)]
    pub uptime: i64,

    /// Seconds the node has been seen offline
    #[serde(rename = "Downtime", alias = "downtime", default)]
    pub downtime: i64,

    /// Uptime percentage in the 0-100 range
    #[serde(rename = "Percentage", alias = "percentage", default)]
    pub percentage: f64,

    #[serde(rename = "Online", alias = "online")]
    pub online: bool,
}

/// What a successful round trip to the status source produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Nodes(Vec<NodeStatus>),
    /// The source answered with a non-success status code.
    Unhealthy { status: u16 },
}

/// Per-node line reported during a cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeReport {
    /// 1-based position of the key in the configured list
    pub index: usize,
    pub online: bool,
    pub percentage: f64,
}

impl fmt::Display for NodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.online {
            write!(f, "Node {} has {:.6}% uptime.", self.index, self.percentage)
        } else {
            write!(f, "Node {} is offline with {:.6}% uptime.", self.index, self.percentage)
        }
    }
}

/// Result of comparing one response against the expected keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub found: usize,
    pub total: usize,
    pub reports: Vec<NodeReport>,
}

impl Evaluation {
    pub fn all_online(&self) -> bool {
        self.found == self.total
    }
}

/// How a completed cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    AllOnline { total: usize },
    PartialOutage { found: usize, total: usize },
    ServiceUnhealthy { status: u16 },
}

impl CycleOutcome {
    /// Text sent to the notification channel, `None` when nothing needs attention.
    pub fn notification(&self) -> Option<String> {
        match self {
            CycleOutcome::AllOnline { .. } => None,
            CycleOutcome::PartialOutage { found, total } => {
                Some(format!("Some nodes are down {found}/{total}"))
            }
            CycleOutcome::ServiceUnhealthy { status } => {
                Some(format!("Service is down. Status {status}"))
            }
        }
    }
}

impl From<&Evaluation> for CycleOutcome {
    fn from(evaluation: &Evaluation) -> Self {
        if evaluation.all_online() {
            CycleOutcome::AllOnline { total: evaluation.total }
        } else {
            CycleOutcome::PartialOutage { found: evaluation.found, total: evaluation.total }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_endpoint_shape() {
        let body = r#"[{"Key":"A","Uptime":3600,"Downtime":0,"Percentage":100,"Online":true}]"#;
        let nodes: Vec<NodeStatus> = serde_json::from_str(body).unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].key, "A");
        assert_eq!(nodes[0].uptime, 3600);
        assert!(nodes[0].online);
        assert_eq!(nodes[0].percentage, 100.0);
    }

    #[test]
    fn test_decode_lowercase_fields_and_missing_counters() {
        let body = r#"[{"key":"B","percentage":12.5,"online":false}]"#;
        let nodes: Vec<NodeStatus> = serde_json::from_str(body).unwrap();

        assert_eq!(nodes[0].key, "B");
        assert_eq!(nodes[0].uptime, 0);
        assert_eq!(nodes[0].downtime, 0);
        assert!(!nodes[0].online);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(serde_json::from_str::<Vec<NodeStatus>>(r#"{"Key":"A"}"#).is_err());
        assert!(serde_json::from_str::<Vec<NodeStatus>>("<html></html>").is_err());
    }

    #[test]
    fn test_report_lines() {
        let online = NodeReport { index: 1, online: true, percentage: 99.9 };
        let offline = NodeReport { index: 2, online: false, percentage: 10.0 };

        assert_eq!(online.to_string(), "Node 1 has 99.900000% uptime.");
        assert_eq!(offline.to_string(), "Node 2 is offline with 10.000000% uptime.");
    }

    #[test]
    fn test_notification_text() {
        assert_eq!(CycleOutcome::AllOnline { total: 3 }.notification(), None);
        assert_eq!(
            CycleOutcome::PartialOutage { found: 0, total: 2 }.notification().as_deref(),
            Some("Some nodes are down 0/2")
        );
        assert_eq!(
            CycleOutcome::ServiceUnhealthy { status: 503 }.notification().as_deref(),
            Some("Service is down. Status 503")
        );
    }
}
