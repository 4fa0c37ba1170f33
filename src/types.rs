use serde::{Deserialize, Serialize};

/// One pod as returned by `GET /pods`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,
    pub node: Option<String>,
    pub phase: Option<String>,
    pub containers: Vec<String>,
}

/// A single log line split into its timestamp prefix and the remaining text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    pub timestamp: String,
    pub text: String,
}

/// Body of `GET /logs` in JSON mode; `Deserialize` lets clients and tests read it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsResponse {
    pub namespace: String,
    pub pod: String,
    pub container: String,
    pub count: usize,
    pub lines: Vec<LogLine>,
}

/// JSON body of every failed request except the 401.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Everything needed to fetch one log tail from the orchestration API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRequest {
    pub namespace: String,
    pub pod: String,
    pub container: Option<String>,
    pub tail_lines: i64,
}

/// Settings the request handlers need, fixed at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub token: String,
    pub max_lines: i64,
    pub default_lines: i64,
    pub default_namespace: String,
}
