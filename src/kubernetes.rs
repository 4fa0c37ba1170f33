use crate::types::{LogRequest, PodSummary};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{ListParams, LogParams};
use kube::config::{self, KubeConfigOptions};
use kube::{Api, Client, ResourceExt};
use thiserror::Error;
use tracing::{debug, info};

/// Failure reported by (or on the way to) the orchestration API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The API server answered with a structured error status.
    #[error("{code} {reason}: {message}")]
    Api {
        code: u16,
        reason: String,
        message: String,
    },
    /// The request never produced an API status (connection, TLS, decoding).
    #[error("orchestration API unreachable: {0}")]
    Transport(String),
}

impl From<kube::Error> for UpstreamError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(status) => UpstreamError::Api {
                code: status.code,
                reason: status.reason.clone(),
                message: status.message.clone(),
            },
            other => UpstreamError::Transport(other.to_string()),
        }
    }
}

/// The two read-only pod operations the gateway needs.
#[async_trait]
pub trait PodSource: Send + Sync {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodSummary>, UpstreamError>;

    /// Raw log text, one timestamped entry per line, oldest first.
    async fn read_logs(&self, req: &LogRequest) -> Result<String, UpstreamError>;
}

/// `PodSource` backed by a live cluster.
pub struct KubePods {
    client: Client,
}

impl KubePods {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PodSource for KubePods {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodSummary>, UpstreamError> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = api.list(&ListParams::default()).await?;
        debug!("Listed {} pods in namespace {}", list.items.len(), namespace);
        Ok(list
            .items
            .iter()
            .map(|pod| pod_summary(pod, namespace))
            .collect())
    }

    async fn read_logs(&self, req: &LogRequest) -> Result<String, UpstreamError> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), &req.namespace);
        let lp = LogParams {
            container: req.container.clone(),
            tail_lines: Some(req.tail_lines),
            timestamps: true,
            ..Default::default()
        };
        Ok(api.logs(&req.pod, &lp).await?)
    }
}

/// Reshape a pod object into the summary served by `/pods`.
pub fn pod_summary(pod: &Pod, requested_namespace: &str) -> PodSummary {
    let containers = pod
        .spec
        .as_ref()
        .map(|spec| spec.containers.iter().map(|c| c.name.clone()).collect())
        .unwrap_or_default();

    PodSummary {
        name: pod.name_any(),
        namespace: pod
            .namespace()
            .unwrap_or_else(|| requested_namespace.to_string()),
        node: pod.spec.as_ref().and_then(|s| s.node_name.clone()),
        phase: pod.status.as_ref().and_then(|s| s.phase.clone()),
        containers,
    }
}

/// Build a client from an explicit kubeconfig context, or infer one
/// (in-cluster service account first, then the current kubeconfig context).
pub async fn connect(context: Option<&str>) -> anyhow::Result<Client> {
    let config = match context {
        Some(ctx) => config::Config::from_kubeconfig(&KubeConfigOptions {
            context: Some(ctx.to_string()),
            ..Default::default()
        })
        .await
        .map_err(|e| anyhow::anyhow!("Context '{}' not found in kubeconfig: {}", ctx, e))?,
        None => config::Config::infer().await?,
    };
    info!("Using cluster at {}", config.cluster_url);
    Ok(Client::try_from(config)?)
}
