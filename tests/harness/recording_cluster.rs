#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tenant_spinner::adapter::outbound::SimulatedCluster;
use tenant_spinner::domain::{Labels, WorkloadObservation, WorkloadSpec};
use tenant_spinner::error::ClusterError;
use tenant_spinner::port::{ClusterClient, ClusterResult};

/// Control-plane operation kinds, for matching and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    CreateNamespace,
    CreateWorkload,
    ReadWorkload,
    ListWorkloads,
    DeleteWorkload,
}

/// One recorded control-plane call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub op: Op,
    pub namespace: String,
    pub name: Option<String>,
    pub labels: Labels,
}

/// Thread-safe call recorder around the simulated control plane.
///
/// An injected failure is returned for every call of its kind until
/// [`heal`](Self::heal) is called. Failed calls are still recorded.
#[derive(Clone)]
pub struct RecordingCluster {
    inner: Arc<SimulatedCluster>,
    calls: Arc<Mutex<Vec<Call>>>,
    failure: Arc<Mutex<Option<(Op, ClusterError)>>>,
}

impl RecordingCluster {
    pub fn new() -> Self {
        Self::wrap(Arc::new(SimulatedCluster::new()))
    }

    pub fn wrap(inner: Arc<SimulatedCluster>) -> Self {
        Self {
            inner,
            calls: Arc::default(),
            failure: Arc::default(),
        }
    }

    pub fn inner(&self) -> &SimulatedCluster {
        &self.inner
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock recorded calls").clone()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().expect("lock recorded calls").len()
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls().iter().filter(|call| call.op == op).count()
    }

    pub fn clear(&self) {
        self.calls.lock().expect("lock recorded calls").clear();
    }

    pub fn fail(&self, op: Op, error: ClusterError) {
        *self.failure.lock().expect("lock failure") = Some((op, error));
    }

    pub fn heal(&self) {
        *self.failure.lock().expect("lock failure") = None;
    }

    fn record(
        &self,
        op: Op,
        namespace: &str,
        name: Option<&str>,
        labels: &Labels,
    ) -> ClusterResult<()> {
        self.calls.lock().expect("lock recorded calls").push(Call {
            op,
            namespace: namespace.to_string(),
            name: name.map(str::to_string),
            labels: labels.clone(),
        });

        match &*self.failure.lock().expect("lock failure") {
            Some((failing, error)) if *failing == op => Err(error.clone()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ClusterClient for RecordingCluster {
    async fn create_namespace(&self, name: &str, labels: &Labels) -> ClusterResult<()> {
        self.record(Op::CreateNamespace, name, None, labels)?;
        self.inner.create_namespace(name, labels).await
    }

    async fn create_workload(&self, namespace: &str, spec: &WorkloadSpec) -> ClusterResult<()> {
        self.record(Op::CreateWorkload, namespace, Some(&spec.name), &spec.labels)?;
        self.inner.create_workload(namespace, spec).await
    }

    async fn read_workload(
        &self,
        namespace: &str,
        name: &str,
    ) -> ClusterResult<WorkloadObservation> {
        self.record(Op::ReadWorkload, namespace, Some(name), &Labels::new())?;
        self.inner.read_workload(namespace, name).await
    }

    async fn list_workloads(
        &self,
        namespace: &str,
        selector: &Labels,
    ) -> ClusterResult<Vec<WorkloadObservation>> {
        self.record(Op::ListWorkloads, namespace, None, selector)?;
        self.inner.list_workloads(namespace, selector).await
    }

    async fn delete_workload(&self, namespace: &str, name: &str) -> ClusterResult<()> {
        self.record(Op::DeleteWorkload, namespace, Some(name), &Labels::new())?;
        self.inner.delete_workload(namespace, name).await
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}
