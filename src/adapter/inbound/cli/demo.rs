//! Guided walkthrough: one tenant, one instance, one status read.

use std::time::Duration;

use tracing::info;

use crate::adapter::inbound::cli::command::DemoArgs;
use crate::adapter::inbound::cli::{instance, output, tenant};
use crate::domain::{InstanceId, TenantId};
use crate::error::Result;
use crate::port::TenantOperations;

/// Display name given to the demo tenant.
const DEMO_TENANT_NAME: &str = "Demo Tenant";

/// Execute `demo`.
pub async fn execute(ops: &dyn TenantOperations, backend: &str, args: &DemoArgs) -> Result<()> {
    let tenant_id = TenantId::parse(args.tenant.as_str())?;
    let instance_id = InstanceId::parse(args.instance.as_str())?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Backend", backend);
    info!(tenant = %tenant_id, instance = %instance_id, backend, "Demo starting");

    let created_tenant = ops.create_tenant(&tenant_id, DEMO_TENANT_NAME).await?;
    tenant::print_tenant("demo.tenant", "1. Tenant", &created_tenant)?;

    let created = ops.create_instance(&tenant_id, &instance_id).await?;
    instance::print_instance("demo.instance", "2. Instance", &created)?;

    if args.wait_secs > 0 {
        output::note(&format!("waiting {}s for the rollout", args.wait_secs));
        tokio::time::sleep(Duration::from_secs(args.wait_secs)).await;
    }

    let current = ops.get_instance(&tenant_id, &instance_id).await?;
    instance::print_instance("demo.status", "3. Status", &current)?;

    let all = ops.list_instances(&tenant_id).await?;
    instance::print_instances(&tenant_id, &all)?;

    output::success("Demo complete");
    Ok(())
}
