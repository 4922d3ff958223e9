//! Handlers for the `instance` command group.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{InstanceCreateArgs, InstanceRefArgs};
use crate::adapter::inbound::cli::output;
use crate::domain::{Instance, InstanceId, TenantId};
use crate::error::Result;
use crate::port::TenantOperations;

#[derive(Tabled)]
struct InstanceRow {
    #[tabled(rename = "Instance")]
    id: String,
    #[tabled(rename = "Resource")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl From<&Instance> for InstanceRow {
    fn from(instance: &Instance) -> Self {
        Self {
            id: instance.id().to_string(),
            name: instance.name(),
            status: instance.status().to_string(),
            created_at: instance.created_at().to_rfc3339(),
        }
    }
}

fn parse_ref(tenant: &str, instance: &str) -> Result<(TenantId, InstanceId)> {
    Ok((TenantId::parse(tenant)?, InstanceId::parse(instance)?))
}

/// Print one instance under `title`.
pub(crate) fn print_instance(command: &str, title: &str, instance: &Instance) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "instance": serde_json::to_value(instance)?,
        }));
        return Ok(());
    }

    output::section(title);
    output::field("Instance", output::highlight(instance.id()));
    output::field("Tenant", instance.tenant_id());
    output::field("Namespace", instance.namespace());
    output::field("Resource", instance.name());
    output::field("Status", instance.status());
    output::field("Created", instance.created_at().to_rfc3339());
    Ok(())
}

/// Print a tenant's instances as a table.
pub(crate) fn print_instances(tenant: &TenantId, instances: &[Instance]) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "instance.list",
            "tenant": tenant,
            "instances": serde_json::to_value(instances)?,
        }));
        return Ok(());
    }

    output::section(&format!("Instances of {tenant}"));
    if instances.is_empty() {
        output::note("(none)");
        return Ok(());
    }
    let rows: Vec<InstanceRow> = instances.iter().map(InstanceRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

/// Execute `instance create`.
///
/// The tenant registry does not outlive the process, so the tenant is
/// registered first; an existing registration is left as is.
pub async fn execute_create(ops: &dyn TenantOperations, args: &InstanceCreateArgs) -> Result<()> {
    let (tenant, instance) = parse_ref(&args.tenant, &args.instance)?;
    let name = args.tenant_name.as_deref().unwrap_or(tenant.as_str());

    ops.create_tenant(&tenant, name).await?;
    let created = ops.create_instance(&tenant, &instance).await?;

    print_instance("instance.create", "Instance", &created)?;
    output::success("Instance requested");
    Ok(())
}

/// Execute `instance get`.
pub async fn execute_get(ops: &dyn TenantOperations, args: &InstanceRefArgs) -> Result<()> {
    let (tenant, instance) = parse_ref(&args.tenant, &args.instance)?;
    let found = ops.get_instance(&tenant, &instance).await?;
    print_instance("instance.get", "Instance", &found)
}

/// Execute `instance list`.
pub async fn execute_list(ops: &dyn TenantOperations, tenant: &str) -> Result<()> {
    let tenant = TenantId::parse(tenant)?;
    let instances = ops.list_instances(&tenant).await?;
    print_instances(&tenant, &instances)
}

/// Execute `instance delete`.
pub async fn execute_delete(ops: &dyn TenantOperations, args: &InstanceRefArgs) -> Result<()> {
    let (tenant, instance) = parse_ref(&args.tenant, &args.instance)?;
    ops.delete_instance(&tenant, &instance).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "instance.delete",
            "tenant": tenant,
            "instance": instance,
            "deleted": true,
        }));
        return Ok(());
    }

    output::success(&format!(
        "Deleted {} from {}",
        instance.resource_name(),
        tenant.namespace()
    ));
    Ok(())
}
