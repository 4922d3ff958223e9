//! Handlers for the `tenant` command group.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::TenantCreateArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::{Tenant, TenantId};
use crate::error::Result;
use crate::port::TenantOperations;

#[derive(Tabled)]
struct TenantRow {
    #[tabled(rename = "Tenant")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Namespace")]
    namespace: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl From<&Tenant> for TenantRow {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id().to_string(),
            name: tenant.name().to_string(),
            namespace: tenant.namespace(),
            status: tenant.status().to_string(),
            created_at: tenant.created_at().to_rfc3339(),
        }
    }
}

/// Print one tenant under `title`.
pub(crate) fn print_tenant(command: &str, title: &str, tenant: &Tenant) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "tenant": serde_json::to_value(tenant)?,
        }));
        return Ok(());
    }

    output::section(title);
    output::field("Tenant", output::highlight(tenant.id()));
    output::field("Name", tenant.name());
    output::field("Namespace", tenant.namespace());
    output::field("Status", tenant.status());
    output::field("Created", tenant.created_at().to_rfc3339());
    Ok(())
}

/// Execute `tenant create`.
pub async fn execute_create(ops: &dyn TenantOperations, args: &TenantCreateArgs) -> Result<()> {
    let id = TenantId::parse(args.id.as_str())?;
    let tenant = ops.create_tenant(&id, &args.name).await?;
    print_tenant("tenant.create", "Tenant", &tenant)?;
    output::success("Tenant ready");
    Ok(())
}

/// Execute `tenant get`.
pub async fn execute_get(ops: &dyn TenantOperations, id: &str) -> Result<()> {
    let id = TenantId::parse(id)?;
    let tenant = ops.get_tenant(&id).await?;
    print_tenant("tenant.get", "Tenant", &tenant)
}

/// Execute `tenant list`.
pub async fn execute_list(ops: &dyn TenantOperations) -> Result<()> {
    let tenants = ops.list_tenants().await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "tenant.list",
            "tenants": serde_json::to_value(&tenants)?,
        }));
        return Ok(());
    }

    output::section("Tenants");
    if tenants.is_empty() {
        output::note("(none registered)");
        return Ok(());
    }
    let rows: Vec<TenantRow> = tenants.iter().map(TenantRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}
