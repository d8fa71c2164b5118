//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, PageArgs};
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::pagination::{ListOperation, PageItem, Pager};
use crate::services::{
    case_management, enterprise_usage_reports, iam_access_groups, partner_usage_reports,
    resource_controller, usage_reports, user_management, CaseManagementV1,
    EnterpriseUsageReportsV1, IamAccessGroupsV2, PartnerUsageReportsV1, ResourceControllerV2,
    UsageReportsV4, UserManagementV1,
};
use crate::types::JsonValue;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, printing the listed items to stdout
    pub async fn run(&self) -> Result<()> {
        let items = self.fetch().await?;
        self.output(&items)
    }

    /// Run the CLI command and return the listed items as JSON
    pub async fn fetch(&self) -> Result<Vec<JsonValue>> {
        match &self.cli.command {
            Commands::Cases { page } => {
                let service =
                    CaseManagementV1::new(self.service_config(case_management::DEFAULT_SERVICE_NAME)?)?;
                let params = case_management::GetCasesParams {
                    limit: page.limit,
                    ..Default::default()
                };
                self.collect("cases", service.get_cases_pager(params)?, page)
                    .await
            }
            Commands::AccessGroups { account_id, page } => {
                let service = IamAccessGroupsV2::new(
                    self.service_config(iam_access_groups::DEFAULT_SERVICE_NAME)?,
                )?;
                let mut params = iam_access_groups::ListAccessGroupsParams::new(account_id);
                params.limit = page.limit;
                self.collect("access-groups", service.list_access_groups_pager(params)?, page)
                    .await
            }
            Commands::AccessGroupMembers {
                access_group_id,
                page,
            } => {
                let service = IamAccessGroupsV2::new(
                    self.service_config(iam_access_groups::DEFAULT_SERVICE_NAME)?,
                )?;
                let mut params =
                    iam_access_groups::ListAccessGroupMembersParams::new(access_group_id);
                params.limit = page.limit;
                self.collect(
                    "access-group-members",
                    service.list_access_group_members_pager(params)?,
                    page,
                )
                .await
            }
            Commands::ResourceInstances { page } => {
                let service = ResourceControllerV2::new(
                    self.service_config(resource_controller::DEFAULT_SERVICE_NAME)?,
                )?;
                let params = resource_controller::ListResourceInstancesParams {
                    limit: page.limit,
                    ..Default::default()
                };
                self.collect(
                    "resource-instances",
                    service.list_resource_instances_pager(params)?,
                    page,
                )
                .await
            }
            Commands::Users { account_id, page } => {
                let service = UserManagementV1::new(
                    self.service_config(user_management::DEFAULT_SERVICE_NAME)?,
                )?;
                let mut params = user_management::ListUsersParams::new(account_id);
                params.limit = page.limit;
                self.collect("users", service.list_users_pager(params)?, page)
                    .await
            }
            Commands::PartnerReports {
                partner_id,
                month,
                page,
            } => {
                let service = PartnerUsageReportsV1::new(
                    self.service_config(partner_usage_reports::DEFAULT_SERVICE_NAME)?,
                )?;
                let mut params = partner_usage_reports::GetPartnerUsageReportParams::new(partner_id);
                params.month.clone_from(month);
                params.limit = page.limit;
                self.collect(
                    "partner-reports",
                    service.get_resource_usage_report_pager(params)?,
                    page,
                )
                .await
            }
            Commands::EnterpriseReports {
                enterprise_id,
                account_id,
                month,
                page,
            } => {
                let service = EnterpriseUsageReportsV1::new(
                    self.service_config(enterprise_usage_reports::DEFAULT_SERVICE_NAME)?,
                )?;
                let params = enterprise_usage_reports::GetResourceUsageReportParams {
                    enterprise_id: enterprise_id.clone(),
                    account_id: account_id.clone(),
                    month: month.clone(),
                    limit: page.limit,
                    ..Default::default()
                };
                self.collect(
                    "enterprise-reports",
                    service.get_resource_usage_report_pager(params)?,
                    page,
                )
                .await
            }
            Commands::AccountUsage {
                account_id,
                month,
                page,
            } => {
                let service =
                    UsageReportsV4::new(self.service_config(usage_reports::DEFAULT_SERVICE_NAME)?)?;
                let mut params =
                    usage_reports::GetResourceUsageAccountParams::new(account_id, month);
                params.limit = page.limit;
                self.collect(
                    "account-usage",
                    service.get_resource_usage_account_pager(params)?,
                    page,
                )
                .await
            }
        }
    }

    /// Load service configuration from `--config` or the environment
    fn service_config(&self, service_name: &str) -> Result<ServiceConfig> {
        match &self.cli.config {
            Some(path) => ServiceConfig::from_file(path),
            None => ServiceConfig::from_env(service_name),
        }
    }

    /// Drive a pager for one page or to exhaustion
    async fn collect<Op>(
        &self,
        command: &str,
        mut pager: Pager<Op>,
        page: &PageArgs,
    ) -> Result<Vec<JsonValue>>
    where
        Op: ListOperation,
        PageItem<Op>: Serialize,
    {
        let started = Instant::now();
        let items = if page.first_page {
            pager.get_next().await?
        } else {
            pager.get_all().await?
        };

        info!(
            command,
            items = items.len(),
            pages = pager.pages_fetched(),
            has_more = pager.has_next(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Listing complete"
        );

        items
            .iter()
            .map(|item| serde_json::to_value(item).map_err(Error::from))
            .collect()
    }

    /// Print items in the selected format
    fn output(&self, items: &[JsonValue]) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                for item in items {
                    println!("{}", serde_json::to_string(item)?);
                }
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(items)?);
            }
        }
        Ok(())
    }
}
