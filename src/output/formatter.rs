//! Dry-run plan formatting

use serde::Serialize;

use crate::host::HostContext;
use crate::output::human::format_human;
use crate::output::json::format_json;
use crate::runtime::Invocation;
use crate::session::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Everything a dry run resolved, plus the runtime calls it would have made.
#[derive(Debug, Clone, Serialize)]
pub struct DryRunPlan {
    pub intent: Intent,
    pub host: HostContext,
    pub invocations: Vec<Invocation>,
}

pub fn format_plan(plan: &DryRunPlan, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(plan),
        OutputFormat::Json => format_json(plan),
    }
}
