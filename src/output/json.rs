//! JSON output formatting

use crate::output::formatter::DryRunPlan;

pub fn format_json(plan: &DryRunPlan) -> String {
    serde_json::to_string_pretty(plan).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostContext;
    use crate::runtime::Invocation;
    use crate::session::Intent;
    use serde_json::Value;
    use std::path::PathBuf;

    fn plan() -> DryRunPlan {
        DryRunPlan {
            intent: Intent {
                remove_on_exit: true,
                image: "alpine".to_string(),
            },
            host: HostContext {
                working_directory: PathBuf::from("/work"),
                user_name: "ada".to_string(),
            },
            invocations: vec![Invocation {
                program: "docker".to_string(),
                args: vec!["rm".to_string(), "-f".to_string(), "abc".to_string()],
            }],
        }
    }

    #[test]
    fn test_plan_json_shape() {
        let value: Value = serde_json::from_str(&format_json(&plan())).unwrap();
        assert_eq!(value["intent"]["image"], "alpine");
        assert_eq!(value["intent"]["remove_on_exit"], true);
        assert_eq!(value["host"]["working_directory"], "/work");
        assert_eq!(value["invocations"][0]["args"][1], "-f");
    }

    #[test]
    fn test_plan_human_lists_commands() {
        let text = crate::output::human::format_human(&plan());
        assert!(text.contains("Image:        alpine"));
        assert!(text.contains("Remove:       yes"));
        assert!(text.contains(" 1. docker rm -f abc"));
    }
}
