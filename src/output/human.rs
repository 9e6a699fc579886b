//! Human-readable output formatting

use crate::output::formatter::DryRunPlan;

pub fn format_human(plan: &DryRunPlan) -> String {
    let mut output = format!(
        "Image:        {}\n\
         Remove:       {}\n\
         Host path:    {}\n\
         Host user:    {}\n\
         \n\
         Commands\n\
         --------\n",
        plan.intent.image,
        if plan.intent.remove_on_exit { "yes" } else { "no" },
        plan.host.working_directory.display(),
        plan.host.user_name,
    );

    for (i, invocation) in plan.invocations.iter().enumerate() {
        output.push_str(&format!("{:>2}. {}\n", i + 1, invocation.command_line()));
    }

    output
}
