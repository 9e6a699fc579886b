//! Prompt customization for the interactive shell

/// Variable carrying the host-side path into the container
pub const HOST_PATH_VAR: &str = "HOST_PATH";

/// Variable holding the prompt format
pub const PROMPT_VAR: &str = "PS1";

/// Init script written into the shared mount
pub const INIT_SCRIPT: &str = "env.sh";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// Two-line prompt showing the host user, the host path and the container cwd.
///
/// `$HOST_PATH` and `\w` are left for the shell to expand.
pub fn prompt_format(user_name: &str) -> String {
    format!(
        "╭─{GREEN}{user_name}{RESET} in {YELLOW}${HOST_PATH_VAR}{RESET} (host) and {BLUE}\\w{RESET} (container)\n╰─○ "
    )
}

/// Contents of the init script.
pub fn init_snippet(prompt: &str) -> String {
    format!("export {}={}", PROMPT_VAR, shell_words::quote(prompt))
}

/// Command that writes `snippet` to the init script inside the container.
///
/// The snippet travels as `$1` so it is never re-parsed by the shell.
pub fn write_snippet_command(shell: &str, mount_point: &str, snippet: &str) -> Vec<String> {
    vec![
        shell.to_string(),
        "-c".to_string(),
        format!("printf '%s\\n' \"$1\" > {}/{}", mount_point, INIT_SCRIPT),
        "dcx".to_string(),
        snippet.to_string(),
    ]
}
