//! Base distribution detection and shell installation commands
//!
//! Detection reads the `ID=` line of `/etc/os-release` and walks a fixed,
//! ordered list of families. Anything not listed is unsupported; there is no
//! guessing beyond the table.

use regex::Regex;

/// Where the container describes its distribution
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Package manager strategy for a distribution family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installer {
    /// Alpine: `apk`
    Apk,
    /// Debian and Ubuntu: refresh package lists, then `apt-get install`
    Apt,
    /// CentOS and Fedora: `yum`
    Yum,
}

/// Families in match order.
const FAMILIES: &[(&[&str], Installer)] = &[
    (&["alpine"], Installer::Apk),
    (&["debian", "ubuntu"], Installer::Apt),
    (&["centos", "fedora"], Installer::Yum),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStepKind {
    Refresh,
    Install,
}

/// One command run inside the container while installing a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    pub kind: InstallStepKind,
    pub command: Vec<String>,
}

impl InstallStep {
    fn new(kind: InstallStepKind, command: &[&str]) -> Self {
        Self {
            kind,
            command: command.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Installer {
    /// Pick the installer for an os-release document.
    pub fn detect(os_release: &str) -> Option<Self> {
        FAMILIES
            .iter()
            .find(|(ids, _)| {
                family_pattern(ids)
                    .map(|re| re.is_match(os_release))
                    .unwrap_or(false)
            })
            .map(|(_, installer)| *installer)
    }

    /// Commands that install `package`, in order.
    pub fn steps(&self, package: &str) -> Vec<InstallStep> {
        use InstallStepKind::*;
        match self {
            Installer::Apk => vec![InstallStep::new(
                Install,
                &["apk", "add", "--no-cache", package],
            )],
            Installer::Apt => vec![
                InstallStep::new(Refresh, &["apt-get", "update"]),
                InstallStep::new(Install, &["apt-get", "install", "-y", package]),
            ],
            Installer::Yum => vec![InstallStep::new(Install, &["yum", "install", "-y", package])],
        }
    }
}

/// `ID=<id>` on its own line, value optionally double-quoted.
fn family_pattern(ids: &[&str]) -> Option<Regex> {
    let alternatives: Vec<String> = ids.iter().map(|id| regex::escape(id)).collect();
    Regex::new(&format!(
        r#"(?m)^ID="?(?:{})"?\s*$"#,
        alternatives.join("|")
    ))
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPINE: &str = "NAME=\"Alpine Linux\"\nID=alpine\nVERSION_ID=3.19.1\n";
    const UBUNTU: &str =
        "PRETTY_NAME=\"Ubuntu 22.04.4 LTS\"\nNAME=\"Ubuntu\"\nID=ubuntu\nID_LIKE=debian\n";
    const CENTOS: &str = "NAME=\"CentOS Linux\"\nVERSION=\"7 (Core)\"\nID=\"centos\"\nID_LIKE=\"rhel fedora\"\n";

    #[test]
    fn test_detect_alpine() {
        assert_eq!(Installer::detect(ALPINE), Some(Installer::Apk));
    }

    #[test]
    fn test_detect_debian_family() {
        assert_eq!(Installer::detect(UBUNTU), Some(Installer::Apt));
        assert_eq!(Installer::detect("ID=debian\n"), Some(Installer::Apt));
    }

    #[test]
    fn test_detect_rhel_family() {
        assert_eq!(Installer::detect(CENTOS), Some(Installer::Yum));
        assert_eq!(Installer::detect("ID=fedora"), Some(Installer::Yum));
    }

    #[test]
    fn test_detect_unsupported() {
        assert_eq!(Installer::detect("ID=arch\n"), None);
        assert_eq!(Installer::detect(""), None);
        // ID_LIKE alone is not enough
        assert_eq!(Installer::detect("ID=linuxmint\nID_LIKE=ubuntu\n"), None);
    }

    #[test]
    fn test_apt_refreshes_first() {
        let steps = Installer::Apt.steps("bash");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].kind, InstallStepKind::Refresh);
        assert_eq!(steps[0].command, vec!["apt-get", "update"]);
        assert_eq!(steps[1].command, vec!["apt-get", "install", "-y", "bash"]);
    }

    #[test]
    fn test_single_step_installers() {
        assert_eq!(
            Installer::Apk.steps("bash")[0].command,
            vec!["apk", "add", "--no-cache", "bash"]
        );
        assert_eq!(
            Installer::Yum.steps("bash")[0].command,
            vec!["yum", "install", "-y", "bash"]
        );
    }
}
