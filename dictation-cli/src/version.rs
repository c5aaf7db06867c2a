//! Version information and build metadata display

use std::fmt;

/// Version and build details for `dictation --version`
pub struct VersionInfo {
    pub version: &'static str,
    /// Target triple (e.g., x86_64-unknown-linux-gnu)
    pub target: &'static str,
    /// debug or release
    pub profile: &'static str,
    pub git_commit: Option<&'static str>,
    pub build_timestamp: &'static str,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            target: env!("TARGET"),
            profile: if cfg!(debug_assertions) {
                "debug"
            } else {
                "release"
            },
            git_commit: option_env!("GIT_COMMIT_HASH"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dictation {}", self.version)?;
        writeln!(f)?;
        writeln!(f, "Build Information:")?;
        writeln!(f, "  Target:       {}", self.target)?;
        writeln!(f, "  Profile:      {}", self.profile)?;
        write!(f, "  Build Date:   {}", self.build_timestamp)?;

        if let Some(commit) = self.git_commit {
            write!(f, "\n  Git Commit:   {}", commit)?;
        }

        Ok(())
    }
}

/// Long version string (for `--version`)
pub fn version_long() -> String {
    VersionInfo::current().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_long_names_binary() {
        let text = version_long();
        assert!(text.starts_with(&format!("dictation {}", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains("Target:"));
    }
}
