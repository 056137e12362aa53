//! Invocation configuration types.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single call to an external binary.
///
/// The environment given here is layered on top of the parent process
/// environment for this one child only; nothing is exported process-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Binary to execute (name on PATH or explicit path)
    pub binary: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Working directory for the child
    pub workdir: Option<PathBuf>,
    /// Extra environment variables for the child
    pub env: BTreeMap<String, String>,
    /// Capture stdout/stderr instead of streaming them through
    pub capture_output: bool,
}

impl Invocation {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new(),
            workdir: None,
            env: BTreeMap::new(),
            capture_output: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Capture output rather than streaming it to the terminal.
    pub fn captured(mut self) -> Self {
        self.capture_output = true;
        self
    }

    /// Render the command line for logging.
    pub fn command_line(&self) -> String {
        let mut cmd = self.binary.clone();
        for arg in &self.args {
            if arg.contains(' ') || arg.contains('"') {
                cmd.push_str(&format!(" '{}'", arg));
            } else {
                cmd.push(' ');
                cmd.push_str(arg);
            }
        }
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_args_and_env() {
        let invocation = Invocation::new("terraform")
            .workdir("/stacks/net")
            .arg("workspace")
            .args(["select", "staging"])
            .env("TF_VAR_region", "us-east-1")
            .envs([("TF_VAR_project", "acme")]);

        assert_eq!(invocation.args, vec!["workspace", "select", "staging"]);
        assert_eq!(invocation.workdir, Some(PathBuf::from("/stacks/net")));
        assert_eq!(invocation.env.get("TF_VAR_region").map(String::as_str), Some("us-east-1"));
        assert_eq!(invocation.env.len(), 2);
        assert!(!invocation.capture_output);
    }

    #[test]
    fn test_command_line_quotes_spaces() {
        let invocation = Invocation::new("terraform").args(["apply", "-var", "name=my app"]);

        assert_eq!(invocation.command_line(), "terraform apply -var 'name=my app'");
    }
}
