//! Terraform wrapper bound to one stack directory.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use terrarium_runner::{ExecutionResult, Invocation, ToolRunner};

use crate::error::IacResult;

/// Binary used when none is configured.
pub const DEFAULT_BINARY: &str = "terraform";

/// Options for `terraform init`.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// `key=value` pairs passed as `-backend-config`
    pub backend_config: Vec<String>,
    /// Upgrade providers, force state copy and reconfigure
    pub refresh_backend: bool,
}

impl InitOptions {
    fn to_args(&self) -> Vec<String> {
        let mut args = vec!["init".to_string()];

        if self.refresh_backend {
            args.extend(
                ["-upgrade=true", "-force-copy", "-reconfigure"]
                    .map(String::from),
            );
        }

        args.extend(
            self.backend_config
                .iter()
                .map(|kv| format!("-backend-config={}", kv)),
        );
        args
    }
}

/// Terraform runner for a single stack.
///
/// Every invocation runs with the stack as its working directory and with
/// the environment given to [`Terraform::with_env`] layered on top of the
/// parent environment.
pub struct Terraform {
    runner: Arc<dyn ToolRunner>,
    binary: String,
    working_dir: PathBuf,
    env: BTreeMap<String, String>,
}

impl Terraform {
    /// Create a new Terraform runner for `working_dir`.
    pub fn new(runner: Arc<dyn ToolRunner>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            binary: DEFAULT_BINARY.to_string(),
            working_dir: working_dir.into(),
            env: BTreeMap::new(),
        }
    }

    /// Use a custom terraform binary.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Extra environment for every invocation.
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env.extend(env);
        self
    }

    /// Run terraform init.
    pub async fn init(&self, options: &InitOptions) -> IacResult<i32> {
        info!("Running terraform init in {:?}", self.working_dir);
        self.run_streamed(options.to_args()).await
    }

    /// Run terraform fmt.
    pub async fn fmt(&self) -> IacResult<i32> {
        info!("Running terraform fmt in {:?}", self.working_dir);
        self.run_streamed(vec!["fmt".to_string()]).await
    }

    /// Run terraform workspace new, capturing its output.
    pub async fn workspace_new(&self, name: &str) -> IacResult<ExecutionResult> {
        let invocation = self.invocation(["workspace", "new", name]).captured();
        Ok(self.runner.run(&invocation).await?)
    }

    /// Run terraform workspace select.
    pub async fn workspace_select(&self, name: &str) -> IacResult<i32> {
        self.run_streamed(["workspace", "select", name].map(String::from).to_vec())
            .await
    }

    /// Create the workspace if needed, then select it.
    ///
    /// Returns the exit code of the select step.
    pub async fn ensure_workspace(&self, name: &str) -> IacResult<i32> {
        let created = self.workspace_new(name).await?;
        if created.success() {
            info!("Created workspace {}", name);
        } else if created.combined_output().contains("already exists") {
            debug!("Workspace {} already exists", name);
        } else {
            warn!(
                "terraform workspace new {} exited with {}: {}",
                name,
                created.exit_code,
                created.combined_output().trim()
            );
        }

        self.workspace_select(name).await
    }

    /// Run terraform plan, optionally writing the plan to `out`.
    pub async fn plan(
        &self,
        vars: &[String],
        out: Option<&str>,
        detailed_exitcode: bool,
    ) -> IacResult<i32> {
        info!("Running terraform plan in {:?}", self.working_dir);
        let mut args = vec!["plan".to_string()];
        if out.is_some() {
            args.push("-input=false".to_string());
        }
        if detailed_exitcode {
            args.push("-detailed-exitcode".to_string());
        }
        args.extend(vars.iter().cloned());
        if let Some(out) = out {
            args.push(format!("-out={}", out));
        }
        self.run_streamed(args).await
    }

    /// Run terraform apply with inline variables.
    pub async fn apply(&self, vars: &[String]) -> IacResult<i32> {
        info!("Running terraform apply in {:?}", self.working_dir);
        self.command(&["apply"], vars, &[]).await
    }

    /// Apply a previously written plan file exactly as planned.
    pub async fn apply_plan(&self, plan_file: &str) -> IacResult<i32> {
        info!("Applying plan {} in {:?}", plan_file, self.working_dir);
        self.run_streamed(
            ["apply", "-input=false", plan_file]
                .map(String::from)
                .to_vec(),
        )
        .await
    }

    /// Run an arbitrary terraform subcommand.
    ///
    /// Arguments are laid out as `<subcommand...> <vars...> <positional...>`.
    pub async fn command(
        &self,
        subcommand: &[&str],
        vars: &[String],
        positional: &[String],
    ) -> IacResult<i32> {
        let args = subcommand
            .iter()
            .map(|s| s.to_string())
            .chain(vars.iter().cloned())
            .chain(positional.iter().cloned())
            .collect();
        self.run_streamed(args).await
    }

    fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(&self.binary)
            .workdir(&self.working_dir)
            .envs(self.env.clone())
            .args(args)
    }

    async fn run_streamed(&self, args: Vec<String>) -> IacResult<i32> {
        let invocation = self.invocation(args);
        debug!("Executing {}", invocation.command_line());

        let result = self.runner.run(&invocation).await?;
        Ok(result.exit_code)
    }
}
