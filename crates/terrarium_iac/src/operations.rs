//! Stack operations, one per user-facing verb.
//!
//! Each operation loads settings fresh, runs terraform and returns its
//! exit code unchanged. Global settings reach terraform as `TF_VAR_*`
//! entries on the child invocation only.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use terrarium_config::{
    display_path, inline_vars, project_env, ConfigFile, Settings, StackSettings,
    APP_CONFIG_FILE, GLOBAL_CONFIG_FILE,
};
use terrarium_runner::ToolRunner;

use crate::backend::{BackendConfig, BackendOverrides};
use crate::error::{IacError, IacResult};
use crate::terraform::{InitOptions, Terraform, DEFAULT_BINARY};

/// Whether we are running under continuous integration.
pub fn detect_ci() -> bool {
    std::env::var_os("CI").is_some()
}

/// Options shared by every operation.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Terraform binary to invoke
    pub binary: String,
    /// Global settings file
    pub global_config: PathBuf,
    /// Plan-then-apply and non-interactive init
    pub ci: bool,
    /// Print collected settings before running
    pub verbose: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            global_config: PathBuf::from(GLOBAL_CONFIG_FILE),
            ci: detect_ci(),
            verbose: false,
        }
    }
}

/// Subcommands that run inside the environment's workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspacedVerb {
    Plan { detailed_exitcode: bool },
    Destroy,
    Import { address: String, id: String },
    Remove { address: String },
    Taint { address: String },
    Untaint { address: String },
}

impl WorkspacedVerb {
    fn subcommand(&self) -> Vec<&'static str> {
        match self {
            Self::Plan {
                detailed_exitcode: true,
            } => vec!["plan", "-detailed-exitcode"],
            Self::Plan { .. } => vec!["plan"],
            Self::Destroy => vec!["destroy"],
            Self::Import { .. } => vec!["import"],
            Self::Remove { .. } => vec!["state", "rm"],
            Self::Taint { .. } => vec!["taint"],
            Self::Untaint { .. } => vec!["untaint"],
        }
    }

    fn positional(&self) -> Vec<String> {
        match self {
            Self::Plan { .. } | Self::Destroy => Vec::new(),
            Self::Import { address, id } => vec![address.clone(), id.clone()],
            Self::Remove { address } | Self::Taint { address } | Self::Untaint { address } => {
                vec![address.clone()]
            }
        }
    }

    /// State-only subcommands reject `-var`; they get `TF_VAR_*` instead.
    fn accepts_inline_vars(&self) -> bool {
        matches!(
            self,
            Self::Plan { .. } | Self::Destroy | Self::Import { .. }
        )
    }
}

/// Name of the plan artifact written under CI.
///
/// The named components of the stack path are joined with dashes so the
/// name stays a single path segment: `net/` in `staging` gives
/// `net-staging.plan`. Roots, drive prefixes and `.`/`..` are dropped, and
/// the name never starts with `-`, since terraform would read it as a flag.
pub fn plan_file_name(stack: &Path, environment: &str) -> String {
    let segments: Vec<String> = stack
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().replace('\\', "-")),
            _ => None,
        })
        .collect();

    let name = if segments.is_empty() {
        format!("{}.plan", environment)
    } else {
        format!("{}-{}.plan", segments.join("-"), environment)
    };
    name.trim_start_matches('-').to_string()
}

/// Runs terraform verbs against stacks.
pub struct StackOperations {
    runner: Arc<dyn ToolRunner>,
    options: DispatchOptions,
}

impl StackOperations {
    pub fn new(runner: Arc<dyn ToolRunner>, options: DispatchOptions) -> Self {
        Self { runner, options }
    }

    /// Initialize a stack, configuring the remote state backend unless
    /// `initial` is set.
    pub async fn init(
        &self,
        stack: &Path,
        initial: bool,
        overrides: &BackendOverrides,
    ) -> IacResult<i32> {
        let (tf, global) = self.open(stack)?;
        let app = ConfigFile::load(stack.join(APP_CONFIG_FILE))?;

        let backend_config = if initial {
            info!("Initial run, skipping remote state configuration");
            Vec::new()
        } else {
            BackendConfig::derive(&global, &app, overrides)?.to_pairs()
        };

        let options = InitOptions {
            backend_config,
            refresh_backend: !self.options.ci,
        };
        tf.init(&options).await
    }

    /// Apply a stack in an environment.
    ///
    /// Under CI the plan is written to [`plan_file_name`] first and exactly
    /// that plan is applied.
    pub async fn apply(&self, environment: &str, stack: &Path) -> IacResult<i32> {
        let (tf, _) = self.open(stack)?;
        let merged = self.stack_settings(stack, environment)?;
        let vars = inline_vars(&merged.settings);

        let code = tf.ensure_workspace(environment).await?;
        if code != 0 {
            return Ok(code);
        }

        if self.options.ci {
            let plan_file = plan_file_name(stack, environment);
            let code = tf.plan(&vars, Some(plan_file.as_str()), false).await?;
            if code != 0 {
                return Ok(code);
            }
            tf.apply_plan(&plan_file).await
        } else {
            tf.apply(&vars).await
        }
    }

    pub async fn plan(
        &self,
        environment: &str,
        stack: &Path,
        detailed_exitcode: bool,
    ) -> IacResult<i32> {
        self.workspaced(environment, stack, WorkspacedVerb::Plan { detailed_exitcode })
            .await
    }

    pub async fn destroy(&self, environment: &str, stack: &Path) -> IacResult<i32> {
        self.workspaced(environment, stack, WorkspacedVerb::Destroy)
            .await
    }

    pub async fn import(
        &self,
        environment: &str,
        stack: &Path,
        address: &str,
        id: &str,
    ) -> IacResult<i32> {
        let verb = WorkspacedVerb::Import {
            address: address.to_string(),
            id: id.to_string(),
        };
        self.workspaced(environment, stack, verb).await
    }

    pub async fn remove(&self, environment: &str, stack: &Path, address: &str) -> IacResult<i32> {
        let verb = WorkspacedVerb::Remove {
            address: address.to_string(),
        };
        self.workspaced(environment, stack, verb).await
    }

    pub async fn taint(&self, environment: &str, stack: &Path, address: &str) -> IacResult<i32> {
        let verb = WorkspacedVerb::Taint {
            address: address.to_string(),
        };
        self.workspaced(environment, stack, verb).await
    }

    pub async fn untaint(&self, environment: &str, stack: &Path, address: &str) -> IacResult<i32> {
        let verb = WorkspacedVerb::Untaint {
            address: address.to_string(),
        };
        self.workspaced(environment, stack, verb).await
    }

    /// Format a stack's definitions.
    pub async fn fmt(&self, stack: &Path) -> IacResult<i32> {
        let (tf, _) = self.open(stack)?;
        tf.fmt().await
    }

    /// Ensure the workspace, then run `verb` with the merged stack settings.
    pub async fn workspaced(
        &self,
        environment: &str,
        stack: &Path,
        verb: WorkspacedVerb,
    ) -> IacResult<i32> {
        let (tf, _) = self.open(stack)?;
        let merged = self.stack_settings(stack, environment)?;

        let code = tf.ensure_workspace(environment).await?;
        if code != 0 {
            return Ok(code);
        }

        let (tf, vars) = if verb.accepts_inline_vars() {
            (tf, inline_vars(&merged.settings))
        } else {
            (tf.with_env(project_env(&merged.settings)), Vec::new())
        };

        debug!("Running {:?} in workspace {}", verb, environment);
        tf.command(&verb.subcommand(), &vars, &verb.positional())
            .await
    }

    /// Validate the stack and bind terraform to it with the global settings.
    ///
    /// A relative global file missing from the current directory is looked
    /// up from the stack upwards.
    fn open(&self, stack: &Path) -> IacResult<(Terraform, Settings)> {
        if !stack.is_dir() {
            return Err(IacError::InvalidStack(stack.to_path_buf()));
        }

        let global_path = ConfigFile::locate(&self.options.global_config, stack);
        let global = ConfigFile::load(&global_path)?;
        if self.options.verbose && !global.is_empty() {
            print_settings("Global vars:", &global);
        }

        let tf = Terraform::new(self.runner.clone(), stack)
            .with_binary(&self.options.binary)
            .with_env(project_env(&global));
        Ok((tf, global))
    }

    fn stack_settings(&self, stack: &Path, environment: &str) -> IacResult<StackSettings> {
        let merged = StackSettings::load(stack, environment)?;

        if self.options.verbose {
            if !merged.files.is_empty() {
                println!("Collected vars files:");
                for file in &merged.files {
                    println!("  {}", display_path(file).display());
                }
            }
            print_settings("Collected vars:", &merged.settings);
        }

        Ok(merged)
    }
}

fn print_settings(title: &str, settings: &Settings) {
    println!("{}", title);
    let width = settings.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in settings.iter() {
        println!("  {:<width$} : {}", key, value.to_var_string(), width = width);
    }
}
