//! CLI command definitions.

use std::path::PathBuf;

use backend_infra_core::Environment;
use clap::{Parser, Subcommand, ValueEnum};

/// Synthesizes the backend services infrastructure to Terraform JSON.
#[derive(Debug, Parser)]
#[command(name = "backend-infra")]
#[command(about = "Synthesize the backend services infrastructure", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: Global,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[arg(long, global = true)]
    pub silent: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Directory the synthesized stacks are written to.
    #[arg(long, global = true, env = "CDKTF_OUTDIR", default_value = "cdktf.out")]
    pub outdir: PathBuf,

    /// Environment to operate on. Repeat to select several (default: all).
    #[arg(long = "env", global = true, value_name = "ENV")]
    pub envs: Vec<Environment>,

    /// AWS region of the provider (overrides AWS_REGION).
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Lambda deployment package (overrides LAMBDA_ARTIFACT).
    #[arg(long, global = true, value_name = "PATH")]
    pub artifact: Option<PathBuf>,

    /// Lambda runtime (overrides LAMBDA_RUNTIME).
    #[arg(long, global = true)]
    pub runtime: Option<String>,

    /// Version tag of the services (overrides SERVICE_VERSION).
    #[arg(long, global = true)]
    pub service_version: Option<String>,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The selected environments in `dev, qa, staging, prod` order.
    pub fn selected_envs(&self) -> Vec<Environment> {
        if self.envs.is_empty() {
            return Environment::ALL.to_vec();
        }
        Environment::ALL
            .into_iter()
            .filter(|env| self.envs.contains(env))
            .collect()
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output with colors.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Synthesize the selected stacks to the output directory.
    #[command(long_about = "Synthesize the selected stacks to the output directory.

Each stack is compared against its previous synth and the changes are shown
before anything is written. Removing resources asks for confirmation.
The selected stacks are always rewritten, restoring missing assets.

Environment variables:
  AWS_REGION          - AWS region (defaults to us-east-1)
  ACCESS_KEY          - provider access key
  SECRET_KEY          - provider secret key
  LAMBDA_ARTIFACT     - deployment package (defaults to assets/StarterLambda.zip)
  LAMBDA_RUNTIME      - Lambda runtime (defaults to nodejs16.x)
  SERVICE_VERSION     - version tag (defaults to 0.0)
  CDKTF_OUTDIR        - output directory (defaults to cdktf.out)")]
    Synth {
        /// Skip confirmation prompts.
        #[arg(long)]
        force: bool,
    },

    /// Show what a synth would change without writing anything.
    ///
    /// The plan is the output of this command, so it is printed even with --silent.
    Diff,

    /// List the stacks and the resources they declare.
    List,

    /// Print the Terraform JSON of one stack.
    Show {
        /// Environment of the stack.
        env: Environment,
    },

    /// Remove synthesized stacks from the output directory.
    Clean {
        /// Skip confirmation prompts.
        #[arg(long)]
        force: bool,
    },
}
