//! Command implementations (Imperative Shell).

mod clean;
mod diff;
mod list;
mod show;
mod synth;

use std::path::Path;

use backend_infra_core::planning::{calculate_stack_plan, format_stack_plan, StackPlan};
use backend_infra_core::synth::read_stack;
use backend_infra_core::App;
use dialoguer::Confirm;

use crate::cli::{Cli, Commands, Global, OutputFormat};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::format_output;
use crate::prelude::*;

/// Main entry point for every command.
pub fn run(cli: Cli, config: &Config) -> Result<()> {
    match cli.command {
        Commands::Synth { force } => synth::run(force, &cli.global, config),
        Commands::Diff => diff::run(&cli.global, config),
        Commands::List => list::run(&cli.global, config),
        Commands::Show { env } => show::run(env, &cli.global, config),
        Commands::Clean { force } => clean::run(force, &cli.global),
    }
}

/// Compares every stack of the app against its previous synth.
pub fn plan_app(app: &App, outdir: &Path) -> Result<Vec<StackPlan>> {
    let mut plans = Vec::with_capacity(app.stacks().len());
    for stack in app.stacks() {
        let current = read_stack(outdir, stack.name())?;
        plans.push(calculate_stack_plan(
            stack.name(),
            current.as_ref(),
            &stack.to_json(),
        ));
    }
    Ok(plans)
}

/// Renders plans for stdout: one JSON array, or colored plan lines.
pub fn render_plans(plans: &[StackPlan], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format_output(&plans, OutputFormat::Json),
        OutputFormat::Pretty => {
            let mut output = p_c("Synth Plan:");
            for plan in plans {
                for line in format_stack_plan(plan) {
                    output.push_str(&format!("\n  {}", plan_line(&line)));
                }
            }
            output.push('\n');
            output
        }
    }
}

fn print_plans(plans: &[StackPlan], global: &Global) {
    aprintln!("{}", render_plans(plans, global.format));
}

/// Prints a progress line unless `--silent`. Goes to stderr under
/// `--format json` so stdout only carries the JSON document.
fn status(global: &Global, message: &str) {
    if global.is_silent() {
        return;
    }
    match global.format {
        OutputFormat::Json => aeprintln!("{}", message),
        OutputFormat::Pretty => aprintln!("{}", message),
    }
}

fn confirm(prompt: &str, default: bool) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| CliError::Prompt(e.to_string()))?;

    if !confirmed {
        return Err(CliError::UserCancelled);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use clap::Parser;

    use crate::cli::{Cli, Global};
    use crate::config::Config;

    /// Writes a stand-in deployment package and returns a config pointing at it.
    pub fn config(dir: &Path) -> Config {
        let artifact = dir.join("StarterLambda.zip");
        std::fs::write(&artifact, b"exports.handler = async () => ({ statusCode: 200 });")
            .unwrap();
        Config {
            region: "us-east-1".to_string(),
            access_key: None,
            secret_key: None,
            artifact,
            runtime: "nodejs16.x".to_string(),
            version: "0.0".to_string(),
        }
    }

    /// Parses global flags the way the binary does, writing to `outdir`.
    pub fn global(outdir: &Path, args: &[&str]) -> Global {
        let outdir = outdir.to_string_lossy().into_owned();
        let mut argv = vec!["backend-infra", "--silent", "--outdir", outdir.as_str()];
        argv.extend_from_slice(args);
        argv.push("diff");
        Cli::parse_from(argv).global
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{config, global};
    use super::*;
    use backend_infra_core::build_app;
    use backend_infra_core::synth::write_app;

    #[test]
    fn test_plan_app_before_and_after_synth() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = dir.path().join("cdktf.out");
        let global = global(&outdir, &["--env", "qa"]);
        let app = build_app(&config(dir.path()).backend(), &global.selected_envs()).unwrap();

        let plans = plan_app(&app, &outdir).unwrap();
        assert_eq!(plans.len(), 1);
        assert!(matches!(plans[0], StackPlan::CreateStack { .. }));

        write_app(&app, &outdir).unwrap();
        let plans = plan_app(&app, &outdir).unwrap();
        assert!(plans[0].is_noop());
        assert_eq!(plans[0].stack_name(), "backend-np-infra-qa");
    }

    #[test]
    fn test_json_plans_are_a_single_document() {
        let plans = vec![
            StackPlan::NoChanges {
                stack_name: "backend-np-infra-dev".to_string(),
            },
            StackPlan::CreateStack {
                stack_name: "backend-np-infra-qa".to_string(),
                addresses: vec!["aws_s3_bucket.bucket-a".to_string()],
            },
        ];

        let rendered = render_plans(&plans, OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["plan"], "no_changes");
        assert!(!rendered.contains('\x1b'));
    }

    #[test]
    fn test_pretty_plans_are_colored_lines() {
        let plans = vec![StackPlan::CreateStack {
            stack_name: "backend-np-infra-qa".to_string(),
            addresses: vec!["aws_s3_bucket.bucket-a".to_string()],
        }];

        let rendered = render_plans(&plans, OutputFormat::Pretty);

        assert!(rendered.contains(&p_g("+ Create stack: backend-np-infra-qa")));
        assert!(rendered.contains(&p_g("  + aws_s3_bucket.bucket-a")));
    }
}
