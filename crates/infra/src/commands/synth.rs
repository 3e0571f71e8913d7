use backend_infra_core::build_app;
use backend_infra_core::planning::StackPlan;
use backend_infra_core::synth::write_app;

use super::{confirm, plan_app, print_plans, status};
use crate::cli::Global;
use crate::config::Config;
use crate::error::Result;
use crate::prelude::*;

/// Plans every selected stack, confirms deletions and writes the output.
///
/// The output is written even when every plan is a no-op, so missing
/// assets or manifest entries are restored.
pub fn run(force: bool, global: &Global, config: &Config) -> Result<()> {
    let app = build_app(&config.backend(), &global.selected_envs())?;
    let plans = plan_app(&app, &global.outdir)?;

    status(
        global,
        &format!("{} {}\n", p_b("Output:"), global.outdir.display()),
    );
    if !global.is_silent() {
        print_plans(&plans, global);
    }

    let up_to_date = plans.iter().all(StackPlan::is_noop);
    if !force && plans.iter().any(StackPlan::has_deletions) {
        confirm("Some resources will be removed from the synthesized stacks. Continue?", false)?;
    }

    if !up_to_date {
        status(global, &p_b("Synthesizing..."));
    }

    let manifest = write_app(&app, &global.outdir)?;
    tracing::debug!(stacks = manifest.stacks.len(), "Manifest updated");

    if up_to_date {
        status(global, &p_g("Synthesized output is up to date."));
    } else {
        status(
            global,
            &p_g(&format!("Synthesized {} stack(s).", app.stacks().len())),
        );
    }

    Ok(())
}
