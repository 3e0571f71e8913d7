use backend_infra_core::build_app;

use super::{plan_app, print_plans};
use crate::cli::Global;
use crate::config::Config;
use crate::error::Result;

/// Prints the plan of every selected stack. Writes nothing.
pub fn run(global: &Global, config: &Config) -> Result<()> {
    let app = build_app(&config.backend(), &global.selected_envs())?;
    let plans = plan_app(&app, &global.outdir)?;
    print_plans(&plans, global);
    Ok(())
}
