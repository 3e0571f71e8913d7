use std::path::Path;

use backend_infra_core::planning::{calculate_clean_plan, format_clean_plan, CleanPlan};
use backend_infra_core::stack_name;
use backend_infra_core::synth::{remove_stack, stack_dir};

use super::confirm;
use crate::cli::Global;
use crate::error::Result;
use crate::prelude::*;

pub fn run(force: bool, global: &Global) -> Result<()> {
    let plans = clean_plans(global);

    if !global.is_silent() {
        aprintln!("{}", p_y("Clean Plan:"));
        for plan in &plans {
            for line in format_clean_plan(plan) {
                aprintln!("  {}", plan_line(&line));
            }
        }
        aprintln!();
    }

    let targets: Vec<&str> = plans
        .iter()
        .filter_map(|plan| match plan {
            CleanPlan::RemoveStack { stack_name } => Some(stack_name.as_str()),
            CleanPlan::AlreadyGone { .. } => None,
        })
        .collect();

    if targets.is_empty() {
        if !global.is_silent() {
            aprintln!("{}", p_g("Nothing to clean."));
        }
        return Ok(());
    }

    if !force {
        confirm("Remove the synthesized stacks listed above?", false)?;
    }

    remove_all(&global.outdir, &targets)?;

    if !global.is_silent() {
        aprintln!("{}", p_g(&format!("Removed {} stack(s).", targets.len())));
    }
    Ok(())
}

fn clean_plans(global: &Global) -> Vec<CleanPlan> {
    global
        .selected_envs()
        .into_iter()
        .map(|env| {
            let name = stack_name(env);
            let exists = stack_dir(&global.outdir, &name).exists();
            calculate_clean_plan(exists, &name)
        })
        .collect()
}

fn remove_all(outdir: &Path, stack_names: &[&str]) -> Result<()> {
    for name in stack_names {
        remove_stack(outdir, name)?;
    }
    Ok(())
}
