use backend_infra_core::{backend_np_infra_stack, Environment};

use crate::cli::Global;
use crate::config::Config;
use crate::error::Result;
use crate::output::format_output;

/// Prints the document `synth` would write for `env`.
pub fn run(env: Environment, global: &Global, config: &Config) -> Result<()> {
    println!("{}", render(env, global, config)?);
    Ok(())
}

fn render(env: Environment, global: &Global, config: &Config) -> Result<String> {
    let backend = backend_np_infra_stack(env, &config.backend())?;
    Ok(format_output(&backend.stack.to_json(), global.format))
}
