use backend_infra_core::{build_app, App};

use crate::cli::{Global, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::{format_output, pretty, StackSummary};
use crate::prelude::*;

pub fn run(global: &Global, config: &Config) -> Result<()> {
    let app = build_app(&config.backend(), &global.selected_envs())?;
    let summaries = summarize(&app);

    match global.format {
        OutputFormat::Json => aprintln!("{}", format_output(&summaries, global.format)),
        OutputFormat::Pretty => aprintln!("{}", pretty::format_stacks(&summaries)),
    }
    Ok(())
}

fn summarize(app: &App) -> Vec<StackSummary> {
    app.stacks()
        .iter()
        .map(|stack| StackSummary {
            name: stack.name().to_string(),
            resources: stack.addresses(),
            assets: stack.assets().iter().map(|asset| asset.path()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::config;
    use backend_infra_core::Environment;

    #[test]
    fn test_summaries_follow_environment_order() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(
            &config(dir.path()).backend(),
            &[Environment::Prod, Environment::Qa],
        )
        .unwrap();

        let summaries = summarize(&app);
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["backend-np-infra-qa", "backend-np-infra-prod"]);
    }

    #[test]
    fn test_qa_summary_references_nonprod_tables() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_app(&config(dir.path()).backend(), &[Environment::Qa]).unwrap();

        let summary = &summarize(&app)[0];

        assert!(summary
            .resources
            .contains(&"data.aws_dynamodb_table.Users-nonprod".to_string()));
        assert!(!summary
            .resources
            .iter()
            .any(|address| address.starts_with("aws_dynamodb_table.")));
        assert_eq!(summary.assets.len(), 2);
    }
}
