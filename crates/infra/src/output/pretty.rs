//! Pretty output formatting.

use super::StackSummary;

/// Format a stack for display.
pub fn format_stack(stack: &StackSummary) -> String {
    let mut output = format!("{} ({} resources)", stack.name, stack.resources.len());
    for address in &stack.resources {
        output.push_str(&format!("\n  {}", address));
    }
    for asset in &stack.assets {
        output.push_str(&format!("\n  asset: {}", asset));
    }
    output
}

/// Format stacks for display.
pub fn format_stacks(stacks: &[StackSummary]) -> String {
    if stacks.is_empty() {
        return "No stacks selected.".to_string();
    }
    let mut output = format!("STACKS ({})\n", stacks.len());
    output.push_str(&"-".repeat(40));
    for stack in stacks {
        output.push_str(&format!("\n{}", format_stack(stack)));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stacks_empty() {
        assert_eq!(format_stacks(&[]), "No stacks selected.");
    }

    #[test]
    fn test_format_stack() {
        let stack = StackSummary {
            name: "backend-np-infra-qa".to_string(),
            resources: vec![
                "aws_api_gateway_rest_api.backend-services-qa".to_string(),
                "data.aws_dynamodb_table.Users-nonprod".to_string(),
            ],
            assets: vec!["assets/asset-user-services-qa/ABC/StarterLambda.zip".to_string()],
        };

        assert_eq!(
            format_stack(&stack),
            "backend-np-infra-qa (2 resources)\n  \
             aws_api_gateway_rest_api.backend-services-qa\n  \
             data.aws_dynamodb_table.Users-nonprod\n  \
             asset: assets/asset-user-services-qa/ABC/StarterLambda.zip"
        );
    }
}
