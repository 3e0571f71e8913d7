use crate::error::{InfraError, Result};

/// Whether a reference points at a managed resource or a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Resource,
    Data,
}

/// Handle to a declared resource or data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub kind: RefKind,
    pub resource_type: &'static str,
    pub logical_id: String,
}

impl ResourceRef {
    pub fn resource(resource_type: &'static str, logical_id: impl Into<String>) -> Self {
        Self {
            kind: RefKind::Resource,
            resource_type,
            logical_id: logical_id.into(),
        }
    }

    pub fn data(resource_type: &'static str, logical_id: impl Into<String>) -> Self {
        Self {
            kind: RefKind::Data,
            resource_type,
            logical_id: logical_id.into(),
        }
    }

    /// Returns the Terraform address, e.g. `aws_iam_role.role-x` or
    /// `data.aws_dynamodb_table.Users-nonprod`.
    pub fn address(&self) -> String {
        match self.kind {
            RefKind::Resource => format!("{}.{}", self.resource_type, self.logical_id),
            RefKind::Data => format!("data.{}.{}", self.resource_type, self.logical_id),
        }
    }

    /// Returns an interpolation token for one of the resource's attributes.
    ///
    /// # Examples
    ///
    /// ```
    /// use backend_infra_core::synth::ResourceRef;
    ///
    /// let func = ResourceRef::resource("aws_lambda_function", "user-services-dev-dev");
    /// assert_eq!(
    ///     func.attr("invoke_arn"),
    ///     "${aws_lambda_function.user-services-dev-dev.invoke_arn}"
    /// );
    /// ```
    pub fn attr(&self, name: &str) -> String {
        format!("${{{}.{}}}", self.address(), name)
    }
}

/// Checks that a construct id is usable as a Terraform identifier.
pub fn validate_construct_id(id: &str) -> Result<()> {
    let mut chars = id.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(InfraError::InvalidConstructId(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_address() {
        let role = ResourceRef::resource("aws_iam_role", "role-auth-service-nonprod-dev");
        assert_eq!(role.address(), "aws_iam_role.role-auth-service-nonprod-dev");
        assert_eq!(
            role.attr("arn"),
            "${aws_iam_role.role-auth-service-nonprod-dev.arn}"
        );
    }

    #[test]
    fn test_data_source_address() {
        let table = ResourceRef::data("aws_dynamodb_table", "Users-nonprod");
        assert_eq!(table.address(), "data.aws_dynamodb_table.Users-nonprod");
        assert_eq!(
            table.attr("arn"),
            "${data.aws_dynamodb_table.Users-nonprod.arn}"
        );
    }

    #[test]
    fn test_validate_construct_id() {
        assert!(validate_construct_id("Users-nonprod").is_ok());
        assert!(validate_construct_id("_internal").is_ok());
        assert!(validate_construct_id("user-gw-resource-dev").is_ok());

        assert!(validate_construct_id("").is_err());
        assert!(validate_construct_id("1table").is_err());
        assert!(validate_construct_id("-table").is_err());
        assert!(validate_construct_id("version-0.0").is_err());
        assert!(validate_construct_id("user services").is_err());
    }
}
