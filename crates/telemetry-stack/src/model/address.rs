//! Resource addresses and lazy attribute references.

use std::fmt;

/// Every resource and data source type the stack declares, named by its
/// provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    S3Bucket,
    S3BucketVersioning,
    S3BucketEncryption,
    S3BucketPublicAccessBlock,
    S3BucketLifecycle,
    IamRole,
    IamRolePolicy,
    IamRolePolicyAttachment,
    LogGroup,
    LogStream,
    FirehoseDeliveryStream,
    PinpointApp,
    PinpointEventStream,
    GlueCatalogDatabase,
    GlueCrawler,
    AthenaWorkgroup,
    AthenaNamedQuery,
    /// Data source: the account the engine applies with.
    CallerIdentity,
}

impl ResourceKind {
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::S3Bucket => "aws_s3_bucket",
            Self::S3BucketVersioning => "aws_s3_bucket_versioning",
            Self::S3BucketEncryption => "aws_s3_bucket_server_side_encryption_configuration",
            Self::S3BucketPublicAccessBlock => "aws_s3_bucket_public_access_block",
            Self::S3BucketLifecycle => "aws_s3_bucket_lifecycle_configuration",
            Self::IamRole => "aws_iam_role",
            Self::IamRolePolicy => "aws_iam_role_policy",
            Self::IamRolePolicyAttachment => "aws_iam_role_policy_attachment",
            Self::LogGroup => "aws_cloudwatch_log_group",
            Self::LogStream => "aws_cloudwatch_log_stream",
            Self::FirehoseDeliveryStream => "aws_kinesis_firehose_delivery_stream",
            Self::PinpointApp => "aws_pinpoint_app",
            Self::PinpointEventStream => "aws_pinpoint_event_stream",
            Self::GlueCatalogDatabase => "aws_glue_catalog_database",
            Self::GlueCrawler => "aws_glue_crawler",
            Self::AthenaWorkgroup => "aws_athena_workgroup",
            Self::AthenaNamedQuery => "aws_athena_named_query",
            Self::CallerIdentity => "aws_caller_identity",
        }
    }

    /// Data sources are read by the engine, never created.
    pub const fn is_data(self) -> bool {
        matches!(self, Self::CallerIdentity)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Address of a declaration, e.g. `aws_s3_bucket.telemetry` or
/// `data.aws_caller_identity.current`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceAddress {
    kind: ResourceKind,
    name: String,
}

impl ResourceAddress {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Logical name, unique per kind.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lazy reference to one of this declaration's attributes.
    pub fn attr(&self, attribute: &'static str) -> AttrRef {
        AttrRef {
            target: self.clone(),
            attribute,
        }
    }

    /// Logical names must start with a letter or underscore and contain only
    /// letters, digits, underscores and dashes.
    pub fn is_valid_name(name: &str) -> bool {
        let mut chars = name.chars();
        chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_data() {
            f.write_str("data.")?;
        }
        write!(f, "{}.{}", self.kind, self.name)
    }
}

/// A value that only exists once the engine has created the target, such as
/// a bucket's ARN. Rendered as `${address.attribute}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrRef {
    target: ResourceAddress,
    attribute: &'static str,
}

impl AttrRef {
    pub fn target(&self) -> &ResourceAddress {
        &self.target
    }

    pub fn attribute(&self) -> &'static str {
        self.attribute
    }
}

impl fmt::Display for AttrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${{{}.{}}}", self.target, self.attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display() {
        let bucket = ResourceAddress::new(ResourceKind::S3Bucket, "telemetry");
        assert_eq!(bucket.to_string(), "aws_s3_bucket.telemetry");

        let account = ResourceAddress::new(ResourceKind::CallerIdentity, "current");
        assert_eq!(account.to_string(), "data.aws_caller_identity.current");
    }

    #[test]
    fn test_attr_ref_display() {
        let bucket = ResourceAddress::new(ResourceKind::S3Bucket, "telemetry");
        assert_eq!(bucket.attr("arn").to_string(), "${aws_s3_bucket.telemetry.arn}");

        let account = ResourceAddress::new(ResourceKind::CallerIdentity, "current");
        assert_eq!(
            account.attr("account_id").to_string(),
            "${data.aws_caller_identity.current.account_id}"
        );
    }

    #[test]
    fn test_valid_names() {
        assert!(ResourceAddress::is_valid_name("telemetry"));
        assert!(ResourceAddress::is_valid_name("_athena-results2"));
        assert!(!ResourceAddress::is_valid_name(""));
        assert!(!ResourceAddress::is_valid_name("2fast"));
        assert!(!ResourceAddress::is_valid_name("has.dot"));
    }
}
