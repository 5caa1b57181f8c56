//! Service roles, one per consumer.
//!
//! Every role trusts exactly one service and grants only on resources handed
//! in by the caller, so permission statements can only name ARNs of
//! resources that already exist in the stack.

use telemetry_core::Configuration;

use crate::error::StackError;
use crate::model::iam::{Role, RolePolicy, RolePolicyAttachment};
use crate::model::{AttrRef, Expr, PolicyDocument, ResourceAddress, Statement};
use crate::stack::Stack;

pub const FIREHOSE_SERVICE: &str = "firehose.amazonaws.com";
pub const PINPOINT_SERVICE: &str = "pinpoint.amazonaws.com";
pub const GLUE_SERVICE: &str = "glue.amazonaws.com";

/// Managed policy the crawler needs to write catalog metadata.
pub const GLUE_SERVICE_POLICY_ARN: &str = "arn:aws:iam::aws:policy/service-role/AWSGlueServiceRole";

const FIREHOSE_S3_ACTIONS: [&str; 6] = [
    "s3:AbortMultipartUpload",
    "s3:GetBucketLocation",
    "s3:GetObject",
    "s3:ListBucket",
    "s3:ListBucketMultipartUploads",
    "s3:PutObject",
];
const FIREHOSE_PUT_ACTIONS: [&str; 2] = ["firehose:PutRecord", "firehose:PutRecordBatch"];
const CRAWLER_S3_ACTIONS: [&str; 2] = ["s3:GetObject", "s3:ListBucket"];

/// What a service role is built from.
struct ServiceRole<'a> {
    logical: &'a str,
    /// Suffix of the physical role name.
    suffix: &'a str,
    service: &'a str,
    source_account: Option<&'a AttrRef>,
    /// Suffix of the inline policy name.
    policy_suffix: &'a str,
    statement: Statement,
    managed_policies: &'a [&'a str],
}

impl ServiceRole<'_> {
    fn declare(self, config: &Configuration, stack: &mut Stack) -> Result<ResourceAddress, StackError> {
        let role = stack.declare(
            self.logical,
            Role {
                name: config.prefixed(self.suffix),
                assume_role_policy: PolicyDocument::trust(self.service, self.source_account),
                tags: config.common_tags.clone(),
            },
        )?;

        for (index, policy_arn) in self.managed_policies.iter().enumerate() {
            let logical = match index {
                0 => self.logical.to_string(),
                n => format!("{}_{n}", self.logical),
            };
            stack.declare(
                &logical,
                RolePolicyAttachment {
                    role: role.attr("name").into(),
                    policy_arn: policy_arn.to_string(),
                },
            )?;
        }

        stack.declare(
            self.logical,
            RolePolicy {
                name: config.prefixed(self.policy_suffix),
                role: role.attr("id").into(),
                policy: PolicyDocument::new(vec![self.statement]),
            },
        )?;

        Ok(role)
    }
}

/// Bucket plus everything inside it.
fn bucket_and_objects(statement: Statement, bucket: &ResourceAddress) -> Statement {
    let arn = bucket.attr("arn");
    statement.on(&arn).on(Expr::from(&arn).text("/*"))
}

/// Role the delivery stream assumes to write into the data bucket.
pub fn firehose_s3_role(
    config: &Configuration,
    stack: &mut Stack,
    account_id: &AttrRef,
    bucket: &ResourceAddress,
) -> Result<ResourceAddress, StackError> {
    ServiceRole {
        logical: "firehose_s3",
        suffix: "firehose-s3",
        service: FIREHOSE_SERVICE,
        source_account: Some(account_id),
        policy_suffix: "firehose-s3",
        statement: bucket_and_objects(Statement::allow(FIREHOSE_S3_ACTIONS), bucket),
        managed_policies: &[],
    }
    .declare(config, stack)
}

/// Role the analytics application assumes to put records on the stream.
pub fn pinpoint_firehose_role(
    config: &Configuration,
    stack: &mut Stack,
    account_id: &AttrRef,
    stream: &ResourceAddress,
) -> Result<ResourceAddress, StackError> {
    ServiceRole {
        logical: "pinpoint_firehose",
        suffix: "pinpoint-firehose",
        service: PINPOINT_SERVICE,
        source_account: Some(account_id),
        policy_suffix: "pinpoint-firehose",
        statement: Statement::allow(FIREHOSE_PUT_ACTIONS).on(stream.attr("arn")),
        managed_policies: &[],
    }
    .declare(config, stack)
}

/// Role the crawler assumes to read the data bucket and write the catalog.
pub fn glue_crawler_role(
    config: &Configuration,
    stack: &mut Stack,
    bucket: &ResourceAddress,
) -> Result<ResourceAddress, StackError> {
    ServiceRole {
        logical: "glue_crawler",
        suffix: "glue-crawler",
        service: GLUE_SERVICE,
        source_account: None,
        policy_suffix: "glue-s3",
        statement: bucket_and_objects(Statement::allow(CRAWLER_S3_ACTIONS), bucket),
        managed_policies: &[GLUE_SERVICE_POLICY_ARN],
    }
    .declare(config, stack)
}
