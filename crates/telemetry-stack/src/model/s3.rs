//! Object storage descriptors: a bucket and its singleton sub-configurations.

use serde::Serialize;
use telemetry_core::Claim;

use crate::model::expr::{escaped, escaped_tags};
use crate::model::{AttrRef, Declaration, Expr, ResourceKind, Tags, owner_of};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    #[serde(serialize_with = "escaped")]
    pub bucket: String,
    #[serde(serialize_with = "escaped_tags")]
    pub tags: Tags,
}

impl Declaration for Bucket {
    const KIND: ResourceKind = ResourceKind::S3Bucket;

    fn references(&self) -> Vec<&AttrRef> {
        Vec::new()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::named("s3_bucket", &self.bucket)]
    }
}

impl Bucket {
    /// Bucket naming rules: 3-63 characters of lowercase letters, digits,
    /// dots and hyphens, starting and ending with a letter or digit.
    pub fn has_valid_name(&self) -> bool {
        let name = self.bucket.as_str();
        let edge_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());

        (3..=63).contains(&name.len())
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
            && edge_ok(name.chars().next())
            && edge_ok(name.chars().last())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersioningConfiguration {
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketVersioning {
    pub bucket: Expr,
    pub versioning_configuration: VersioningConfiguration,
}

impl Declaration for BucketVersioning {
    const KIND: ResourceKind = ResourceKind::S3BucketVersioning;

    fn references(&self) -> Vec<&AttrRef> {
        self.bucket.refs().collect()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::attached("versioning", &owner_of(&self.bucket))]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SseAlgorithm {
    #[serde(rename = "aws:kms")]
    AwsKms,
    #[serde(rename = "AES256")]
    Aes256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SseDefault {
    pub sse_algorithm: SseAlgorithm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncryptionRule {
    pub apply_server_side_encryption_by_default: SseDefault,
    pub bucket_key_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketEncryption {
    pub bucket: Expr,
    pub rule: Vec<EncryptionRule>,
}

impl BucketEncryption {
    /// KMS-managed keys with an S3 bucket key to cut KMS request volume.
    pub fn kms(bucket: &AttrRef) -> Self {
        Self {
            bucket: bucket.into(),
            rule: vec![EncryptionRule {
                apply_server_side_encryption_by_default: SseDefault {
                    sse_algorithm: SseAlgorithm::AwsKms,
                },
                bucket_key_enabled: true,
            }],
        }
    }
}

impl Declaration for BucketEncryption {
    const KIND: ResourceKind = ResourceKind::S3BucketEncryption;

    fn references(&self) -> Vec<&AttrRef> {
        self.bucket.refs().collect()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::attached("encryption", &owner_of(&self.bucket))]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicAccessBlock {
    pub bucket: Expr,
    pub block_public_acls: bool,
    pub block_public_policy: bool,
    pub ignore_public_acls: bool,
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlock {
    /// All four public-access flags set.
    pub fn locked(bucket: &AttrRef) -> Self {
        Self {
            bucket: bucket.into(),
            block_public_acls: true,
            block_public_policy: true,
            ignore_public_acls: true,
            restrict_public_buckets: true,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.block_public_acls
            && self.block_public_policy
            && self.ignore_public_acls
            && self.restrict_public_buckets
    }
}

impl Declaration for PublicAccessBlock {
    const KIND: ResourceKind = ResourceKind::S3BucketPublicAccessBlock;

    fn references(&self) -> Vec<&AttrRef> {
        self.bucket.refs().collect()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::attached("public access block", &owner_of(&self.bucket))]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StorageClass {
    #[serde(rename = "STANDARD_IA")]
    StandardIa,
    #[serde(rename = "GLACIER_IR")]
    GlacierIr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleFilter {
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub days: u32,
    pub storage_class: StorageClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expiration {
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleRule {
    pub id: String,
    pub status: Status,
    pub filter: LifecycleFilter,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transition: Vec<Transition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<Expiration>,
}

impl LifecycleRule {
    /// An enabled rule that eventually deletes what it matches.
    pub fn terminates(&self) -> bool {
        self.status == Status::Enabled && self.expiration.is_some()
    }

    /// Transitions that do not happen strictly before expiration.
    pub fn late_transitions(&self) -> impl Iterator<Item = &Transition> {
        let expires = self.expiration.as_ref().map(|e| e.days);
        self.transition
            .iter()
            .filter(move |t| expires.is_some_and(|days| t.days >= days))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketLifecycle {
    pub bucket: Expr,
    pub rule: Vec<LifecycleRule>,
}

impl Declaration for BucketLifecycle {
    const KIND: ResourceKind = ResourceKind::S3BucketLifecycle;

    fn references(&self) -> Vec<&AttrRef> {
        self.bucket.refs().collect()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::attached("lifecycle", &owner_of(&self.bucket))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceAddress;

    fn bucket(name: &str) -> Bucket {
        Bucket {
            bucket: name.to_string(),
            tags: Tags::new(),
        }
    }

    #[test]
    fn test_bucket_names() {
        assert!(bucket("acme-prod-telemetry").has_valid_name());
        assert!(!bucket("Acme-prod-telemetry").has_valid_name());
        assert!(!bucket("acme_prod").has_valid_name());
        assert!(!bucket("ab").has_valid_name());
        assert!(!bucket("acme-").has_valid_name());
        assert!(!bucket(&"a".repeat(64)).has_valid_name());
    }

    #[test]
    fn test_late_transitions() {
        let rule = LifecycleRule {
            id: "r".to_string(),
            status: Status::Enabled,
            filter: LifecycleFilter {
                prefix: "data/".to_string(),
            },
            transition: vec![
                Transition {
                    days: 30,
                    storage_class: StorageClass::StandardIa,
                },
                Transition {
                    days: 90,
                    storage_class: StorageClass::GlacierIr,
                },
            ],
            expiration: Some(Expiration { days: 90 }),
        };

        assert!(rule.terminates());
        let late: Vec<_> = rule.late_transitions().map(|t| t.days).collect();
        assert_eq!(late, [90]);
    }

    #[test]
    fn test_disabled_rule_does_not_terminate() {
        let rule = LifecycleRule {
            id: "r".to_string(),
            status: Status::Disabled,
            filter: LifecycleFilter {
                prefix: String::new(),
            },
            transition: Vec::new(),
            expiration: Some(Expiration { days: 7 }),
        };
        assert!(!rule.terminates());
    }

    #[test]
    fn test_encryption_body() {
        let id = ResourceAddress::new(ResourceKind::S3Bucket, "telemetry").attr("id");
        let body = serde_json::to_value(BucketEncryption::kms(&id)).unwrap();
        assert_eq!(
            body["rule"][0]["apply_server_side_encryption_by_default"]["sse_algorithm"],
            "aws:kms"
        );
        assert_eq!(body["rule"][0]["bucket_key_enabled"], true);
    }
}
