//! The closed set of declarable resources.

use serde::Serialize;
use telemetry_core::Claim;

use crate::model::athena::{NamedQuery, Workgroup};
use crate::model::firehose::DeliveryStream;
use crate::model::glue::{CatalogDatabase, Crawler};
use crate::model::iam::{Role, RolePolicy, RolePolicyAttachment};
use crate::model::logs::{LogGroup, LogStream};
use crate::model::pinpoint::{AnalyticsApp, EventStream};
use crate::model::s3::{
    Bucket, BucketEncryption, BucketLifecycle, BucketVersioning, PublicAccessBlock,
};
use crate::model::{AttrRef, Declaration, ResourceKind};

macro_rules! resources {
    ($($variant:ident($body:ty)),+ $(,)?) => {
        /// One declared resource body.
        ///
        /// Serializes as the bare body, ready to be placed under
        /// `resource.<type>.<name>`.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        #[serde(untagged)]
        pub enum Resource {
            $($variant($body),)+
        }

        impl Resource {
            pub fn kind(&self) -> ResourceKind {
                match self {
                    $(Self::$variant(_) => <$body as Declaration>::KIND,)+
                }
            }

            pub fn references(&self) -> Vec<&AttrRef> {
                match self {
                    $(Self::$variant(body) => body.references(),)+
                }
            }

            pub fn claims(&self) -> Vec<Claim> {
                match self {
                    $(Self::$variant(body) => body.claims(),)+
                }
            }
        }

        $(
            impl From<$body> for Resource {
                fn from(body: $body) -> Self {
                    Self::$variant(body)
                }
            }
        )+
    };
}

resources! {
    Bucket(Bucket),
    BucketVersioning(BucketVersioning),
    BucketEncryption(BucketEncryption),
    PublicAccessBlock(PublicAccessBlock),
    BucketLifecycle(BucketLifecycle),
    Role(Role),
    RolePolicy(RolePolicy),
    RolePolicyAttachment(RolePolicyAttachment),
    LogGroup(LogGroup),
    LogStream(LogStream),
    DeliveryStream(DeliveryStream),
    AnalyticsApp(AnalyticsApp),
    EventStream(EventStream),
    CatalogDatabase(CatalogDatabase),
    Crawler(Crawler),
    Workgroup(Workgroup),
    NamedQuery(NamedQuery),
}

impl Resource {
    /// The attribute object rendered into the document.
    pub fn body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResourceAddress, Tags};

    #[test]
    fn test_kind_follows_variant() {
        let bucket: Resource = Bucket {
            bucket: "acme-dev-telemetry".to_string(),
            tags: Tags::new(),
        }
        .into();
        assert_eq!(bucket.kind(), ResourceKind::S3Bucket);
        assert!(bucket.references().is_empty());
    }

    #[test]
    fn test_body_is_untagged() {
        let stream: Resource = LogStream {
            name: "S3Delivery".to_string(),
            log_group_name: ResourceAddress::new(ResourceKind::LogGroup, "firehose")
                .attr("name")
                .into(),
        }
        .into();

        let body = stream.body().unwrap();
        assert_eq!(body["name"], "S3Delivery");
        assert_eq!(body["log_group_name"], "${aws_cloudwatch_log_group.firehose.name}");
        assert_eq!(stream.references().len(), 1);
    }
}
