//! IAM policy documents.
//!
//! Documents are rendered to the IAM JSON grammar with `serde_json`. Resource
//! entries and condition values are [`Expr`]s, so a permission statement can
//! name an ARN that only exists after apply.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::model::{AttrRef, Expr};

pub const POLICY_VERSION: &str = "2012-10-17";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    version: &'static str,
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    pub fn new(statement: Vec<Statement>) -> Self {
        Self {
            version: POLICY_VERSION,
            statement,
        }
    }

    /// Trust policy letting one service assume the role.
    ///
    /// With `source_account`, the service may only assume the role on behalf
    /// of that account (confused-deputy guard).
    pub fn trust(service: &str, source_account: Option<&AttrRef>) -> Self {
        let mut statement = Statement::allow(["sts:AssumeRole"]);
        statement.principal = Some(Principal {
            service: service.to_string(),
        });
        if let Some(account) = source_account {
            statement
                .condition
                .entry("StringEquals".to_string())
                .or_default()
                .insert("aws:SourceAccount".to_string(), Expr::from(account));
        }
        Self::new(vec![statement])
    }

    pub fn references(&self) -> impl Iterator<Item = &AttrRef> {
        self.statement.iter().flat_map(Statement::references)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Principal {
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub effect: Effect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    pub action: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<Expr>,
    /// operator -> condition key -> value
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub condition: IndexMap<String, IndexMap<String, Expr>>,
}

impl Statement {
    pub fn allow<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            effect: Effect::Allow,
            principal: None,
            action: actions.into_iter().map(Into::into).collect(),
            resource: Vec::new(),
            condition: IndexMap::new(),
        }
    }

    pub fn on(mut self, resource: impl Into<Expr>) -> Self {
        self.resource.push(resource.into());
        self
    }

    pub fn references(&self) -> impl Iterator<Item = &AttrRef> {
        self.resource
            .iter()
            .chain(self.condition.values().flat_map(IndexMap::values))
            .flat_map(Expr::refs)
    }
}

/// Serialize a document as its JSON text, for attributes that take policy
/// text rather than a nested object.
pub(crate) fn as_json_text<S: Serializer>(
    document: &PolicyDocument,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let text = document.to_json().map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResourceAddress, ResourceKind};

    #[test]
    fn test_trust_policy_with_source_account() {
        let account = ResourceAddress::new(ResourceKind::CallerIdentity, "current");
        let doc = PolicyDocument::trust("firehose.amazonaws.com", Some(&account.attr("account_id")));

        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(json["Version"], "2012-10-17");
        let statement = &json["Statement"][0];
        assert_eq!(statement["Effect"], "Allow");
        assert_eq!(statement["Principal"]["Service"], "firehose.amazonaws.com");
        assert_eq!(statement["Action"][0], "sts:AssumeRole");
        assert_eq!(
            statement["Condition"]["StringEquals"]["aws:SourceAccount"],
            "${data.aws_caller_identity.current.account_id}"
        );
        assert!(statement.get("Resource").is_none());
        assert_eq!(doc.references().count(), 1);
    }

    #[test]
    fn test_trust_policy_without_condition() {
        let doc = PolicyDocument::trust("glue.amazonaws.com", None);
        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert!(json["Statement"][0].get("Condition").is_none());
        assert_eq!(doc.references().count(), 0);
    }

    #[test]
    fn test_permission_statement_resources() {
        let bucket = ResourceAddress::new(ResourceKind::S3Bucket, "telemetry");
        let doc = PolicyDocument::new(vec![
            Statement::allow(["s3:GetObject", "s3:ListBucket"])
                .on(bucket.attr("arn"))
                .on(Expr::from(bucket.attr("arn")).text("/*")),
        ]);

        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert_eq!(
            json["Statement"][0]["Resource"],
            serde_json::json!([
                "${aws_s3_bucket.telemetry.arn}",
                "${aws_s3_bucket.telemetry.arn}/*"
            ])
        );
        assert_eq!(doc.references().count(), 2);
    }
}
