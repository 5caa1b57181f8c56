//! IAM descriptors: roles, inline policies and managed policy attachments.

use serde::Serialize;
use telemetry_core::Claim;

use crate::model::expr::{escaped, escaped_tags};
use crate::model::policy::as_json_text;
use crate::model::{AttrRef, Declaration, Expr, PolicyDocument, ResourceKind, Tags, owner_of};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    #[serde(serialize_with = "escaped")]
    pub name: String,
    #[serde(serialize_with = "as_json_text")]
    pub assume_role_policy: PolicyDocument,
    #[serde(serialize_with = "escaped_tags")]
    pub tags: Tags,
}

impl Declaration for Role {
    const KIND: ResourceKind = ResourceKind::IamRole;

    fn references(&self) -> Vec<&AttrRef> {
        self.assume_role_policy.references().collect()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::named("iam_role", &self.name)]
    }
}

/// Inline permission policy attached to one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePolicy {
    #[serde(serialize_with = "escaped")]
    pub name: String,
    pub role: Expr,
    #[serde(serialize_with = "as_json_text")]
    pub policy: PolicyDocument,
}

impl Declaration for RolePolicy {
    const KIND: ResourceKind = ResourceKind::IamRolePolicy;

    fn references(&self) -> Vec<&AttrRef> {
        self.role.refs().chain(self.policy.references()).collect()
    }

    fn claims(&self) -> Vec<Claim> {
        let owner = owner_of(&self.role);
        vec![Claim::named("iam_role_policy", format!("{owner}/{}", self.name))]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePolicyAttachment {
    pub role: Expr,
    pub policy_arn: String,
}

impl Declaration for RolePolicyAttachment {
    const KIND: ResourceKind = ResourceKind::IamRolePolicyAttachment;

    fn references(&self) -> Vec<&AttrRef> {
        self.role.refs().collect()
    }

    fn claims(&self) -> Vec<Claim> {
        let owner = owner_of(&self.role);
        vec![Claim::named(
            "iam_role_policy_attachment",
            format!("{owner}/{}", self.policy_arn),
        )]
    }
}
