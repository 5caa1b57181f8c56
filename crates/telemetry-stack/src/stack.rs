//! The declared resource set.
//!
//! A [`Stack`] records declarations in the order components make them. That
//! order is the dependency order: a declaration may only reference data
//! sources and resources declared before it. [`Stack::validate`] checks this
//! and the other invariants the deployment relies on before anything is
//! rendered.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use indexmap::{IndexMap, IndexSet};
use snafu::prelude::*;
use telemetry_core::{Claim, PartitionExtractor};
use tracing::debug;

use crate::error::{
    DuplicateAddressSnafu, DuplicateOutputSnafu, InvalidNameSnafu, InvalidStackSnafu,
    NotDataSourceSnafu, StackError,
};
use crate::model::firehose::ExtendedS3Configuration;
use crate::model::{Declaration, Expr, Resource, ResourceAddress, ResourceKind, owner_of};

#[derive(Debug, Default)]
pub struct Stack {
    data_sources: IndexSet<ResourceAddress>,
    resources: IndexMap<ResourceAddress, Resource>,
    outputs: IndexMap<String, Expr>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a data source. Registering the same one twice is a no-op.
    pub fn data_source(
        &mut self,
        kind: ResourceKind,
        name: &str,
    ) -> Result<ResourceAddress, StackError> {
        ensure!(kind.is_data(), NotDataSourceSnafu { kind });
        ensure!(ResourceAddress::is_valid_name(name), InvalidNameSnafu { name });
        let address = ResourceAddress::new(kind, name);
        self.data_sources.insert(address.clone());
        Ok(address)
    }

    /// Append a declaration and return its address.
    pub fn declare<D: Declaration>(
        &mut self,
        name: &str,
        body: D,
    ) -> Result<ResourceAddress, StackError> {
        ensure!(ResourceAddress::is_valid_name(name), InvalidNameSnafu { name });

        let address = ResourceAddress::new(D::KIND, name);
        ensure!(
            !self.resources.contains_key(&address),
            DuplicateAddressSnafu { address }
        );

        debug!(%address, "Declared resource");
        self.resources.insert(address.clone(), body.into());
        Ok(address)
    }

    /// Record a value exported after apply.
    pub fn export(&mut self, name: &str, value: impl Into<Expr>) -> Result<(), StackError> {
        ensure!(ResourceAddress::is_valid_name(name), InvalidNameSnafu { name });
        ensure!(!self.outputs.contains_key(name), DuplicateOutputSnafu { name });

        self.outputs.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Declarations in declaration order.
    pub fn resources(&self) -> impl Iterator<Item = (&ResourceAddress, &Resource)> {
        self.resources.iter()
    }

    pub fn data_sources(&self) -> impl Iterator<Item = &ResourceAddress> {
        self.data_sources.iter()
    }

    pub fn outputs(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.outputs.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Edges from each declaration to every address it references, in
    /// declaration order. Each edge is listed once.
    pub fn dependencies(&self) -> Vec<(ResourceAddress, ResourceAddress)> {
        self.resources
            .iter()
            .flat_map(|(address, resource)| {
                let targets: IndexSet<&ResourceAddress> = resource
                    .references()
                    .into_iter()
                    .map(|r| r.target())
                    .collect();
                targets
                    .into_iter()
                    .map(move |target| (address.clone(), target.clone()))
            })
            .collect()
    }

    /// Check every invariant and report all violations at once.
    pub fn validate(&self) -> Result<(), StackError> {
        let mut violations = Vec::new();

        self.check_references(&mut violations);
        self.check_permissions(&mut violations);
        self.check_buckets(&mut violations);
        self.check_claims(&mut violations);
        self.check_crawlers(&mut violations);
        self.check_delivery(&mut violations);
        self.check_consumer_roles(&mut violations);

        ensure!(violations.is_empty(), InvalidStackSnafu { violations });
        Ok(())
    }

    /// References may only point at data sources and earlier declarations.
    fn check_references(&self, violations: &mut Vec<String>) {
        for (position, (address, resource)) in self.resources.iter().enumerate() {
            for reference in resource.references() {
                let target = reference.target();
                if self.data_sources.contains(target) {
                    continue;
                }
                match self.resources.get_index_of(target) {
                    None => violations.push(format!("{address} references unknown {target}")),
                    Some(index) if index >= position => violations.push(format!(
                        "{address} references {target}, which is not declared before it"
                    )),
                    Some(_) => {}
                }
            }
        }

        for (name, value) in &self.outputs {
            for reference in value.refs() {
                let target = reference.target();
                if !self.data_sources.contains(target) && !self.resources.contains_key(target) {
                    violations.push(format!("output '{name}' references unknown {target}"));
                }
            }
        }
    }

    /// Permission statements must name specific upstream resources.
    fn check_permissions(&self, violations: &mut Vec<String>) {
        for (address, resource) in &self.resources {
            let Resource::RolePolicy(policy) = resource else {
                continue;
            };
            for (index, statement) in policy.policy.statement.iter().enumerate() {
                if statement.resource.is_empty() {
                    violations.push(format!("{address} statement {index} names no resource"));
                }
                for entry in statement.resource.iter().filter(|entry| !entry.is_derived()) {
                    violations.push(format!(
                        "{address} statement {index} grants on '{}', which is not derived from a declared resource",
                        entry.render()
                    ));
                }
            }
        }
    }

    /// Every bucket is locked down, named validly and eventually emptied.
    fn check_buckets(&self, violations: &mut Vec<String>) {
        let mut locked = HashSet::new();
        let mut terminating = HashSet::new();

        for (address, resource) in &self.resources {
            match resource {
                Resource::PublicAccessBlock(block) if block.is_locked() => {
                    locked.insert(owner_of(&block.bucket));
                }
                Resource::BucketLifecycle(lifecycle) => {
                    if lifecycle.rule.iter().any(|rule| rule.terminates()) {
                        terminating.insert(owner_of(&lifecycle.bucket));
                    }
                    for rule in &lifecycle.rule {
                        for transition in rule.late_transitions() {
                            violations.push(format!(
                                "{address} rule '{}' transitions after {} days, not before expiring",
                                rule.id, transition.days
                            ));
                        }
                    }
                }
                _ => {}
            }
        }

        for (address, resource) in &self.resources {
            let Resource::Bucket(bucket) = resource else {
                continue;
            };
            let owner = address.to_string();
            if !bucket.has_valid_name() {
                violations.push(format!("{address} has invalid bucket name '{}'", bucket.bucket));
            }
            if !locked.contains(&owner) {
                violations.push(format!("{address} does not block all public access"));
            }
            if !terminating.contains(&owner) {
                violations.push(format!("{address} has no enabled expiring lifecycle rule"));
            }
        }
    }

    /// No two declarations may write the same cloud object.
    fn check_claims(&self, violations: &mut Vec<String>) {
        let declarations = self
            .resources
            .iter()
            .map(|(address, resource)| (address.to_string(), resource.claims()));

        let mut conflicts: Vec<String> = Claim::conflicts(declarations)
            .into_iter()
            .map(|(claim, holders)| {
                let mut holders: Vec<String> = holders.into_iter().collect();
                holders.sort();
                format!("{claim} is claimed by {}", holders.join(", "))
            })
            .collect();
        conflicts.sort();
        violations.extend(conflicts);
    }

    fn check_crawlers(&self, violations: &mut Vec<String>) {
        for (address, resource) in &self.resources {
            let Resource::Crawler(crawler) = resource else {
                continue;
            };
            if !crawler.has_consistent_policies() {
                violations.push(format!(
                    "{address} crawls new folders only but does not log schema changes"
                ));
            }
        }
    }

    /// Delivered keys must stay crawlable and errors must land apart from data.
    fn check_delivery(&self, violations: &mut Vec<String>) {
        for (address, resource) in &self.resources {
            let Resource::DeliveryStream(stream) = resource else {
                continue;
            };
            violations.extend(
                delivery_violations(&stream.extended_s3_configuration)
                    .into_iter()
                    .map(|violation| format!("{address} {violation}")),
            );
        }
    }

    /// A role serves exactly one consumer.
    fn check_consumer_roles(&self, violations: &mut Vec<String>) {
        let mut consumers: HashMap<String, Vec<&ResourceAddress>> = HashMap::new();

        for (address, resource) in &self.resources {
            let role = match resource {
                Resource::DeliveryStream(stream) => &stream.extended_s3_configuration.role_arn,
                Resource::EventStream(stream) => &stream.role_arn,
                Resource::Crawler(crawler) => &crawler.role,
                _ => continue,
            };
            consumers.entry(owner_of(role)).or_default().push(address);
        }

        let mut shared: Vec<String> = consumers
            .into_iter()
            .filter(|(_, users)| users.len() > 1)
            .map(|(role, users)| {
                let users: Vec<String> = users.iter().map(ToString::to_string).collect();
                format!("{role} is shared by {}", users.join(", "))
            })
            .collect();
        shared.sort();
        violations.extend(shared);
    }
}

fn delivery_violations(s3: &ExtendedS3Configuration) -> Vec<String> {
    let mut violations = Vec::new();
    let template = &s3.partitioning;
    let columns = template.partition_columns();

    if columns.is_empty() {
        violations.push(format!("prefix '{}' has no partition columns", template.as_str()));
    } else {
        let sample = template.render_at(Utc::now());
        if !PartitionExtractor::new(columns).covers(&sample) {
            violations.push(format!("prefix '{}' is not Hive-partitioned", template.as_str()));
        }
    }

    if s3.prefix != template.to_firehose_expression() {
        violations.push(format!(
            "prefix '{}' does not match its template '{}'",
            s3.prefix,
            template.as_str()
        ));
    }

    let data_root = format!("{}/", template.root());
    if s3.error_output_prefix.is_empty() || s3.error_output_prefix.starts_with(&data_root) {
        violations.push(format!(
            "error prefix '{}' is not separate from the data prefix",
            s3.error_output_prefix
        ));
    }

    violations
}
