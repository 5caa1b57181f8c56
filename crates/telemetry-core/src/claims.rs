//! Ownership claims on physical cloud objects.
//!
//! Every declaration owns the cloud objects it writes. Two declarations that
//! claim the same object would fight over it at apply time, so claims are
//! checked while the stack is validated rather than discovered by the
//! provisioning engine.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// A physical object a declaration writes.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Claim {
    /// A globally named object (bucket, role, log group, stream, ...),
    /// identified by its namespace and physical name.
    Named { namespace: &'static str, name: String },
    /// A singleton sub-configuration of another object, such as the
    /// lifecycle configuration of one bucket.
    Attached {
        aspect: &'static str,
        owner: String,
    },
}

impl Claim {
    pub fn named(namespace: &'static str, name: impl Into<String>) -> Self {
        Self::Named {
            namespace,
            name: name.into(),
        }
    }

    /// Owners are compared without trailing slashes.
    pub fn attached(aspect: &'static str, owner: &str) -> Self {
        Self::Attached {
            aspect,
            owner: owner.trim_end_matches('/').to_string(),
        }
    }

    /// Detect claims held by more than one declaration.
    ///
    /// Returns a map from the contested claim to every key claiming it.
    /// An empty map means no conflicts.
    ///
    /// # Examples
    ///
    /// ```
    /// use telemetry_core::Claim;
    ///
    /// let declarations = vec![
    ///     ("bucket.telemetry", vec![Claim::named("s3_bucket", "acme-dev-telemetry")]),
    ///     ("bucket.results", vec![Claim::named("s3_bucket", "acme-dev-athena-results")]),
    ///     ("bucket.copy", vec![Claim::named("s3_bucket", "acme-dev-telemetry")]),
    /// ];
    ///
    /// let conflicts = Claim::conflicts(declarations);
    /// assert_eq!(conflicts.len(), 1);
    /// ```
    pub fn conflicts<K>(
        declarations: impl IntoIterator<Item = (K, Vec<Claim>)>,
    ) -> HashMap<Claim, HashSet<K>>
    where
        K: Eq + Hash + Clone,
    {
        let mut claim_to_keys: HashMap<Claim, HashSet<K>> = HashMap::new();

        for (key, claims) in declarations {
            for claim in claims {
                claim_to_keys.entry(claim).or_default().insert(key.clone());
            }
        }

        claim_to_keys
            .into_iter()
            .filter(|(_, keys)| keys.len() > 1)
            .collect()
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { namespace, name } => write!(f, "{namespace}:{name}"),
            Self::Attached { aspect, owner } => write!(f, "{aspect} of {owner}"),
        }
    }
}
