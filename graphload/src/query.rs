use crate::config::ConfigError;

/// Platform namespace every identity in the dataset belongs to.
pub const PLATFORM: &str = "twitter";

/// Variables a template must declare to be usable with [`crate::BatchBuilder`].
const REQUIRED_VARIABLES: [&str; 2] = ["$platform", "$identity"];

const PROFILE_QUERY_DOC: &str = r#"
query GET_PROFILES_QUERY($platform: String, $identity: String) {
  identity(platform: $platform, identity: $identity) {
    uuid
    platform
    identity
    displayName
    ownedBy {
      uuid
      platform
      identity
      displayName
      __typename
    }
    nft(category: ["ENS"]) {
      uuid
      category
      chain
      id
      __typename
    }
    neighborWithTraversal(depth: 5) {
      source
      from {
        uuid
        platform
        identity
        displayName
        ownedBy {
          uuid
          platform
          identity
          displayName
          __typename
        }
        nft(category: ["ENS"]) {
          uuid
          category
          chain
          id
          __typename
        }
        __typename
      }
      to {
        uuid
        platform
        identity
        displayName
        ownedBy {
          uuid
          platform
          identity
          displayName
          __typename
        }
        nft(category: ["ENS"]) {
          uuid
          category
          chain
          id
          __typename
        }
        __typename
      }
      __typename
    }
    __typename
  }
}
"#;

/// The fixed profile-lookup request: a deep selection over one identity,
/// its owner, its ENS holdings and its neighborhood out to depth 5.
pub const PROFILE_QUERY: QueryTemplate = QueryTemplate::new(PROFILE_QUERY_DOC);

/// An immutable GraphQL document with named variable slots. Built once,
/// never mutated; substitution happens per request via the variables object,
/// not by string interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTemplate {
    document: &'static str,
}

impl QueryTemplate {
    pub const fn new(document: &'static str) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &'static str {
        self.document
    }

    /// A template missing a variable declaration is a defect in the workload
    /// itself; surface it at construction, not per iteration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for var in REQUIRED_VARIABLES {
            if !self.document.contains(var) {
                return Err(ConfigError::MissingVariable(var));
            }
        }
        Ok(())
    }
}
