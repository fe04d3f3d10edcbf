//! Command groups

use serde::{Deserialize, Serialize};

/// Priority given to groups that do not declare one
pub const DEFAULT_GROUP_PRIORITY: i32 = 100;

/// A named alias expanding to an ordered list of command names
///
/// Every member receives the arguments given to the group itself. The
/// priority only affects the order of the usage listing (lower first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandGroupSpec {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Member command names, run in this order
    pub commands: Vec<String>,

    #[serde(default = "default_priority")]
    pub priority: i32,
}

impl CommandGroupSpec {
    /// Create a group with the default priority
    pub fn new<N, D, I, S>(name: N, description: D, commands: I) -> Self
    where
        N: Into<String>,
        D: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            commands: commands.into_iter().map(Into::into).collect(),
            priority: DEFAULT_GROUP_PRIORITY,
        }
    }

    /// Set the listing priority (builder pattern)
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

const fn default_priority() -> i32 {
    DEFAULT_GROUP_PRIORITY
}
