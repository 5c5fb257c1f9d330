use serde::{Deserialize, Serialize};

use crate::population::NodeId;

/// A population node: a present-day species, a speciation or hybridisation
/// event, or the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::module_name_repetitions)]
pub struct PopulationNode {
    id: NodeId,
    #[serde(default)]
    name: Option<String>,
}

impl PopulationNode {
    #[must_use]
    pub fn new(id: NodeId, name: Option<String>) -> Self {
        Self { id, name }
    }

    #[must_use]
    pub fn named(id: u32, name: &str) -> Self {
        Self::new(NodeId::new(id), Some(name.to_owned()))
    }

    #[must_use]
    pub fn unnamed(id: u32) -> Self {
        Self::new(NodeId::new(id), None)
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(super) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }
}
