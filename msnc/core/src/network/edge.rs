use msnc_core_bond::{NonNegativeF64, ZeroExclOneInclF64};
use serde::{Deserialize, Serialize};

use crate::population::{NodeId, PopulationId};

/// A population edge connecting a `child` population node to its `parent`,
/// with a duration in coalescent units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::module_name_repetitions)]
pub struct PopulationEdge {
    id: PopulationId,
    parent: NodeId,
    child: NodeId,
    length: NonNegativeF64,
    #[serde(default, alias = "inheritance")]
    gamma: Option<ZeroExclOneInclF64>,
}

impl PopulationEdge {
    #[must_use]
    pub fn new(
        id: PopulationId,
        parent: NodeId,
        child: NodeId,
        length: NonNegativeF64,
        gamma: Option<ZeroExclOneInclF64>,
    ) -> Self {
        Self {
            id,
            parent,
            child,
            length,
            gamma,
        }
    }

    #[must_use]
    pub fn id(&self) -> PopulationId {
        self.id
    }

    #[must_use]
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    #[must_use]
    pub fn child(&self) -> NodeId {
        self.child
    }

    #[must_use]
    pub fn length(&self) -> NonNegativeF64 {
        self.length
    }

    /// The inheritance probability, `1.0` for edges that are not the parent
    /// edge of a hybrid node.
    #[must_use]
    pub fn gamma(&self) -> ZeroExclOneInclF64 {
        self.gamma.unwrap_or_else(ZeroExclOneInclF64::one)
    }

    #[must_use]
    pub fn has_gamma(&self) -> bool {
        self.gamma.is_some()
    }

    #[must_use]
    pub fn with_length(&self, length: NonNegativeF64) -> Self {
        Self {
            length,
            ..self.clone()
        }
    }
}
