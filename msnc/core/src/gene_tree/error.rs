#[derive(Debug, thiserror::Error, displaydoc::Display, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum GeneTreeError {
    /// the gene tree node identifier {0} is used more than once
    DuplicateNode(u64),
    /// the gene tree edge identifier {0} is used more than once
    DuplicateEdge(u64),
    /// gene tree node {id} has degree {degree}, which disagrees with it being a {kind}
    //
    // The builder only creates nodes with their final number of children,
    // so this guards `finalize` against a broken arena rather than bad input.
    Degree {
        id: u64,
        degree: usize,
        kind: &'static str,
    },
}
