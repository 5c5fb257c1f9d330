use core::fmt;

use super::{GeneNodeKind, GeneTree};

impl GeneTree {
    /// Writes the gene tree in parenthetical (Newick) notation.
    ///
    /// Every edge is annotated with its population as `[&population=N]`,
    /// and a coalescence at the root with the population it happened in.
    #[must_use]
    pub fn to_newick(&self) -> String {
        self.to_string()
    }

    fn write_subtree(&self, fmt: &mut fmt::Formatter, node: usize) -> fmt::Result {
        let node = &self.nodes[node];

        if !node.children.is_empty() {
            fmt.write_str("(")?;

            for (i, edge) in node.children.iter().enumerate() {
                if i > 0 {
                    fmt.write_str(",")?;
                }

                let edge = &self.edges[*edge];

                self.write_subtree(fmt, edge.child)?;
                write!(
                    fmt,
                    ":{}[&population={}]",
                    edge.length.get(),
                    edge.population
                )?;
            }

            fmt.write_str(")")?;
        }

        if let Some(name) = node.name() {
            write_name(fmt, name)?;
        }

        Ok(())
    }
}

impl fmt::Display for GeneTree {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        self.write_subtree(fmt, self.root)?;

        if let GeneNodeKind::Coalescence { population } = self.root().kind {
            write!(fmt, "[&population={population}]")?;
        }

        fmt.write_str(";")
    }
}

fn write_name(fmt: &mut fmt::Formatter, name: &str) -> fmt::Result {
    let needs_quotes = name
        .chars()
        .any(|c| c.is_whitespace() || "()[]',:;".contains(c));

    if !needs_quotes {
        return fmt.write_str(name);
    }

    fmt.write_str("'")?;
    for c in name.chars() {
        if c == '\'' {
            fmt.write_str("''")?;
        } else {
            write!(fmt, "{c}")?;
        }
    }
    fmt.write_str("'")
}
