//! Lifecycle events recognized in a GLR debug trace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a parse stack as printed by the parser
pub type StackId = u64;

/// Grammar rule together with the grammar source line it was declared on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleSite {
    pub rule: u32,
    pub line: u32,
}

impl RuleSite {
    pub fn new(rule: u32, line: u32) -> Self {
        Self { rule, line }
    }
}

impl fmt::Display for RuleSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} (line {})", self.rule, self.line)
    }
}

/// Marker lines that end the run currently being traced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    /// `Cleanup:` emitted while the parser discards its stacks
    Cleanup,
    /// `[PASS]` printed by the test driver
    Pass,
    /// `[FAIL]` printed by the test driver
    Fail,
}

/// One classified trace line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// New lookahead; `None` when the line was too short to carry a symbol
    Token(Option<String>),

    /// `Splitting off stack N from P`
    Split {
        stack: StackId,
        parent: Option<StackId>,
    },

    /// `Stack N ... dies`
    Death { stack: StackId },

    /// `Rename stack A -> B`
    Rename { from: StackId, to: StackId },

    /// `Reduced stack N by rule R (line L)`
    Reduction { stack: StackId, site: RuleSite },

    /// Run boundary marker
    Boundary(BoundaryKind),
}

impl TraceEvent {
    /// Short name used in log output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Token(_) => "token",
            Self::Split { .. } => "split",
            Self::Death { .. } => "death",
            Self::Rename { .. } => "rename",
            Self::Reduction { .. } => "reduction",
            Self::Boundary(_) => "boundary",
        }
    }
}
