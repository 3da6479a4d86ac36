//! Data carried through a single validation call.

/// One occurrence of a node pattern: `(p:Pod {phase: 'Running'})`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeUse {
    /// The pattern's text without the wrapping parentheses.
    pub(crate) text: String,
    /// The identifier before the first `:`, if any.
    pub(crate) variable: Option<String>,
    /// The labels introduced at this occurrence, in declaration order.
    pub(crate) labels: Vec<String>,
}

/// One relationship occurrence between two node patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RelationshipUse {
    pub(crate) left_node: NodeUse,
    pub(crate) right_node: NodeUse,
    /// The bracketed detail's text, `r:Manages*1..2`.
    pub(crate) edge_text: String,
    /// Declared type alternatives, in order.
    pub(crate) edge_types: Vec<String>,
    /// `"<-"` or `"-"`.
    pub(crate) left_dir: &'static str,
    /// `"->"` or `"-"`.
    pub(crate) right_dir: &'static str,
    /// `(left)<-[detail]-(right)`, for diagnostics.
    pub(crate) snippet: String,
    /// `/`-joined rule names from the tree root to the relationship.
    pub(crate) rule_path: String,
}

/// The direction of a relationship pattern, derived from its arrow tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
    Both,
    Undirected,
}

impl Direction {
    /// The arrow used when rendering diagnostics.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::LeftToRight => "->",
            Direction::RightToLeft => "<-",
            Direction::Both => "<->",
            Direction::Undirected => "-",
        }
    }
}

/// A relationship occurrence the schema does not permit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// The declared type alternatives, `|`-joined.
    pub edge_type: String,
    /// Resolved labels of the left node.
    pub left_labels: Vec<String>,
    /// Resolved labels of the right node.
    pub right_labels: Vec<String>,
    pub direction: Direction,
    /// The offending pattern, `(left)<-[detail]-(right)`.
    pub snippet: String,
    /// Where in the parse tree the pattern sits.
    pub rule_path: String,
    /// Every pair the schema permits for the declared types, in
    /// first-declared order.
    pub allowed_pairs: Vec<(String, String)>,
}
