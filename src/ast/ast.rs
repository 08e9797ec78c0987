//! The AST data structure.
//!
//! Every node combines a `kind` tag, a heterogeneous `root` value and
//! optional `left`/`right` children. Nodes are immutable after
//! construction and ownership is strictly hierarchical: a parent owns
//! its children, there is no sharing and no cycles.
//!
//! The JSON encoding is a direct structural mapping of these types:
//! sequences become arrays, records become objects, and absent optional
//! fields are omitted entirely (never encoded as null), so an absent
//! child and an empty child list stay distinguishable.

use serde::Serialize;

use crate::Meta;

/// Node category tag, serialized in snake_case under the key `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Program,
    FunctionDefinition,
    VectorDefinition,
    Statement,
    FunctionExpression,
    RelationExpression,
    TernaryExpression,
    UnaryExpression,
    EvaluatedExpression,
    AddressOfExpression,
    PostIncDecExpression,
    PreIncDecExpression,
    AssignmentExpression,
    Lvalue,
    IndirectLvalue,
    VectorLvalue,
    NumberLiteral,
    StringLiteral,
    ConstantLiteral,
}

/// The node's semantic label. Shape depends on the node kind: a name
/// or literal text, an integer value, an operator marker list, a fixed
/// tag, or a whole nested node (ternary condition, evaluated
/// expression).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Root {
    Name(String),
    Integer(i64),
    /// Operator markers, e.g. `["*"]` for indirection or
    /// `["=", "+"]` / `["=", null]` for assignment forms.
    Operator(Vec<Option<String>>),
    Literal(&'static str),
    Node(Box<AstNode>),
}

impl Root {
    pub fn operator(symbol: &str) -> Root {
        Root::Operator(vec![Some(String::from(symbol))])
    }
}

/// A child slot: one node or an ordered sequence of nodes. An absent
/// slot (`None` at the field level) means "not applicable" and is
/// distinct from an empty sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeChild {
    One(Box<AstNode>),
    Many(Vec<AstNode>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstNode {
    #[serde(rename = "node")]
    pub kind: NodeKind,
    pub root: Root,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<NodeChild>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<NodeChild>,
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}
