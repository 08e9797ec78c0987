//! AST transformer and visitor.
//!
//! Transforms a parse tree into an AST for later passes and semantic
//! analysis. A B program is structured by definitions - one of either a
//! vector or function. Functions contain expressions (rvalues) or
//! statements. These are the mutual recursive branches we care about
//! most. Lvalues and lvalue expressions are generally flattened, along
//! with constant literal types.
//!
//! The transform is a single bottom-up pass: children are rewritten
//! before their parent's rule fires. The pass also populates the symbol
//! table. The table records the first occurrence of each name;
//! defining occurrences (function, vector, label) take the entry over,
//! and `*x` / `x[i]` usage upgrades a plain lvalue entry's kind in
//! place without ever creating one.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    lexer::tokens::{Token, TokenKind},
    parser::tree::{Child, Production, Tree},
};

use super::{
    ast::{AstNode, NodeChild, NodeKind, Root},
    symbols::{SymbolEntry, SymbolKind, SymbolTable},
};

lazy_static! {
    /// Language operator map: grammar production to surface symbol.
    pub static ref OPERATOR_MAP: HashMap<Production, &'static str> = {
        let mut map = HashMap::new();
        map.insert(Production::UnaryDec, "--");
        map.insert(Production::UnaryInc, "++");
        map.insert(Production::OrOperator, "||");
        map.insert(Production::AndOperator, "&&");
        map.insert(Production::BitOrOperator, "|");
        map.insert(Production::BitAndOperator, "&");
        map.insert(Production::EqOperator, "==");
        map.insert(Production::NeqOperator, "!=");
        map.insert(Production::LtOperator, "<");
        map.insert(Production::LteOperator, "<=");
        map.insert(Production::GtOperator, ">");
        map.insert(Production::GteOperator, ">=");
        map.insert(Production::XorOperator, "^");
        map.insert(Production::LshiftOperator, "<<");
        map.insert(Production::RshiftOperator, ">>");
        map.insert(Production::SubOperator, "-");
        map.insert(Production::AddOperator, "+");
        map.insert(Production::ModOperator, "%");
        map.insert(Production::MulOperator, "*");
        map.insert(Production::DivOperator, "/");
        map.insert(Production::UnaryMinus, "-");
        map.insert(Production::UnaryNot, "!");
        map.insert(Production::UnaryOnesComplement, "~");
        map
    };
}

pub struct Transformer {
    /// Optionally attach position records to AST nodes.
    use_meta: bool,
    /// Constructed global symbol table of lvalues.
    symbol_table: SymbolTable,
}

impl Transformer {
    pub fn new(use_meta: bool) -> Self {
        Transformer {
            use_meta,
            symbol_table: SymbolTable::new(),
        }
    }

    pub fn get_symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub fn into_symbol_table(self) -> SymbolTable {
        self.symbol_table
    }

    /// AST node factory. Position info, when enabled, is copied from
    /// the first child of the production that carries any.
    fn construct_node(
        &self,
        children: &[Child],
        kind: NodeKind,
        root: Root,
        left: Option<NodeChild>,
        right: Option<NodeChild>,
    ) -> AstNode {
        let meta = if self.use_meta {
            children.iter().find_map(|child| child.meta())
        } else {
            None
        };

        AstNode {
            kind,
            root,
            left,
            right,
            meta,
        }
    }

    /// Statement node factory.
    fn construct_statement_node(
        &self,
        children: &[Child],
        root: &'static str,
        left: Option<NodeChild>,
        right: Option<NodeChild>,
    ) -> AstNode {
        self.construct_node(children, NodeKind::Statement, Root::Literal(root), left, right)
    }

    /// Lvalue node synthesized from a bare name (extrn names, stripped
    /// labels). Carries no position record.
    fn to_identifier(&self, name: &str) -> AstNode {
        AstNode {
            kind: NodeKind::Lvalue,
            root: Root::Name(String::from(name)),
            left: None,
            right: None,
            meta: None,
        }
    }

    fn transform_children(&mut self, children: &[Child]) -> Vec<AstNode> {
        children
            .iter()
            .filter_map(|child| match child {
                Child::Subtree(tree) => Some(self.transform(tree)),
                Child::Token(_) => None,
            })
            .collect()
    }

    fn subtree<'a>(&self, tree: &'a Tree, index: usize) -> &'a Tree {
        match tree.children.get(index) {
            Some(Child::Subtree(sub)) => sub,
            _ => unreachable!("{} expects a sub-tree at {}", tree.production, index),
        }
    }

    fn token<'a>(&self, tree: &'a Tree, index: usize) -> &'a Token {
        match tree.children.get(index) {
            Some(Child::Token(token)) => token,
            _ => unreachable!("{} expects a token at {}", tree.production, index),
        }
    }

    /// Rewrites one parse-tree node into its AST form. The match is
    /// exhaustive over the closed production set, so a new grammar rule
    /// cannot silently fall through unhandled.
    pub fn transform(&mut self, tree: &Tree) -> AstNode {
        match tree.production {
            // Program root
            Production::Program => {
                let definitions = self.transform_children(&tree.children);
                self.construct_node(
                    &tree.children,
                    NodeKind::Program,
                    Root::Literal("definitions"),
                    Some(NodeChild::Many(definitions)),
                    None,
                )
            }

            // Passthroughs: forward the single meaningful child
            Production::Definition
            | Production::Statement
            | Production::Rvalue
            | Production::LvalueExpression
            | Production::ConstantExpression
            | Production::VSize
            | Production::Ival => match tree.children.first() {
                Some(Child::Subtree(inner)) => self.transform(inner),
                _ => unreachable!("{} forwards a single sub-tree", tree.production),
            },

            // Definitions
            Production::FunctionDefinition => {
                let parameters = self.transform_children(&self.subtree(tree, 1).children);
                let body = self.transform(self.subtree(tree, 2));

                let name = self.token(tree, 0);
                self.symbol_table.insert(
                    name.value.clone(),
                    SymbolEntry::new(SymbolKind::FunctionDefinition, name.meta),
                );

                self.construct_node(
                    &tree.children,
                    NodeKind::FunctionDefinition,
                    Root::Name(name.value.clone()),
                    Some(NodeChild::Many(parameters)),
                    Some(NodeChild::One(Box::new(body))),
                )
            }

            Production::VectorDefinition => {
                let mut size_node = None;
                let mut ivals = vec![];

                for child in &tree.children[1..] {
                    match child {
                        Child::Subtree(sub) if sub.production == Production::VSize => {
                            if !sub.children.is_empty() {
                                size_node = Some(self.transform(sub));
                            }
                        }
                        Child::Subtree(sub) => ivals.push(self.transform(sub)),
                        Child::Token(_) => {
                            unreachable!("vector_definition holds sub-trees after its name")
                        }
                    }
                }

                let name = self.token(tree, 0);
                let mut entry = SymbolEntry::new(SymbolKind::VectorDefinition, name.meta);
                if let Some(node) = &size_node {
                    if let Root::Integer(value) = node.root {
                        entry.size = Some(value);
                    }
                }
                self.symbol_table.insert(name.value.clone(), entry);

                self.construct_node(
                    &tree.children,
                    NodeKind::VectorDefinition,
                    Root::Name(name.value.clone()),
                    size_node.map(|node| NodeChild::One(Box::new(node))),
                    Some(NodeChild::Many(ivals)),
                )
            }

            // Statements
            Production::BlockStatement => {
                let statements = self.transform_children(&tree.children);
                self.construct_statement_node(
                    &tree.children,
                    "block",
                    Some(NodeChild::Many(statements)),
                    None,
                )
            }

            Production::RvalueStatement => {
                let rvalues = self.transform_children(&tree.children);
                self.construct_statement_node(
                    &tree.children,
                    "rvalue",
                    Some(NodeChild::Many(rvalues)),
                    None,
                )
            }

            Production::SwitchStatement => {
                let selector = self.transform(self.subtree(tree, 0));
                let rest = self.transform_children(&tree.children[1..]);
                self.construct_statement_node(
                    &tree.children,
                    "switch",
                    Some(NodeChild::One(Box::new(selector))),
                    Some(NodeChild::Many(rest)),
                )
            }

            Production::CaseStatement => {
                let constant = self.transform(self.subtree(tree, 0));
                let rest = self.transform_children(&tree.children[1..]);
                self.construct_statement_node(
                    &tree.children,
                    "case",
                    Some(NodeChild::One(Box::new(constant))),
                    Some(NodeChild::Many(rest)),
                )
            }

            Production::ReturnStatement => {
                let values = self.transform_children(&tree.children);
                self.construct_statement_node(
                    &tree.children,
                    "return",
                    Some(NodeChild::Many(values)),
                    None,
                )
            }

            Production::WhileStatement => {
                let condition = self.transform(self.subtree(tree, 0));
                let rest = self.transform_children(&tree.children[1..]);
                self.construct_statement_node(
                    &tree.children,
                    "while",
                    Some(NodeChild::One(Box::new(condition))),
                    Some(NodeChild::Many(rest)),
                )
            }

            Production::IfStatement => {
                let condition = self.transform(self.subtree(tree, 0));
                let rest = self.transform_children(&tree.children[1..]);
                self.construct_statement_node(
                    &tree.children,
                    "if",
                    Some(NodeChild::One(Box::new(condition))),
                    Some(NodeChild::Many(rest)),
                )
            }

            Production::GotoStatement => {
                let target = self.transform(self.subtree(tree, 0));
                self.construct_statement_node(
                    &tree.children,
                    "goto",
                    Some(NodeChild::Many(vec![target])),
                    None,
                )
            }

            Production::LabelStatement => {
                let token = self.token(tree, 0);
                let name = String::from(token.value.strip_suffix(':').unwrap_or(&token.value));
                let meta = token.meta;

                self.symbol_table
                    .insert(name.clone(), SymbolEntry::new(SymbolKind::Label, meta));

                let label = self.to_identifier(&name);
                self.construct_statement_node(
                    &tree.children,
                    "label",
                    Some(NodeChild::Many(vec![label])),
                    None,
                )
            }

            Production::ExtrnStatement => {
                let names = tree
                    .children
                    .iter()
                    .map(|child| match child {
                        Child::Token(token) => self.to_identifier(&token.value),
                        Child::Subtree(_) => {
                            unreachable!("extrn_statement holds raw name tokens")
                        }
                    })
                    .collect();

                self.construct_statement_node(
                    &tree.children,
                    "extrn",
                    Some(NodeChild::Many(names)),
                    None,
                )
            }

            Production::AutoStatement => {
                let names = self.transform_children(&tree.children);
                self.construct_statement_node(
                    &tree.children,
                    "auto",
                    Some(NodeChild::Many(names)),
                    None,
                )
            }

            Production::BreakStatement => {
                self.construct_statement_node(&tree.children, "break", None, None)
            }

            // Expressions
            Production::FunctionExpression => {
                let callee = self.transform(self.subtree(tree, 0));
                let arguments = self.transform_children(&self.subtree(tree, 1).children);

                self.construct_node(
                    &tree.children,
                    NodeKind::FunctionExpression,
                    callee.root.clone(),
                    Some(NodeChild::One(Box::new(callee))),
                    Some(NodeChild::Many(arguments)),
                )
            }

            Production::RelationExpression => {
                let left = self.transform(self.subtree(tree, 0));
                let operator = self.subtree(tree, 1).production;
                let right = self.transform(self.subtree(tree, 2));

                self.construct_node(
                    &tree.children,
                    NodeKind::RelationExpression,
                    Root::operator(OPERATOR_MAP[&operator]),
                    Some(NodeChild::One(Box::new(left))),
                    Some(NodeChild::One(Box::new(right))),
                )
            }

            Production::TernaryExpression => {
                let condition = self.transform(self.subtree(tree, 0));
                let then_branch = self.transform(self.subtree(tree, 1));
                let else_branch = self.transform(self.subtree(tree, 2));

                self.construct_node(
                    &tree.children,
                    NodeKind::TernaryExpression,
                    Root::Node(Box::new(condition)),
                    Some(NodeChild::One(Box::new(then_branch))),
                    Some(NodeChild::One(Box::new(else_branch))),
                )
            }

            Production::UnaryExpression => {
                let operator = self.subtree(tree, 0).production;
                let operand = self.transform(self.subtree(tree, 1));

                self.construct_node(
                    &tree.children,
                    NodeKind::UnaryExpression,
                    Root::operator(OPERATOR_MAP[&operator]),
                    Some(NodeChild::One(Box::new(operand))),
                    None,
                )
            }

            Production::EvaluatedExpression => {
                let inner = self.transform(self.subtree(tree, 0));

                self.construct_node(
                    &tree.children,
                    NodeKind::EvaluatedExpression,
                    Root::Node(Box::new(inner)),
                    None,
                    None,
                )
            }

            Production::AddressOfExpression => {
                let operand = self.transform(self.subtree(tree, 1));

                self.construct_node(
                    &tree.children,
                    NodeKind::AddressOfExpression,
                    Root::operator("&"),
                    Some(NodeChild::One(Box::new(operand))),
                    None,
                )
            }

            Production::PostIncDecExpression => {
                let operand = self.transform(self.subtree(tree, 0));
                let operator = self.subtree(tree, 1).production;

                self.construct_node(
                    &tree.children,
                    NodeKind::PostIncDecExpression,
                    Root::operator(OPERATOR_MAP[&operator]),
                    None,
                    Some(NodeChild::One(Box::new(operand))),
                )
            }

            Production::PreIncDecExpression => {
                let operator = self.subtree(tree, 0).production;
                let operand = self.transform(self.subtree(tree, 1));

                self.construct_node(
                    &tree.children,
                    NodeKind::PreIncDecExpression,
                    Root::operator(OPERATOR_MAP[&operator]),
                    Some(NodeChild::One(Box::new(operand))),
                    None,
                )
            }

            Production::AssignmentExpression => {
                let target = self.transform(self.subtree(tree, 0));
                let operator = self.assignment_operator_root(self.subtree(tree, 1));
                let value = self.transform(self.subtree(tree, 2));

                self.construct_node(
                    &tree.children,
                    NodeKind::AssignmentExpression,
                    operator,
                    Some(NodeChild::One(Box::new(target))),
                    Some(NodeChild::One(Box::new(value))),
                )
            }

            // Lvalue forms
            Production::Identifier => {
                let token = self.token(tree, 0);
                let name = token.value.clone();
                let meta = token.meta;

                if !self.symbol_table.contains_key(&name) {
                    self.symbol_table
                        .insert(name.clone(), SymbolEntry::new(SymbolKind::Lvalue, meta));
                }

                self.construct_node(
                    &tree.children,
                    NodeKind::Lvalue,
                    Root::Name(name),
                    None,
                    None,
                )
            }

            Production::IndirectIdentifier => {
                let operand = self.transform(self.subtree(tree, 1));

                if let Root::Name(name) = &operand.root {
                    if let Some(entry) = self.symbol_table.get_mut(name) {
                        entry.kind = SymbolKind::IndirectLvalue;
                    }
                }

                self.construct_node(
                    &tree.children,
                    NodeKind::IndirectLvalue,
                    Root::operator("*"),
                    Some(NodeChild::One(Box::new(operand))),
                    None,
                )
            }

            Production::VectorIdentifier => {
                let base = self.transform(self.subtree(tree, 0));
                let index = self.transform(self.subtree(tree, 1));

                if let Root::Name(name) = &base.root {
                    if let Some(entry) = self.symbol_table.get_mut(name) {
                        entry.kind = SymbolKind::VectorLvalue;
                    }
                }

                self.construct_node(
                    &tree.children,
                    NodeKind::VectorLvalue,
                    base.root.clone(),
                    Some(NodeChild::One(Box::new(index))),
                    None,
                )
            }

            // Constants; multi-piece literals are joined here
            Production::NumberLiteral => {
                let digits = self.joined_token_values(tree);
                let value = digits
                    .parse::<i64>()
                    .expect("number literal validated during parsing");

                self.construct_node(
                    &tree.children,
                    NodeKind::NumberLiteral,
                    Root::Integer(value),
                    None,
                    None,
                )
            }

            Production::StringLiteral => {
                let text = self.joined_token_values(tree);
                self.construct_node(
                    &tree.children,
                    NodeKind::StringLiteral,
                    Root::Name(text),
                    None,
                    None,
                )
            }

            Production::ConstantLiteral => {
                let text = self.joined_token_values(tree);
                self.construct_node(
                    &tree.children,
                    NodeKind::ConstantLiteral,
                    Root::Name(text),
                    None,
                    None,
                )
            }

            // Structural productions are consumed by their parents;
            // dispatching on one is a parser defect.
            Production::ParameterList
            | Production::ExpressionList
            | Production::AssignmentOperator
            | Production::OrOperator
            | Production::AndOperator
            | Production::BitOrOperator
            | Production::BitAndOperator
            | Production::XorOperator
            | Production::EqOperator
            | Production::NeqOperator
            | Production::LtOperator
            | Production::LteOperator
            | Production::GtOperator
            | Production::GteOperator
            | Production::LshiftOperator
            | Production::RshiftOperator
            | Production::AddOperator
            | Production::SubOperator
            | Production::MulOperator
            | Production::DivOperator
            | Production::ModOperator
            | Production::UnaryInc
            | Production::UnaryDec
            | Production::UnaryMinus
            | Production::UnaryNot
            | Production::UnaryOnesComplement => {
                unreachable!("{} is consumed by its parent production", tree.production)
            }
        }
    }

    /// Assignment operator marker: `["=", null]` for plain assignment,
    /// `["=", op]` for the compound `=op` forms.
    fn assignment_operator_root(&self, operator: &Tree) -> Root {
        let token = self.token(operator, 0);

        let compound = match token.kind {
            TokenKind::Assignment => None,
            TokenKind::AssignPlus => Some(String::from("+")),
            TokenKind::AssignMinus => Some(String::from("-")),
            TokenKind::AssignStar => Some(String::from("*")),
            TokenKind::AssignSlash => Some(String::from("/")),
            TokenKind::AssignPercent => Some(String::from("%")),
            TokenKind::AssignAnd => Some(String::from("&")),
            TokenKind::AssignOr => Some(String::from("|")),
            TokenKind::AssignXor => Some(String::from("^")),
            TokenKind::AssignLshift => Some(String::from("<<")),
            TokenKind::AssignRshift => Some(String::from(">>")),
            _ => unreachable!("assignment_operator holds an assignment token"),
        };

        Root::Operator(vec![Some(String::from("=")), compound])
    }

    fn joined_token_values(&self, tree: &Tree) -> String {
        tree.children
            .iter()
            .map(|child| match child {
                Child::Token(token) => token.value.as_str(),
                Child::Subtree(_) => unreachable!("literal pieces are tokens"),
            })
            .collect()
    }
}
