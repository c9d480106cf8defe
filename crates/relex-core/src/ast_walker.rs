// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared pre-order AST walker.
//!
//! Provides [`walk_ast`], a pre-order recursive walk over an AST calling a
//! visitor closure on every node. Children are a function of the variant —
//! traversal is an exhaustive match, not runtime dispatch — so consumers
//! that need custom per-variant behavior write their own match instead.
//!
//! Custom-character-class members are not AST nodes; a walk stops at the
//! class node itself. Passes that care about members (none in this crate
//! besides the class parser's own tests) match on
//! [`CustomCharacterClass::members`](crate::ast::CustomCharacterClass::members)
//! directly.

use crate::ast::Ast;

/// Recursively walks an AST in pre-order, calling `f` on every node.
///
/// The visitor is called on the current node before its children.
pub fn walk_ast<F>(ast: &Ast, f: &mut F)
where
    F: FnMut(&Ast),
{
    f(ast);
    match ast {
        Ast::Alternation(alt) => {
            for child in &alt.children {
                walk_ast(child, f);
            }
        }
        Ast::Concatenation(concat) => {
            for child in &concat.children {
                walk_ast(child, f);
            }
        }
        Ast::Group(group) => walk_ast(&group.child, f),
        Ast::Quantification(quant) => walk_ast(&quant.child, f),
        Ast::Quote(_)
        | Ast::Trivia(_)
        | Ast::Atom(_)
        | Ast::CustomCharacterClass(_)
        | Ast::Empty(_) => {}
    }
}
