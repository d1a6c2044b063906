//! Advisory checks on a merged directive set.
//!
//! Two shapes are reported: one alias bound to different targets, and one
//! static target imported by textually different statements. Neither blocks
//! a merge on its own; the caller decides whether to continue.

use crate::using_directive::{strip_global_marker, UsingDirective, UsingKind};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// The same alias names different targets.
    AliasCollision { alias: String, targets: Vec<String> },
    /// The same static target appears in more than one statement form.
    DuplicateStatic { target: String, statements: Vec<String> },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::AliasCollision { alias, targets } => write!(
                f,
                "alias '{}' refers to different targets: {}",
                alias,
                targets.join(", ")
            ),
            Conflict::DuplicateStatic { target, statements } => write!(
                f,
                "static import of '{}' appears as {} different statements: {}",
                target,
                statements.len(),
                statements.join(" | ")
            ),
        }
    }
}

/// Detect conflicts among directive texts.
///
/// Accepts either file-local (`using X;`) or consolidated (`global using X;`)
/// lines; anything that is not a directive is ignored. Results are sorted so
/// repeated runs report identically.
pub fn detect<'a, I>(statements: I) -> Vec<Conflict>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut aliases: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut statics: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for statement in statements {
        let local = strip_global_marker(statement).unwrap_or(statement);
        let Some(directive) = UsingDirective::parse(local) else {
            continue;
        };

        match directive.kind() {
            UsingKind::Alias { alias } => {
                aliases
                    .entry(alias.clone())
                    .or_default()
                    .insert(directive.namespace_root());
            }
            UsingKind::Static => {
                statics
                    .entry(directive.namespace_root())
                    .or_default()
                    .insert(directive.text().to_string());
            }
            UsingKind::Namespace => {}
        }
    }

    let alias_conflicts = aliases
        .into_iter()
        .filter(|(_, targets)| targets.len() > 1)
        .map(|(alias, targets)| Conflict::AliasCollision {
            alias,
            targets: targets.into_iter().collect(),
        });

    let static_conflicts = statics
        .into_iter()
        .filter(|(_, statements)| statements.len() > 1)
        .map(|(target, statements)| Conflict::DuplicateStatic {
            target,
            statements: statements.into_iter().collect(),
        });

    alias_conflicts.chain(static_conflicts).collect()
}
