//! Global-Declarations Merger
//!
//! The consolidated file is fully owned by hoist: only `global using` lines
//! survive a merge, everything else is regenerated. Output is a pure function
//! of the entry set, so merging is commutative and idempotent.

use crate::using_directive::{strip_global_marker, UsingDirective};
use std::collections::BTreeSet;

const ENTRY_PREFIX: &str = "global using ";

/// The set of entries of a consolidated declarations file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalUsingsFile {
    entries: BTreeSet<String>,
}

impl GlobalUsingsFile {
    /// Parse existing content, keeping only `global using` lines.
    pub fn parse(content: &str) -> Self {
        let entries = parse_entries(content)
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    /// Add a directive; returns false if an identical entry was already present.
    pub fn insert(&mut self, directive: &UsingDirective) -> bool {
        self.entries.insert(directive.global_entry())
    }

    pub fn contains(&self, directive: &UsingDirective) -> bool {
        self.entries.contains(&directive.global_entry())
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render grouped and sorted, one blank line between non-empty groups.
    pub fn render<S: AsRef<str>>(&self, priority_prefixes: &[S]) -> String {
        let mut groups: Vec<Vec<&str>> = vec![Vec::new(); priority_prefixes.len() + 1];
        for entry in &self.entries {
            let root = entry_root(entry);
            groups[group_index(&root, priority_prefixes)].push(entry);
        }

        let mut rendered: Vec<String> = Vec::new();
        for mut group in groups.into_iter().filter(|g| !g.is_empty()) {
            group.sort_by_cached_key(|entry| (entry_root(entry).to_lowercase(), entry.to_string()));
            rendered.push(group.join("\n"));
        }

        if rendered.is_empty() {
            return String::new();
        }
        let mut out = rendered.join("\n\n");
        out.push('\n');
        out
    }
}

/// Merge new directives into existing consolidated content.
///
/// ```
/// use hoist_lang_csharp::{merge, UsingDirective};
///
/// let imports = vec![
///     UsingDirective::parse("using MyApp.Services;").unwrap(),
///     UsingDirective::parse("using System;").unwrap(),
/// ];
/// let merged = merge("", &imports, &["System", "Microsoft"]);
/// assert_eq!(merged, "global using System;\n\nglobal using MyApp.Services;\n");
/// ```
pub fn merge<'a, I, S>(existing: &str, new_imports: I, priority_prefixes: &[S]) -> String
where
    I: IntoIterator<Item = &'a UsingDirective>,
    S: AsRef<str>,
{
    let mut file = GlobalUsingsFile::parse(existing);
    for directive in new_imports {
        file.insert(directive);
    }
    file.render(priority_prefixes)
}

/// The trimmed `global using` lines of consolidated content, in file order.
pub fn parse_entries(content: &str) -> Vec<&str> {
    content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(ENTRY_PREFIX))
        .collect()
}

/// Namespace root of an entry: the target after stripping the global marker,
/// `static`, any `alias =` and a leading `global::`.
pub fn entry_root(entry: &str) -> String {
    let local = strip_global_marker(entry).unwrap_or(entry);
    if let Some(directive) = UsingDirective::parse(local) {
        return directive.namespace_root();
    }

    // Hand-edited lines that no longer parse still need a stable group
    let rest = local.trim_start_matches("using").trim();
    let rest = rest.strip_prefix("static ").unwrap_or(rest);
    let rest = rest.split_once('=').map(|(_, target)| target).unwrap_or(rest);
    let rest = rest.split(';').next().unwrap_or(rest).trim();
    rest.strip_prefix("global::").unwrap_or(rest).to_string()
}

fn group_index<S: AsRef<str>>(root: &str, priority_prefixes: &[S]) -> usize {
    priority_prefixes
        .iter()
        .position(|prefix| {
            let prefix = prefix.as_ref();
            root == prefix
                || root
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('.'))
        })
        .unwrap_or(priority_prefixes.len())
}
