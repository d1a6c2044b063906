//! Import Extractor
//!
//! Splits a C# source file into the using directives that precede the first
//! `namespace` declaration and the remaining text with those lines removed.
//!
//! Only whole-line directives are taken. Anything the scanner cannot classify
//! with confidence (directives inside `#if` blocks or block comments, lines
//! with trailing comments, lines after the first real statement) stays in the
//! remainder untouched.

use crate::using_directive::UsingDirective;

const BOM: char = '\u{feff}';

/// Result of extracting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Extracted directives in file order
    pub imports: Vec<UsingDirective>,
    /// File text with the extracted lines (and their orphaned blank lines) removed
    pub remainder: String,
    /// Index of the first `namespace` line, or the line count when there is none
    pub boundary: usize,
}

impl Extraction {
    /// True when nothing was extracted and the remainder equals the input.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Import,
    Blank,
    Other,
}

/// Extract the using directives of one file.
///
/// ```
/// use hoist_lang_csharp::extract;
///
/// let result = extract("using System;\nusing System.Linq;\n\nnamespace Foo { }");
/// let imports: Vec<&str> = result.imports.iter().map(|d| d.text()).collect();
/// assert_eq!(imports, vec!["using System;", "using System.Linq;"]);
/// assert_eq!(result.remainder, "namespace Foo { }");
/// ```
pub fn extract(text: &str) -> Extraction {
    let (bom, body) = match text.strip_prefix(BOM) {
        Some(rest) => (Some(BOM), rest),
        None => (None, text),
    };
    let ends_with_newline = body.ends_with('\n');
    let content = if ends_with_newline {
        &body[..body.len() - 1]
    } else {
        body
    };

    let lines: Vec<&str> = if body.is_empty() {
        Vec::new()
    } else {
        content.split('\n').collect()
    };

    let boundary = lines
        .iter()
        .position(|line| is_namespace_declaration(line.trim()))
        .unwrap_or(lines.len());

    let (classes, imports) = classify(&lines[..boundary]);

    if imports.is_empty() {
        return Extraction {
            imports,
            remainder: text.to_string(),
            boundary,
        };
    }

    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        if i >= boundary || classes[i] == LineClass::Other {
            kept.push(lines[i]);
            i += 1;
            continue;
        }

        let start = i;
        while i < boundary && classes[i] != LineClass::Other {
            i += 1;
        }
        let block = start..i;

        if !classes[block.clone()].contains(&LineClass::Import) {
            kept.extend_from_slice(&lines[block]);
            continue;
        }

        // The block disappears; keep one separator if it sat between content.
        let has_before = !kept.is_empty();
        let has_after = i < lines.len();
        if has_before && has_after {
            if let Some(blank) = block.clone().find(|&j| classes[j] == LineClass::Blank) {
                kept.push(lines[blank]);
            }
        }
    }

    let mut remainder = String::with_capacity(text.len());
    if let Some(bom) = bom {
        remainder.push(bom);
    }
    if !kept.is_empty() {
        remainder.push_str(&kept.join("\n"));
        if ends_with_newline {
            remainder.push('\n');
        }
    }

    Extraction {
        imports,
        remainder,
        boundary,
    }
}

fn is_namespace_declaration(trimmed: &str) -> bool {
    match trimmed.strip_prefix("namespace") {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace) || rest.starts_with('{'),
        None => false,
    }
}

/// Classify the pre-declaration region and collect its directives.
fn classify(region: &[&str]) -> (Vec<LineClass>, Vec<UsingDirective>) {
    let mut classes = Vec::with_capacity(region.len());
    let mut imports = Vec::new();
    let mut conditional_depth = 0usize;
    let mut in_block_comment = false;
    let mut seen_code = false;

    for line in region {
        let trimmed = line.trim();

        if in_block_comment {
            in_block_comment = ends_inside_block_comment(trimmed, true);
            classes.push(LineClass::Other);
            continue;
        }

        if trimmed.is_empty() {
            classes.push(LineClass::Blank);
            continue;
        }

        if let Some(directive) = trimmed.strip_prefix('#') {
            let directive = directive.trim_start();
            if directive.starts_with("if") {
                conditional_depth += 1;
            } else if directive.starts_with("endif") {
                conditional_depth = conditional_depth.saturating_sub(1);
            }
            classes.push(LineClass::Other);
            continue;
        }

        if trimmed.starts_with("//") {
            classes.push(LineClass::Other);
            continue;
        }

        if trimmed.starts_with("/*") {
            in_block_comment = ends_inside_block_comment(trimmed, false);
            classes.push(LineClass::Other);
            continue;
        }

        if !seen_code && conditional_depth == 0 {
            if let Some(directive) = UsingDirective::parse(trimmed) {
                imports.push(directive);
                classes.push(LineClass::Import);
                continue;
            }
        }

        // Directives must precede every other member, so `using` lines after
        // real code are not directives.
        if !is_header_line(trimmed) {
            seen_code = true;
        }
        in_block_comment = ends_inside_block_comment(trimmed, false);
        classes.push(LineClass::Other);
    }

    (classes, imports)
}

/// Lines that may legally sit among using directives.
fn is_header_line(trimmed: &str) -> bool {
    trimmed.starts_with("using ")
        || trimmed.starts_with("global using ")
        || trimmed.starts_with("extern alias ")
}

/// Whether a block comment is still open at the end of the line.
fn ends_inside_block_comment(line: &str, mut inside: bool) -> bool {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        let pair = (bytes[i], bytes[i + 1]);
        if inside {
            if pair == (b'*', b'/') {
                inside = false;
                i += 2;
                continue;
            }
        } else if pair == (b'/', b'/') {
            break;
        } else if pair == (b'/', b'*') {
            inside = true;
            i += 2;
            continue;
        }
        i += 1;
    }
    inside
}
