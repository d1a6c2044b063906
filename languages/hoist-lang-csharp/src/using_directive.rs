//! The using-directive model shared by the extractor, merger and conflict checks.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker that turns a file-local directive into a project-wide one.
pub const GLOBAL_MARKER: &str = "global";

// One directive per line, terminated by `;` with nothing after it:
//   using System.Linq;
//   using static System.Math;
//   using Json = Newtonsoft.Json;
//   using IntList = System.Collections.Generic.List<int>;
static USING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^using\s+(?:(?P<static>static)\s+)?(?:(?P<alias>@?[\p{L}_][\p{L}\p{N}_]*)\s*=\s*)?(?P<target>(?:global\s*::\s*)?@?[\p{L}_][\p{L}\p{N}_]*(?:\s*\.\s*@?[\p{L}_][\p{L}\p{N}_]*)*(?:\s*<[^;=]*>)?)\s*;$",
    )
    .expect("Invalid regex for C# using directives")
});

/// Which of the three directive forms a statement is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsingKind {
    /// `using System.Linq;`
    Namespace,
    /// `using static System.Math;`
    Static,
    /// `using Json = Newtonsoft.Json;`
    Alias { alias: String },
}

/// A single-line `using` directive.
///
/// Identity is the trimmed statement text: two directives that differ only in
/// inner whitespace are distinct.
#[derive(Debug, Clone)]
pub struct UsingDirective {
    text: String,
    kind: UsingKind,
    target: String,
}

impl UsingDirective {
    /// Parse one line. Returns `None` for anything that is not exactly one
    /// file-local using directive (including `global using` lines).
    pub fn parse(line: &str) -> Option<Self> {
        let text = line.trim();
        let caps = USING_REGEX.captures(text)?;

        let is_static = caps.name("static").is_some();
        let alias = caps.name("alias").map(|m| m.as_str().to_string());
        let kind = match (is_static, alias) {
            (false, None) => UsingKind::Namespace,
            (true, None) => UsingKind::Static,
            (false, Some(alias)) => UsingKind::Alias { alias },
            // `using static A = B;` is not valid C#; leave the line alone
            (true, Some(_)) => return None,
        };

        Some(Self {
            text: text.to_string(),
            kind,
            target: caps["target"].to_string(),
        })
    }

    /// The normalized statement, e.g. `using static System.Math;`
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &UsingKind {
        &self.kind
    }

    /// The target as written, including any `global::` qualifier.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The alias name for aliased directives.
    pub fn alias(&self) -> Option<&str> {
        match &self.kind {
            UsingKind::Alias { alias } => Some(alias),
            _ => None,
        }
    }

    pub fn is_static(&self) -> bool {
        self.kind == UsingKind::Static
    }

    /// Target with whitespace and the `global::` qualifier removed.
    ///
    /// ```
    /// use hoist_lang_csharp::UsingDirective;
    ///
    /// let d = UsingDirective::parse("using static global::System . Math;").unwrap();
    /// assert_eq!(d.namespace_root(), "System.Math");
    /// ```
    pub fn namespace_root(&self) -> String {
        let compact: String = self.target.chars().filter(|c| !c.is_whitespace()).collect();
        compact
            .strip_prefix("global::")
            .map(str::to_string)
            .unwrap_or(compact)
    }

    /// The line written into the consolidated declarations file.
    pub fn global_entry(&self) -> String {
        format!("{} {}", GLOBAL_MARKER, self.text)
    }
}

impl PartialEq for UsingDirective {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for UsingDirective {}

impl Hash for UsingDirective {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for UsingDirective {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UsingDirective {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for UsingDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Strip the global marker from a consolidated entry, yielding the file-local form.
pub fn strip_global_marker(entry: &str) -> Option<&str> {
    let rest = entry.trim().strip_prefix(GLOBAL_MARKER)?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespace_import() {
        let d = UsingDirective::parse("  using System.Collections.Generic;  ").unwrap();
        assert_eq!(d.text(), "using System.Collections.Generic;");
        assert_eq!(d.kind(), &UsingKind::Namespace);
        assert_eq!(d.target(), "System.Collections.Generic");
    }

    #[test]
    fn test_parse_static_import() {
        let d = UsingDirective::parse("using static System.Math;").unwrap();
        assert!(d.is_static());
        assert_eq!(d.namespace_root(), "System.Math");
    }

    #[test]
    fn test_parse_alias_import() {
        let d = UsingDirective::parse("using Json = Newtonsoft.Json;").unwrap();
        assert_eq!(d.alias(), Some("Json"));
        assert_eq!(d.target(), "Newtonsoft.Json");

        let generic =
            UsingDirective::parse("using IntMap = System.Collections.Generic.Dictionary<int, string>;")
                .unwrap();
        assert_eq!(generic.alias(), Some("IntMap"));
        assert_eq!(
            generic.namespace_root(),
            "System.Collections.Generic.Dictionary<int,string>"
        );
    }

    #[test]
    fn test_global_qualifier_is_kept_in_text() {
        let d = UsingDirective::parse("using global::MyApp.Models;").unwrap();
        assert_eq!(d.text(), "using global::MyApp.Models;");
        assert_eq!(d.namespace_root(), "MyApp.Models");
    }

    #[test]
    fn test_rejects_non_directives() {
        for line in [
            "global using System;",
            "using System; // trailing comment",
            "using var stream = File.OpenRead(path);",
            "using (var scope = provider.CreateScope())",
            "using System",
            "using static Json = Newtonsoft.Json;",
            "// using System;",
            "namespace Foo;",
            "",
        ] {
            assert!(UsingDirective::parse(line).is_none(), "should reject {:?}", line);
        }
    }

    #[test]
    fn test_identity_is_text() {
        let a = UsingDirective::parse("using System;").unwrap();
        let b = UsingDirective::parse("    using System;").unwrap();
        let c = UsingDirective::parse("using  System;").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_global_entry_and_strip() {
        let d = UsingDirective::parse("using System.Linq;").unwrap();
        assert_eq!(d.global_entry(), "global using System.Linq;");
        assert_eq!(
            strip_global_marker("global using System.Linq;"),
            Some("using System.Linq;")
        );
        assert_eq!(strip_global_marker("globalusing System.Linq;"), None);
        assert_eq!(strip_global_marker("using System.Linq;"), None);
    }
}
