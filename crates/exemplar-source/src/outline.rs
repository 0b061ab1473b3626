// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Reduce Python source to a module outline.
//!
//! Only the parts doc-example discovery cares about survive: top-level
//! classes and functions, class members (methods, properties, nested
//! classes), their docstrings and lines, and the module's `__test__`
//! marker. Definitions under `if` and `try` statements are seen in every
//! branch, a later binding replacing an earlier one; dynamically created
//! definitions are not.

use std::path::Path;
use std::sync::Arc;

use tree_sitter::{Language, Node, Parser};

use crate::error::SourceError;
use crate::object::{Class, Docstring, Function, Member, Module, Object, Property};

/// Parse `source` as the module `name` read from `file`.
pub fn parse_module(name: &str, file: &Path, source: &str) -> Result<Module, SourceError> {
    let mut parser = Parser::new();
    parser
        .set_language(&Language::from(tree_sitter_python::LANGUAGE))
        .map_err(|e| SourceError::Grammar(e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| SourceError::Parse { path: file.to_path_buf() })?;

    let root = tree.root_node();
    let outliner = Outliner {
        src: source.as_bytes(),
        module: name,
        file,
    };

    let mut members = Vec::new();
    let mut test_marker = None;
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() == "expression_statement" {
            if let Some(value) = outliner.test_marker(child) {
                test_marker = Some(value);
            }
        } else {
            outliner.collect(child, None, &mut members);
        }
    }

    Ok(Module {
        name: name.to_string(),
        file: file.to_path_buf(),
        doc: outliner.docstring(root),
        members,
        test_marker,
    })
}

struct Outliner<'a> {
    src: &'a [u8],
    module: &'a str,
    file: &'a Path,
}

impl<'a> Outliner<'a> {
    fn text(&self, node: Node<'_>) -> &'a str {
        node.utf8_text(self.src).unwrap_or("")
    }

    /// The first statement of a block, if it is a plain string literal.
    fn docstring(&self, block: Node<'_>) -> Option<Docstring> {
        let mut cursor = block.walk();
        let first = block
            .named_children(&mut cursor)
            .find(|n| n.kind() != "comment")?;
        if first.kind() != "expression_statement" {
            return None;
        }
        let expr = first.named_child(0)?;
        if expr.kind() != "string" {
            return None;
        }
        Some(Docstring {
            text: string_literal(self.text(expr))?,
            line: expr.start_position().row,
        })
    }

    /// Add the definitions `node` binds to `members`, looking inside every
    /// branch of `if` and `try` statements.
    fn collect(&self, node: Node<'_>, scope: Option<&str>, members: &mut Vec<Member>) {
        match node.kind() {
            "if_statement" | "elif_clause" | "else_clause" | "try_statement" | "except_clause"
            | "finally_clause" | "block" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.collect(child, scope, members);
                }
            }
            _ => {
                if let Some(member) = self.definition(node, scope) {
                    insert_member(members, member);
                }
            }
        }
    }

    /// A class or function definition, with `scope` the enclosing class's
    /// qualified name.
    fn definition(&self, node: Node<'_>, scope: Option<&str>) -> Option<Member> {
        match node.kind() {
            "function_definition" => self.function(node, scope),
            "class_definition" => self.class(node, scope),
            "decorated_definition" => {
                let def = node.child_by_field_name("definition")?;
                let decorators = self.decorators(node);
                // `@x.setter` and friends rebind a property the getter already declared.
                if decorators.iter().any(|d| {
                    d.ends_with(".setter") || d.ends_with(".getter") || d.ends_with(".deleter")
                }) {
                    return None;
                }
                match def.kind() {
                    "function_definition"
                        if scope.is_some() && decorators.iter().any(|d| *d == "property") =>
                    {
                        self.property(def)
                    }
                    _ => self.definition(def, scope),
                }
            }
            _ => None,
        }
    }

    fn decorators(&self, node: Node<'_>) -> Vec<&'a str> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|n| n.kind() == "decorator")
            .filter_map(|n| n.named_child(0))
            .map(|expr| self.text(expr))
            .collect()
    }

    fn function(&self, node: Node<'_>, scope: Option<&str>) -> Option<Member> {
        let name = self.text(node.child_by_field_name("name")?).to_string();
        let doc = node
            .child_by_field_name("body")
            .and_then(|body| self.docstring(body));
        let function = Function {
            qualname: qualify(scope, &name),
            name: name.clone(),
            module: self.module.to_string(),
            file: self.file.to_path_buf(),
            line: node.start_position().row,
            doc,
        };
        Some(Member {
            name,
            object: Object::Function(Arc::new(function)),
        })
    }

    fn property(&self, node: Node<'_>) -> Option<Member> {
        let name = self.text(node.child_by_field_name("name")?).to_string();
        let doc = node
            .child_by_field_name("body")
            .and_then(|body| self.docstring(body));
        let property = Property {
            line: node.start_position().row,
            doc,
        };
        Some(Member {
            name,
            object: Object::Property(Arc::new(property)),
        })
    }

    fn class(&self, node: Node<'_>, scope: Option<&str>) -> Option<Member> {
        let name = self.text(node.child_by_field_name("name")?).to_string();
        let qualname = qualify(scope, &name);
        let body = node.child_by_field_name("body");

        let mut members = Vec::new();
        if let Some(body) = body {
            let mut cursor = body.walk();
            for child in body.named_children(&mut cursor) {
                self.collect(child, Some(&qualname), &mut members);
            }
        }

        let class = Class {
            name: name.clone(),
            qualname,
            module: self.module.to_string(),
            file: self.file.to_path_buf(),
            line: node.start_position().row,
            doc: body.and_then(|b| self.docstring(b)),
            members,
        };
        Some(Member {
            name,
            object: Object::Class(Arc::new(class)),
        })
    }

    /// `__test__ = <literal>` at module level.
    fn test_marker(&self, stmt: Node<'_>) -> Option<bool> {
        let assignment = stmt.named_child(0)?;
        if assignment.kind() != "assignment" {
            return None;
        }
        let left = assignment.child_by_field_name("left")?;
        if left.kind() != "identifier" || self.text(left) != "__test__" {
            return None;
        }
        let right = assignment.child_by_field_name("right")?;
        Some(self.truthiness(right))
    }

    fn truthiness(&self, node: Node<'_>) -> bool {
        match node.kind() {
            "true" => true,
            "false" | "none" => false,
            "integer" => self
                .text(node)
                .replace('_', "")
                .parse::<i64>()
                .map(|v| v != 0)
                .unwrap_or(true),
            "float" => self.text(node).parse::<f64>().map(|v| v != 0.0).unwrap_or(true),
            "string" => string_literal(self.text(node)).map_or(true, |s| !s.is_empty()),
            "dictionary" | "list" | "tuple" | "set" => node.named_child_count() > 0,
            "parenthesized_expression" => node
                .named_child(0)
                .map_or(true, |inner| self.truthiness(inner)),
            _ => true,
        }
    }
}

fn qualify(scope: Option<&str>, name: &str) -> String {
    match scope {
        Some(scope) => format!("{}.{}", scope, name),
        None => name.to_string(),
    }
}

/// Rebinding a name keeps its original position, like a class or module dict.
fn insert_member(members: &mut Vec<Member>, member: Member) {
    match members.iter_mut().find(|m| m.name == member.name) {
        Some(existing) => *existing = member,
        None => members.push(member),
    }
}

/// Value of a str literal. Bytes and f-strings are not docstrings.
fn string_literal(raw: &str) -> Option<String> {
    let quote_at = raw.find(['"', '\''])?;
    let prefix = raw[..quote_at].to_ascii_lowercase();
    if prefix.contains('b') || prefix.contains('f') {
        return None;
    }

    let body = &raw[quote_at..];
    let delim = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find(|d| body.len() >= 2 * d.len() && body.starts_with(d) && body.ends_with(d))?;
    let inner = &body[delim.len()..body.len() - delim.len()];

    if prefix.contains('r') {
        Some(inner.to_string())
    } else {
        Some(unescape(inner))
    }
}

/// Decode Python str escapes. Malformed escapes are kept as written.
fn unescape(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&next) = chars.get(i) else {
            out.push('\\');
            break;
        };
        i += 1;

        let decoded = match next {
            '\n' => continue,
            '\\' | '\'' | '"' => Some(next),
            'a' => Some('\x07'),
            'b' => Some('\x08'),
            'f' => Some('\x0c'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'v' => Some('\x0b'),
            '0'..='7' => {
                let start = i - 1;
                while i < chars.len() && i - start < 3 && chars[i].is_digit(8) {
                    i += 1;
                }
                let digits: String = chars[start..i].iter().collect();
                u32::from_str_radix(&digits, 8).ok().and_then(char::from_u32)
            }
            'x' => code_point(&chars, &mut i, 2),
            'u' => code_point(&chars, &mut i, 4),
            'U' => code_point(&chars, &mut i, 8),
            'N' => named_char(&chars, &mut i),
            _ => None,
        };
        match decoded {
            Some(ch) => out.push(ch),
            None => {
                out.push('\\');
                out.push(next);
            }
        }
    }
    out
}

/// Exactly `len` hex digits at `chars[*i..]`; `*i` only moves on success.
fn code_point(chars: &[char], i: &mut usize, len: usize) -> Option<char> {
    let digits: String = chars.get(*i..*i + len)?.iter().collect();
    if !digits.chars().all(|d| d.is_ascii_hexdigit()) {
        return None;
    }
    let ch = u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)?;
    *i += len;
    Some(ch)
}

/// `{NAME}` at `chars[*i..]`, looked up in the Unicode name table.
fn named_char(chars: &[char], i: &mut usize) -> Option<char> {
    if chars.get(*i) != Some(&'{') {
        return None;
    }
    let close = *i + chars[*i..].iter().position(|&c| c == '}')?;
    let name: String = chars[*i + 1..close].iter().collect();
    let ch = unicode_names2::character(&name)?;
    *i = close + 1;
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#""""Module docs.

>>> 1 + 1
2
"""

__test__ = False


def f():
    """Add.

    >>> f()
    3
    """
    return 3


class C:
    """A class."""

    @property
    def p(self):
        """A property.

        >>> C().p
        1
        """
        return 1

    @p.setter
    def p(self, value):
        pass

    @staticmethod
    def s():
        pass

    class Inner:
        def m(self):
            "inner method"
"#;

    fn parse() -> Module {
        parse_module("pkg.mod", Path::new("pkg/mod.py"), SOURCE).unwrap()
    }

    #[test]
    fn test_module_docstring_and_marker() {
        let module = parse();
        let doc = module.doc.as_ref().unwrap();
        assert!(doc.text.starts_with("Module docs."));
        assert!(doc.text.contains(">>> 1 + 1\n2\n"));
        assert_eq!(doc.line, 0);
        assert_eq!(module.test_marker, Some(false));
    }

    #[test]
    fn test_members_in_declaration_order() {
        let module = parse();
        let names: Vec<&str> = module.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["f", "C"]);

        let class = Object::Module(Arc::new(module)).attr("C").unwrap();
        let names: Vec<&str> = class.members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["p", "s", "Inner"]);
    }

    #[test]
    fn test_property_is_anonymous() {
        let module = Object::Module(Arc::new(parse()));
        let prop = module.attr("C").unwrap().attr("p").unwrap();
        assert!(prop.is_property());
        assert_eq!(prop.name(), None);
        assert_eq!(prop.module_name(), None);
        assert!(prop.doc().unwrap().text.contains(">>> C().p"));
    }

    #[test]
    fn test_nested_qualnames() {
        let module = Object::Module(Arc::new(parse()));
        let method = module
            .attr("C")
            .and_then(|c| c.attr("Inner"))
            .and_then(|i| i.attr("m"))
            .unwrap();
        match method {
            Object::Function(f) => {
                assert_eq!(f.qualname, "C.Inner.m");
                assert_eq!(f.module, "pkg.mod");
                assert_eq!(f.doc.as_ref().unwrap().text, "inner method");
            }
            other => panic!("expected function, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal(r#""""a\nb""""#).as_deref(), Some("a\nb"));
        assert_eq!(string_literal(r#"r'''a\nb'''"#).as_deref(), Some("a\\nb"));
        assert_eq!(string_literal("''").as_deref(), Some(""));
        assert_eq!(string_literal("b'bytes'"), None);
        assert_eq!(string_literal("f'{x}'"), None);
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"caf\xe9"), "caf\u{e9}");
        assert_eq!(unescape(r"\u00e9 \U0001F600"), "\u{e9} \u{1F600}");
        assert_eq!(unescape(r"\N{LATIN SMALL LETTER E WITH ACUTE}"), "\u{e9}");
        assert_eq!(unescape(r"\101\0\r\a\v\f\b"), "A\0\r\x07\x0b\x0c\x08");
        assert_eq!(unescape("a\\\nb"), "ab");
        assert_eq!(unescape(r"\q \xZ1 \N{NOT A NAME} \u12"), r"\q \xZ1 \N{NOT A NAME} \u12");
    }

    #[test]
    fn test_docstring_escapes_decoded() {
        let source = "def f():\n    \"\"\"\n    >>> 'caf\\xe9'\n    'caf\\xe9'\n    \"\"\"\n";
        let module = Object::Module(Arc::new(parse_module("m", Path::new("m.py"), source).unwrap()));
        let doc = module.attr("f").and_then(|f| f.doc().cloned()).unwrap();
        assert!(doc.text.contains(">>> 'caf\u{e9}'\n    'caf\u{e9}'"));
    }

    #[test]
    fn test_conditional_definitions() {
        let source = r#"
import sys

if sys.version_info >= (3,):
    def g():
        "new"
else:
    def g():
        "old"

try:
    import fast
except ImportError:
    class Fallback:
        "fallback"

        if True:
            def m(self):
                "method"
finally:
    def cleanup():
        pass
"#;
        let module = parse_module("m", Path::new("m.py"), source).unwrap();
        let names: Vec<&str> = module.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["g", "Fallback", "cleanup"]);

        let module = Object::Module(Arc::new(module));
        assert_eq!(module.attr("g").unwrap().doc().unwrap().text, "old");
        assert!(module.attr("Fallback").and_then(|c| c.attr("m")).is_some());
    }

    #[test]
    fn test_marker_truthiness() {
        let m = parse_module("m", Path::new("m.py"), "__test__ = 0\n").unwrap();
        assert_eq!(m.test_marker, Some(false));
        let m = parse_module("m", Path::new("m.py"), "__test__ = True\n").unwrap();
        assert_eq!(m.test_marker, Some(true));
        let m = parse_module("m", Path::new("m.py"), "x = 1\n").unwrap();
        assert_eq!(m.test_marker, None);
    }
}
