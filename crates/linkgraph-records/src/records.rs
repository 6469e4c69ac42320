//! Record types and their line grammars.
//!
//! | Kind | Line shape | Example |
//! |------|------------|---------|
//! | Vertex | `<token> <name>` | `17 Buprestoidea` |
//! | Edge | `<tail> <head>` | `17 42` |
//! | Category | `Category:<name>; <id> <id> ...` | `Category:Beetles; 17 42` |

use std::fmt;

/// The three record kinds a link graph is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Article names.
    Vertex,
    /// Directed links between articles.
    Edge,
    /// Named groups of articles.
    Category,
}

impl RecordKind {
    /// Plural label used in progress output ("vertices", "edges", "categories").
    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Vertex => "vertices",
            Self::Edge => "edges",
            Self::Category => "categories",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Edge => write!(f, "edge"),
            Self::Category => write!(f, "category"),
        }
    }
}

/// A record that can be parsed from a single line.
pub trait Record: Sized {
    /// The kind of record, used in errors and progress output.
    const KIND: RecordKind;

    /// Parses one non-blank line.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the line does not match the grammar.
    fn parse(line: &str) -> Result<Self, String>;

    /// The record standing in for a blank or unparseable line.
    ///
    /// Kinds whose ids are line positions return `Some`, so that every line
    /// keeps its id. Kinds returning `None` drop such lines.
    fn placeholder() -> Option<Self> {
        None
    }
}

/// An article name. Its vertex id is its line position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRecord {
    /// Display name of the article.
    pub name: String,
}

impl Record for VertexRecord {
    const KIND: RecordKind = RecordKind::Vertex;

    /// Everything after the first space is the name, which may be empty. A
    /// line without a space is taken whole.
    fn parse(line: &str) -> Result<Self, String> {
        let name = line.split_once(' ').map_or(line, |(_, rest)| rest);
        Ok(Self {
            name: name.to_string(),
        })
    }

    fn placeholder() -> Option<Self> {
        Some(Self {
            name: String::new(),
        })
    }
}

/// A directed link `tail -> head` between two vertex ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Id of the linking article.
    pub tail: usize,
    /// Id of the linked article.
    pub head: usize,
}

impl Record for EdgeRecord {
    const KIND: RecordKind = RecordKind::Edge;

    fn parse(line: &str) -> Result<Self, String> {
        let mut fields = line.split_whitespace();
        let (Some(tail), Some(head), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err("expected exactly two vertex ids".to_string());
        };
        Ok(Self {
            tail: parse_id(tail)?,
            head: parse_id(head)?,
        })
    }
}

/// A named category and the vertex ids that belong to it.
///
/// Its category id is `1 + ` its line position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    /// Category label.
    pub name: String,
    /// Member vertex ids, in file order.
    pub members: Vec<usize>,
}

impl Record for CategoryRecord {
    const KIND: RecordKind = RecordKind::Category;

    fn parse(line: &str) -> Result<Self, String> {
        let Some((_, rest)) = line.split_once(':') else {
            return Err("expected `Category:<name>;` prefix".to_string());
        };
        let (name, members) = rest.split_once(';').unwrap_or((rest, ""));
        if name.trim().is_empty() {
            return Err("missing category name".to_string());
        }

        let members = members
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(parse_id)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_string(),
            members,
        })
    }

    fn placeholder() -> Option<Self> {
        Some(Self {
            name: String::new(),
            members: Vec::new(),
        })
    }
}

fn parse_id(token: &str) -> Result<usize, String> {
    token
        .parse::<usize>()
        .map_err(|e| format!("invalid vertex id `{token}`: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0 Alpha", "Alpha")]
    #[case("12 Two Words", "Two Words")]
    #[case("Solo", "Solo")]
    #[case("#  Leading_space", " Leading_space")]
    fn vertex_name_is_text_after_first_space(#[case] line: &str, #[case] expected: &str) {
        let record = VertexRecord::parse(line).unwrap();
        assert_eq!(record.name, expected);
    }

    #[rstest]
    #[case("7 ", "")]
    #[case("7    ", "   ")]
    fn vertex_without_name_keeps_an_empty_name(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(VertexRecord::parse(line).unwrap().name, expected);
    }

    #[test]
    fn positional_kinds_have_placeholders() {
        assert_eq!(VertexRecord::placeholder().unwrap().name, "");
        let category = CategoryRecord::placeholder().unwrap();
        assert!(category.name.is_empty() && category.members.is_empty());
        assert!(EdgeRecord::placeholder().is_none());
    }

    #[rstest]
    #[case("0 1", 0, 1)]
    #[case("  15\t3  ", 15, 3)]
    #[case("4 4", 4, 4)]
    fn edge_parses_two_ids(#[case] line: &str, #[case] tail: usize, #[case] head: usize) {
        assert_eq!(EdgeRecord::parse(line).unwrap(), EdgeRecord { tail, head });
    }

    #[rstest]
    #[case("3")]
    #[case("3 4 5")]
    #[case("a b")]
    #[case("-1 2")]
    fn malformed_edges_are_rejected(#[case] line: &str) {
        assert!(EdgeRecord::parse(line).is_err());
    }

    #[test]
    fn category_with_space_separated_members() {
        let record = CategoryRecord::parse("Category:Buprestoidea; 301 302 303").unwrap();
        assert_eq!(record.name, "Buprestoidea");
        assert_eq!(record.members, vec![301, 302, 303]);
    }

    #[test]
    fn category_with_comma_separated_members() {
        let record = CategoryRecord::parse("Category:People_from_Worcester; 1, 5,9").unwrap();
        assert_eq!(record.name, "People_from_Worcester");
        assert_eq!(record.members, vec![1, 5, 9]);
    }

    #[rstest]
    #[case("Category:Empty;")]
    #[case("Category:Empty; ")]
    #[case("Category:Empty")]
    fn category_without_members_is_valid(#[case] line: &str) {
        let record = CategoryRecord::parse(line).unwrap();
        assert_eq!(record.name, "Empty");
        assert!(record.members.is_empty());
    }

    #[rstest]
    #[case("Buprestoidea 1 2")]
    #[case("Category:; 1 2")]
    #[case("Category:Beetles; 1 x 2")]
    fn malformed_categories_are_rejected(#[case] line: &str) {
        assert!(CategoryRecord::parse(line).is_err());
    }

    #[test]
    fn kind_labels() {
        assert_eq!(RecordKind::Vertex.to_string(), "vertex");
        assert_eq!(RecordKind::Category.plural(), "categories");
        assert_eq!(EdgeRecord::KIND, RecordKind::Edge);
    }
}
