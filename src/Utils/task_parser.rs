/// parse task documents with structure like " title1 key1: value1, value2 key2: value2 title2 key3: value3"
/// which have titles and pairs key-vector of values. Values may be double-quoted so they can contain
/// spaces and commas ( expression: "sin(x) + x^2" ). Lines starting with //, #, % or ; are comments.
///
/// A template of expected titles and keys can be given: every expected key is present in the result
/// (None when absent from the document) and any title or key outside the template is an error.
use crate::numerical::integration_errors::IntegrationError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{alpha1, alphanumeric1, char, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

pub type SectionMap = HashMap<String, Option<Vec<Value>>>;
pub type DocumentMap = HashMap<String, SectionMap>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    /// any numeric value; integers are widened
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn to_string_value(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Float(f) => f.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

fn parse_word(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(parser, String::from).parse(input)
}

/// Parses a title (word characters without spaces), trailing whitespace is dropped
pub fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, result) = parse_word(input)?;
    Ok((input.trim(), result))
}

/// Parses a key (word characters without spaces)
pub fn parse_key(input: &str) -> IResult<&str, String> {
    parse_word(input)
}

fn typed_value(s: &str) -> Value {
    if let Ok(val) = s.parse::<i64>() {
        Value::Integer(val)
    } else if let Ok(val) = s.parse::<f64>() {
        Value::Float(val)
    } else if let Ok(val) = s.parse::<bool>() {
        Value::Boolean(val)
    } else {
        Value::String(s.to_string())
    }
}

/// "quoted text" is always a string, whatever it contains
fn parse_quoted_value(input: &str) -> IResult<&str, Value> {
    let quoted = delimited(char('"'), take_while(|c: char| c != '"'), char('"'));
    map(quoted, |s: &str| Value::String(s.to_string())).parse(input)
}

/// bare value ends at a comma, whitespace or a semicolon
fn parse_bare_value(input: &str) -> IResult<&str, Value> {
    let bare = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\r' | '\n' | ';' | '"'));
    map(bare, typed_value).parse(input)
}

pub fn parse_value(input: &str) -> IResult<&str, Value> {
    alt((parse_quoted_value, parse_bare_value)).parse(input)
}

pub fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let (input, _) = multispace0(input)?;
    let separator_coma = delimited(space0, tag(","), space0);
    separated_list0(separator_coma, parse_value).parse(input)
}

/// Parses a key-value pair where value is a list
pub fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let (input, result) =
        separated_pair(parse_key, colon_separator, parse_value_list).parse(input)?;
    Ok((input.trim(), result))
}

/// Parses a section with a title and one or more key-value pairs
pub fn parse_section(input: &str) -> IResult<&str, (String, HashMap<String, Vec<Value>>)> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, _) = multispace0(input)?;
    let (input, pairs) = many1(terminated(parse_key_value_pair, space0)).parse(input)?;
    Ok((input, (title, pairs.into_iter().collect())))
}

/// Filters out comment lines (starting with //, #, %, or ;) and blank lines
pub fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the sections of a comment-free document into a HashMap
pub fn parse_document(input: &str) -> IResult<&str, DocumentMap> {
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    let (input, sections) = parser.parse(input)?;
    let result = sections
        .into_iter()
        .map(|(title, section)| {
            let section_map = section
                .into_iter()
                .map(|(key, values)| (key, Some(values)))
                .collect::<SectionMap>();
            (title, section_map)
        })
        .collect();
    Ok((input, result))
}

fn apply_template(
    mut parsed: DocumentMap,
    template: &DocumentMap,
) -> Result<DocumentMap, IntegrationError> {
    for (title, section) in &parsed {
        let Some(expected) = template.get(title) else {
            return Err(IntegrationError::TaskFile(format!("unknown section '{}'", title)));
        };
        if let Some(key) = section.keys().find(|key| !expected.contains_key(*key)) {
            return Err(IntegrationError::TaskFile(format!(
                "unknown key '{}' in section '{}'",
                key, title
            )));
        }
    }
    for (title, keys_map) in template {
        let section_map = parsed.entry(title.clone()).or_default();
        for key in keys_map.keys() {
            section_map.entry(key.clone()).or_insert(None);
        }
    }
    Ok(parsed)
}

/// Strips comments and parses the whole document; leftovers are an error.
pub fn parse_document_as(
    input: &str,
    template: Option<&DocumentMap>,
) -> Result<DocumentMap, IntegrationError> {
    let filtered = filter_comments(input);
    let parsed = if filtered.trim().is_empty() {
        DocumentMap::new()
    } else {
        match parse_document(&filtered) {
            Ok((remaining, parsed)) => {
                if !remaining.trim().is_empty() {
                    return Err(IntegrationError::TaskFile(format!(
                        "failed to parse entire document, remaining: '{}'",
                        remaining.trim()
                    )));
                }
                parsed
            }
            Err(e) => return Err(IntegrationError::TaskFile(format!("parsing error: {:?}", e))),
        }
    };
    match template {
        Some(template) => apply_template(parsed, template),
        None => Ok(parsed),
    }
}

/// template with the given titles and keys, every value None
pub fn template_from(sections: &[(&str, &[&str])]) -> DocumentMap {
    sections
        .iter()
        .map(|(title, keys)| {
            let section = keys.iter().map(|key| (key.to_string(), None)).collect();
            (title.to_string(), section)
        })
        .collect()
}

/// Parsed document with typed access to single values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskDocument {
    map: DocumentMap,
}

impl TaskDocument {
    pub fn parse(input: &str, template: Option<&DocumentMap>) -> Result<Self, IntegrationError> {
        Ok(TaskDocument {
            map: parse_document_as(input, template)?,
        })
    }

    pub fn from_file<P: AsRef<Path>>(
        path: P,
        template: Option<&DocumentMap>,
    ) -> Result<Self, IntegrationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            IntegrationError::TaskFile(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&contents, template)
    }

    pub fn as_map(&self) -> &DocumentMap {
        &self.map
    }

    pub fn values(&self, title: &str, key: &str) -> Option<&[Value]> {
        self.map.get(title)?.get(key)?.as_deref()
    }

    fn single(&self, title: &str, key: &str) -> Result<Option<&Value>, IntegrationError> {
        match self.values(title, key) {
            None => Ok(None),
            Some([value]) => Ok(Some(value)),
            Some(values) => Err(IntegrationError::TaskFile(format!(
                "{}.{} expects one value, got {}",
                title,
                key,
                values.len()
            ))),
        }
    }

    fn ill_typed(title: &str, key: &str, expected: &str, value: &Value) -> IntegrationError {
        IntegrationError::TaskFile(format!(
            "{}.{} must be {}, got '{}'",
            title, key, expected, value
        ))
    }

    pub fn get_f64(&self, title: &str, key: &str) -> Result<Option<f64>, IntegrationError> {
        self.single(title, key)?
            .map(|v| v.as_number().ok_or_else(|| Self::ill_typed(title, key, "a number", v)))
            .transpose()
    }

    pub fn get_u64(&self, title: &str, key: &str) -> Result<Option<u64>, IntegrationError> {
        self.single(title, key)?
            .map(|v| {
                v.as_integer()
                    .and_then(|i| u64::try_from(i).ok())
                    .ok_or_else(|| Self::ill_typed(title, key, "a non-negative integer", v))
            })
            .transpose()
    }

    pub fn get_usize(&self, title: &str, key: &str) -> Result<Option<usize>, IntegrationError> {
        self.get_u64(title, key)?
            .map(|v| {
                usize::try_from(v).map_err(|_| {
                    IntegrationError::TaskFile(format!("{}.{} is too large: {}", title, key, v))
                })
            })
            .transpose()
    }

    pub fn get_bool(&self, title: &str, key: &str) -> Result<Option<bool>, IntegrationError> {
        self.single(title, key)?
            .map(|v| v.as_boolean().ok_or_else(|| Self::ill_typed(title, key, "true or false", v)))
            .transpose()
    }

    /// single value as text, numbers included
    pub fn get_string(&self, title: &str, key: &str) -> Result<Option<String>, IntegrationError> {
        Ok(self.single(title, key)?.map(Value::to_string_value))
    }

    pub fn get_strings(&self, title: &str, key: &str) -> Option<Vec<String>> {
        self.values(title, key)
            .map(|values| values.iter().map(Value::to_string_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_value() {
        let (remaining, value) = parse_value("\"sin(x) + x^2\" upper: 1").unwrap();
        assert_eq!(value, Value::String("sin(x) + x^2".to_string()));
        assert_eq!(remaining, " upper: 1");
        let (_, value) = parse_value("\"42\"").unwrap();
        assert_eq!(value, Value::String("42".to_string()));
    }

    #[test]
    fn test_typed_values() {
        assert_eq!(typed_value("-3"), Value::Integer(-3));
        assert_eq!(typed_value("3.14159"), Value::Float(3.14159));
        assert_eq!(typed_value("1e-3"), Value::Float(1e-3));
        assert_eq!(typed_value("false"), Value::Boolean(false));
        assert_eq!(typed_value("monte-carlo"), Value::String("monte-carlo".to_string()));
        assert_eq!(Value::Integer(2).as_number(), Some(2.0));
        assert_eq!(Value::Boolean(true).as_number(), None);
    }

    #[test]
    fn test_task_document_getters() {
        let doc = TaskDocument::parse("bounds lower: 0 upper: 2.5 \n run seed: 42", None).unwrap();
        assert_eq!(doc.get_f64("bounds", "lower").unwrap(), Some(0.0));
        assert_eq!(doc.get_f64("bounds", "upper").unwrap(), Some(2.5));
        assert_eq!(doc.get_u64("run", "seed").unwrap(), Some(42));
        assert_eq!(doc.get_f64("bounds", "missing").unwrap(), None);
        assert!(doc.get_usize("bounds", "upper").is_err());
    }

    #[test]
    fn test_empty_document() {
        let doc = TaskDocument::parse("// nothing here\n\n# still nothing", None).unwrap();
        assert!(doc.as_map().is_empty());
    }
}
