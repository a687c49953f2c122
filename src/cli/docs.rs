//! Documentation content for the pmql CLI

use super::CliError;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTopic {
    Syntax,
    Operators,
    Arithmetic,
    Sql,
    Errors,
}

impl DocTopic {
    /// Parse topic name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "query" | "queries" => Some(Self::Syntax),
            "operators" | "ops" | "comparators" => Some(Self::Operators),
            "arithmetic" | "math" | "eval" => Some(Self::Arithmetic),
            "sql" | "render" | "bindings" => Some(Self::Sql),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"PMQL DOCUMENTATION

PMQL is a small filter language. A query compares record fields against
literal values and joins comparisons with AND / OR. Literals never become
part of the generated SQL; they are bound as parameters.

DOCUMENTATION TOPICS

  syntax            Fields, literals, grouping and precedence
  operators         Comparators and logical connectives
  arithmetic        Integer arithmetic mode (pmql eval)
  sql               How compiled queries render to parameterized SQL
  errors            Syntax and evaluation errors

QUICK REFERENCE

  foo = "bar"                       Equality
  data.first_name = "Taylor"        Nested field
  age >= 18 AND name LIKE "A%"      Conjunction
  a = 1 OR (b = 2 AND c = 3)        Explicit grouping

Run 'pmql docs <topic>' for detailed documentation.
"#
}

/// Get documentation for a specific topic
pub fn get_doc_topic(name: &str) -> Result<&'static str, CliError> {
    match DocTopic::from_name(name) {
        Some(DocTopic::Syntax) => Ok(SYNTAX_DOC),
        Some(DocTopic::Operators) => Ok(OPERATORS_DOC),
        Some(DocTopic::Arithmetic) => Ok(ARITHMETIC_DOC),
        Some(DocTopic::Sql) => Ok(SQL_DOC),
        Some(DocTopic::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownTopic(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Queries

COMPARISON
  <field> <comparator> <literal>

    Example:
      Query:  foo = "bar"

FIELDS
  Letters, digits and underscores, starting with a letter or underscore.
  Dots separate nested segments.

    Example:
      data.first_name     reads record["data"]["first_name"]

    Constraints:
      - No empty segments ("a..b" and "a." are errors)
      - Field names are case-sensitive

LITERALS
  "text"      String in double quotes. \" and \\ are the only escapes.
  42          Integer (digits only)

GROUPING AND PRECEDENCE
  AND binds tighter than OR. Equal precedence groups left to right.

    a = 1 AND b = 2 OR c = 3 AND d = 4
      means (a = 1 AND b = 2) OR (c = 3 AND d = 4)

  Parentheses override the default grouping:

    a = 1 AND (b = 2 OR c = 3)
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

COMPARATORS
  =        Equal
  !=       Not equal
  <  <=    Less than, less than or equal
  >  >=    Greater than, greater than or equal
  LIKE     Wildcard match: % any run of characters, _ exactly one
           The pattern must be a string.

CONNECTIVES
  AND      Both sides must match
  OR       Either side must match

  Keywords are upper-case. "and" is an ordinary field name.
"#;

const ARITHMETIC_DOC: &str = r#"ARITHMETIC

  pmql eval '<expression>'

  Integers combined with + - * / and parentheses.
  * and / bind tighter than + and -; equal precedence groups left to right.
  Division truncates toward zero.

    Examples:
      1+1          => 2
      2*(1+5)      => 12
      7/2          => 3

  Division by zero and 64-bit overflow are evaluation errors.
"#;

const SQL_DOC: &str = r#"SQL RENDERING

  pmql compile '<query>' [--dialect sqlite|postgres]

  Prints the clause, its bindings and the predicate tree as JSON.

    Query:    foo = "bar" AND cat = "dog"
    SQL:      ("foo" = ? and "cat" = ?)
    Bindings: ["bar", "dog"]

NESTED FIELDS
  sqlite     json_extract("data", '$."first_name"')
  postgres   "data"->>'first_name'

PLACEHOLDERS
  sqlite     ?
  postgres   $1, $2, ... in binding order
"#;

const ERRORS_DOC: &str = r#"ERRORS

SYNTAX ERRORS
  Reported with the 0-based character position of the problem.
  Nothing is executed when a query has a syntax error.

    data.first_name = "Taylor""
      syntax error at position 26: unexpected quote after string literal

    foo = "bar" cat = "dog"
      syntax error at position 12: unexpected 'cat' after complete expression

EVALUATION ERRORS
  Arithmetic only: division by zero and integer overflow.
"#;
