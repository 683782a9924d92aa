use serde_json::Value;
use tracing::warn;

use crate::comparison::{loosely_equal, order, truthy};
use crate::errors::FilterError;
use crate::parser::{ParseError, Parser};

/// Closed predicate grammar evaluated against one candidate node.
///
/// `&&` and `||` fold strictly left to right with no precedence between them:
/// `a || b && c` means `(a || b) && c`. Parentheses group explicitly.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Predicate {
    Comparison {
        op: CmpOp,
        left: Operand,
        right: Operand,
    },
    Containment {
        field: String,
        needle: String,
    },
    Truthy(Operand),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    FieldRef(String), // @.name
    Literal(Value),   // 'abc', "abc", 12, 8.95
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CmpOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CmpOp {
    // Two-character operators first so `<=` is not read as `<`.
    const ALL: [CmpOp; 6] = [
        CmpOp::Eq,
        CmpOp::Ne,
        CmpOp::Lte,
        CmpOp::Gte,
        CmpOp::Lt,
        CmpOp::Gt,
    ];

    fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Lte => "<=",
            CmpOp::Gt => ">",
            CmpOp::Gte => ">=",
        }
    }
}

static EMPTY: Value = Value::String(String::new());

/// Evaluate a filter expression against a node. Parse or evaluation failures
/// are logged and count as "no match".
pub fn evaluate_filter(expr: &str, node: &Value) -> bool {
    match Predicate::parse(expr) {
        Ok(predicate) => predicate.matches(expr, node),
        Err(e) => {
            warn!(expr, %node, error = %e, "filter evaluation failed");
            false
        }
    }
}

impl Predicate {
    pub(crate) fn parse(expr: &str) -> Result<Self, FilterError> {
        let mut parser = Parser::new(expr);
        let predicate = parse_chain(&mut parser)?;
        parser.skip_ws();
        if !parser.eof() {
            return Err(ParseError::InvalidSyntax(format!(
                "trailing input `{}`",
                parser.rest()
            ))
            .into());
        }
        Ok(predicate)
    }

    /// Fail-closed wrapper around [`Predicate::evaluate`].
    pub(crate) fn matches(&self, expr: &str, node: &Value) -> bool {
        self.evaluate(node).unwrap_or_else(|e| {
            warn!(expr, %node, error = %e, "filter evaluation failed");
            false
        })
    }

    pub(crate) fn evaluate(&self, node: &Value) -> Result<bool, FilterError> {
        match self {
            Predicate::Comparison { op, left, right } => {
                let (a, b) = (left.resolve(node), right.resolve(node));
                Ok(match op {
                    CmpOp::Eq => loosely_equal(a, b),
                    CmpOp::Ne => !loosely_equal(a, b),
                    CmpOp::Lt => order(op.symbol(), a, b)?.is_lt(),
                    CmpOp::Lte => order(op.symbol(), a, b)?.is_le(),
                    CmpOp::Gt => order(op.symbol(), a, b)?.is_gt(),
                    CmpOp::Gte => order(op.symbol(), a, b)?.is_ge(),
                })
            }
            Predicate::Containment { field, needle } => {
                Ok(match resolve_field(field, node) {
                    Value::String(s) => s.contains(needle.as_str()),
                    other => other.to_string().contains(needle.as_str()),
                })
            }
            Predicate::Truthy(op) => Ok(truthy(op.resolve(node))),
            Predicate::And(l, r) => Ok(l.evaluate(node)? && r.evaluate(node)?),
            Predicate::Or(l, r) => Ok(l.evaluate(node)? || r.evaluate(node)?),
        }
    }
}

impl Operand {
    fn resolve<'a>(&'a self, node: &'a Value) -> &'a Value {
        match self {
            Operand::FieldRef(name) => resolve_field(name, node),
            Operand::Literal(v) => v,
        }
    }
}

// Missing fields and non-object nodes resolve to "" rather than null.
fn resolve_field<'a>(name: &str, node: &'a Value) -> &'a Value {
    node.as_object()
        .and_then(|m| m.get(name))
        .unwrap_or(&EMPTY)
}

fn parse_chain(parser: &mut Parser) -> Result<Predicate, ParseError> {
    let mut left = parse_term(parser)?;
    loop {
        parser.skip_ws();
        if parser.consume_str("&&") {
            let right = parse_term(parser)?;
            left = Predicate::And(Box::new(left), Box::new(right));
        } else if parser.consume_str("||") {
            let right = parse_term(parser)?;
            left = Predicate::Or(Box::new(left), Box::new(right));
        } else {
            break;
        }
    }
    Ok(left)
}

fn parse_term(parser: &mut Parser) -> Result<Predicate, ParseError> {
    parser.skip_ws();
    if parser.consume_char('(') {
        let inner = parse_chain(parser)?;
        parser.skip_ws();
        parser.expect(')')?;
        return Ok(inner);
    }
    let left = parse_operand(parser)?;
    parser.skip_ws();
    if parser.consume_str("contains") {
        let Operand::FieldRef(field) = left else {
            return Err(ParseError::InvalidSyntax(
                "`contains` expects a field reference on the left".into(),
            ));
        };
        parser.skip_ws();
        let needle = parser.parse_quoted_string()?;
        return Ok(Predicate::Containment { field, needle });
    }
    if let Some(op) = CmpOp::ALL.into_iter().find(|op| parser.consume_str(op.symbol())) {
        let right = parse_operand(parser)?;
        return Ok(Predicate::Comparison { op, left, right });
    }
    Ok(Predicate::Truthy(left))
}

fn parse_operand(parser: &mut Parser) -> Result<Operand, ParseError> {
    parser.skip_ws();
    match parser.peek_char() {
        Some('@') => {
            parser.consume_char('@');
            parser.expect('.')?;
            Ok(Operand::FieldRef(parser.parse_identifier()?))
        }
        Some('"') | Some('\'') => Ok(Operand::Literal(Value::String(
            parser.parse_quoted_string()?,
        ))),
        Some(c) if c == '-' || c.is_ascii_digit() => {
            Ok(Operand::Literal(parser.parse_number_literal()?))
        }
        _ => Err(ParseError::InvalidSyntax(format!(
            "invalid operand at `{}`",
            parser.rest()
        ))),
    }
}
