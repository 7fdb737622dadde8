//! Rules are pure comparisons between expressions over candidate fields. They are used both to
//! filter single candidates against phase requirements and to check compatibility between the
//! candidates of one combination.

#[cfg(test)]
#[path = "../../tests/unit/models/rules_test.rs"]
mod rules_test;

use crate::models::common::{Float, Value};
use crate::models::{Equipment, EquipmentAttr, Port, PortAttr, Vessel, VesselAttr};
use crate::utils::{GenericResult, is_close};
use std::fmt;

/// Specifies which kind of candidate a field belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
    /// A vessel.
    Vessel,
    /// An equipment item.
    Equipment,
    /// A port terminal.
    Port,
}

impl Subject {
    fn name(&self) -> &'static str {
        match self {
            Subject::Vessel => "vessel",
            Subject::Equipment => "equipment",
            Subject::Port => "port",
        }
    }
}

/// A reference to a candidate field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// A vessel attribute.
    Vessel(VesselAttr),
    /// An equipment attribute.
    Equipment(EquipmentAttr),
    /// A port attribute.
    Port(PortAttr),
    /// A kind of candidate (port id for ports).
    Kind(Subject),
}

impl Field {
    /// Parses field reference in `subject.attribute` notation, e.g. `vessel.deck_space`.
    pub fn parse(text: &str) -> Option<Field> {
        let (subject, attr) = text.split_once('.')?;
        match (subject, attr) {
            ("vessel", "kind") => Some(Field::Kind(Subject::Vessel)),
            ("equipment", "kind") => Some(Field::Kind(Subject::Equipment)),
            ("port", "id") => Some(Field::Kind(Subject::Port)),
            ("vessel", attr) => VesselAttr::from_name(attr).map(Field::Vessel),
            ("equipment", attr) => EquipmentAttr::from_name(attr).map(Field::Equipment),
            ("port", attr) => PortAttr::from_name(attr).map(Field::Port),
            _ => None,
        }
    }

    /// Returns a subject of the field.
    pub fn subject(&self) -> Subject {
        match self {
            Field::Vessel(_) => Subject::Vessel,
            Field::Equipment(_) => Subject::Equipment,
            Field::Port(_) => Subject::Port,
            Field::Kind(subject) => *subject,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Vessel(attr) => write!(f, "vessel.{attr}"),
            Field::Equipment(attr) => write!(f, "equipment.{attr}"),
            Field::Port(attr) => write!(f, "port.{attr}"),
            Field::Kind(Subject::Port) => write!(f, "port.id"),
            Field::Kind(subject) => write!(f, "{}.kind", subject.name()),
        }
    }
}

/// Provides values of fields.
pub trait FieldSource {
    /// Returns a field value or `None` when the field is missing for the source.
    fn resolve(&self, field: &Field) -> Option<Value>;
}

/// A field source which combines candidates bound together in one combination.
#[derive(Clone, Copy, Default)]
pub struct RuleContext<'a> {
    /// A vessel under evaluation.
    pub vessel: Option<&'a Vessel>,
    /// An equipment under evaluation.
    pub equipment: Option<&'a Equipment>,
    /// A port under evaluation.
    pub port: Option<&'a Port>,
}

impl FieldSource for RuleContext<'_> {
    fn resolve(&self, field: &Field) -> Option<Value> {
        match field.subject() {
            Subject::Vessel => self.vessel.and_then(|vessel| vessel.resolve(field)),
            Subject::Equipment => self.equipment.and_then(|equipment| equipment.resolve(field)),
            Subject::Port => self.port.and_then(|port| port.resolve(field)),
        }
    }
}

/// An arithmetic operator used to compose expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    /// Addition.
    Plus,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
}

impl ArithOp {
    fn apply(&self, left: Float, right: Float) -> Option<Float> {
        match self {
            ArithOp::Plus => Some(left + right),
            ArithOp::Mul => Some(left * right),
            ArithOp::Div if right == 0. => None,
            ArithOp::Div => Some(left / right),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Plus => "+",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// A comparison operator which terminates a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    /// Left side is greater or equal to the right one.
    Sup,
    /// Left side is less or equal to the right one.
    Inf,
    /// Both sides are equal.
    Equal,
}

impl Operator {
    fn symbol(&self) -> &'static str {
        match self {
            Operator::Sup => ">=",
            Operator::Inf => "<=",
            Operator::Equal => "==",
        }
    }
}

/// Explains why an expression cannot be evaluated.
#[derive(Clone, Debug, PartialEq)]
pub enum Unresolved {
    /// A field is missing or undefined.
    Missing(Field),
    /// Division by zero.
    DivisionByZero,
    /// Arithmetic or ordering over textual values.
    TypeMismatch,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::Missing(field) => write!(f, "missing field '{field}'"),
            Unresolved::DivisionByZero => write!(f, "division by zero"),
            Unresolved::TypeMismatch => write!(f, "type mismatch"),
        }
    }
}

/// An expression over candidate fields.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A field reference.
    Field(Field),
    /// A constant.
    Const(Value),
    /// A binary arithmetic composition.
    Binary(ArithOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates a field reference expression.
    pub fn field(field: Field) -> Self {
        Expr::Field(field)
    }

    /// Creates a numeric constant expression.
    pub fn number(value: Float) -> Self {
        Expr::Const(Value::Number(value))
    }

    /// Creates a binary expression.
    pub fn binary(op: ArithOp, left: Expr, right: Expr) -> Self {
        Expr::Binary(op, Box::new(left), Box::new(right))
    }

    /// Evaluates expression using given field source.
    pub fn evaluate(&self, source: &dyn FieldSource) -> Result<Value, Unresolved> {
        match self {
            Expr::Field(field) => source.resolve(field).ok_or(Unresolved::Missing(*field)),
            Expr::Const(value) => Ok(value.clone()),
            Expr::Binary(op, left, right) => {
                let left = left.evaluate(source)?.as_number().ok_or(Unresolved::TypeMismatch)?;
                let right = right.evaluate(source)?.as_number().ok_or(Unresolved::TypeMismatch)?;

                op.apply(left, right).map(Value::Number).ok_or(Unresolved::DivisionByZero)
            }
        }
    }

    /// Returns a field if expression is a plain field reference.
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Expr::Field(field) => Some(field),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Field(field) => write!(f, "{field}"),
            Expr::Const(value) => write!(f, "{value}"),
            Expr::Binary(op, left, right) => write!(f, "({left} {} {right})", op.symbol()),
        }
    }
}

/// A result of rule check.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleCheck {
    /// Rule is satisfied.
    Pass,
    /// Rule is violated.
    Fail,
    /// Rule cannot be evaluated.
    Unresolved(Unresolved),
}

/// A comparison between two expressions.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    /// Left side expression.
    pub left: Expr,
    /// Comparison operator.
    pub op: Operator,
    /// Right side expression.
    pub right: Expr,
}

impl Rule {
    /// Creates a new instance of `Rule`.
    pub fn new(left: Expr, op: Operator, right: Expr) -> Self {
        Self { left, op, right }
    }

    /// Creates a rule from a token chain: operands joined by arithmetic operators, folded left to
    /// right without precedence, one comparison operator, then the right side chain.
    pub fn from_tokens(tokens: Vec<Token>) -> GenericResult<Self> {
        let position = tokens
            .iter()
            .position(|token| matches!(token, Token::Compare(_)))
            .ok_or_else(|| "rule has no comparison operator".to_string())?;

        let mut tokens = tokens;
        let right = tokens.split_off(position + 1);
        let op = match tokens.pop() {
            Some(Token::Compare(op)) => op,
            _ => return Err("rule has no comparison operator".into()),
        };

        if right.iter().any(|token| matches!(token, Token::Compare(_))) {
            return Err("rule has more than one comparison operator".into());
        }

        Ok(Rule::new(fold_tokens(tokens)?, op, fold_tokens(right)?))
    }

    /// Checks rule against given field source.
    pub fn check(&self, source: &dyn FieldSource) -> RuleCheck {
        let (left, right) = match (self.left.evaluate(source), self.right.evaluate(source)) {
            (Ok(left), Ok(right)) => (left, right),
            (Err(reason), _) | (_, Err(reason)) => return RuleCheck::Unresolved(reason),
        };

        let is_satisfied = match (self.op, &left, &right) {
            (Operator::Equal, Value::Number(left), Value::Number(right)) => is_close(*left, *right),
            (Operator::Equal, Value::Text(left), Value::Text(right)) => left == right,
            (Operator::Equal, _, _) => false,
            (Operator::Sup, Value::Number(left), Value::Number(right)) => *left >= *right || is_close(*left, *right),
            (Operator::Inf, Value::Number(left), Value::Number(right)) => *left <= *right || is_close(*left, *right),
            _ => return RuleCheck::Unresolved(Unresolved::TypeMismatch),
        };

        if is_satisfied { RuleCheck::Pass } else { RuleCheck::Fail }
    }

    /// Returns a rule where the given amount is added to the side which consumes a capacity.
    pub fn with_consumer_offset(&self, side: ConsumerSide, amount: Float) -> Rule {
        let offset = |expr: &Expr| Expr::binary(ArithOp::Plus, expr.clone(), Expr::number(amount));

        match side {
            ConsumerSide::Left => Rule::new(offset(&self.left), self.op, self.right.clone()),
            ConsumerSide::Right => Rule::new(self.left.clone(), self.op, offset(&self.right)),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op.symbol(), self.right)
    }
}

/// Specifies which side of a rule consumes a capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsumerSide {
    /// Left side.
    Left,
    /// Right side.
    Right,
}

/// A token of a rule chain as it comes from external rule sets.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A field reference.
    Field(Field),
    /// A constant.
    Const(Value),
    /// An arithmetic operator: `plus`, `mul` or `div`.
    Arith(ArithOp),
    /// A terminal comparison: `sup`, `inf` or `equal`.
    Compare(Operator),
}

impl Token {
    /// Parses a textual token. Unknown words which do not look like field references are kept
    /// as textual constants.
    pub fn parse(text: &str) -> GenericResult<Token> {
        let token = match text {
            "plus" => Token::Arith(ArithOp::Plus),
            "mul" => Token::Arith(ArithOp::Mul),
            "div" => Token::Arith(ArithOp::Div),
            "sup" => Token::Compare(Operator::Sup),
            "inf" => Token::Compare(Operator::Inf),
            "equal" => Token::Compare(Operator::Equal),
            text if text.starts_with("vessel.") || text.starts_with("equipment.") || text.starts_with("port.") => {
                Token::Field(Field::parse(text).ok_or_else(|| format!("unknown field: '{text}'"))?)
            }
            text => match text.parse::<Float>() {
                Ok(value) => Token::Const(Value::Number(value)),
                Err(_) => Token::Const(Value::Text(text.to_string())),
            },
        };

        Ok(token)
    }
}

fn fold_tokens(tokens: Vec<Token>) -> GenericResult<Expr> {
    let mut tokens = tokens.into_iter();

    let mut expr = match tokens.next() {
        Some(token) => into_operand(token)?,
        None => return Err("rule side has no operands".into()),
    };

    while let Some(token) = tokens.next() {
        let op = match token {
            Token::Arith(op) => op,
            token => return Err(format!("expected arithmetic operator, got: '{token:?}'").into()),
        };
        let operand = tokens.next().ok_or_else(|| "arithmetic operator has no right operand".to_string())?;

        expr = Expr::binary(op, expr, into_operand(operand)?);
    }

    Ok(expr)
}

fn into_operand(token: Token) -> GenericResult<Expr> {
    match token {
        Token::Field(field) => Ok(Expr::Field(field)),
        Token::Const(value) => Ok(Expr::Const(value)),
        token => Err(format!("expected field or constant, got: '{token:?}'").into()),
    }
}
