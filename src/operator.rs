use std::fmt;

use querychain_derive::BinaryOperator;

use crate::writer::{FormatContext, FormatWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BinaryOperator)]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    Like,
    NotLike,
    Ilike,
    NotIlike,
    #[binary(ignore)]
    In,
    #[binary(ignore)]
    NotIn,
    #[binary(ignore)]
    Between,
    #[binary(ignore)]
    NotBetween,
    #[binary(ignore)]
    IsNull,
    #[binary(ignore)]
    IsNotNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    None,
    One,
    Two,
    List,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanEqual => "<=",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::Ilike => "ILIKE",
            Operator::NotIlike => "NOT ILIKE",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT BETWEEN",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    pub(crate) fn arity(&self) -> Arity {
        match self {
            Operator::IsNull | Operator::IsNotNull => Arity::None,
            Operator::Between | Operator::NotBetween => Arity::Two,
            Operator::In | Operator::NotIn => Arity::List,
            _ => Arity::One,
        }
    }
}

impl FormatWriter for Operator {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        context.writer.write_str(self.as_str())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert_eq!(Arity::One, Operator::Ilike.arity());
        assert_eq!(Arity::Two, Operator::NotBetween.arity());
        assert_eq!(Arity::List, Operator::In.arity());
        assert_eq!(Arity::None, Operator::IsNotNull.arity());
    }

    #[test]
    fn test_generated_constructors() {
        let condition = greater_than_equal("col2", 52);
        assert_eq!(
            "\"col2\" >= ?",
            condition.parameterize().unwrap().sql()
        );
        assert_eq!(
            "\"a\" NOT ILIKE ?",
            crate::expr::Condition::not_ilike("a", "%x%").parameterize().unwrap().sql()
        );
    }
}
