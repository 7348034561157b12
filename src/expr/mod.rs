use smol_str::SmolStr;

use crate::{ColumnValue, Error, IntoOperand, Operand, operator::Operator, writer::Fragment};

pub mod cond;
pub mod group;
pub mod order;
pub mod simple;

pub use cond::Conjunction;
pub use group::GroupedConditions;
pub use simple::SimpleCondition;

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Simple(SimpleCondition),
    Grouped(GroupedConditions),
}

impl Condition {
    pub(crate) fn simple<C>(column: C, operator: Operator, values: Vec<Operand>) -> Self
    where
        C: Into<SmolStr>,
    {
        Self::Simple(SimpleCondition::new(column.into(), operator, values))
    }

    pub fn in_list<C, I, V>(column: C, values: I) -> Self
    where
        C: Into<SmolStr>,
        I: IntoIterator<Item = V>,
        V: IntoOperand,
    {
        Self::simple(column, Operator::In, operands(values))
    }

    pub fn not_in_list<C, I, V>(column: C, values: I) -> Self
    where
        C: Into<SmolStr>,
        I: IntoIterator<Item = V>,
        V: IntoOperand,
    {
        Self::simple(column, Operator::NotIn, operands(values))
    }

    pub fn between<C, L, H>(column: C, low: L, high: H) -> Self
    where
        C: Into<SmolStr>,
        L: IntoOperand,
        H: IntoOperand,
    {
        Self::simple(
            column,
            Operator::Between,
            vec![low.into_operand(), high.into_operand()],
        )
    }

    pub fn not_between<C, L, H>(column: C, low: L, high: H) -> Self
    where
        C: Into<SmolStr>,
        L: IntoOperand,
        H: IntoOperand,
    {
        Self::simple(
            column,
            Operator::NotBetween,
            vec![low.into_operand(), high.into_operand()],
        )
    }

    pub fn is_null<C: Into<SmolStr>>(column: C) -> Self {
        Self::simple(column, Operator::IsNull, Vec::new())
    }

    pub fn is_not_null<C: Into<SmolStr>>(column: C) -> Self {
        Self::simple(column, Operator::IsNotNull, Vec::new())
    }

    pub fn grouped_and<I: IntoIterator<Item = Condition>>(conditions: I) -> Self {
        Self::Grouped(GroupedConditions::new(Conjunction::And, conditions))
    }

    pub fn grouped_or<I: IntoIterator<Item = Condition>>(conditions: I) -> Self {
        Self::Grouped(GroupedConditions::new(Conjunction::Or, conditions))
    }

    /// Renders the condition with `?` markers and returns the values bound
    /// to them, in order.
    pub fn parameterize(&self) -> Result<Fragment, Error> {
        match self {
            Condition::Simple(simple) => simple.parameterize(),
            Condition::Grouped(grouped) => grouped.parameterize(),
        }
    }
}

fn operands<I, V>(values: I) -> Vec<Operand>
where
    I: IntoIterator<Item = V>,
    V: IntoOperand,
{
    values.into_iter().map(IntoOperand::into_operand).collect()
}

pub trait IntoConditions {
    fn into_conditions(self) -> Vec<Condition>;
}

impl IntoConditions for Condition {
    fn into_conditions(self) -> Vec<Condition> {
        vec![self]
    }
}

impl IntoConditions for Vec<Condition> {
    fn into_conditions(self) -> Vec<Condition> {
        self
    }
}

impl<const N: usize> IntoConditions for [Condition; N] {
    fn into_conditions(self) -> Vec<Condition> {
        self.into()
    }
}

pub fn in_list<C, I, V>(column: C, values: I) -> Condition
where
    C: Into<SmolStr>,
    I: IntoIterator<Item = V>,
    V: IntoOperand,
{
    Condition::in_list(column, values)
}

pub fn not_in_list<C, I, V>(column: C, values: I) -> Condition
where
    C: Into<SmolStr>,
    I: IntoIterator<Item = V>,
    V: IntoOperand,
{
    Condition::not_in_list(column, values)
}

pub fn between<C, L, H>(column: C, low: L, high: H) -> Condition
where
    C: Into<SmolStr>,
    L: IntoOperand,
    H: IntoOperand,
{
    Condition::between(column, low, high)
}

pub fn not_between<C, L, H>(column: C, low: L, high: H) -> Condition
where
    C: Into<SmolStr>,
    L: IntoOperand,
    H: IntoOperand,
{
    Condition::not_between(column, low, high)
}

pub fn is_null<C: Into<SmolStr>>(column: C) -> Condition {
    Condition::is_null(column)
}

pub fn is_not_null<C: Into<SmolStr>>(column: C) -> Condition {
    Condition::is_not_null(column)
}

pub fn grouped_and<I: IntoIterator<Item = Condition>>(conditions: I) -> Condition {
    Condition::grouped_and(conditions)
}

pub fn grouped_or<I: IntoIterator<Item = Condition>>(conditions: I) -> Condition {
    Condition::grouped_or(conditions)
}

/// Refers to another column instead of binding a value.
pub fn column<C: Into<SmolStr>>(column_name: C) -> ColumnValue {
    ColumnValue::new(column_name)
}
