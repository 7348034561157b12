use std::fmt;

use crate::{
    Error, ErrorSlice,
    writer::{FormatContext, FormatWriter, Fragment},
};

use super::Condition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conjunction {
    And,
    Or,
}

impl FormatWriter for Conjunction {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self {
            Conjunction::And => context.writer.write_str("AND"),
            Conjunction::Or => context.writer.write_str("OR"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Conditions(Vec<(Conjunction, Condition)>);

impl Conditions {
    pub(crate) fn push(&mut self, conjunction: Conjunction, condition: Condition) {
        self.0.push((conjunction, condition));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn parameterize(&self) -> Result<Fragment, Error> {
        let mut fragment = Fragment::new();
        let mut errors = ErrorSlice::default();
        for (index, (conjunction, condition)) in self.0.iter().enumerate() {
            if index > 0 {
                fragment.push_str(" ");
                fragment.write(conjunction)?;
                fragment.push_str(" ");
            }
            match condition.parameterize() {
                Ok(child) => fragment.append(child),
                Err(err) => errors.push(err.context(format!(
                    "failed to parameterize condition #{}",
                    index + 1
                ))),
            }
        }
        errors.check()?;
        Ok(fragment)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bind, between, equals, less_than};

    use super::*;

    #[test]
    fn test_conjunctions() {
        let mut conditions = Conditions::default();
        conditions.push(Conjunction::And, equals("col1", "test"));
        conditions.push(Conjunction::Or, between_sample());
        conditions.push(Conjunction::And, less_than("col3", 4));

        let (sql, binds) = conditions.parameterize().unwrap().into_parts();
        assert_eq!(
            "\"col1\" = ? OR \"col2\" BETWEEN ? AND ? AND \"col3\" < ?",
            sql
        );
        assert_eq!(
            vec![
                Bind::String("test".into()),
                Bind::I32(1),
                Bind::I32(2),
                Bind::I32(4)
            ],
            binds
        );
    }

    fn between_sample() -> Condition {
        between("col2", 1, 2)
    }

    #[test]
    fn test_all_failures_reported() {
        let mut conditions = Conditions::default();
        conditions.push(Conjunction::And, equals(".bad", 1));
        conditions.push(Conjunction::And, equals("good", 1));
        conditions.push(Conjunction::Or, equals("t.", 1));

        let Err(Error::Multiple(errors)) = conditions.parameterize() else {
            panic!("expected multiple errors");
        };
        assert_eq!(2, errors.len());
    }
}
