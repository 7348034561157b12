use crate::{
    Error, ErrorSlice,
    writer::Fragment,
};

use super::{Condition, Conjunction};

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedConditions {
    conjunction: Conjunction,
    conditions: Vec<Condition>,
}

impl GroupedConditions {
    pub(crate) fn new<I>(conjunction: Conjunction, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        Self {
            conjunction,
            conditions: conditions.into_iter().collect(),
        }
    }

    pub fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn parameterize(&self) -> Result<Fragment, Error> {
        if self.conditions.is_empty() {
            return Err(Error::EmptyGroup);
        }

        let mut fragment = Fragment::new();
        let mut errors = ErrorSlice::default();
        fragment.push_str("(");
        for (index, condition) in self.conditions.iter().enumerate() {
            if index > 0 {
                fragment.push_str(" ");
                fragment.write(&self.conjunction)?;
                fragment.push_str(" ");
            }
            match condition.parameterize() {
                Ok(child) => fragment.append(child),
                Err(err) => errors.push(err.context(format!(
                    "failed to parameterize sub-condition #{}",
                    index + 1
                ))),
            }
        }
        errors.check()?;
        fragment.push_str(")");
        Ok(fragment)
    }
}
