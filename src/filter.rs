use crate::{
    Error, ErrorSlice,
    builder::{Build, MutationStage, SelectStage, Statement, extend},
    expr::{Conjunction, IntoConditions, cond::Conditions},
    paginate::Paginate,
    returning::Returning,
    writer::Fragment,
};

#[derive(Debug, Clone)]
pub struct Where<P> {
    preceding: P,
    conditions: Conditions,
    errors: ErrorSlice,
}

impl<P: Build + Clone> Where<P> {
    pub(crate) fn new<C: IntoConditions>(preceding: P, conditions: C) -> Self {
        let mut filter = Self {
            preceding,
            conditions: Conditions::default(),
            errors: ErrorSlice::default(),
        };
        filter.push(Conjunction::And, conditions);
        filter
    }

    pub fn and<C: IntoConditions>(&self, conditions: C) -> Self {
        let mut next = self.clone();
        next.push(Conjunction::And, conditions);
        next
    }

    pub fn or<C: IntoConditions>(&self, conditions: C) -> Self {
        let mut next = self.clone();
        next.push(Conjunction::Or, conditions);
        next
    }

    fn push<C: IntoConditions>(&mut self, conjunction: Conjunction, conditions: C) {
        let conditions = conditions.into_conditions();
        if conditions.is_empty() {
            self.errors.push(Error::MissingCondition);
        }
        for condition in conditions {
            self.conditions.push(conjunction, condition);
        }
    }
}

impl<P> Where<P> {
    fn fragment(&self) -> Result<Fragment, Error> {
        self.errors.check()?;

        let mut fragment = Fragment::new();
        if !self.conditions.is_empty() {
            fragment.push_str(" WHERE ");
            fragment.append(self.conditions.parameterize()?);
        }
        Ok(fragment)
    }
}

impl<P: Build> Build for Where<P> {
    fn build(&self) -> Result<Statement, Error> {
        extend(&self.preceding, self.fragment())
    }
}

impl<P: SelectStage> Paginate for Where<P> {}

impl<P: MutationStage> Returning for Where<P> {}

#[cfg(test)]
mod tests {
    use crate::{Bind, Build, Condition, column, delete, equals, greater_than, not_between, select};

    use super::*;

    #[test]
    fn test_where_or() {
        let statement = select("table1 AS t1", ["col1", "col2"])
            .where_clause(equals("col1", 1))
            .or(not_between("col2", 2, 3))
            .build()
            .unwrap();
        assert_eq!(
            "SELECT \"col1\", \"col2\" FROM \"table1\" AS \"t1\" WHERE \"col1\" = $1 OR \"col2\" NOT BETWEEN $2 AND $3;",
            statement.sql()
        );
        assert_eq!(
            &[Bind::I32(1), Bind::I32(2), Bind::I32(3)],
            statement.binds()
        );
    }

    #[test]
    fn test_where_column_value() {
        let statement = select("table1 AS t1", "*")
            .where_clause(equals("t1.col1", column("t2.col2")))
            .build()
            .unwrap();
        assert_eq!(
            "SELECT * FROM \"table1\" AS \"t1\" WHERE \"t1\".\"col1\" = \"t2\".\"col2\";",
            statement.sql()
        );
        assert!(statement.binds().is_empty());
    }

    #[test]
    fn test_several_conditions_per_call() {
        let statement = delete("t")
            .where_clause([equals("a", 1), equals("b", 2)])
            .or([equals("c", 3), equals("d", 4)])
            .build()
            .unwrap();
        assert_eq!(
            "DELETE FROM \"t\" WHERE \"a\" = $1 AND \"b\" = $2 OR \"c\" = $3 OR \"d\" = $4;",
            statement.sql()
        );
    }

    #[test]
    fn test_missing_condition() {
        let error = delete("t").where_clause(Vec::<Condition>::new()).build().unwrap_err();
        assert_eq!(vec![&Error::MissingCondition], error.causes());
    }

    #[test]
    fn test_bad_condition_is_reported() {
        let error = select("t", "*")
            .where_clause(greater_than("t.", 1))
            .build()
            .unwrap_err();
        assert!(matches!(error.causes()[0], Error::Syntax { .. }));
    }

    #[test]
    fn test_preceding_error_is_wrapped() {
        let error = select(".bad", "*")
            .where_clause(equals("a", 1))
            .build()
            .unwrap_err();
        let Error::Context { context, .. } = &error else {
            panic!("expected context, got {error:?}");
        };
        assert_eq!("failed to build preceding query", context);
    }
}
