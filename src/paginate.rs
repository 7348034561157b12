use crate::{
    Error, ErrorSlice,
    builder::{Build, Statement, extend},
    expr::order::{ColumnOrdering, Ordering},
    writer::Fragment,
};

pub trait Paginate: Build + Clone + Sized {
    fn order_by<I>(&self, orderings: I) -> OrderBy<Self>
    where
        I: IntoIterator<Item = ColumnOrdering>,
    {
        OrderBy::new(self.clone(), orderings)
    }

    fn offset(&self, offset: u64) -> Offset<Self> {
        Offset::new(self.clone(), offset)
    }

    fn limit(&self, limit: u64) -> Limit<Self> {
        Limit::new(self.clone(), limit)
    }
}

#[derive(Debug, Clone)]
pub struct OrderBy<P> {
    preceding: P,
    orderings: Vec<Ordering>,
    errors: ErrorSlice,
}

impl<P: Build + Clone> OrderBy<P> {
    fn new<I>(preceding: P, orderings: I) -> Self
    where
        I: IntoIterator<Item = ColumnOrdering>,
    {
        let mut errors = ErrorSlice::default();
        let orderings = orderings
            .into_iter()
            .filter_map(|ordering| match ordering.resolve() {
                Ok(ordering) => Some(ordering),
                Err(err) => {
                    errors.push(err);
                    None
                }
            })
            .collect();
        Self {
            preceding,
            orderings,
            errors,
        }
    }

    pub fn offset(&self, offset: u64) -> Offset<Self> {
        Offset::new(self.clone(), offset)
    }

    pub fn limit(&self, limit: u64) -> Limit<Self> {
        Limit::new(self.clone(), limit)
    }
}

impl<P> OrderBy<P> {
    fn fragment(&self) -> Result<Fragment, Error> {
        self.errors.check()?;

        let mut fragment = Fragment::new();
        if !self.orderings.is_empty() {
            fragment.push_str(" ORDER BY ");
            fragment.write_list(&self.orderings, ", ")?;
        }
        Ok(fragment)
    }
}

impl<P: Build> Build for OrderBy<P> {
    fn build(&self) -> Result<Statement, Error> {
        extend(&self.preceding, self.fragment())
    }
}

#[derive(Debug, Clone)]
pub struct Offset<P> {
    preceding: P,
    offset: u64,
}

impl<P: Build + Clone> Offset<P> {
    fn new(preceding: P, offset: u64) -> Self {
        Self { preceding, offset }
    }

    pub fn limit(&self, limit: u64) -> Limit<Self> {
        Limit::new(self.clone(), limit)
    }
}

impl<P: Build> Build for Offset<P> {
    fn build(&self) -> Result<Statement, Error> {
        let mut fragment = Fragment::new();
        fragment.push_str(&format!(" OFFSET {}", self.offset));
        extend(&self.preceding, Ok(fragment))
    }
}

#[derive(Debug, Clone)]
pub struct Limit<P> {
    preceding: P,
    limit: u64,
}

impl<P: Build> Limit<P> {
    fn new(preceding: P, limit: u64) -> Self {
        Self { preceding, limit }
    }
}

impl<P: Build> Build for Limit<P> {
    fn build(&self) -> Result<Statement, Error> {
        let mut fragment = Fragment::new();
        fragment.push_str(&format!(" LIMIT {}", self.limit));
        extend(&self.preceding, Ok(fragment))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Build, asc, desc, equals, select};

    use super::*;

    #[test]
    fn test_order_by() {
        let statement = select("table1", "*")
            .order_by([asc("column1"), desc("column2")])
            .build()
            .unwrap();
        assert_eq!(
            "SELECT * FROM \"table1\" ORDER BY \"column1\" ASC, \"column2\" DESC;",
            statement.sql()
        );
    }

    #[test]
    fn test_offset_limit() {
        let statement = select("table1", "*").offset(100).build().unwrap();
        assert_eq!("SELECT * FROM \"table1\" OFFSET 100;", statement.sql());

        let statement = select("table1", "*")
            .where_clause(equals("a", 1))
            .order_by([asc("a")])
            .offset(10)
            .limit(5)
            .build()
            .unwrap();
        assert_eq!(
            "SELECT * FROM \"table1\" WHERE \"a\" = $1 ORDER BY \"a\" ASC OFFSET 10 LIMIT 5;",
            statement.sql()
        );
        assert_eq!(1, statement.binds().len());
    }

    #[test]
    fn test_bad_ordering_column() {
        let error = select("table1", "*")
            .order_by([asc("t.")])
            .limit(1)
            .build()
            .unwrap_err();
        assert_eq!(1, error.causes().len());
    }
}
