use crate::{
    Error, ErrorSlice,
    builder::{Build, Statement, extend},
    col::IntoNames,
    ident::Column,
    parse,
    writer::Fragment,
};

pub trait Returning: Build + Clone + Sized {
    fn returning<C: IntoNames>(&self, columns: C) -> ReturningBuilder<Self> {
        ReturningBuilder::new(self.clone(), columns)
    }
}

#[derive(Debug, Clone)]
pub struct ReturningBuilder<P> {
    preceding: P,
    columns: Vec<Column>,
    errors: ErrorSlice,
}

impl<P: Build> ReturningBuilder<P> {
    fn new<C: IntoNames>(preceding: P, columns: C) -> Self {
        let mut errors = ErrorSlice::default();
        let columns = columns
            .into_names()
            .iter()
            .filter_map(|name| errors.defer(parse::column(name), "failed to parse returning column"))
            .collect();
        Self {
            preceding,
            columns,
            errors,
        }
    }
}

impl<P> ReturningBuilder<P> {
    fn fragment(&self) -> Result<Fragment, Error> {
        self.errors.check()?;

        let mut fragment = Fragment::new();
        if !self.columns.is_empty() {
            fragment.push_str(" RETURNING ");
            fragment.write_list(&self.columns, ", ")?;
        }
        Ok(fragment)
    }
}

impl<P: Build> Build for ReturningBuilder<P> {
    fn build(&self) -> Result<Statement, Error> {
        extend(&self.preceding, self.fragment())
    }
}
