use std::fmt;

use crate::{
    Bind, Error, ErrorSlice,
    placeholder::Finalize,
    writer::{FormatContext, FormatWriter, Fragment},
};

/// Renders a builder chain into its final statement.
pub trait Build {
    fn build(&self) -> Result<Statement, Error>;
}

pub trait SelectStage: Build + Clone {}

pub trait MutationStage: Build + Clone {}

/// A finished statement: SQL with `$n` placeholders and its bind values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    sql: String,
    binds: Vec<Bind>,
}

impl Statement {
    pub(crate) fn from_fragment(fragment: Fragment) -> Result<Self, Error> {
        let mut statement = Self::default();
        statement.append(fragment)?;
        statement.terminate();
        Ok(statement)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[Bind] {
        &self.binds
    }

    pub fn into_parts(self) -> (String, Vec<Bind>) {
        (self.sql, self.binds)
    }

    fn reopen(&mut self) {
        if self.sql.ends_with(';') {
            self.sql.pop();
        }
    }

    // Only the fragment text is numbered; the text already in the
    // statement keeps its placeholders.
    fn append(&mut self, fragment: Fragment) -> Result<(), Error> {
        let (sql, binds) = fragment.into_parts();
        let mut context = FormatContext::with_offset(&mut self.sql, self.binds.len());
        Finalize(&sql).format_writer(&mut context)?;
        self.binds.extend(binds);
        Ok(())
    }

    fn terminate(&mut self) {
        self.sql.push(';');
        tracing::trace!(sql = %self.sql, binds = self.binds.len(), "statement built");
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

// Builds `preceding` then appends `fragment` to it. Failures of both
// sides are reported together, the preceding one first.
pub(crate) fn extend<P: Build + ?Sized>(
    preceding: &P,
    fragment: Result<Fragment, Error>,
) -> Result<Statement, Error> {
    match (preceding.build(), fragment) {
        (Ok(mut statement), Ok(fragment)) => {
            statement.reopen();
            statement.append(fragment)?;
            statement.terminate();
            Ok(statement)
        }
        (Err(err), Ok(_)) => Err(err.preceding()),
        (Ok(_), Err(err)) => Err(err),
        (Err(preceding), Err(err)) => Err(Error::Multiple(ErrorSlice::from(vec![
            preceding.preceding(),
            err,
        ]))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Root;

    impl Build for Root {
        fn build(&self) -> Result<Statement, Error> {
            let mut fragment = Fragment::new();
            fragment.push_str("UPDATE \"t\" SET \"a\"=");
            fragment.bind(Bind::I32(1));
            Statement::from_fragment(fragment)
        }
    }

    struct Broken;

    impl Build for Broken {
        fn build(&self) -> Result<Statement, Error> {
            Err(Error::EmptySet)
        }
    }

    #[test]
    fn test_extend_offsets_placeholders() {
        let mut fragment = Fragment::new();
        fragment.push_str(" WHERE \"b\" = ");
        fragment.bind(Bind::I32(2));
        let statement = extend(&Root, Ok(fragment)).unwrap();
        assert_eq!("UPDATE \"t\" SET \"a\"=$1 WHERE \"b\" = $2;", statement.sql());
        assert_eq!(&[Bind::I32(1), Bind::I32(2)], statement.binds());
    }

    #[test]
    fn test_empty_fragment_reterminates() {
        let statement = extend(&Root, Ok(Fragment::new())).unwrap();
        assert_eq!("UPDATE \"t\" SET \"a\"=$1;", statement.to_string());
    }

    #[test]
    fn test_preceding_error_context() {
        let error = extend(&Broken, Ok(Fragment::new())).unwrap_err();
        assert_eq!(
            Error::Context {
                context: "failed to build preceding query".into(),
                source: Box::new(Error::EmptySet)
            },
            error
        );
    }

    #[test]
    fn test_both_sides_reported() {
        let error = extend(&Broken, Err(Error::EmptyGroup)).unwrap_err();
        assert_eq!(vec![&Error::EmptySet, &Error::EmptyGroup], error.causes());
        let Error::Multiple(errors) = error else {
            panic!("expected multiple errors");
        };
        assert!(matches!(errors.iter().next(), Some(Error::Context { .. })));
    }
}
