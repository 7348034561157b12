use std::fmt;

use smol_str::SmolStr;

/// Errors produced while building a statement.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier {input:?}: {kind}")]
    Syntax { input: SmolStr, kind: SyntaxError },
    #[error("column value {column:?} cannot be used inside an IN list")]
    ColumnValueInListContext { column: SmolStr },
    #[error("expected {expected} values per row, found {found}")]
    ValueCountMismatch { expected: usize, found: usize },
    #[error("operator {operator} takes {expected} operand(s), found {found}")]
    OperandCount {
        operator: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("input of type {0} is not a record")]
    InputTypeNotRecord(&'static str),
    #[error("record serialization failed: {0}")]
    Record(String),
    #[error("grouped condition has no children")]
    EmptyGroup,
    #[error("no conditions were provided")]
    MissingCondition,
    #[error("update has no assignments")]
    EmptySet,
    #[error("insert has no rows")]
    MissingValues,
    #[error("failed to format statement")]
    Format(#[from] fmt::Error),
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<Error>,
    },
    #[error("{0}")]
    Multiple(ErrorSlice),
}

impl Error {
    pub(crate) fn syntax(input: &str, kind: SyntaxError) -> Self {
        Self::Syntax {
            input: SmolStr::new(input),
            kind,
        }
    }

    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    pub(crate) fn preceding(self) -> Self {
        self.context("failed to build preceding query")
    }

    /// Flattens `Context` and `Multiple` down to the errors that caused them.
    pub fn causes(&self) -> Vec<&Error> {
        match self {
            Self::Context { source, .. } => source.causes(),
            Self::Multiple(errors) => errors.iter().flat_map(Error::causes).collect(),
            other => vec![other],
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Record(msg.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("schema name not provided")]
    MissingSchemaName,
    #[error("table name not provided")]
    MissingTableName,
    #[error("column name not provided")]
    MissingColumnName,
    #[error("alias name not provided")]
    MissingAliasName,
    #[error("nothing to alias")]
    MissingAliasTarget,
    #[error("ambiguous separator {0:?}")]
    AmbiguousSeparator(&'static str),
    #[error("ambiguous alias definition {0:?}")]
    UnexpectedWhitespace(SmolStr),
    #[error("alias is not allowed here")]
    UnexpectedAlias,
    #[error("`*` cannot be aliased")]
    StarAlias,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorSlice(Vec<Error>);

impl ErrorSlice {
    pub(crate) fn push(&mut self, error: Error) {
        tracing::debug!(%error, "deferred builder error");
        self.0.push(error);
    }

    pub(crate) fn defer<T>(&mut self, result: Result<T, Error>, context: &str) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err.context(context));
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }

    pub(crate) fn check(&self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Multiple(self.clone()))
        }
    }
}

impl From<Vec<Error>> for ErrorSlice {
    fn from(errors: Vec<Error>) -> Self {
        Self(errors)
    }
}

impl<'a> IntoIterator for &'a ErrorSlice {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ErrorSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_causes_flatten() {
        let mut errors = ErrorSlice::default();
        errors.push(Error::syntax(".t", SyntaxError::MissingSchemaName));
        errors.push(Error::EmptySet.context("failed to process"));
        let error = Error::Multiple(errors).preceding();

        assert_eq!(
            vec![
                &Error::syntax(".t", SyntaxError::MissingSchemaName),
                &Error::EmptySet
            ],
            error.causes()
        );
    }

    #[test]
    fn test_multiple_display() {
        let errors = ErrorSlice::from(vec![Error::EmptyGroup, Error::EmptySet]);
        assert_eq!(
            "grouped condition has no children\nupdate has no assignments",
            Error::Multiple(errors).to_string()
        );
    }

    #[test]
    fn test_syntax_display() {
        let error = Error::syntax("a b c", SyntaxError::AmbiguousSeparator(" "));
        assert_eq!(
            "invalid identifier \"a b c\": ambiguous separator \" \"",
            error.to_string()
        );
    }
}
