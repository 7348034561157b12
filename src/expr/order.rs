use std::fmt;

use smol_str::SmolStr;

use crate::{
    Error, parse,
    ident::Column,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

impl FormatWriter for Direction {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self {
            Direction::Ascending => context.writer.write_str("ASC"),
            Direction::Descending => context.writer.write_str("DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnOrdering {
    column_name: SmolStr,
    direction: Direction,
}

impl ColumnOrdering {
    pub fn new(column_name: impl Into<SmolStr>, direction: Direction) -> Self {
        Self {
            column_name: column_name.into(),
            direction,
        }
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn resolve(&self) -> Result<Ordering, Error> {
        let column = parse::column(&self.column_name).map_err(|err| {
            err.context(format!("failed to parse ordering column {:?}", self.column_name.as_str()))
        })?;
        Ok(Ordering {
            column,
            direction: self.direction,
        })
    }
}

pub fn asc(column_name: impl Into<SmolStr>) -> ColumnOrdering {
    ColumnOrdering::new(column_name, Direction::Ascending)
}

pub fn desc(column_name: impl Into<SmolStr>) -> ColumnOrdering {
    ColumnOrdering::new(column_name, Direction::Descending)
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Ordering {
    column: Column,
    direction: Direction,
}

impl FormatWriter for Ordering {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        self.column.format_writer(context)?;
        context.writer.write_char(' ')?;
        self.direction.format_writer(context)
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::format_writer;

    use super::*;

    #[test]
    fn test_render() {
        assert_eq!("\"column1\" ASC", format_writer(asc("column1").resolve().unwrap()));
        assert_eq!("\"t\".\"column2\" DESC", format_writer(desc("t.column2").resolve().unwrap()));
    }

    #[test]
    fn test_bad_column() {
        assert!(desc("t.").resolve().is_err());
    }
}
