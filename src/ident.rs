use std::{fmt, sync::Arc};

use smol_str::SmolStr;

use crate::{
    Error, parse,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    schema: Option<SmolStr>,
    name: SmolStr,
    alias: Option<SmolStr>,
}

impl Table {
    pub(crate) fn new(schema: Option<&str>, name: &str, alias: Option<&str>) -> Self {
        Self {
            schema: schema.map(SmolStr::new),
            name: SmolStr::new(name),
            alias: alias.map(SmolStr::new),
        }
    }

    pub fn parse(input: &str) -> Result<Self, Error> {
        parse::table(input)
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn reference(&self) -> TableReference<'_> {
        TableReference(self)
    }

    fn write_qualified<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            context.write_ident(schema)?;
            context.writer.write_char('.')?;
        }
        context.write_ident(&self.name)
    }
}

impl FormatWriter for Table {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        self.write_qualified(context)?;
        context.write_alias(self.alias())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_writer(&mut FormatContext::new(f))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableReference<'a>(&'a Table);

impl FormatWriter for TableReference<'_> {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self.0.alias() {
            Some(alias) => context.write_ident(alias),
            None => self.0.write_qualified(context),
        }
    }
}

impl fmt::Display for TableReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_writer(&mut FormatContext::new(f))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    name: SmolStr,
    table: Option<Arc<Table>>,
}

impl Column {
    pub(crate) fn new(name: &str, table: Option<Arc<Table>>) -> Self {
        Self {
            name: SmolStr::new(name),
            table,
        }
    }

    pub fn parse(input: &str) -> Result<Self, Error> {
        parse::column(input)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_deref()
    }

    pub fn is_star(&self) -> bool {
        self.name == "*"
    }

    pub(crate) fn or_table(mut self, table: &Arc<Table>) -> Self {
        if self.table.is_none() {
            self.table = Some(Arc::clone(table));
        }
        self
    }

    pub(crate) fn unqualified(&self) -> Self {
        Self {
            name: self.name.clone(),
            table: None,
        }
    }
}

impl FormatWriter for Column {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        if let Some(table) = &self.table {
            table.reference().format_writer(context)?;
            context.writer.write_char('.')?;
        }
        context.write_ident(&self.name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_writer(&mut FormatContext::new(f))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectColumn {
    column: Column,
    alias: Option<SmolStr>,
}

impl SelectColumn {
    pub(crate) fn new(column: Column, alias: Option<&str>) -> Self {
        Self {
            column,
            alias: alias.map(SmolStr::new),
        }
    }

    pub fn parse(input: &str) -> Result<Self, Error> {
        parse::select_column(input)
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub(crate) fn or_table(self, table: &Arc<Table>) -> Self {
        Self {
            column: self.column.or_table(table),
            alias: self.alias,
        }
    }

    pub(crate) fn unqualified(&self) -> Self {
        Self {
            column: self.column.unqualified(),
            alias: self.alias.clone(),
        }
    }
}

impl FormatWriter for SelectColumn {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        self.column.format_writer(context)?;
        if self.column.is_star() {
            return Ok(());
        }
        context.write_alias(self.alias())
    }
}

impl fmt::Display for SelectColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_writer(&mut FormatContext::new(f))
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::format_writer;

    use super::*;

    #[test]
    fn test_table_rendering() {
        let table = Table::new(Some("public"), "users", Some("u"));
        assert_eq!("\"public\".\"users\" AS \"u\"", format_writer(&table));
        assert_eq!("\"u\"", table.reference().to_string());

        let table = Table::new(Some("public"), "users", None);
        assert_eq!("\"public\".\"users\"", table.reference().to_string());
        assert_eq!("\"public\".\"users\"", table.to_string());
    }

    #[test]
    fn test_column_rendering() {
        let table = Arc::new(Table::new(None, "t1", Some("a")));
        assert_eq!("\"a\".\"col\"", Column::new("col", Some(table.clone())).to_string());
        assert_eq!("\"a\".*", Column::new("*", Some(table)).to_string());
        assert_eq!("*", Column::new("*", None).to_string());
        assert_eq!("\"co\"\"l\"", Column::new("co\"l", None).to_string());
    }

    #[test]
    fn test_column_keeps_own_table() {
        let own = Arc::new(Table::new(None, "own", None));
        let other = Arc::new(Table::new(None, "other", None));
        let column = Column::new("c", Some(own)).or_table(&other);
        assert_eq!("\"own\".\"c\"", column.to_string());
        assert_eq!("\"c\"", column.unqualified().to_string());
    }

    #[test]
    fn test_select_column_alias() {
        let column = SelectColumn::new(Column::new("col", None), Some("c"));
        assert_eq!("\"col\" AS \"c\"", column.to_string());
        let star = SelectColumn::new(Column::new("*", None), Some("c"));
        assert_eq!("*", star.to_string());
    }
}
