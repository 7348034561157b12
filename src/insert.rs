use std::marker::PhantomData;

use serde::Serialize;

use crate::{
    Bind, Error, ErrorSlice, IntoBinds,
    builder::{Build, Statement},
    col::IntoNames,
    ident::{Column, Table},
    parse, record,
    returning::Returning,
    writer::Fragment,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Start;

#[derive(Debug, Clone, Copy, Default)]
pub struct HasColumns;

#[derive(Debug, Clone, Copy, Default)]
pub struct Ready;

#[derive(Debug, Clone)]
pub struct InsertBuilder<S = Start> {
    table: Option<Table>,
    columns: Vec<Column>,
    rows: Vec<Vec<Bind>>,
    errors: ErrorSlice,
    state: PhantomData<S>,
}

impl InsertBuilder<Start> {
    pub fn new(table: &str) -> Self {
        let mut errors = ErrorSlice::default();
        let table = errors.defer(parse::table(table), "failed to parse insert table");
        Self {
            table,
            columns: Vec::new(),
            rows: Vec::new(),
            errors,
            state: PhantomData,
        }
    }

    pub fn columns<C: IntoNames>(&self, columns: C) -> InsertBuilder<HasColumns> {
        let mut next = self.transition();
        next.push_columns(columns.into_names());
        next
    }

    pub fn default_values(&self) -> InsertBuilder<Ready> {
        self.transition()
    }

    pub fn values<I, R>(&self, rows: I) -> InsertBuilder<Ready>
    where
        I: IntoIterator<Item = R>,
        R: IntoBinds,
    {
        let mut next = self.transition();
        next.push_rows(rows);
        next
    }

    /// Rows taken from serializable records. The first record names the
    /// columns and every other record must produce the same ones.
    pub fn data<I, T>(&self, records: I) -> InsertBuilder<Ready>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        let mut next = self.transition();
        let mut names: Option<Vec<String>> = None;
        let mut count = 0;
        for record in records {
            count += 1;
            let Some((columns, values)) = next.errors.defer(
                record::columns_and_values(&record),
                "failed to process argument of data",
            ) else {
                continue;
            };
            if let Some(first) = names.as_ref().filter(|first| **first != columns) {
                next.errors.push(Error::Record(format!(
                    "record #{count} has columns {columns:?}, expected {first:?}"
                )));
                continue;
            }
            if names.is_none() {
                next.push_columns(columns.iter().map(String::as_str));
                names = Some(columns);
            }
            next.push_row(values);
        }
        if count == 0 {
            next.errors.push(Error::MissingValues);
        }
        next
    }
}

impl InsertBuilder<HasColumns> {
    pub fn values<I, R>(&self, rows: I) -> InsertBuilder<Ready>
    where
        I: IntoIterator<Item = R>,
        R: IntoBinds,
    {
        let mut next = self.transition();
        next.push_rows(rows);
        next
    }
}

impl<S> InsertBuilder<S> {
    fn transition<T>(&self) -> InsertBuilder<T> {
        InsertBuilder {
            table: self.table.clone(),
            columns: self.columns.clone(),
            rows: self.rows.clone(),
            errors: self.errors.clone(),
            state: PhantomData,
        }
    }

    fn push_columns<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            let column = self
                .errors
                .defer(parse::column(name.as_ref()), "failed to parse insert column");
            self.columns.extend(column);
        }
    }

    fn push_rows<I, R>(&mut self, rows: I)
    where
        I: IntoIterator<Item = R>,
        R: IntoBinds,
    {
        let mut count = 0;
        for row in rows {
            count += 1;
            self.push_row(row.into_binds());
        }
        if count == 0 {
            self.errors.push(Error::MissingValues);
        }
    }

    fn push_row(&mut self, row: Vec<Bind>) {
        let expected = match self.rows.first() {
            _ if !self.columns.is_empty() => self.columns.len(),
            Some(first) => first.len(),
            None => row.len(),
        };
        if row.len() != expected {
            self.errors.push(Error::ValueCountMismatch {
                expected,
                found: row.len(),
            });
            return;
        }
        if row.is_empty() {
            self.errors.push(Error::MissingValues);
            return;
        }
        self.rows.push(row);
    }

    fn render(&self) -> Result<Statement, Error> {
        self.errors.check()?;

        let mut fragment = Fragment::new();
        fragment.push_str("INSERT INTO ");
        if let Some(table) = &self.table {
            fragment.write(table)?;
        }

        if self.columns.is_empty() && self.rows.is_empty() {
            fragment.push_str(" DEFAULT VALUES");
            return Statement::from_fragment(fragment);
        }

        if !self.columns.is_empty() {
            fragment.push_str(" (");
            fragment.write_list(&self.columns, ", ")?;
            fragment.push_str(")");
        }
        fragment.push_str(" VALUES ");
        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                fragment.push_str(" ");
            }
            fragment.push_str("(");
            for (index, value) in row.iter().enumerate() {
                if index > 0 {
                    fragment.push_str(", ");
                }
                fragment.bind(value.clone());
            }
            fragment.push_str(")");
        }
        Statement::from_fragment(fragment)
    }
}

impl Build for InsertBuilder<Start> {
    fn build(&self) -> Result<Statement, Error> {
        self.render()
    }
}

impl Build for InsertBuilder<Ready> {
    fn build(&self) -> Result<Statement, Error> {
        self.render()
    }
}

impl Returning for InsertBuilder<Ready> {}
