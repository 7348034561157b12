use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;

use crate::{
    Bind, Error, ErrorSlice, IntoOperand, Operand,
    builder::{Build, MutationStage, Statement},
    col::IntoNames,
    expr::IntoConditions,
    filter::Where,
    ident::{Column, Table},
    parse, record,
    returning::Returning,
    writer::Fragment,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Unset;

#[derive(Debug, Clone, Copy, Default)]
pub struct Set;

#[derive(Debug, Clone)]
enum Value {
    Bind(Bind),
    Column(Column),
}

#[derive(Debug, Clone)]
struct Assignment {
    column: Column,
    value: Value,
}

#[derive(Debug, Clone)]
pub struct UpdateBuilder<S = Unset> {
    table: Option<Table>,
    assignments: IndexMap<SmolStr, Assignment>,
    from: Vec<Table>,
    errors: ErrorSlice,
    state: PhantomData<S>,
}

impl UpdateBuilder<Unset> {
    pub fn new(table: &str) -> Self {
        let mut errors = ErrorSlice::default();
        let table = errors.defer(parse::table(table), "failed to parse update table");
        Self {
            table,
            assignments: IndexMap::new(),
            from: Vec::new(),
            errors,
            state: PhantomData,
        }
    }
}

impl<S> UpdateBuilder<S> {
    /// Assigns each column its value. Values built with `column()` are
    /// written as column references; a column set twice keeps the last value.
    pub fn set_map<I, K, V>(&self, values: I) -> UpdateBuilder<Set>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoOperand,
    {
        let mut next = self.transition();
        for (column, value) in values {
            next.assign(column.as_ref(), value.into_operand());
        }
        next
    }

    pub fn set_struct<T: Serialize + ?Sized>(&self, record: &T) -> UpdateBuilder<Set> {
        let mut next = self.transition();
        let fields = next.errors.defer(
            record::columns_and_values(record),
            "failed to process argument of set_struct",
        );
        for (column, value) in fields.into_iter().flat_map(|(c, v)| c.into_iter().zip(v)) {
            next.assign(&column, Operand::Value(value));
        }
        next
    }

    fn transition<T>(&self) -> UpdateBuilder<T> {
        UpdateBuilder {
            table: self.table.clone(),
            assignments: self.assignments.clone(),
            from: self.from.clone(),
            errors: self.errors.clone(),
            state: PhantomData,
        }
    }

    fn assign(&mut self, column: &str, value: Operand) {
        let Some(column) = self
            .errors
            .defer(parse::column(column), "failed to parse update column")
        else {
            return;
        };
        let value = match value {
            Operand::Value(bind) => Value::Bind(bind),
            Operand::Column(other) => {
                let parsed = self.errors.defer(
                    parse::column(other.column_name()),
                    "failed to parse update value column",
                );
                match parsed {
                    Some(other) => Value::Column(other),
                    None => return,
                }
            }
        };
        self.assignments
            .insert(SmolStr::new(column.to_string()), Assignment { column, value });
    }
}

impl UpdateBuilder<Set> {
    pub fn from<C: IntoNames>(&self, tables: C) -> UpdateFrom {
        let mut next = self.clone();
        for table in tables.into_names() {
            let table = next.errors.defer(parse::table(&table), "failed to parse from table");
            next.from.extend(table);
        }
        UpdateFrom(next)
    }

    pub fn where_clause<C: IntoConditions>(&self, conditions: C) -> Where<Self> {
        Where::new(self.clone(), conditions)
    }

    fn fragment(&self) -> Result<Fragment, Error> {
        if self.assignments.is_empty() {
            return Err(Error::EmptySet);
        }

        let mut fragment = Fragment::new();
        fragment.push_str("UPDATE ");
        if let Some(table) = &self.table {
            fragment.write(table)?;
        }
        fragment.push_str(" SET ");
        for (index, assignment) in self.assignments.values().enumerate() {
            if index > 0 {
                fragment.push_str(", ");
            }
            fragment.write(&assignment.column)?;
            fragment.push_str("=");
            match &assignment.value {
                Value::Bind(bind) => fragment.bind(bind.clone()),
                Value::Column(column) => fragment.write(column)?,
            }
        }
        if !self.from.is_empty() {
            fragment.push_str(" FROM ");
            fragment.write_list(&self.from, ", ")?;
        }
        Ok(fragment)
    }
}

impl Build for UpdateBuilder<Set> {
    fn build(&self) -> Result<Statement, Error> {
        self.errors.check()?;
        Statement::from_fragment(self.fragment()?)
    }
}

impl MutationStage for UpdateBuilder<Set> {}

impl Returning for UpdateBuilder<Set> {}

#[derive(Debug, Clone)]
pub struct UpdateFrom(UpdateBuilder<Set>);

impl UpdateFrom {
    pub fn where_clause<C: IntoConditions>(&self, conditions: C) -> Where<Self> {
        Where::new(self.clone(), conditions)
    }
}

impl Build for UpdateFrom {
    fn build(&self) -> Result<Statement, Error> {
        self.0.build()
    }
}

impl MutationStage for UpdateFrom {}

impl Returning for UpdateFrom {}
