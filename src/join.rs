use std::{fmt, sync::Arc};

use smol_str::SmolStr;

use crate::{
    Error, ErrorSlice,
    builder::{Build, SelectStage, Statement},
    col::IntoNames,
    expr::{Condition, IntoConditions},
    filter::Where,
    ident::{Column, SelectColumn, Table},
    paginate::Paginate,
    parse,
    select::{SelectBuilder, select_columns},
    writer::{FormatContext, FormatWriter, Fragment},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

impl FormatWriter for JoinType {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> fmt::Result {
        match self {
            JoinType::Inner => context.writer.write_str("INNER JOIN"),
            JoinType::Left => context.writer.write_str("LEFT JOIN"),
            JoinType::Right => context.writer.write_str("RIGHT JOIN"),
            JoinType::Full => context.writer.write_str("FULL OUTER JOIN"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinRelation {
    On(Vec<Condition>),
    Using(SmolStr),
}

pub fn on<C: IntoConditions>(conditions: C) -> JoinRelation {
    JoinRelation::On(conditions.into_conditions())
}

pub fn using(column: impl Into<SmolStr>) -> JoinRelation {
    JoinRelation::Using(column.into())
}

#[derive(Debug, Clone)]
enum Constraint {
    On(Vec<Condition>),
    Using(Column),
    Cross,
}

#[derive(Debug, Clone)]
struct JoinClause {
    kind: Option<JoinType>,
    table: Arc<Table>,
    constraint: Constraint,
}

impl JoinClause {
    fn parameterize(&self) -> Result<Fragment, Error> {
        let mut fragment = Fragment::new();
        fragment.push_str(" ");
        match &self.kind {
            Some(kind) => fragment.write(kind)?,
            None => fragment.push_str("CROSS JOIN"),
        }
        fragment.push_str(" ");
        fragment.write(&self.table)?;

        match &self.constraint {
            Constraint::On(conditions) => {
                fragment.push_str(" ON ");
                let mut errors = ErrorSlice::default();
                for (index, condition) in conditions.iter().enumerate() {
                    if index > 0 {
                        fragment.push_str(" AND ");
                    }
                    match condition.parameterize() {
                        Ok(child) => fragment.append(child),
                        Err(err) => errors.push(err.context(format!(
                            "failed to parameterize join condition #{}",
                            index + 1
                        ))),
                    }
                }
                errors.check()?;
            }
            Constraint::Using(column) => {
                fragment.push_str(" USING (");
                fragment.write(column)?;
                fragment.push_str(")");
            }
            Constraint::Cross => {}
        }
        Ok(fragment)
    }
}

#[derive(Debug, Clone)]
pub struct JoinBuilder {
    select: SelectBuilder,
    columns: Vec<SelectColumn>,
    joins: Vec<JoinClause>,
    errors: ErrorSlice,
}

impl JoinBuilder {
    pub(crate) fn new(select: SelectBuilder) -> Self {
        Self {
            select,
            columns: Vec::new(),
            joins: Vec::new(),
            errors: ErrorSlice::default(),
        }
    }

    pub fn join<C: IntoNames>(
        &self,
        kind: JoinType,
        table: &str,
        relation: JoinRelation,
        columns: C,
    ) -> Self {
        let mut next = self.clone();
        let constraint = match relation {
            JoinRelation::On(conditions) => {
                if conditions.is_empty() {
                    next.errors.push(Error::MissingCondition);
                }
                Some(Constraint::On(conditions))
            }
            JoinRelation::Using(column) => next
                .errors
                .defer(parse::column(&column), "failed to parse join column")
                .map(Constraint::Using),
        };
        next.push_join(Some(kind), table, constraint, columns);
        next
    }

    pub fn cross_join<C: IntoNames>(&self, table: &str, columns: C) -> Self {
        let mut next = self.clone();
        next.push_join(None, table, Some(Constraint::Cross), columns);
        next
    }

    pub fn where_clause<C: IntoConditions>(&self, conditions: C) -> Where<Self> {
        Where::new(self.clone(), conditions)
    }

    fn push_join<C: IntoNames>(
        &mut self,
        kind: Option<JoinType>,
        table: &str,
        constraint: Option<Constraint>,
        columns: C,
    ) {
        let table = self
            .errors
            .defer(parse::table(table), "failed to parse join table")
            .map(Arc::new);

        self.columns
            .extend(select_columns(&mut self.errors, table.as_ref(), columns));

        if let (Some(table), Some(constraint)) = (table, constraint) {
            self.joins.push(JoinClause {
                kind,
                table,
                constraint,
            });
        }
    }
}

impl Build for JoinBuilder {
    fn build(&self) -> Result<Statement, Error> {
        let mut errors = ErrorSlice::default();
        if let Err(err) = self.select.errors().check() {
            errors.push(err.preceding());
        }
        if let Err(err) = self.errors.check() {
            errors.push(err);
        }
        let mut clauses = Vec::with_capacity(self.joins.len());
        for join in &self.joins {
            match join.parameterize() {
                Ok(clause) => clauses.push(clause),
                Err(err) => errors.push(err),
            }
        }
        errors.check()?;

        let columns = self
            .select
            .columns()
            .iter()
            .chain(&self.columns)
            .cloned()
            .collect::<Vec<_>>();
        let mut fragment = self.select.header(&columns, true)?;
        for clause in clauses {
            fragment.append(clause);
        }
        Statement::from_fragment(fragment)
    }
}

impl SelectStage for JoinBuilder {}

impl Paginate for JoinBuilder {}
