use std::sync::Arc;

use crate::{
    Error, ErrorSlice,
    builder::{Build, SelectStage, Statement},
    col::IntoNames,
    expr::IntoConditions,
    filter::Where,
    ident::{SelectColumn, Table},
    join::{JoinBuilder, JoinRelation, JoinType},
    paginate::Paginate,
    parse,
    writer::Fragment,
};

#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    tables: Vec<Arc<Table>>,
    columns: Vec<SelectColumn>,
    errors: ErrorSlice,
}

impl SelectBuilder {
    pub fn new<C: IntoNames>(table: &str, columns: C) -> Self {
        let mut select = Self::default();
        select.push_table(table, columns);
        select
    }

    pub fn table<C: IntoNames>(&self, table: &str, columns: C) -> Self {
        let mut next = self.clone();
        next.push_table(table, columns);
        next
    }

    pub fn join<C: IntoNames>(
        &self,
        kind: JoinType,
        table: &str,
        relation: JoinRelation,
        columns: C,
    ) -> JoinBuilder {
        JoinBuilder::new(self.clone()).join(kind, table, relation, columns)
    }

    pub fn cross_join<C: IntoNames>(&self, table: &str, columns: C) -> JoinBuilder {
        JoinBuilder::new(self.clone()).cross_join(table, columns)
    }

    pub fn where_clause<C: IntoConditions>(&self, conditions: C) -> Where<Self> {
        Where::new(self.clone(), conditions)
    }

    fn push_table<C: IntoNames>(&mut self, table: &str, columns: C) {
        let table = self
            .errors
            .defer(parse::table(table), "failed to parse select table")
            .map(Arc::new);

        self.columns.extend(select_columns(&mut self.errors, table.as_ref(), columns));
        self.tables.extend(table);
    }

    pub(crate) fn errors(&self) -> &ErrorSlice {
        &self.errors
    }

    pub(crate) fn columns(&self) -> &[SelectColumn] {
        &self.columns
    }

    pub(crate) fn header(
        &self,
        columns: &[SelectColumn],
        qualified: bool,
    ) -> Result<Fragment, Error> {
        let mut fragment = Fragment::new();
        fragment.push_str("SELECT ");
        if qualified {
            fragment.write_list(columns, ", ")?;
        } else {
            let bare = columns.iter().map(SelectColumn::unqualified).collect::<Vec<_>>();
            fragment.write_list(&bare, ", ")?;
        }
        if !columns.is_empty() {
            fragment.push_str(" ");
        }
        fragment.push_str("FROM ");
        fragment.write_list(&self.tables, ", ")?;
        Ok(fragment)
    }
}

pub(crate) fn select_columns<C: IntoNames>(
    errors: &mut ErrorSlice,
    table: Option<&Arc<Table>>,
    columns: C,
) -> Vec<SelectColumn> {
    columns
        .into_names()
        .iter()
        .filter_map(|name| {
            let column = errors.defer(parse::select_column(name), "failed to parse select column")?;
            Some(match table {
                Some(table) => column.or_table(table),
                None => column,
            })
        })
        .collect()
}

impl Build for SelectBuilder {
    fn build(&self) -> Result<Statement, Error> {
        self.errors.check()?;
        let fragment = self.header(&self.columns, self.tables.len() > 1)?;
        Statement::from_fragment(fragment)
    }
}

impl SelectStage for SelectBuilder {}

impl Paginate for SelectBuilder {}

#[cfg(test)]
mod tests {
    use crate::{Build, SyntaxError, select};

    use super::*;

    #[test]
    fn test_no_columns() {
        let statement = select("testTable", ()).build().unwrap();
        assert_eq!("SELECT FROM \"testTable\";", statement.sql());
        assert!(statement.binds().is_empty());
    }

    #[test]
    fn test_single_table() {
        let statement = select("testing.testTable AS tt", ["testCol1 AS t1c1"])
            .build()
            .unwrap();
        assert_eq!(
            "SELECT \"testCol1\" AS \"t1c1\" FROM \"testing\".\"testTable\" AS \"tt\";",
            statement.sql()
        );
    }

    #[test]
    fn test_multi_table() {
        let statement = select("testTable AS tt", ["*"])
            .table("public.other", ["testCol1 AS t2c1"])
            .build()
            .unwrap();
        assert_eq!(
            "SELECT \"tt\".*, \"public\".\"other\".\"testCol1\" AS \"t2c1\" FROM \"testTable\" AS \"tt\", \"public\".\"other\";",
            statement.sql()
        );
    }

    #[test]
    fn test_template_reuse() {
        let base = select("users", ["id"]);
        let wider = base.table("roles", ["name"]);
        assert_eq!("SELECT \"id\" FROM \"users\";", base.build().unwrap().sql());
        assert_eq!(
            "SELECT \"users\".\"id\", \"roles\".\"name\" FROM \"users\", \"roles\";",
            wider.build().unwrap().sql()
        );
    }

    #[test]
    fn test_bad_table_and_column() {
        let error = select(".bad", ["bad AS"]).build().unwrap_err();
        let kinds = error
            .causes()
            .into_iter()
            .map(|error| match error {
                Error::Syntax { kind, .. } => kind.clone(),
                other => panic!("unexpected error {other:?}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            vec![SyntaxError::MissingSchemaName, SyntaxError::MissingAliasName],
            kinds
        );
    }
}
