use crate::{
    Error, ErrorSlice,
    builder::{Build, MutationStage, Statement},
    col::IntoNames,
    expr::IntoConditions,
    filter::Where,
    ident::Table,
    parse,
    returning::Returning,
    writer::Fragment,
};

#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    table: Option<Table>,
    using: Vec<Table>,
    errors: ErrorSlice,
}

impl DeleteBuilder {
    pub fn new(table: &str) -> Self {
        let mut errors = ErrorSlice::default();
        let table = errors.defer(parse::table(table), "failed to parse delete table");
        Self {
            table,
            using: Vec::new(),
            errors,
        }
    }

    pub fn using<C: IntoNames>(&self, tables: C) -> Self {
        let mut next = self.clone();
        for table in tables.into_names() {
            let table = next.errors.defer(parse::table(&table), "failed to parse using table");
            next.using.extend(table);
        }
        next
    }

    pub fn where_clause<C: IntoConditions>(&self, conditions: C) -> Where<Self> {
        Where::new(self.clone(), conditions)
    }
}

impl Build for DeleteBuilder {
    fn build(&self) -> Result<Statement, Error> {
        self.errors.check()?;

        let mut fragment = Fragment::new();
        fragment.push_str("DELETE FROM ");
        if let Some(table) = &self.table {
            fragment.write(table)?;
        }
        if !self.using.is_empty() {
            fragment.push_str(" USING ");
            fragment.write_list(&self.using, ", ")?;
        }
        Statement::from_fragment(fragment)
    }
}

impl MutationStage for DeleteBuilder {}

impl Returning for DeleteBuilder {}

#[cfg(test)]
mod tests {
    use crate::{Build, Returning, SyntaxError, delete, equals, in_list};

    use super::*;

    #[test]
    fn test_delete_using() {
        let statement = delete("table1")
            .using(["table2", "table3"])
            .build()
            .unwrap();
        assert_eq!(
            "DELETE FROM \"table1\" USING \"table2\", \"table3\";",
            statement.sql()
        );
    }

    #[test]
    fn test_delete_where_returning() {
        let statement = delete("public.sessions AS s")
            .where_clause(in_list("s.id", [1, 2, 3]))
            .and(equals("s.active", false))
            .returning("s.id")
            .build()
            .unwrap();
        assert_eq!(
            "DELETE FROM \"public\".\"sessions\" AS \"s\" WHERE \"s\".\"id\" IN $1 AND \"s\".\"active\" = $2 RETURNING \"s\".\"id\";",
            statement.sql()
        );
        assert_eq!(2, statement.binds().len());
    }

    #[test]
    fn test_bad_using_table() {
        let error = delete("t").using("a.b.c").build().unwrap_err();
        assert!(matches!(
            error.causes()[0],
            Error::Syntax {
                kind: SyntaxError::AmbiguousSeparator("."),
                ..
            }
        ));
    }
}
