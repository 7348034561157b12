use std::sync::Arc;

use smol_str::SmolStr;

use crate::{
    Error, SyntaxError,
    ident::{Column, SelectColumn, Table},
};

pub(crate) fn table(raw: &str) -> Result<Table, Error> {
    let input = sanitize(raw);
    let wrap = |kind| Error::syntax(raw, kind);

    let (schema, rest) = split_schema(&input).map_err(wrap)?;
    let (name, alias) = split_alias(rest).map_err(wrap)?;
    if name.is_empty() {
        return Err(wrap(SyntaxError::MissingTableName));
    }
    Ok(Table::new(schema, name, alias))
}

pub(crate) fn column(raw: &str) -> Result<Column, Error> {
    let input = sanitize(raw);
    let (table, name, alias) = column_parts(&input).map_err(|kind| Error::syntax(raw, kind))?;
    if alias.is_some() {
        return Err(Error::syntax(raw, SyntaxError::UnexpectedAlias));
    }
    Ok(Column::new(name, table.map(Arc::new)))
}

pub(crate) fn select_column(raw: &str) -> Result<SelectColumn, Error> {
    let input = sanitize(raw);
    let (table, name, alias) = column_parts(&input).map_err(|kind| Error::syntax(raw, kind))?;
    if name == "*" && alias.is_some() {
        return Err(Error::syntax(raw, SyntaxError::StarAlias));
    }
    Ok(SelectColumn::new(Column::new(name, table.map(Arc::new)), alias))
}

fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.trim().chars().filter(|c| *c != '"').peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            let mut run = 1;
            while chars.next_if(|c| c.is_whitespace()).is_some() {
                run += 1;
            }
            out.push(if run > 1 { ' ' } else { c });
        } else {
            out.push(c);
        }
    }
    // quotes around leading or trailing whitespace leave it behind
    let trimmed = out.trim();
    if trimmed.len() != out.len() {
        out = trimmed.to_owned();
    }
    out
}

fn column_parts(input: &str) -> Result<(Option<Table>, &str, Option<&str>), SyntaxError> {
    let (table, rest) = match input.rsplit_once('.') {
        Some((table, rest)) => (Some(qualifier(table)?), rest.trim()),
        None => (None, input),
    };
    let (name, alias) = split_alias(rest)?;
    if name.is_empty() {
        return Err(SyntaxError::MissingColumnName);
    }
    Ok((table, name, alias))
}

fn qualifier(input: &str) -> Result<Table, SyntaxError> {
    let (schema, name) = split_schema(input.trim())?;
    if name.is_empty() {
        return Err(SyntaxError::MissingTableName);
    }
    if name.contains(char::is_whitespace) {
        return Err(SyntaxError::UnexpectedWhitespace(SmolStr::new(name)));
    }
    Ok(Table::new(schema, name, None))
}

fn split_schema(input: &str) -> Result<(Option<&str>, &str), SyntaxError> {
    let Some((schema, rest)) = input.split_once('.') else {
        return Ok((None, input));
    };
    if rest.contains('.') {
        return Err(SyntaxError::AmbiguousSeparator("."));
    }
    let schema = schema.trim();
    if schema.is_empty() {
        return Err(SyntaxError::MissingSchemaName);
    }
    if schema.contains(char::is_whitespace) {
        return Err(SyntaxError::UnexpectedWhitespace(SmolStr::new(schema)));
    }
    Ok((Some(schema), rest.trim()))
}

fn split_alias(input: &str) -> Result<(&str, Option<&str>), SyntaxError> {
    let mut found = find_as(input.as_bytes());
    match (found.next(), found.next()) {
        (None, _) => split_space(input),
        (Some(index), None) => {
            let target = input[..index].trim();
            let alias = input[index + 2..].trim();
            if target.is_empty() {
                return Err(SyntaxError::MissingAliasTarget);
            }
            if alias.is_empty() {
                return Err(SyntaxError::MissingAliasName);
            }
            for part in [target, alias] {
                if part.contains(char::is_whitespace) {
                    return Err(SyntaxError::UnexpectedWhitespace(SmolStr::new(part)));
                }
            }
            Ok((target, Some(alias)))
        }
        (Some(_), Some(_)) => Err(SyntaxError::AmbiguousSeparator("AS")),
    }
}

fn split_space(input: &str) -> Result<(&str, Option<&str>), SyntaxError> {
    let Some((target, alias)) = input.split_once(char::is_whitespace) else {
        return Ok((input, None));
    };
    if alias.contains(char::is_whitespace) {
        return Err(SyntaxError::AmbiguousSeparator(" "));
    }
    Ok((target, Some(alias)))
}

fn find_as(h: &[u8]) -> impl Iterator<Item = usize> + '_ {
    h.windows(2).enumerate().filter_map(move |(i, w)| {
        let before = i == 0 || h[i - 1].is_ascii_whitespace();
        let after = h.get(i + 2).is_none_or(|b| b.is_ascii_whitespace());
        (w == b"AS" && before && after).then_some(i)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(result: Result<impl std::fmt::Debug, Error>) -> SyntaxError {
        match result {
            Err(Error::Syntax { kind, .. }) => kind,
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_find_as() {
        assert_eq!(vec![6], find_as(b"users AS u").collect::<Vec<_>>());
        assert!(find_as(b"users").next().is_none());
        assert!(find_as(b"CASES x").next().is_none());
        assert!(find_as(b"users as u").next().is_none());
        assert_eq!(vec![6, 11], find_as(b"users AS u AS b").collect::<Vec<_>>());
        assert_eq!(vec![4], find_as(b"col AS").collect::<Vec<_>>());
    }

    #[test]
    fn test_sanitize() {
        assert_eq!("public.users AS u", sanitize("  \"public\".\"users\"   AS  \"u\" "));
        assert_eq!("a\tb", sanitize("a\tb"));
        assert_eq!("a b", sanitize("a \t b"));
        assert_eq!("a", sanitize("\" a\""));
    }

    #[test]
    fn test_table() {
        let table = table("testing.testTable AS tt").unwrap();
        assert_eq!(Some("testing"), table.schema());
        assert_eq!("testTable", table.name());
        assert_eq!(Some("tt"), table.alias());

        let table = self::table("\"testTable\" tt").unwrap();
        assert_eq!(None, table.schema());
        assert_eq!(Some("tt"), table.alias());

        let table = self::table("testTable").unwrap();
        assert_eq!("\"testTable\"", table.to_string());
    }

    #[test]
    fn test_table_canonical() {
        let canonical = "\"public\".\"users\" AS \"u\"";
        for input in [
            "public.users AS u",
            "\"public\".\"users\" AS \"u\"",
            "  public.users    u ",
            "public.\"users\" \"u\"",
        ] {
            assert_eq!(canonical, table(input).unwrap().to_string());
        }
    }

    #[test]
    fn test_table_errors() {
        assert_eq!(SyntaxError::MissingSchemaName, kind(table(".bad")));
        assert_eq!(SyntaxError::MissingTableName, kind(table("public.")));
        assert_eq!(SyntaxError::MissingTableName, kind(table("")));
        assert_eq!(SyntaxError::AmbiguousSeparator("."), kind(table("a.b.c")));
        assert_eq!(SyntaxError::AmbiguousSeparator(" "), kind(table("a b c")));
        assert_eq!(SyntaxError::AmbiguousSeparator("AS"), kind(table("a AS b AS c")));
        assert_eq!(SyntaxError::MissingAliasName, kind(table("users AS")));
        assert_eq!(SyntaxError::MissingAliasTarget, kind(table("AS u")));
        assert_eq!(
            SyntaxError::UnexpectedWhitespace("my users".into()),
            kind(table("my users AS u"))
        );
        assert_eq!(
            SyntaxError::UnexpectedWhitespace("my schema".into()),
            kind(table("my schema.users"))
        );
    }

    #[test]
    fn test_error_keeps_raw_input() {
        assert_eq!(
            Err(Error::Syntax {
                input: " .bad".into(),
                kind: SyntaxError::MissingSchemaName
            }),
            table(" .bad")
        );
    }

    #[test]
    fn test_column() {
        let column = column("public.users.id").unwrap();
        assert_eq!("id", column.name());
        assert_eq!("\"public\".\"users\".\"id\"", column.to_string());

        assert_eq!("\"t1\".\"col1\"", self::column("t1.col1").unwrap().to_string());
        assert_eq!("\"col1\"", self::column("\"col1\"").unwrap().to_string());
        assert_eq!("\"t\".*", self::column("t.*").unwrap().to_string());
    }

    #[test]
    fn test_column_errors() {
        assert_eq!(SyntaxError::MissingTableName, kind(column(".badColumn")));
        assert_eq!(SyntaxError::MissingColumnName, kind(column("t1.")));
        assert_eq!(SyntaxError::MissingColumnName, kind(column("")));
        assert_eq!(SyntaxError::UnexpectedAlias, kind(column("col AS c")));
        assert_eq!(SyntaxError::UnexpectedAlias, kind(column("col c")));
        assert_eq!(SyntaxError::MissingAliasName, kind(column("col AS")));
        assert_eq!(SyntaxError::MissingSchemaName, kind(column(".t.col")));
    }

    #[test]
    fn test_select_column() {
        let column = select_column("testCol1 AS t1c1").unwrap();
        assert_eq!("testCol1", column.column().name());
        assert_eq!(Some("t1c1"), column.alias());

        let column = select_column("public.other.testCol1 t2c1").unwrap();
        assert_eq!("\"public\".\"other\".\"testCol1\" AS \"t2c1\"", column.to_string());

        let star = select_column("*").unwrap();
        assert_eq!("*", star.to_string());
    }

    #[test]
    fn test_select_column_errors() {
        assert_eq!(SyntaxError::StarAlias, kind(select_column("* AS everything")));
        assert_eq!(SyntaxError::StarAlias, kind(select_column("t.* all")));
        assert_eq!(SyntaxError::MissingAliasTarget, kind(select_column("t. AS x")));
        assert_eq!(SyntaxError::AmbiguousSeparator(" "), kind(select_column("a b c")));
    }
}
