use std::{fmt::Write, ops::Deref};

use crate::{Bind, Error};

pub(crate) trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result;
}

pub(crate) struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
    pub(crate) placeholder: usize,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        Self::with_offset(writer, 0)
    }

    pub fn with_offset(writer: &'a mut W, offset: usize) -> Self {
        Self {
            writer,
            placeholder: offset,
        }
    }

    pub(crate) fn write_ident(&mut self, part: &str) -> std::fmt::Result {
        if part == "*" {
            return self.writer.write_char('*');
        }

        self.writer.write_char('"')?;
        let mut last = 0;
        for (index, char) in part.char_indices() {
            if char == '"' {
                if index != last {
                    self.writer.write_str(&part[last..index])?;
                }
                self.writer.write_str("\"\"")?;
                last = index + char.len_utf8();
            }
        }

        if last < part.len() {
            self.writer.write_str(&part[last..])?;
        }
        self.writer.write_char('"')
    }

    pub(crate) fn write_alias(&mut self, alias: Option<&str>) -> std::fmt::Result {
        if let Some(alias) = alias {
            self.writer.write_str(" AS ")?;
            self.write_ident(alias)?;
        }
        Ok(())
    }

    pub(crate) fn write_list<T: FormatWriter>(&mut self, items: &[T], sep: &str) -> std::fmt::Result {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.writer.write_str(sep)?;
            }
            item.format_writer(self)?;
        }
        Ok(())
    }

    pub(crate) fn write_placeholder(&mut self) -> std::fmt::Result {
        self.placeholder += 1;
        write!(self.writer, "${}", self.placeholder)
    }
}

impl<D> FormatWriter for D
where
    D: Deref,
    D::Target: FormatWriter,
{
    fn format_writer<W: std::fmt::Write>(
        &self,
        ctx: &mut FormatContext<'_, W>,
    ) -> std::fmt::Result {
        self.deref().format_writer(ctx)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    sql: String,
    binds: Vec<Bind>,
}

impl Fragment {
    pub(crate) fn new() -> Self {
        Self::default()
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

    pub(crate) fn push_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    pub(crate) fn write<T: FormatWriter + ?Sized>(&mut self, item: &T) -> Result<(), Error> {
        item.format_writer(&mut FormatContext::new(&mut self.sql))?;
        Ok(())
    }

    pub(crate) fn write_list<T: FormatWriter>(&mut self, items: &[T], sep: &str) -> Result<(), Error> {
        FormatContext::new(&mut self.sql).write_list(items, sep)?;
        Ok(())
    }

    pub(crate) fn bind(&mut self, value: Bind) {
        self.sql.push('?');
        self.binds.push(value);
    }

    pub(crate) fn append(&mut self, other: Fragment) {
        self.sql.push_str(&other.sql);
        self.binds.extend(other.binds);
    }
}
