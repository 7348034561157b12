use std::fmt::Write;

use crate::{
    Error,
    writer::{FormatContext, FormatWriter},
};

pub(crate) struct Finalize<'a>(pub(crate) &'a str);

impl FormatWriter for Finalize<'_> {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result {
        let sql = self.0;

        enum State {
            Normal,
            Ident,
            Lit,
        }

        let mut state = State::Normal;
        let mut span_start = 0;

        let mut chars = sql.char_indices().peekable();
        while let Some((index, char)) = chars.next() {
            match state {
                State::Normal => match char {
                    '\'' => state = State::Lit,
                    '"' => state = State::Ident,
                    '?' => {
                        // jsonb `??`, `?|` and `?&` are operators
                        if let Some(&(_, '?' | '|' | '&')) = chars.peek() {
                            chars.next();
                            continue;
                        }
                        context.writer.write_str(&sql[span_start..index])?;
                        context.write_placeholder()?;
                        span_start = index + char.len_utf8();
                    }
                    _ => {}
                },
                // a doubled quote closes and reopens, which leaves the state unchanged
                State::Ident => {
                    if char == '"' {
                        state = State::Normal;
                    }
                }
                State::Lit => {
                    if char == '\'' {
                        state = State::Normal;
                    }
                }
            }
        }

        context.writer.write_str(&sql[span_start..])
    }
}

/// Rewrites the markers of `sql` to `$n`, starting after `offset`.
pub fn finalize_placeholders(sql: &str, offset: usize) -> Result<(String, usize), Error> {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut context = FormatContext::with_offset(&mut out, offset);
    Finalize(sql).format_writer(&mut context)?;
    let count = context.placeholder - offset;
    Ok((out, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering() {
        assert_eq!(
            ("\"a\" = $1 AND \"b\" BETWEEN $2 AND $3".to_string(), 3),
            finalize_placeholders("\"a\" = ? AND \"b\" BETWEEN ? AND ?", 0).unwrap()
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(
            (" WHERE \"b\" = $2".to_string(), 1),
            finalize_placeholders(" WHERE \"b\" = ?", 1).unwrap()
        );
    }

    #[test]
    fn test_quoted_markers_untouched() {
        assert_eq!(
            ("'te?st' = $1".to_string(), 1),
            finalize_placeholders("'te?st' = ?", 0).unwrap()
        );
        assert_eq!(
            ("\"c?l\"\"x?\" = $1".to_string(), 1),
            finalize_placeholders("\"c?l\"\"x?\" = ?", 0).unwrap()
        );
        assert_eq!(
            ("'it''s?' = $5".to_string(), 1),
            finalize_placeholders("'it''s?' = ?", 4).unwrap()
        );
    }

    #[test]
    fn test_jsonb_operators() {
        assert_eq!(
            ("data ?? $1 OR data ?| $2 OR data ?& $3".to_string(), 3),
            finalize_placeholders("data ?? ? OR data ?| ? OR data ?& ?", 0).unwrap()
        );
    }

    #[test]
    fn test_marker_at_end_and_start() {
        assert_eq!(("$1,$2".to_string(), 2), finalize_placeholders("?,?", 0).unwrap());
        assert_eq!(("".to_string(), 0), finalize_placeholders("", 7).unwrap());
    }
}
