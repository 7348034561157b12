use querychain_derive::Bindable;
use smol_str::SmolStr;

#[derive(Debug, Clone, PartialEq, Bindable)]
pub enum Bind {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    #[bindable(ignore)]
    Bytes(Vec<u8>),
    #[bindable(ignore)]
    List(Vec<Bind>),
    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),
    #[cfg(feature = "chrono")]
    Timestamp(chrono::DateTime<chrono::Utc>),
    #[cfg(feature = "chrono")]
    Date(chrono::NaiveDate),
    #[cfg(feature = "chrono")]
    NaiveDateTime(chrono::NaiveDateTime),
    #[cfg(feature = "json")]
    Json(serde_json::Value),
}

pub trait IntoBind {
    fn into_bind(self) -> Bind;
}

impl<T> IntoBind for Option<T>
where
    T: IntoBind,
{
    fn into_bind(self) -> Bind {
        match self {
            Some(value) => value.into_bind(),
            None => Bind::Null,
        }
    }
}

impl<T> IntoBind for Vec<T>
where
    T: IntoBind,
{
    fn into_bind(self) -> Bind {
        Bind::List(self.into_iter().map(IntoBind::into_bind).collect())
    }
}

impl IntoBind for &str {
    fn into_bind(self) -> Bind {
        Bind::String(self.to_owned())
    }
}

impl IntoBind for &String {
    fn into_bind(self) -> Bind {
        Bind::String(self.clone())
    }
}

impl IntoBind for SmolStr {
    fn into_bind(self) -> Bind {
        Bind::String(self.to_string())
    }
}

impl From<&str> for Bind {
    fn from(value: &str) -> Self {
        Bind::String(value.to_owned())
    }
}

pub trait IntoBinds {
    fn into_binds(self) -> Vec<Bind>;
}

impl<T> IntoBinds for Vec<T>
where
    T: IntoBind,
{
    fn into_binds(self) -> Vec<Bind> {
        self.into_iter().map(IntoBind::into_bind).collect()
    }
}

impl<T, const N: usize> IntoBinds for [T; N]
where
    T: IntoBind,
{
    fn into_binds(self) -> Vec<Bind> {
        self.into_iter().map(IntoBind::into_bind).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnValue {
    pub(crate) column_name: SmolStr,
}

impl ColumnValue {
    pub fn new(column_name: impl Into<SmolStr>) -> Self {
        Self {
            column_name: column_name.into(),
        }
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Bind),
    Column(ColumnValue),
}

pub trait IntoOperand {
    fn into_operand(self) -> Operand;
}

impl<T> IntoOperand for T
where
    T: IntoBind,
{
    fn into_operand(self) -> Operand {
        Operand::Value(self.into_bind())
    }
}

impl IntoOperand for ColumnValue {
    fn into_operand(self) -> Operand {
        Operand::Column(self)
    }
}

impl IntoOperand for Operand {
    fn into_operand(self) -> Operand {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_bind() {
        assert_eq!(Bind::I32(52), 52.into_bind());
        assert_eq!(Bind::String("test".into()), "test".into_bind());
        assert_eq!(Bind::Null, None::<i64>.into_bind());
        assert_eq!(Bind::Bool(true), Some(true).into_bind());
        assert_eq!(
            Bind::List(vec![Bind::String("a".into()), Bind::String("b".into())]),
            vec!["a", "b"].into_bind()
        );
        assert_eq!(Bind::F64(1.5), Bind::from(1.5f64));
    }

    #[test]
    fn test_into_binds() {
        assert_eq!(vec![Bind::I32(1), Bind::I32(2)], [1, 2].into_binds());
        assert_eq!(vec![Bind::Null], vec![None::<&str>].into_binds());
    }

    #[test]
    fn test_into_operand() {
        assert_eq!(Operand::Value(Bind::U8(3)), 3u8.into_operand());
        assert_eq!(
            Operand::Column(ColumnValue::new("t.col")),
            ColumnValue::new("t.col").into_operand()
        );
    }
}
