mod bind;
mod builder;
mod col;
mod delete;
mod error;
pub mod expr;
mod filter;
mod ident;
mod insert;
mod join;
mod operator;
mod paginate;
mod parse;
mod placeholder;
pub mod record;
mod returning;
mod select;
mod update;
mod writer;

pub use bind::{Bind, ColumnValue, IntoBind, IntoBinds, IntoOperand, Operand};
pub use builder::{Build, MutationStage, SelectStage, Statement};
pub use col::IntoNames;
pub use delete::DeleteBuilder;
pub use error::{Error, ErrorSlice, SyntaxError};
pub use expr::order::{ColumnOrdering, Direction, asc, desc};
pub use expr::{
    Condition, Conjunction, GroupedConditions, IntoConditions, SimpleCondition, between, column,
    grouped_and, grouped_or, in_list, is_not_null, is_null, not_between, not_in_list,
};
pub use filter::Where;
pub use ident::{Column, SelectColumn, Table, TableReference};
pub use insert::{HasColumns, InsertBuilder, Ready, Start};
pub use join::{JoinBuilder, JoinRelation, JoinType, on, using};
pub use operator::{
    Operator, equals, greater_than, greater_than_equal, ilike, less_than, less_than_equal, like,
    not_equals, not_ilike, not_like,
};
pub use paginate::{Limit, Offset, OrderBy, Paginate};
pub use placeholder::finalize_placeholders;
pub use returning::{Returning, ReturningBuilder};
pub use select::SelectBuilder;
pub use update::{Set, Unset, UpdateBuilder, UpdateFrom};
pub use writer::Fragment;

/// `SELECT <columns> FROM <table>`.
pub fn select<C: IntoNames>(table: &str, columns: C) -> SelectBuilder {
    SelectBuilder::new(table, columns)
}

pub fn insert(table: &str) -> InsertBuilder {
    InsertBuilder::new(table)
}

pub fn update(table: &str) -> UpdateBuilder {
    UpdateBuilder::new(table)
}

pub fn delete(table: &str) -> DeleteBuilder {
    DeleteBuilder::new(table)
}

pub mod prelude {
    pub use crate::{Build, Paginate, Returning, delete, insert, select, update};
}
