//! reiner：链式调用生成参数化 MySQL 语句与有序参数列表。
//!
//! 只负责拼接 SQL 与收集参数；连接、事务与结果扫描交给实现了 [`Executor`] 的执行引擎。

pub mod condition;
pub mod config;
mod delete;
pub mod error;
pub mod executor;
pub mod func;
pub mod insert;
pub mod interpolate;
pub mod macros;
pub mod modifiers;
pub mod order;
pub mod params;
mod select;
pub mod statement;
mod string_builder;
mod update;
pub mod value;
pub mod valuer;
pub mod wrapper;
#[cfg(test)]
mod wrapper_tests;

pub use crate::condition::{ClauseKind, Condition, ConditionEntry, Connector, Operator};
pub use crate::config::{
    DEFAULT_PAGE_LIMIT, default_page_limit, set_default_page_limit, set_default_page_limit_scoped,
};
pub use crate::error::BuildError;
pub use crate::executor::{ExecResult, Executor};
pub use crate::func::{Func, func, now};
pub use crate::insert::{OnDuplicate, Record};
pub use crate::interpolate::{InterpolateError, interpolate};
pub use crate::macros::IntoStrings;
pub use crate::modifiers::{Arg, IntoArgs, list};
pub use crate::order::{Direction, Limit, OrderSpec};
pub use crate::params::Params;
pub use crate::statement::Statement;
pub use crate::value::SqlValue;
pub use crate::valuer::{SqlValuer, ValuerError};
pub use crate::wrapper::Wrapper;
