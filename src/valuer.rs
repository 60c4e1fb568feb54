//! SqlValuer：在绑定阶段才计算出实际值的参数（类似 `database/sql/driver.Valuer`）。
//!
//! 典型用途是"构建语句那一刻的时间戳"或需要在绑定前做脱敏/序列化的值。

use crate::value::SqlValue;

/// Valuer 求值失败。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sql valuer error: {0}")]
pub struct ValuerError(pub String);

/// 延迟求值的参数；绑定时调用一次 `value`。
pub trait SqlValuer: dyn_clone::DynClone + std::fmt::Debug {
    fn value(&self) -> Result<SqlValue, ValuerError>;
}

dyn_clone::clone_trait_object!(SqlValuer);
