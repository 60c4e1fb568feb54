//! Statement：一次终结调用的产物（SQL 文本 + 有序参数）。

use crate::error::BuildError;
use crate::interpolate::{InterpolateError, count_placeholders, interpolate};
use crate::value::SqlValue;

/// 渲染完成的语句。
///
/// 也可以作为参数传给另一个 builder 的条件，充当子查询。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// 把参数按 MySQL 字面量规则内联进 SQL，仅用于日志/调试。
    pub fn interpolate(&self) -> Result<String, InterpolateError> {
        interpolate(&self.sql, &self.params)
    }

    /// 校验引号外的 `?` 数量与参数数量一致。
    pub(crate) fn check_parity(&self) -> Result<(), BuildError> {
        let placeholders = count_placeholders(&self.sql);
        if placeholders != self.params.len() {
            return Err(BuildError::PlaceholderMismatch {
                placeholders,
                params: self.params.len(),
            });
        }
        Ok(())
    }
}
