//! 构建语句时可能出现的错误。

use crate::valuer::ValuerError;

/// 终结调用（`get`/`insert`/`update`/...）返回的错误。
///
/// 配置阶段（`where_`、`order_by` 等）发现的问题会先暂存在 builder 上，
/// 由下一次终结调用统一返回。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("builder table name is required")]
    MissingTable,
    #[error("builder malformed condition: {0}")]
    MalformedCondition(String),
    #[error("builder invalid operator `{0}`")]
    InvalidOperator(String),
    #[error("builder invalid order direction `{0}`")]
    InvalidDirection(String),
    #[error("builder malformed order by: {0}")]
    MalformedOrder(String),
    #[error("builder empty value list for `{0}`")]
    EmptyList(String),
    #[error("builder record has no columns")]
    EmptyRecord,
    #[error("builder batch insert needs at least one record")]
    EmptyBatch,
    #[error("builder record {index} has columns ({found}), expected ({expected})")]
    BatchShapeMismatch {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("builder {statement} does not accept a {clause} clause")]
    UnsupportedClause {
        statement: &'static str,
        clause: &'static str,
    },
    #[error("builder invalid page number {0}, pages start at 1")]
    InvalidPage(u64),
    #[error("builder page limit must be greater than 0")]
    InvalidPageLimit,
    #[error("builder invalid interval `{0}`")]
    InvalidInterval(String),
    #[error("builder rendered {placeholders} placeholders but bound {params} params")]
    PlaceholderMismatch { placeholders: usize, params: usize },
    #[error("{0}")]
    Valuer(#[from] ValuerError),
}
