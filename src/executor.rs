//! Executor：执行引擎接口。本 crate 只负责生成语句，连接、事务与结果扫描由实现方负责。

use crate::statement::Statement;
use crate::value::SqlValue;

/// 写语句的执行结果。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub rows_affected: u64,
    pub last_insert_id: Option<u64>,
}

/// 接收 SQL 文本与有序参数的执行引擎。
pub trait Executor {
    type Rows;
    type Error;

    fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<Self::Rows, Self::Error>;

    fn exec(&mut self, sql: &str, params: &[SqlValue]) -> Result<ExecResult, Self::Error>;
}

impl Statement {
    pub fn query_with<E: Executor>(&self, executor: &mut E) -> Result<E::Rows, E::Error> {
        tracing::trace!(sql = %self.sql, params = self.params.len(), "query");
        executor.query(&self.sql, &self.params)
    }

    pub fn exec_with<E: Executor>(&self, executor: &mut E) -> Result<ExecResult, E::Error> {
        tracing::trace!(sql = %self.sql, params = self.params.len(), "exec");
        executor.exec(&self.sql, &self.params)
    }
}
