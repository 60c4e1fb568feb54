//! Wrapper：链式配置表名、条件、排序与 LIMIT，再由终结调用生成语句。
//!
//! 每次终结调用（`get`/`insert`/`update`/`delete`/`replace`/`raw_query` 等）都会：
//!
//! 1. 按固定顺序拼接：主体、WHERE、GROUP BY、HAVING、ORDER BY、LIMIT；
//! 2. 校验占位符数量与参数数量一致；
//! 3. 把结果记为 `last_query()` / `last_params()`；
//! 4. 清空所有配置状态（无论成功与否），同一个实例可以直接用于下一条无关语句。
//!
//! 配置阶段发现的错误（条件形态不合法、运算符未知等）会暂存，由下一次终结调用返回。
//! `reset` 可以在不构建的情况下手动丢弃状态。

use crate::condition::{ClauseKind, Condition, ConditionEntry, Connector, render_conditions};
use crate::config::default_page_limit;
use crate::delete::render_delete;
use crate::error::BuildError;
use crate::executor::{ExecResult, Executor};
use crate::insert::{OnDuplicate, Record, render_insert};
use crate::macros::{IntoStrings, collect_into_strings};
use crate::modifiers::{Arg, IntoArgs};
use crate::order::{Direction, Limit, OrderSpec, render_order_by};
use crate::params::Params;
use crate::select::{page_limit, render_select, total_pages};
use crate::statement::Statement;
use crate::string_builder::StringBuilder;
use crate::update::render_update;
use crate::value::SqlValue;

#[derive(Debug, Clone, Default)]
struct BuilderState {
    tables: Vec<String>,
    wheres: Vec<ConditionEntry>,
    groups: Vec<String>,
    havings: Vec<ConditionEntry>,
    orders: Vec<OrderSpec>,
    limit: Limit,
    options: Vec<String>,
    on_duplicate: OnDuplicate,
}

impl BuilderState {
    fn table(&self) -> Result<&str, BuildError> {
        self.tables
            .first()
            .map(String::as_str)
            .ok_or(BuildError::MissingTable)
    }

    /// 主体之后的 WHERE / GROUP BY / HAVING / ORDER BY / LIMIT。
    fn write_filters(
        &self,
        buf: &mut StringBuilder,
        params: &mut Params,
    ) -> Result<(), BuildError> {
        buf.write_leading(&render_conditions(ClauseKind::Where, &self.wheres, params)?);
        if !self.groups.is_empty() {
            buf.write_leading("GROUP BY");
            buf.write_leading(&self.groups.join(", "));
        }
        buf.write_leading(&render_conditions(ClauseKind::Having, &self.havings, params)?);
        buf.write_leading(&render_order_by(&self.orders, params)?);
        buf.write_leading(&self.limit.render());
        Ok(())
    }

    /// INSERT / REPLACE 不接受过滤类子句。
    fn reject_filters(&self, statement: &'static str) -> Result<(), BuildError> {
        let clause = if !self.wheres.is_empty() {
            "WHERE"
        } else if !self.groups.is_empty() {
            "GROUP BY"
        } else if !self.havings.is_empty() {
            "HAVING"
        } else if !self.orders.is_empty() {
            "ORDER BY"
        } else if !self.limit.is_none() {
            "LIMIT"
        } else {
            return Ok(());
        };
        Err(BuildError::UnsupportedClause { statement, clause })
    }
}

/// 语句构建器。
///
/// ```
/// use reiner::Wrapper;
///
/// let mut w = Wrapper::new();
/// let stmt = w
///     .table("users")
///     .where_(("age", ">", 18_i64))
///     .or_where(("vip", true))
///     .order_by("id", "DESC")
///     .limit(10)
///     .get(["id", "name"])
///     .unwrap();
/// assert_eq!(
///     stmt.sql,
///     "SELECT id, name FROM users WHERE age > ? OR vip = ? ORDER BY id DESC LIMIT 10"
/// );
/// assert_eq!(stmt.params.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Wrapper {
    state: BuilderState,
    pending: Option<BuildError>,
    last: Statement,

    page_limit: u64,
    total_count: u64,
    total_page: u64,
    count: u64,
    last_insert_id: Option<u64>,
}

impl Default for Wrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Wrapper {
    pub fn new() -> Self {
        Self {
            state: BuilderState::default(),
            pending: None,
            last: Statement::default(),
            page_limit: default_page_limit(),
            total_count: 0,
            total_page: 0,
            count: 0,
            last_insert_id: None,
        }
    }

    /// Reset：丢弃当前配置（表名、条件、排序、LIMIT、选项）与暂存的错误。
    pub fn reset(&mut self) -> &mut Self {
        self.state = BuilderState::default();
        self.pending = None;
        self
    }

    pub fn table<T: IntoStrings>(&mut self, tables: T) -> &mut Self {
        self.state.tables = collect_into_strings(tables);
        self
    }

    /// SetQueryOption：INSERT / REPLACE 的修饰词，如 `IGNORE`、`LOW_PRIORITY`。
    pub fn set_query_option<T: IntoStrings>(&mut self, options: T) -> &mut Self {
        self.state.options = collect_into_strings(options);
        self
    }

    /// OnDuplicate：`ON DUPLICATE KEY UPDATE col = VALUE(col), ...`；
    /// `last_insert_id` 指定的列会通过 `LAST_INSERT_ID(col)` 保留自增 ID。
    pub fn on_duplicate<T: IntoStrings>(
        &mut self,
        columns: T,
        last_insert_id: Option<&str>,
    ) -> &mut Self {
        self.state.on_duplicate = OnDuplicate {
            columns: collect_into_strings(columns),
            last_insert_id: last_insert_id.map(str::to_string),
        };
        self
    }

    pub fn limit(&mut self, count: u64) -> &mut Self {
        self.state.limit = Limit::Count(count);
        self
    }

    /// LimitRange：`LIMIT <offset>, <count>`。
    pub fn limit_range(&mut self, offset: u64, count: u64) -> &mut Self {
        self.state.limit = Limit::Range { offset, count };
        self
    }

    /// OrderBy：`()` 为裸列名，`"DESC"` 为方向，`("ASC", v1, v2, ...)` 为 FIELD 自定义顺序。
    pub fn order_by<A: IntoArgs>(&mut self, column: &str, args: A) -> &mut Self {
        match OrderSpec::from_args(column, args.into_args()) {
            Ok(spec) => self.state.orders.push(spec),
            Err(err) => self.record_error(err),
        }
        self
    }

    pub fn order_by_field<T: Into<Arg>>(
        &mut self,
        column: &str,
        direction: Direction,
        values: impl IntoIterator<Item = T>,
    ) -> &mut Self {
        self.state.orders.push(OrderSpec::Field {
            column: column.to_string(),
            direction,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// GroupBy：追加分组列，多次调用按顺序累积。
    pub fn group_by<T: IntoStrings>(&mut self, columns: T) -> &mut Self {
        self.state.groups.extend(collect_into_strings(columns));
        self
    }

    pub fn where_<A: IntoArgs>(&mut self, args: A) -> &mut Self {
        let cond = Condition::from_args(args.into_args());
        self.push_condition(ClauseKind::Where, Connector::And, cond)
    }

    pub fn or_where<A: IntoArgs>(&mut self, args: A) -> &mut Self {
        let cond = Condition::from_args(args.into_args());
        self.push_condition(ClauseKind::Where, Connector::Or, cond)
    }

    pub fn having<A: IntoArgs>(&mut self, args: A) -> &mut Self {
        let cond = Condition::from_args(args.into_args());
        self.push_condition(ClauseKind::Having, Connector::And, cond)
    }

    pub fn or_having<A: IntoArgs>(&mut self, args: A) -> &mut Self {
        let cond = Condition::from_args(args.into_args());
        self.push_condition(ClauseKind::Having, Connector::Or, cond)
    }

    pub fn where_cond(&mut self, cond: Condition) -> &mut Self {
        self.push_condition(ClauseKind::Where, Connector::And, Ok(cond))
    }

    pub fn or_where_cond(&mut self, cond: Condition) -> &mut Self {
        self.push_condition(ClauseKind::Where, Connector::Or, Ok(cond))
    }

    pub fn having_cond(&mut self, cond: Condition) -> &mut Self {
        self.push_condition(ClauseKind::Having, Connector::And, Ok(cond))
    }

    pub fn or_having_cond(&mut self, cond: Condition) -> &mut Self {
        self.push_condition(ClauseKind::Having, Connector::Or, Ok(cond))
    }

    fn push_condition(
        &mut self,
        kind: ClauseKind,
        connector: Connector,
        cond: Result<Condition, BuildError>,
    ) -> &mut Self {
        match cond {
            Ok(condition) => {
                let entry = ConditionEntry {
                    connector,
                    condition,
                };
                match kind {
                    ClauseKind::Where => self.state.wheres.push(entry),
                    ClauseKind::Having => self.state.havings.push(entry),
                }
            }
            Err(err) => self.record_error(err),
        }
        self
    }

    /// 只保留第一个错误。
    fn record_error(&mut self, err: BuildError) {
        tracing::debug!(error = %err, "builder configuration rejected");
        self.pending.get_or_insert(err);
    }

    pub fn get<T: IntoStrings>(&mut self, columns: T) -> Result<Statement, BuildError> {
        let columns = collect_into_strings(columns);
        self.finish("SELECT", |state, params| {
            let mut buf = StringBuilder::new();
            buf.write_leading(&render_select(state.table()?, &columns));
            state.write_filters(&mut buf, params)?;
            Ok(buf.into_string())
        })
    }

    /// GetOne：等价于 `limit(1).get(columns)`。
    pub fn get_one<T: IntoStrings>(&mut self, columns: T) -> Result<Statement, BuildError> {
        self.limit(1).get(columns)
    }

    /// GetValue：`SELECT <column> AS Value ...`。
    pub fn get_value(&mut self, column: &str) -> Result<Statement, BuildError> {
        self.get(format!("{column} AS Value"))
    }

    /// Paginate：按 `page_limit` 取第 `page` 页（从 1 开始），并用 `total_count` 更新 `total_page`。
    pub fn paginate<T: IntoStrings>(
        &mut self,
        page: u64,
        columns: T,
    ) -> Result<Statement, BuildError> {
        let page_size = self.page_limit;
        if page_size == 0 {
            self.reset();
            return Err(BuildError::InvalidPageLimit);
        }
        if page == 0 {
            self.reset();
            return Err(BuildError::InvalidPage(page));
        }
        self.state.limit = page_limit(page, page_size);
        let stmt = self.get(columns)?;
        self.total_page = total_pages(self.total_count, page_size);
        Ok(stmt)
    }

    pub fn insert(&mut self, record: impl Into<Record>) -> Result<Statement, BuildError> {
        let records = [record.into()];
        self.finish("INSERT", |state, params| {
            render_insert_like("INSERT", state, &records, params)
        })
    }

    /// InsertMulti：多条记录共享一个 VALUES；列取自第一条记录，其余记录必须列集合相同。
    pub fn insert_multi<R: Into<Record>>(
        &mut self,
        records: impl IntoIterator<Item = R>,
    ) -> Result<Statement, BuildError> {
        let records: Vec<Record> = records.into_iter().map(Into::into).collect();
        self.finish("INSERT", |state, params| {
            render_insert_like("INSERT", state, &records, params)
        })
    }

    /// Replace：`REPLACE INTO ...`，不附带 ON DUPLICATE KEY UPDATE。
    pub fn replace(&mut self, record: impl Into<Record>) -> Result<Statement, BuildError> {
        let records = [record.into()];
        self.finish("REPLACE", |state, params| {
            if !state.on_duplicate.columns.is_empty() {
                return Err(BuildError::UnsupportedClause {
                    statement: "REPLACE",
                    clause: "ON DUPLICATE KEY UPDATE",
                });
            }
            render_insert_like("REPLACE", state, &records, params)
        })
    }

    pub fn update(&mut self, record: impl Into<Record>) -> Result<Statement, BuildError> {
        let record = record.into();
        self.finish("UPDATE", |state, params| {
            let mut buf = StringBuilder::new();
            buf.write_leading(&render_update(state.table()?, &record, params)?);
            state.write_filters(&mut buf, params)?;
            Ok(buf.into_string())
        })
    }

    pub fn delete(&mut self) -> Result<Statement, BuildError> {
        self.finish("DELETE", |state, params| {
            if state.tables.is_empty() {
                return Err(BuildError::MissingTable);
            }
            let mut buf = StringBuilder::new();
            buf.write_leading(&render_delete(&state.tables));
            state.write_filters(&mut buf, params)?;
            Ok(buf.into_string())
        })
    }

    /// RawQuery：原样使用 `sql`，`values` 依次绑定到其中的占位符。
    pub fn raw_query<A: IntoArgs>(
        &mut self,
        sql: impl Into<String>,
        values: A,
    ) -> Result<Statement, BuildError> {
        let sql = sql.into();
        let values = values.into_args();
        self.finish("RAW", move |_, params| {
            params.bind_raw(&values)?;
            Ok(sql)
        })
    }

    fn finish<F>(&mut self, kind: &'static str, build: F) -> Result<Statement, BuildError>
    where
        F: FnOnce(&BuilderState, &mut Params) -> Result<String, BuildError>,
    {
        let state = std::mem::take(&mut self.state);
        let result = match self.pending.take() {
            Some(err) => Err(err),
            None => render(&state, build),
        };
        match result {
            Ok(stmt) => {
                tracing::debug!(
                    statement = kind,
                    sql = %stmt.sql,
                    params = stmt.params.len(),
                    "statement built"
                );
                self.last = stmt.clone();
                Ok(stmt)
            }
            Err(err) => {
                tracing::debug!(statement = kind, error = %err, "statement build failed");
                Err(err)
            }
        }
    }

    pub fn last_statement(&self) -> &Statement {
        &self.last
    }

    pub fn last_query(&self) -> &str {
        &self.last.sql
    }

    pub fn last_params(&self) -> &[SqlValue] {
        &self.last.params
    }

    pub fn page_limit(&self) -> u64 {
        self.page_limit
    }

    pub fn set_page_limit(&mut self, limit: u64) -> &mut Self {
        self.page_limit = limit;
        self
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// SetTotalCount：记录总行数（通常来自先前的 COUNT 查询），供 `paginate` 计算总页数。
    pub fn set_total_count(&mut self, total: u64) -> &mut Self {
        self.total_count = total;
        self
    }

    pub fn total_page(&self) -> u64 {
        self.total_page
    }

    /// 最近一次 `exec_last` 影响的行数。
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn last_insert_id(&self) -> Option<u64> {
        self.last_insert_id
    }

    /// ExecLast：用 `executor` 执行最近构建的语句，并记录影响行数与自增 ID。
    pub fn exec_last<E: Executor>(&mut self, executor: &mut E) -> Result<ExecResult, E::Error> {
        let result = self.last.exec_with(executor)?;
        self.count = result.rows_affected;
        self.last_insert_id = result.last_insert_id;
        Ok(result)
    }

    pub fn query_last<E: Executor>(&self, executor: &mut E) -> Result<E::Rows, E::Error> {
        self.last.query_with(executor)
    }
}

fn render<F>(state: &BuilderState, build: F) -> Result<Statement, BuildError>
where
    F: FnOnce(&BuilderState, &mut Params) -> Result<String, BuildError>,
{
    let mut params = Params::new();
    let sql = build(state, &mut params)?;
    let stmt = Statement::new(sql.trim(), params.into_vec());
    stmt.check_parity()?;
    Ok(stmt)
}

fn render_insert_like(
    verb: &'static str,
    state: &BuilderState,
    records: &[Record],
    params: &mut Params,
) -> Result<String, BuildError> {
    state.reject_filters(verb)?;
    let mut buf = StringBuilder::new();
    let table = state.table()?;
    buf.write_leading(&render_insert(verb, &state.options, table, records, params)?);
    buf.write_leading(&state.on_duplicate.render());
    Ok(buf.into_string())
}
