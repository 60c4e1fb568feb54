//! INSERT / REPLACE 子句：有序记录、批量 VALUES 与 ON DUPLICATE KEY UPDATE。

use crate::error::BuildError;
use crate::modifiers::Arg;
use crate::params::Params;
use crate::string_builder::StringBuilder;

/// 一行数据：按插入顺序保存的 `列 → 值`。
///
/// 列顺序就是生成 SQL 时的列顺序，同一条记录每次构建的结果都相同。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Arg)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set：链式设置一列；列已存在时原位替换值。
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Arg>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some((_, v)) => *v = value,
            None => self.fields.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Arg> {
        self.fields
            .iter()
            .find_map(|(c, v)| (c == column).then_some(v))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn fields(&self) -> &[(String, Arg)] {
        &self.fields
    }
}

impl<K: Into<String>, V: Into<Arg>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut r = Self::new();
        for (k, v) in iter {
            r.insert(k, v);
        }
        r
    }
}

impl<K: Into<String>, V: Into<Arg>, const N: usize> From<[(K, V); N]> for Record {
    fn from(v: [(K, V); N]) -> Self {
        v.into_iter().collect()
    }
}

/// ON DUPLICATE KEY UPDATE 设置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnDuplicate {
    pub columns: Vec<String>,
    /// 冲突时通过 `LAST_INSERT_ID(col)` 保留自增 ID 的列。
    pub last_insert_id: Option<String>,
}

impl OnDuplicate {
    pub(crate) fn render(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }
        let mut buf = StringBuilder::new();
        buf.write_str("ON DUPLICATE KEY UPDATE ");
        if let Some(col) = &self.last_insert_id {
            buf.write_str(&format!("{col}=LAST_INSERT_ID({col}), "));
        }
        buf.write_joined(self.columns.iter().map(|c| format!("{c} = VALUE({c})")), ", ");
        buf.into_string()
    }
}

/// RenderInsert：`<verb> [options ]INTO <table> (<cols>) VALUES (...), (...)`。
///
/// 列取自第一条记录；其余记录必须拥有完全相同的列集合（顺序可以不同，按第一条记录的列顺序取值）。
pub(crate) fn render_insert(
    verb: &str,
    options: &[String],
    table: &str,
    records: &[Record],
    params: &mut Params,
) -> Result<String, BuildError> {
    let first = records.first().ok_or(BuildError::EmptyBatch)?;
    if first.is_empty() {
        return Err(BuildError::EmptyRecord);
    }
    let columns: Vec<&str> = first.columns().collect();

    let mut rows = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let values = aligned_values(index, &columns, record)?;
        rows.push(format!("({})", bind_all(params, values)?));
    }

    let mut buf = StringBuilder::new();
    buf.write_str(verb);
    buf.write_str(" ");
    for opt in options {
        buf.write_str(opt);
        buf.write_str(" ");
    }
    buf.write_str("INTO ");
    buf.write_str(table);
    buf.write_str(" (");
    buf.write_joined(&columns, ", ");
    buf.write_str(") VALUES ");
    buf.write_joined(&rows, ", ");
    Ok(buf.into_string())
}

fn aligned_values<'a>(
    index: usize,
    columns: &[&str],
    record: &'a Record,
) -> Result<Vec<&'a Arg>, BuildError> {
    let mismatch = || BuildError::BatchShapeMismatch {
        index,
        expected: columns.join(", "),
        found: record.columns().collect::<Vec<_>>().join(", "),
    };
    if record.len() != columns.len() {
        return Err(mismatch());
    }
    columns
        .iter()
        .map(|c| record.get(c).ok_or_else(mismatch))
        .collect()
}

fn bind_all<'a>(
    params: &mut Params,
    values: impl IntoIterator<Item = &'a Arg>,
) -> Result<String, BuildError> {
    let placeholders = values
        .into_iter()
        .map(|v| params.bind(v))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(placeholders.join(", "))
}
