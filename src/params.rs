//! Params：一次构建内按顺序累积的绑定参数，以及把单个参数转成占位文本的绑定逻辑。

use crate::error::BuildError;
use crate::modifiers::Arg;
use crate::value::SqlValue;

const NULL: &str = "NULL";
const PLACEHOLDER: &str = "?";

/// 参数流：只追加，顺序与 SQL 中的 `?` 一一对应。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: Vec<SqlValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<SqlValue> {
        self.values
    }

    /// Bind：返回 `arg` 在 SQL 中的占位文本，并把它需要的参数追加到流里。
    ///
    /// - `Null` → `NULL`，不追加
    /// - `Func` → 片段原文，追加其参数
    /// - 子查询 → `(<sql>)`，追加其参数
    /// - 其余标量 → `?`，追加自身
    ///
    /// 单值位置不接受 `List`：一个列只对应一个占位符，列表只能出现在
    /// IN、FIELD 与原始 SQL 中（见 [`Params::bind_list`]、[`Params::bind_raw`]）。
    pub fn bind(&mut self, arg: &Arg) -> Result<String, BuildError> {
        match arg {
            Arg::Value(v) => Ok(self.bind_value(v.clone())),
            Arg::Valuer(v) => {
                let v = v.value()?;
                Ok(self.bind_value(v))
            }
            Arg::Func(f) => {
                self.values.extend(f.values.iter().cloned());
                Ok(f.query.clone())
            }
            Arg::SubQuery(sub) => {
                self.values.extend(sub.params.iter().cloned());
                Ok(format!("({})", sub.sql))
            }
            Arg::List(items) => Err(BuildError::MalformedCondition(format!(
                "a list of {} values cannot be bound where a single value is expected",
                items.len()
            ))),
        }
    }

    /// BindList：逐个绑定，占位文本以 `, ` 连接。
    pub fn bind_list(&mut self, args: &[Arg]) -> Result<String, BuildError> {
        let mut out = String::new();
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.bind(arg)?);
        }
        Ok(out)
    }

    /// BindRaw：原始 SQL 的参数，占位符由调用方写好；`List` 展开一层，
    /// 对应 `IN (?, ?)` 这类写法。
    pub fn bind_raw(&mut self, args: &[Arg]) -> Result<(), BuildError> {
        for arg in args {
            match arg {
                Arg::List(items) => {
                    self.bind_list(items)?;
                }
                other => {
                    self.bind(other)?;
                }
            }
        }
        Ok(())
    }

    fn bind_value(&mut self, v: SqlValue) -> String {
        if v.is_null() {
            return NULL.to_string();
        }
        self.values.push(v);
        PLACEHOLDER.to_string()
    }
}
