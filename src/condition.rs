//! Condition：WHERE / HAVING 中的单个谓词，以及把条件列表渲染成子句的逻辑。
//!
//! 条件有两种来源：
//!
//! - 类型化构造函数（`Condition::eq`、`Condition::in_` 等），直接给出形态；
//! - `Condition::from_args`，按参数个数与首参数类型推断形态，
//!   对应 `where_(("age", ">", 18))` 这类元组写法。
//!
//! 推断的优先级固定为：子查询 → 字符串含 `?` 或 `(` → 只有 1 个参数 → 列名。
//! 因此多于 3 个参数且列表达式含 `(` 时会被当作原始谓词；这种情况请用类型化构造函数。
//!
//! 3 个参数的原始谓词有一个歧义：第二个参数恰好是运算符字样时
//! （如 `("name LIKE ? OR nick LIKE ?", "like", "bob")`），会按 `<列> <运算符> <值>` 处理，
//! 生成的语句取决于参数值本身。占位符数量校验会让它在构建时失败；
//! 参数来自用户输入时请用 `Condition::raw`。

use crate::error::BuildError;
use crate::modifiers::Arg;
use crate::params::Params;
use crate::statement::Statement;
use crate::string_builder::StringBuilder;

/// 条件与前一个条件的连接词。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connector {
    #[default]
    And,
    Or,
}

impl Connector {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// 条件子句的关键字。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Where,
    Having,
}

impl ClauseKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Where => "WHERE",
            Self::Having => "HAVING",
        }
    }
}

/// 比较运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    /// `<>`
    LessGreater,
    LessThan,
    LessEqualThan,
    GreaterThan,
    GreaterEqualThan,
    /// `<=>`
    NullSafeEqual,
    Like,
    NotLike,
    Is,
    IsNot,
    Regexp,
    NotRegexp,
    In,
    NotIn,
    Between,
    NotBetween,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::LessGreater => "<>",
            Self::LessThan => "<",
            Self::LessEqualThan => "<=",
            Self::GreaterThan => ">",
            Self::GreaterEqualThan => ">=",
            Self::NullSafeEqual => "<=>",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::Regexp => "REGEXP",
            Self::NotRegexp => "NOT REGEXP",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Between => "BETWEEN",
            Self::NotBetween => "NOT BETWEEN",
        }
    }

    /// 解析运算符：忽略大小写与多余空白。
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        let op = match normalized.to_ascii_uppercase().as_str() {
            "=" => Self::Equal,
            "!=" => Self::NotEqual,
            "<>" => Self::LessGreater,
            "<" => Self::LessThan,
            "<=" => Self::LessEqualThan,
            ">" => Self::GreaterThan,
            ">=" => Self::GreaterEqualThan,
            "<=>" => Self::NullSafeEqual,
            "LIKE" => Self::Like,
            "NOT LIKE" => Self::NotLike,
            "IS" => Self::Is,
            "IS NOT" => Self::IsNot,
            "REGEXP" => Self::Regexp,
            "NOT REGEXP" => Self::NotRegexp,
            "IN" => Self::In,
            "NOT IN" => Self::NotIn,
            "BETWEEN" => Self::Between,
            "NOT BETWEEN" => Self::NotBetween,
            _ => return None,
        };
        Some(op)
    }

    fn is_in(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    fn is_between(self) -> bool {
        matches!(self, Self::Between | Self::NotBetween)
    }
}

/// 单个谓词。
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// 完整的原始谓词，`args` 依次绑定到其中已有的占位符。
    Raw { sql: String, args: Vec<Arg> },
    /// `<column> = <value>`
    Equals { column: String, value: Arg },
    /// `<column> <op> <value>`
    Compare {
        column: String,
        op: Operator,
        value: Arg,
    },
    /// `<column> [NOT] BETWEEN <low> AND <high>`
    Between {
        column: String,
        op: Operator,
        low: Arg,
        high: Arg,
    },
    /// `<column> [NOT] IN (<values>)`
    InList {
        column: String,
        op: Operator,
        values: Vec<Arg>,
    },
    /// `<keyword> (<sub>)`，如 `EXISTS (SELECT ...)`。
    SubQuery { keyword: String, sub: Statement },
}

impl Condition {
    pub fn raw(sql: impl Into<String>, args: impl IntoIterator<Item = impl Into<Arg>>) -> Self {
        Self::Raw {
            sql: sql.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Arg>) -> Self {
        Self::Equals {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Compare：任意二元比较；IN/BETWEEN 会被转交给对应的形态。
    pub fn compare(
        column: impl Into<String>,
        op: Operator,
        value: impl Into<Arg>,
    ) -> Result<Self, BuildError> {
        let column = column.into();
        let value = value.into();
        if op.is_in() {
            return Ok(Self::in_list(column, op, value));
        }
        if op.is_between() {
            return match value {
                Arg::List(bounds) => match <[Arg; 2]>::try_from(bounds) {
                    Ok([low, high]) => Ok(Self::Between {
                        column,
                        op,
                        low,
                        high,
                    }),
                    Err(_) => Err(between_arity(&column)),
                },
                _ => Err(between_arity(&column)),
            };
        }
        Ok(Self::Compare { column, op, value })
    }

    pub fn between(column: impl Into<String>, low: impl Into<Arg>, high: impl Into<Arg>) -> Self {
        Self::Between {
            column: column.into(),
            op: Operator::Between,
            low: low.into(),
            high: high.into(),
        }
    }

    pub fn not_between(
        column: impl Into<String>,
        low: impl Into<Arg>,
        high: impl Into<Arg>,
    ) -> Self {
        Self::Between {
            column: column.into(),
            op: Operator::NotBetween,
            low: low.into(),
            high: high.into(),
        }
    }

    pub fn in_(
        column: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Arg>>,
    ) -> Self {
        Self::InList {
            column: column.into(),
            op: Operator::In,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn not_in(
        column: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<Arg>>,
    ) -> Self {
        Self::InList {
            column: column.into(),
            op: Operator::NotIn,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exists(sub: Statement) -> Self {
        Self::SubQuery {
            keyword: "EXISTS".to_string(),
            sub,
        }
    }

    pub fn not_exists(sub: Statement) -> Self {
        Self::SubQuery {
            keyword: "NOT EXISTS".to_string(),
            sub,
        }
    }

    /// FromArgs：按参数个数与首参数类型推断条件形态。
    ///
    /// | 参数 | 形态 |
    /// |------|------|
    /// | `("a = b")` | 原始谓词 |
    /// | `("a = ?", v)` | 原始谓词，绑定 `v` |
    /// | `("a", v)` | `a = ?` |
    /// | `(sub, "EXISTS")` | `EXISTS (sub)` |
    /// | `("a", op, v)` | `a <op> ?`；`IN` 时 `a IN (?, ...)` |
    /// | `("a = ? OR b = ?", v1, v2, ...)` | 原始谓词，依次绑定 |
    /// | `("a", "BETWEEN", lo, hi)` | `a BETWEEN ? AND ?` |
    /// | `("a", "IN", v1, v2, ...)` | `a IN (?, ?, ...)` |
    pub fn from_args(mut args: Vec<Arg>) -> Result<Self, BuildError> {
        let shape = match args.first() {
            None => return Err(BuildError::MalformedCondition("no arguments".to_string())),
            Some(Arg::SubQuery(_)) => Shape::SubQuery,
            Some(first) => match first.as_str() {
                Some(s) if s.trim().is_empty() => {
                    return Err(BuildError::MalformedCondition(
                        "condition text must not be empty".to_string(),
                    ));
                }
                Some(s) if s.contains('?') || s.contains('(') || args.len() == 1 => Shape::Raw,
                Some(_) => Shape::Column,
                None => {
                    return Err(BuildError::MalformedCondition(format!(
                        "first argument must be a string or a sub-query, got {}",
                        first.kind()
                    )));
                }
            },
        };

        match (args.len(), shape) {
            (1, Shape::SubQuery) => Err(BuildError::MalformedCondition(
                "sub-query condition needs a keyword such as EXISTS".to_string(),
            )),
            (1, _) => Ok(Self::Raw {
                sql: string_at(&args, 0),
                args: Vec::new(),
            }),
            (2, Shape::Raw) => {
                let rest = args.split_off(1);
                Ok(Self::Raw {
                    sql: string_at(&args, 0),
                    args: rest,
                })
            }
            (2, Shape::Column) => {
                let value = args.remove(1);
                Ok(Self::Equals {
                    column: string_at(&args, 0),
                    value,
                })
            }
            (2, Shape::SubQuery) => {
                let keyword = match args[1].as_str() {
                    Some(k) if !k.trim().is_empty() => k.trim().to_string(),
                    _ => {
                        return Err(BuildError::MalformedCondition(
                            "sub-query condition needs a keyword such as EXISTS".to_string(),
                        ));
                    }
                };
                match args.swap_remove(0) {
                    Arg::SubQuery(sub) => Ok(Self::SubQuery { keyword, sub }),
                    other => Err(BuildError::MalformedCondition(format!(
                        "expected a sub-query, got {}",
                        other.kind()
                    ))),
                }
            }
            (3, shape) => {
                let op = args[1].as_str().map(|s| (s.to_string(), Operator::parse(s)));
                match (op, shape) {
                    (Some((_, Some(op))), Shape::Raw | Shape::Column) => {
                        let value = args.remove(2);
                        let column = string_at(&args, 0);
                        Self::compare(column, op, value)
                    }
                    (_, Shape::Raw) => {
                        let rest = args.split_off(1);
                        Ok(Self::Raw {
                            sql: string_at(&args, 0),
                            args: rest,
                        })
                    }
                    (Some((token, None)), Shape::Column) => Err(BuildError::InvalidOperator(token)),
                    (None, Shape::Column) => Err(BuildError::MalformedCondition(format!(
                        "operator must be a string, got {}",
                        args[1].kind()
                    ))),
                    (_, Shape::SubQuery) => Err(BuildError::MalformedCondition(
                        "a sub-query can only be combined with a keyword".to_string(),
                    )),
                }
            }
            (_, Shape::Raw) => {
                let rest = args.split_off(1);
                Ok(Self::Raw {
                    sql: string_at(&args, 0),
                    args: rest,
                })
            }
            (_, Shape::Column) => {
                let token = args[1].as_str().map(str::to_string).ok_or_else(|| {
                    BuildError::MalformedCondition(format!(
                        "operator must be a string, got {}",
                        args[1].kind()
                    ))
                })?;
                let op = Operator::parse(&token).ok_or_else(|| BuildError::InvalidOperator(token))?;
                if op.is_between() {
                    if args.len() != 4 {
                        return Err(between_arity(args[0].as_str().unwrap_or_default()));
                    }
                    let high = args.remove(3);
                    let low = args.remove(2);
                    return Ok(Self::Between {
                        column: string_at(&args, 0),
                        op,
                        low,
                        high,
                    });
                }
                if op.is_in() {
                    let values = args.split_off(2);
                    return Ok(Self::InList {
                        column: string_at(&args, 0),
                        op,
                        values,
                    });
                }
                Err(BuildError::InvalidOperator(op.as_str().to_string()))
            }
            (_, Shape::SubQuery) => Err(BuildError::MalformedCondition(
                "a sub-query can only be combined with a keyword".to_string(),
            )),
        }
    }

    fn in_list(column: String, op: Operator, value: Arg) -> Self {
        let values = match value {
            Arg::List(items) => items,
            single => vec![single],
        };
        Self::InList { column, op, values }
    }

    /// Render：输出谓词文本，同时把参数按出现顺序追加到 `params`。
    pub fn render(&self, params: &mut Params) -> Result<String, BuildError> {
        match self {
            Self::Raw { sql, args } => {
                if sql.trim().is_empty() {
                    return Err(BuildError::MalformedCondition(
                        "condition text must not be empty".to_string(),
                    ));
                }
                params.bind_raw(args)?;
                Ok(sql.clone())
            }
            Self::Equals { column, value } => Ok(format!("{column} = {}", params.bind(value)?)),
            Self::Compare { column, op, value } => {
                Ok(format!("{column} {} {}", op.as_str(), params.bind(value)?))
            }
            Self::Between {
                column,
                op,
                low,
                high,
            } => {
                let low = params.bind(low)?;
                let high = params.bind(high)?;
                Ok(format!("{column} {} {low} AND {high}", op.as_str()))
            }
            Self::InList { column, op, values } => match values.as_slice() {
                [] => Err(BuildError::EmptyList(column.clone())),
                // 子查询自带括号
                [sub @ Arg::SubQuery(_)] => {
                    Ok(format!("{column} {} {}", op.as_str(), params.bind(sub)?))
                }
                _ => Ok(format!(
                    "{column} {} ({})",
                    op.as_str(),
                    params.bind_list(values)?
                )),
            },
            Self::SubQuery { keyword, sub } => {
                let sub = params.bind(&Arg::SubQuery(sub.clone()))?;
                Ok(format!("{keyword} {sub}"))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    SubQuery,
    Raw,
    Column,
}

/// 已分派的首参数一定是字符串。
fn string_at(args: &[Arg], idx: usize) -> String {
    args.get(idx)
        .and_then(Arg::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn between_arity(column: &str) -> BuildError {
    BuildError::MalformedCondition(format!("BETWEEN on `{column}` needs exactly two bounds"))
}

/// 条件与其连接词。
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionEntry {
    pub connector: Connector,
    pub condition: Condition,
}

/// RenderConditions：渲染 `WHERE ...` / `HAVING ...`；列表为空时返回空串。
pub fn render_conditions(
    kind: ClauseKind,
    entries: &[ConditionEntry],
    params: &mut Params,
) -> Result<String, BuildError> {
    if entries.is_empty() {
        return Ok(String::new());
    }

    let mut buf = StringBuilder::new();
    buf.write_str(kind.keyword());
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            buf.write_leading(entry.connector.as_str());
        }
        let sql = entry.condition.render(params)?;
        buf.write_leading(&sql);
    }
    Ok(buf.into_string())
}
