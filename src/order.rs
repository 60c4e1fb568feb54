//! ORDER BY 与 LIMIT 子句。

use crate::error::BuildError;
use crate::modifiers::Arg;
use crate::params::Params;
use crate::string_builder::StringBuilder;

/// 排序方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// 单个排序项。
#[derive(Debug, Clone, PartialEq)]
pub enum OrderSpec {
    /// `<column>`
    Column(String),
    /// `<column> <direction>`
    Directed { column: String, direction: Direction },
    /// `FIELD (<column>, <values>) <direction>`：按给定值的顺序排序。
    Field {
        column: String,
        direction: Direction,
        values: Vec<Arg>,
    },
}

impl OrderSpec {
    /// FromArgs：无参数为裸列名；一个参数为方向；更多参数为方向 + FIELD 值列表。
    pub fn from_args(column: impl Into<String>, mut args: Vec<Arg>) -> Result<Self, BuildError> {
        let column = column.into();
        if args.is_empty() {
            return Ok(Self::Column(column));
        }

        let direction = match args[0].as_str() {
            Some(s) => {
                Direction::parse(s).ok_or_else(|| BuildError::InvalidDirection(s.to_string()))?
            }
            None => {
                return Err(BuildError::MalformedOrder(format!(
                    "direction of `{column}` must be a string, got {}",
                    args[0].kind()
                )));
            }
        };

        if args.len() == 1 {
            return Ok(Self::Directed { column, direction });
        }
        // `("ASC", list([..]))` 与 `("ASC", v1, v2)` 等价
        let mut values = args.split_off(1);
        if let [Arg::List(items)] = values.as_mut_slice() {
            values = std::mem::take(items);
        }
        Ok(Self::Field {
            column,
            direction,
            values,
        })
    }

    fn render(&self, params: &mut Params) -> Result<String, BuildError> {
        match self {
            Self::Column(column) => Ok(column.clone()),
            Self::Directed { column, direction } => {
                Ok(format!("{column} {}", direction.as_str()))
            }
            Self::Field {
                column,
                direction,
                values,
            } => {
                if values.is_empty() {
                    return Err(BuildError::EmptyList(column.clone()));
                }
                Ok(format!(
                    "FIELD ({column}, {}) {}",
                    params.bind_list(values)?,
                    direction.as_str()
                ))
            }
        }
    }
}

/// RenderOrderBy：渲染 `ORDER BY ...`；没有排序项时返回空串。
pub(crate) fn render_order_by(
    orders: &[OrderSpec],
    params: &mut Params,
) -> Result<String, BuildError> {
    if orders.is_empty() {
        return Ok(String::new());
    }
    let parts = orders
        .iter()
        .map(|o| o.render(params))
        .collect::<Result<Vec<_>, _>>()?;

    let mut buf = StringBuilder::new();
    buf.write_str("ORDER BY ");
    buf.write_joined(&parts, ", ");
    Ok(buf.into_string())
}

/// LIMIT 设置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limit {
    #[default]
    None,
    /// `LIMIT <count>`
    Count(u64),
    /// `LIMIT <offset>, <count>`
    Range { offset: u64, count: u64 },
}

impl Limit {
    pub fn is_none(self) -> bool {
        self == Self::None
    }

    pub(crate) fn render(self) -> String {
        match self {
            Self::None => String::new(),
            Self::Count(count) => format!("LIMIT {count}"),
            Self::Range { offset, count } => format!("LIMIT {offset}, {count}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::{IntoArgs, list};
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn limit_formats() {
        assert_eq!(Limit::None.render(), "");
        assert_eq!(Limit::Count(5).render(), "LIMIT 5");
        assert_eq!(
            Limit::Range {
                offset: 5,
                count: 10
            }
            .render(),
            "LIMIT 5, 10"
        );
    }

    #[test]
    fn order_by_shapes() {
        let orders = vec![
            OrderSpec::from_args("id", Vec::new()).unwrap(),
            OrderSpec::from_args("age", "desc".into_args()).unwrap(),
            OrderSpec::from_args("status", ("ASC", "paid", "pending").into_args()).unwrap(),
        ];
        let mut params = Params::new();
        let sql = render_order_by(&orders, &mut params).unwrap();
        assert_eq!(sql, "ORDER BY id, age DESC, FIELD (status, ?, ?) ASC");
        assert_eq!(
            params.into_vec(),
            vec![SqlValue::from("paid"), SqlValue::from("pending")]
        );
    }

    #[test]
    fn field_values_accept_a_single_list() {
        let spec = OrderSpec::from_args("id", ("DESC", list([3_i64, 1, 2])).into_args()).unwrap();
        let mut params = Params::new();
        assert_eq!(
            render_order_by(&[spec], &mut params).unwrap(),
            "ORDER BY FIELD (id, ?, ?, ?) DESC"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn order_by_rejects_unknown_direction() {
        assert_eq!(
            OrderSpec::from_args("id", "SIDEWAYS".into_args()).unwrap_err(),
            BuildError::InvalidDirection("SIDEWAYS".to_string())
        );
        assert!(matches!(
            OrderSpec::from_args("id", (1_i64,).into_args()),
            Err(BuildError::MalformedOrder(_))
        ));
    }

    #[test]
    fn empty_order_list_renders_nothing() {
        let mut params = Params::new();
        assert_eq!(render_order_by(&[], &mut params).unwrap(), "");
    }
}
