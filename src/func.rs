//! Func：原样内联的 SQL 片段（例如 `NOW()`、`SHA1(?)`），以及 `now` 时间偏移工厂。

use crate::error::BuildError;
use crate::value::SqlValue;

/// 原样拼入 SQL 的片段，附带它自己需要绑定的参数。
#[derive(Debug, Clone, PartialEq)]
pub struct Func {
    pub(crate) query: String,
    pub(crate) values: Vec<SqlValue>,
}

impl Func {
    /// 不带参数的片段。
    pub fn raw(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            values: Vec::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }
}

/// Func：`func("SHA1(?)", ["secret"])`。
pub fn func<T: Into<SqlValue>>(
    query: impl Into<String>,
    values: impl IntoIterator<Item = T>,
) -> Func {
    Func {
        query: query.into(),
        values: values.into_iter().map(Into::into).collect(),
    }
}

/// Now：`NOW()` 加上若干时间偏移，如 `now(["+1Y", "-3D"])`。
///
/// 每个偏移形如 `<+|-><数字><单位>`，单位为 `Y M D W h m s`。
pub fn now<I, S>(intervals: I) -> Result<Func, BuildError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut query = String::from("NOW()");
    for token in intervals {
        let (sign, amount, unit) = parse_interval(token.as_ref())?;
        query.push(' ');
        query.push(sign);
        query.push_str(" INTERVAL ");
        query.push_str(amount);
        query.push(' ');
        query.push_str(unit);
    }
    Ok(Func::raw(query))
}

fn parse_interval(token: &str) -> Result<(char, &str, &'static str), BuildError> {
    let invalid = || BuildError::InvalidInterval(token.to_string());

    let mut chars = token.chars();
    let sign = chars
        .next()
        .filter(|c| matches!(c, '+' | '-'))
        .ok_or_else(invalid)?;
    let unit = match chars.next_back().ok_or_else(invalid)? {
        'Y' => "YEAR",
        'M' => "MONTH",
        'D' => "DAY",
        'W' => "WEEK",
        'h' => "HOUR",
        'm' => "MINUTE",
        's' => "SECOND",
        _ => return Err(invalid()),
    };
    let amount = chars.as_str();
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    Ok((sign, amount, unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn now_without_intervals() {
        let f = now(std::iter::empty::<&str>()).unwrap();
        assert_eq!(f.query(), "NOW()");
        assert!(f.values().is_empty());
    }

    #[test]
    fn now_with_intervals() {
        let f = now(["+1Y", "-3D", "+12h"]).unwrap();
        assert_eq!(
            f.query(),
            "NOW() + INTERVAL 1 YEAR - INTERVAL 3 DAY + INTERVAL 12 HOUR"
        );
        assert!(f.values().is_empty());
    }

    #[test]
    fn minute_and_month_are_case_sensitive() {
        let f = now(["+5m", "+2M"]).unwrap();
        assert_eq!(f.query(), "NOW() + INTERVAL 5 MINUTE + INTERVAL 2 MONTH");
    }

    #[test]
    fn now_rejects_malformed_tokens() {
        for bad in ["1Y", "+Y", "+1X", "*1D", "+1.5D", ""] {
            assert_eq!(
                now([bad]).unwrap_err(),
                BuildError::InvalidInterval(bad.to_string()),
                "token {bad:?}"
            );
        }
    }

    #[test]
    fn func_keeps_values() {
        let f = func("SHA1(?)", ["secret"]);
        assert_eq!(f.query(), "SHA1(?)");
        assert_eq!(f.values(), &[SqlValue::from("secret")]);
    }
}
