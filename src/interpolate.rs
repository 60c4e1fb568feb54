//! SQL 插值：把 `?` 替换为参数的 MySQL 字面量。
//!
//! 安全警告：插值永远不如预编译参数安全；这里只用于日志与调试输出。
//! 同一套引号扫描也用于统计占位符数量（构建时的参数一致性校验）。

use crate::value::SqlValue;
use time::macros::format_description;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterpolateError {
    #[error("builder not enough params when interpolating")]
    MissingParams,
    #[error("builder {0} unused params when interpolating")]
    ExtraParams(usize),
    #[error("builder unsupported param when interpolating: {0}")]
    UnsupportedParam(String),
    #[error("builder failed to format datetime: {0}")]
    Format(String),
}

/// 跟踪 `'`、`"`、`` ` `` 引号与反斜杠转义；引号内的 `?` 不是占位符。
#[derive(Debug, Default)]
struct QuoteState {
    quote: Option<char>,
    escaping: bool,
}

impl QuoteState {
    fn is_placeholder(&mut self, c: char) -> bool {
        if self.escaping {
            self.escaping = false;
            return false;
        }
        match c {
            '\\' if self.quote.is_some() => {
                self.escaping = true;
                false
            }
            '\'' | '"' | '`' => {
                if self.quote == Some(c) {
                    self.quote = None;
                } else if self.quote.is_none() {
                    self.quote = Some(c);
                }
                false
            }
            '?' => self.quote.is_none(),
            _ => false,
        }
    }
}

pub(crate) fn count_placeholders(query: &str) -> usize {
    let mut state = QuoteState::default();
    query.chars().filter(|&c| state.is_placeholder(c)).count()
}

/// Interpolate：按顺序把 `params` 填进 `query` 的 `?`。
pub fn interpolate(query: &str, params: &[SqlValue]) -> Result<String, InterpolateError> {
    let mut out = String::with_capacity(query.len() + params.len() * 20);
    let mut state = QuoteState::default();
    let mut it = params.iter();

    for c in query.chars() {
        if state.is_placeholder(c) {
            let v = it.next().ok_or(InterpolateError::MissingParams)?;
            encode_value(&mut out, v)?;
        } else {
            out.push(c);
        }
    }

    match it.len() {
        0 => Ok(out),
        n => Err(InterpolateError::ExtraParams(n)),
    }
}

fn encode_value(out: &mut String, v: &SqlValue) -> Result<(), InterpolateError> {
    match v {
        SqlValue::Null => out.push_str("NULL"),
        SqlValue::Bool(b) => out.push_str(if *b { "TRUE" } else { "FALSE" }),
        SqlValue::I64(n) => out.push_str(&n.to_string()),
        SqlValue::U64(n) => out.push_str(&n.to_string()),
        SqlValue::F64(n) if n.is_finite() => out.push_str(&n.to_string()),
        SqlValue::F64(n) => return Err(InterpolateError::UnsupportedParam(n.to_string())),
        SqlValue::String(s) => quote_string(out, s),
        SqlValue::Bytes(b) => {
            out.push_str("_binary");
            quote_string(out, &String::from_utf8_lossy(b));
        }
        SqlValue::DateTime(dt) => encode_datetime(out, dt)?,
    }
    Ok(())
}

fn quote_string(out: &mut String, s: &str) {
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\u{0000}' => out.push_str("\\0"),
            '\u{0008}' => out.push_str("\\b"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{001a}' => out.push_str("\\Z"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
}

fn encode_datetime(out: &mut String, dt: &time::OffsetDateTime) -> Result<(), InterpolateError> {
    // 四舍五入到微秒
    let dt = *dt + time::Duration::nanoseconds(500);
    let s = dt
        .format(format_description!(
            "'[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]'"
        ))
        .map_err(|e| InterpolateError::Format(e.to_string()))?;
    out.push_str(&s);
    Ok(())
}
