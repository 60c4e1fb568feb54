//! 条件/记录里使用的动态参数类型与修饰器。

use crate::func::Func;
use crate::statement::Statement;
use crate::value::SqlValue;
use crate::valuer::SqlValuer;

/// 一个待绑定的参数。
///
/// 绑定时按类型决定占位文本：普通值输出 `?`，`Null` 输出 `NULL`，
/// `Func` 原样内联，`SubQuery` 包上括号并合并其参数，`List` 展开成 `?, ?`。
#[derive(Clone)]
pub enum Arg {
    Value(SqlValue),
    Valuer(Box<dyn SqlValuer>),
    Func(Func),
    /// 参数列表（IN / FIELD 用）。
    List(Vec<Arg>),
    /// 已构建好的子语句。
    SubQuery(Statement),
}

impl Arg {
    /// 字符串参数的借用视图（列名、运算符、方向都以字符串传入）。
    pub(crate) fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(v) => v.as_str(),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Value(SqlValue::String(_)) => "string",
            Self::Value(_) => "value",
            Self::Valuer(_) => "valuer",
            Self::Func(_) => "func",
            Self::List(_) => "list",
            Self::SubQuery(_) => "sub-query",
        }
    }
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Valuer(_) => f.write_str("Valuer(..)"),
            Self::Func(v) => f.debug_tuple("Func").field(v).finish(),
            Self::List(v) => f.debug_tuple("List").field(v).finish(),
            Self::SubQuery(v) => f.debug_tuple("SubQuery").field(v).finish(),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Func(a), Self::Func(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::SubQuery(a), Self::SubQuery(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! impl_arg_from_value {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for Arg {
                fn from(v: $t) -> Self {
                    Self::Value(v.into())
                }
            }
        )+
    };
}

impl_arg_from_value!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
    time::OffsetDateTime,
    SqlValue,
);

impl<T> From<Option<T>> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        Self::Value(SqlValue::from_option(v))
    }
}

impl From<Func> for Arg {
    fn from(v: Func) -> Self {
        Self::Func(v)
    }
}

impl From<Statement> for Arg {
    fn from(v: Statement) -> Self {
        Self::SubQuery(v)
    }
}

impl From<Box<dyn SqlValuer>> for Arg {
    fn from(v: Box<dyn SqlValuer>) -> Self {
        Self::Valuer(v)
    }
}

/// List：标记为参数列表，绑定时展开成 `?, ?, ?`。
pub fn list<T: Into<Arg>>(values: impl IntoIterator<Item = T>) -> Arg {
    Arg::List(values.into_iter().map(Into::into).collect())
}

/// 把"不定长参数"转成 `Vec<Arg>`；元组就是 Rust 版的可变参数。
///
/// ```
/// use reiner::{Wrapper, list};
///
/// let mut w = Wrapper::new();
/// w.table("users").where_(("id", "IN", list([1_i64, 2, 3])));
/// ```
pub trait IntoArgs {
    fn into_args(self) -> Vec<Arg>;
}

impl IntoArgs for Vec<Arg> {
    fn into_args(self) -> Vec<Arg> {
        self
    }
}

impl<const N: usize> IntoArgs for [Arg; N] {
    fn into_args(self) -> Vec<Arg> {
        self.into()
    }
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Arg> {
        Vec::new()
    }
}

impl IntoArgs for &'static str {
    fn into_args(self) -> Vec<Arg> {
        vec![self.into()]
    }
}

impl IntoArgs for String {
    fn into_args(self) -> Vec<Arg> {
        vec![self.into()]
    }
}

macro_rules! impl_into_args_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Arg>),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Arg> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_into_args_tuple!(A);
impl_into_args_tuple!(A, B);
impl_into_args_tuple!(A, B, C);
impl_into_args_tuple!(A, B, C, D);
impl_into_args_tuple!(A, B, C, D, E);
impl_into_args_tuple!(A, B, C, D, E, F);
impl_into_args_tuple!(A, B, C, D, E, F, G);
impl_into_args_tuple!(A, B, C, D, E, F, G, H);
