//! 按子句拼接 SQL 的小工具：空片段自动跳过，非空片段之间补一个空格。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    /// 写入 `s`；如果不是首次写入，会先写入一个空格。空串不写。
    pub(crate) fn write_leading(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
        self.buf.push_str(s);
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// 以 `sep` 连接写入 `items`。
    pub(crate) fn write_joined<I, S>(&mut self, items: I, sep: &str)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, s) in items.into_iter().enumerate() {
            if i > 0 {
                self.buf.push_str(sep);
            }
            self.buf.push_str(s.as_ref());
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::StringBuilder;

    #[test]
    fn leading_skips_empty_parts() {
        let mut b = StringBuilder::new();
        b.write_leading("SELECT *");
        b.write_leading("");
        b.write_leading("FROM t");
        assert_eq!(b.into_string(), "SELECT * FROM t");
    }

    #[test]
    fn joined_uses_separator() {
        let mut b = StringBuilder::new();
        b.write_str("(");
        b.write_joined(["a", "b", "c"], ", ");
        b.write_str(")");
        assert_eq!(b.into_string(), "(a, b, c)");
    }
}
