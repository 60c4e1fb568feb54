//! SELECT 子句与分页计算。

use crate::order::Limit;

/// RenderSelect：没有列时为 `SELECT *`。
pub(crate) fn render_select(table: &str, columns: &[String]) -> String {
    if columns.is_empty() {
        return format!("SELECT * FROM {table}");
    }
    format!("SELECT {} FROM {table}", columns.join(", "))
}

/// PageLimit：第 `page` 页（从 1 开始）对应的 `LIMIT offset, count`。
pub(crate) fn page_limit(page: u64, page_size: u64) -> Limit {
    Limit::Range {
        offset: page_size.saturating_mul(page.saturating_sub(1)),
        count: page_size,
    }
}

/// TotalPages：截断除法，与记录总数的计算方式保持一致。
pub(crate) fn total_pages(total_count: u64, page_size: u64) -> u64 {
    total_count.checked_div(page_size).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn select_star_when_no_columns() {
        assert_eq!(render_select("users", &[]), "SELECT * FROM users");
        assert_eq!(
            render_select("users", &["id".to_string(), "name".to_string()]),
            "SELECT id, name FROM users"
        );
    }

    #[test]
    fn pagination_arithmetic() {
        assert_eq!(
            page_limit(3, 10),
            Limit::Range {
                offset: 20,
                count: 10
            }
        );
        assert_eq!(
            page_limit(1, 10),
            Limit::Range {
                offset: 0,
                count: 10
            }
        );
        assert_eq!(total_pages(95, 10), 9);
        assert_eq!(total_pages(95, 0), 0);
    }
}
