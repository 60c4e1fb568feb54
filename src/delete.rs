//! DELETE 子句。

/// RenderDelete：`DELETE FROM <t1>, <t2>`。
pub(crate) fn render_delete(tables: &[String]) -> String {
    format!("DELETE FROM {}", tables.join(", "))
}
