//! UPDATE 子句。

use crate::error::BuildError;
use crate::insert::Record;
use crate::params::Params;

/// RenderUpdate：`UPDATE <table> SET <col> = <bound>, ...`，列顺序同记录顺序。
pub(crate) fn render_update(
    table: &str,
    record: &Record,
    params: &mut Params,
) -> Result<String, BuildError> {
    if record.is_empty() {
        return Err(BuildError::EmptyRecord);
    }
    let assignments = record
        .fields()
        .iter()
        .map(|(column, value)| Ok(format!("{column} = {}", params.bind(value)?)))
        .collect::<Result<Vec<_>, BuildError>>()?;
    Ok(format!("UPDATE {table} SET {}", assignments.join(", ")))
}
