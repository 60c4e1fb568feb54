#[cfg(test)]
mod tests {
    use crate::{
        BuildError, Condition, DEFAULT_PAGE_LIMIT, ExecResult, Executor, Record, SqlValue,
        SqlValuer, ValuerError, Wrapper, args, list, now, set_default_page_limit_scoped,
    };
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(String, Vec<SqlValue>)>,
    }

    impl Executor for Recorder {
        type Rows = usize;
        type Error = String;

        fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<usize, String> {
            self.calls.push((sql.to_string(), params.to_vec()));
            Ok(3)
        }

        fn exec(&mut self, sql: &str, params: &[SqlValue]) -> Result<ExecResult, String> {
            if sql.is_empty() {
                return Err("nothing to execute".to_string());
            }
            self.calls.push((sql.to_string(), params.to_vec()));
            Ok(ExecResult {
                rows_affected: 2,
                last_insert_id: Some(42),
            })
        }
    }

    #[derive(Debug, Clone)]
    struct Broken;

    impl SqlValuer for Broken {
        fn value(&self) -> Result<SqlValue, ValuerError> {
            Err(ValuerError("cannot encode".to_string()))
        }
    }

    #[test]
    fn terminal_call_resets_state() {
        let mut w = Wrapper::new();
        w.table("users")
            .where_(("a", 1_i64))
            .having(("b", 2_i64))
            .order_by("c", "DESC")
            .limit(5)
            .get(())
            .unwrap();
        let stmt = w.table("logs").get(()).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM logs");
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn failed_build_also_resets_state() {
        let mut w = Wrapper::new();
        let err = w
            .table("users")
            .where_(("a", "=>", 1_i64))
            .get(())
            .unwrap_err();
        assert_eq!(err, BuildError::InvalidOperator("=>".to_string()));

        let stmt = w.table("users").where_(("a", 1_i64)).get(()).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM users WHERE a = ?");
    }

    #[test]
    fn first_pending_error_wins() {
        let mut w = Wrapper::new();
        let err = w
            .table("users")
            .where_(args![])
            .where_(("a", "~", 1_i64))
            .get(())
            .unwrap_err();
        assert!(matches!(err, BuildError::MalformedCondition(_)));
    }

    #[test]
    fn reset_discards_configuration() {
        let mut w = Wrapper::new();
        w.table("users").where_(("a", "=>", 1_i64)).limit(3);
        w.reset();
        assert_eq!(w.get(()).unwrap_err(), BuildError::MissingTable);

        w.table("users").group_by("age").reset();
        let stmt = w.table("users").get(()).unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM users");
    }

    #[test]
    fn empty_condition_text_is_rejected() {
        let mut w = Wrapper::new();
        let err = w
            .table("t")
            .where_(("a", 1_i64))
            .where_("")
            .get(())
            .unwrap_err();
        assert!(matches!(err, BuildError::MalformedCondition(_)));

        let err = w
            .table("t")
            .where_(("a", 1_i64))
            .or_where_cond(Condition::raw("  ", Vec::<i64>::new()))
            .get(())
            .unwrap_err();
        assert!(matches!(err, BuildError::MalformedCondition(_)));
    }

    #[test]
    fn raw_query_expands_list_values() {
        let mut w = Wrapper::new();
        let stmt = w
            .raw_query("SELECT * FROM t WHERE id IN (?, ?, ?)", (list([1_i64, 2, 3]),))
            .unwrap();
        assert_eq!(
            stmt.params,
            vec![SqlValue::I64(1), SqlValue::I64(2), SqlValue::I64(3)]
        );
    }

    #[test]
    fn last_query_tracks_successful_builds() {
        let mut w = Wrapper::new();
        assert_eq!(w.last_query(), "");
        w.table("users").where_(("id", 1_i64)).get(()).unwrap();
        assert_eq!(w.last_query(), "SELECT * FROM users WHERE id = ?");
        assert_eq!(w.last_params(), &[SqlValue::I64(1)]);

        w.get(()).unwrap_err();
        assert_eq!(w.last_query(), "SELECT * FROM users WHERE id = ?");
    }

    #[test]
    fn raw_query_binds_values() {
        let mut w = Wrapper::new();
        let stmt = w
            .raw_query("SELECT * FROM t WHERE a = ? AND b IN (?, ?)", (1_i64, "x", "y"))
            .unwrap();
        assert_eq!(stmt.sql, "SELECT * FROM t WHERE a = ? AND b IN (?, ?)");
        assert_eq!(
            stmt.params,
            vec![SqlValue::I64(1), SqlValue::from("x"), SqlValue::from("y")]
        );

        let stmt = w.raw_query("SELECT 1", ()).unwrap();
        assert_eq!(stmt.sql, "SELECT 1");
    }

    #[test]
    fn placeholder_mismatch_is_reported() {
        let mut w = Wrapper::new();
        assert_eq!(
            w.raw_query("SELECT * FROM t WHERE a = ?", ()).unwrap_err(),
            BuildError::PlaceholderMismatch {
                placeholders: 1,
                params: 0,
            }
        );

        // NULL 不占参数位
        let err = w
            .table("t")
            .where_(("a = ? AND b = ?", 1_i64, ()))
            .get(())
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::PlaceholderMismatch {
                placeholders: 2,
                params: 1,
            }
        );

        // 引号内的 ? 不是占位符
        let stmt = w
            .table("t")
            .where_(("note = '?' AND a = ?", 1_i64))
            .get(())
            .unwrap();
        assert_eq!(stmt.params.len(), 1);
    }

    #[test]
    fn sub_statement_params_merge_in_order() {
        let mut inner = Wrapper::new();
        let sub = inner
            .table("orders")
            .where_(("state", "paid"))
            .where_(("total", ">", 100_i64))
            .get("user_id")
            .unwrap();

        let mut w = Wrapper::new();
        let stmt = w
            .table("users")
            .where_(("region", "eu"))
            .where_(("id", "IN", sub))
            .where_(("age", ">", 18_i64))
            .get(())
            .unwrap();
        assert_eq!(
            stmt.params,
            vec![
                SqlValue::from("eu"),
                SqlValue::from("paid"),
                SqlValue::I64(100),
                SqlValue::I64(18),
            ]
        );
    }

    #[test]
    fn typed_conditions_mix_with_tuples() {
        let mut w = Wrapper::new();
        let stmt = w
            .table("events")
            .where_cond(Condition::between("day", 1_i64, 7_i64))
            .or_where_cond(Condition::in_("kind", ["a", "b"]))
            .where_(args!["id", "NOT IN", 1, 2, 3])
            .having_cond(Condition::eq("n", 1_i64))
            .or_having_cond(Condition::raw("m > 0", Vec::<i64>::new()))
            .get(())
            .unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT * FROM events WHERE day BETWEEN ? AND ? OR kind IN (?, ?) AND id NOT IN (?, ?, ?) HAVING n = ? OR m > 0"
        );
        assert_eq!(stmt.params.len(), 8);
    }

    #[test]
    fn now_interval_in_condition() {
        let mut w = Wrapper::new();
        let stmt = w
            .table("sessions")
            .where_(("expires_at", "<", now(["-2h", "+30m"]).unwrap()))
            .delete()
            .unwrap();
        assert_eq!(
            stmt.sql,
            "DELETE FROM sessions WHERE expires_at < NOW() - INTERVAL 2 HOUR + INTERVAL 30 MINUTE"
        );
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn valuer_errors_propagate() {
        let mut w = Wrapper::new();
        let broken: Box<dyn SqlValuer> = Box::new(Broken);
        let err = w.table("t").where_(("a", broken)).get(()).unwrap_err();
        assert_eq!(
            err,
            BuildError::Valuer(ValuerError("cannot encode".to_string()))
        );
    }

    #[test]
    fn empty_in_list_fails() {
        let mut w = Wrapper::new();
        let err = w
            .table("t")
            .where_(("id", "IN", list(Vec::<i64>::new())))
            .get(())
            .unwrap_err();
        assert_eq!(err, BuildError::EmptyList("id".to_string()));
    }

    #[test]
    fn exec_last_records_counters() {
        let mut w = Wrapper::new();
        let mut db = Recorder::default();
        w.table("users")
            .insert(Record::new().set("name", "ann"))
            .unwrap();
        let res = w.exec_last(&mut db).unwrap();
        assert_eq!(res.rows_affected, 2);
        assert_eq!(w.count(), 2);
        assert_eq!(w.last_insert_id(), Some(42));
        assert_eq!(
            db.calls,
            vec![(
                "INSERT INTO users (name) VALUES (?)".to_string(),
                vec![SqlValue::from("ann")]
            )]
        );
    }

    #[test]
    fn exec_last_without_statement_propagates_error() {
        let mut w = Wrapper::new();
        let mut db = Recorder::default();
        assert_eq!(w.exec_last(&mut db).unwrap_err(), "nothing to execute");
        assert_eq!(w.count(), 0);
        assert_eq!(w.last_insert_id(), None);
    }

    #[test]
    fn query_last_forwards_statement() {
        let mut w = Wrapper::new();
        let mut db = Recorder::default();
        w.table("users").get_one("id").unwrap();
        assert_eq!(w.query_last(&mut db).unwrap(), 3);
        assert_eq!(db.calls[0].0, "SELECT id FROM users LIMIT 1");
    }

    #[test]
    fn new_wrapper_uses_default_page_limit() {
        {
            let _g = set_default_page_limit_scoped(5);
            assert_eq!(Wrapper::new().page_limit(), 5);
        }
        let _g = set_default_page_limit_scoped(DEFAULT_PAGE_LIMIT);
        assert_eq!(Wrapper::default().page_limit(), DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn interpolated_statement_for_logging() {
        let mut w = Wrapper::new();
        let stmt = w
            .table("users")
            .where_(("name", "o'neil"))
            .where_(("age", ">", 18_i64))
            .get(())
            .unwrap();
        assert_eq!(
            stmt.interpolate().unwrap(),
            "SELECT * FROM users WHERE name = 'o\\'neil' AND age > 18"
        );
    }
}
