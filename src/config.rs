//! 全局默认配置：目前只有分页大小。
//!
//! 新建的 `Wrapper` 从这里读取默认值，单个实例可再用 `set_page_limit` 覆盖。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// 未配置时每页的行数。
pub const DEFAULT_PAGE_LIMIT: u64 = 20;

static PAGE_LIMIT: AtomicU64 = AtomicU64::new(DEFAULT_PAGE_LIMIT);
static PAGE_LIMIT_LOCK: Mutex<()> = Mutex::new(());

/// 获取当前全局默认分页大小。
pub fn default_page_limit() -> u64 {
    PAGE_LIMIT.load(Ordering::Relaxed)
}

/// 设置全局默认分页大小，返回旧值。
pub fn set_default_page_limit(limit: u64) -> u64 {
    PAGE_LIMIT.swap(limit, Ordering::Relaxed)
}

/// 修改全局默认分页大小的 RAII guard（持有全局锁，避免并行测试互相干扰）。
pub struct DefaultPageLimitGuard {
    _lock: MutexGuard<'static, ()>,
    old: u64,
}

impl Drop for DefaultPageLimitGuard {
    fn drop(&mut self) {
        set_default_page_limit(self.old);
    }
}

/// 在一个作用域内临时设置默认分页大小，退出作用域后自动恢复。
pub fn set_default_page_limit_scoped(limit: u64) -> DefaultPageLimitGuard {
    let lock = PAGE_LIMIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let old = set_default_page_limit(limit);
    DefaultPageLimitGuard { _lock: lock, old }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_limit_restores_previous_value() {
        let g = set_default_page_limit_scoped(7);
        assert_eq!(default_page_limit(), 7);
        assert_eq!(set_default_page_limit(9), 7);
        drop(g);

        let _g = set_default_page_limit_scoped(DEFAULT_PAGE_LIMIT);
        assert_eq!(default_page_limit(), DEFAULT_PAGE_LIMIT);
    }
}
