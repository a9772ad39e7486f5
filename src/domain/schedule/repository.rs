use async_trait::async_trait;

use super::{Schedule, SchedulePatch};
use crate::domain::DomainResult;

#[async_trait]
pub trait ScheduleRepositoryInterface: Send + Sync {
    /// Inserts the default schedule for `user_id` unless one already exists.
    ///
    /// Must be idempotent under concurrent callers: at most one schedule per
    /// user is ever stored.
    async fn ensure_default(&self, user_id: &str) -> DomainResult<()>;

    async fn get_by_user(&self, user_id: &str) -> DomainResult<Option<Schedule>>;

    /// Writes only the fields present in `patch` in one statement and
    /// returns the stored result. `None` when the user has no schedule.
    async fn apply_patch(
        &self,
        user_id: &str,
        patch: &SchedulePatch,
    ) -> DomainResult<Option<Schedule>>;
}
