use async_trait::async_trait;

use super::{TimeOff, TimeOffDraft};
use crate::domain::DomainResult;

/// Every operation is scoped to `user_id`; a record owned by someone else
/// behaves exactly like a missing one.
#[async_trait]
pub trait TimeOffRepositoryInterface: Send + Sync {
    /// Newest-created first.
    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<TimeOff>>;

    /// Stores a new request with status `pending`.
    async fn create(&self, user_id: &str, draft: TimeOffDraft) -> DomainResult<TimeOff>;

    /// Replaces kind, dates and description; status is left untouched.
    async fn update(
        &self,
        user_id: &str,
        id: &str,
        draft: TimeOffDraft,
    ) -> DomainResult<Option<TimeOff>>;

    /// `false` when nothing matched.
    async fn delete(&self, user_id: &str, id: &str) -> DomainResult<bool>;
}
