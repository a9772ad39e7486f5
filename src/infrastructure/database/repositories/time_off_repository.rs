use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::user_repository::db_err;
use crate::domain::{
    DomainResult, TimeOff, TimeOffDraft, TimeOffRepositoryInterface, TimeOffStatus, TimeOffType,
};
use crate::infrastructure::database::entities::time_off;

pub struct TimeOffRepository {
    db: DatabaseConnection,
}

impl TimeOffRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_owned(&self, user_id: &str, id: &str) -> DomainResult<Option<time_off::Model>> {
        time_off::Entity::find()
            .filter(time_off::Column::Id.eq(id))
            .filter(time_off::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_kind_to_domain(kind: time_off::TimeOffKind) -> TimeOffType {
    match kind {
        time_off::TimeOffKind::Vacation => TimeOffType::Vacation,
        time_off::TimeOffKind::DayOff => TimeOffType::DayOff,
        time_off::TimeOffKind::SickLeave => TimeOffType::SickLeave,
        time_off::TimeOffKind::Other => TimeOffType::Other,
    }
}

fn domain_kind_to_entity(kind: TimeOffType) -> time_off::TimeOffKind {
    match kind {
        TimeOffType::Vacation => time_off::TimeOffKind::Vacation,
        TimeOffType::DayOff => time_off::TimeOffKind::DayOff,
        TimeOffType::SickLeave => time_off::TimeOffKind::SickLeave,
        TimeOffType::Other => time_off::TimeOffKind::Other,
    }
}

fn entity_status_to_domain(status: time_off::TimeOffStatus) -> TimeOffStatus {
    match status {
        time_off::TimeOffStatus::Pending => TimeOffStatus::Pending,
        time_off::TimeOffStatus::Approved => TimeOffStatus::Approved,
        time_off::TimeOffStatus::Rejected => TimeOffStatus::Rejected,
    }
}

fn time_off_model_to_domain(model: time_off::Model) -> TimeOff {
    TimeOff {
        id: model.id,
        user_id: model.user_id,
        kind: entity_kind_to_domain(model.kind),
        start_date: model.start_date,
        end_date: model.end_date,
        description: model.description,
        status: entity_status_to_domain(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl TimeOffRepositoryInterface for TimeOffRepository {
    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<TimeOff>> {
        let models = time_off::Entity::find()
            .filter(time_off::Column::UserId.eq(user_id))
            .order_by_desc(time_off::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(time_off_model_to_domain).collect())
    }

    async fn create(&self, user_id: &str, draft: TimeOffDraft) -> DomainResult<TimeOff> {
        let now = Utc::now();

        let record = time_off::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            kind: Set(domain_kind_to_entity(draft.kind)),
            start_date: Set(draft.start_date),
            end_date: Set(draft.end_date),
            description: Set(draft.description),
            status: Set(time_off::TimeOffStatus::default()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = record.insert(&self.db).await.map_err(db_err)?;
        Ok(time_off_model_to_domain(model))
    }

    async fn update(
        &self,
        user_id: &str,
        id: &str,
        draft: TimeOffDraft,
    ) -> DomainResult<Option<TimeOff>> {
        let Some(existing) = self.find_owned(user_id, id).await? else {
            return Ok(None);
        };

        let mut active: time_off::ActiveModel = existing.into();
        active.kind = Set(domain_kind_to_entity(draft.kind));
        active.start_date = Set(draft.start_date);
        active.end_date = Set(draft.end_date);
        active.description = Set(draft.description);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(time_off_model_to_domain(updated)))
    }

    async fn delete(&self, user_id: &str, id: &str) -> DomainResult<bool> {
        let result = time_off::Entity::delete_many()
            .filter(time_off::Column::Id.eq(id))
            .filter(time_off::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{CreateUserDto, UserRepositoryInterface};
    use crate::infrastructure::database::repositories::UserRepository;
    use crate::infrastructure::database::test_support::test_db;

    async fn setup() -> (TimeOffRepository, String, String) {
        let db = test_db().await;
        let users = UserRepository::new(db.clone());
        let mut ids = Vec::new();
        for name in ["alice", "bob"] {
            let user = users
                .create_user(CreateUserDto {
                    username: name.into(),
                    email: format!("{}@example.com", name),
                    password_hash: "hash".into(),
                })
                .await
                .unwrap();
            ids.push(user.id);
        }
        let bob = ids.pop().unwrap();
        let alice = ids.pop().unwrap();
        (TimeOffRepository::new(db), alice, bob)
    }

    fn draft(kind: TimeOffType, start: (i32, u32, u32), end: (i32, u32, u32)) -> TimeOffDraft {
        TimeOffDraft {
            kind,
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_stores_pending_request() {
        let (repo, alice, _) = setup().await;

        let created = repo
            .create(&alice, draft(TimeOffType::SickLeave, (2024, 3, 4), (2024, 3, 6)))
            .await
            .unwrap();

        assert_eq!(created.status, TimeOffStatus::Pending);
        assert_eq!(created.kind, TimeOffType::SickLeave);
        assert_eq!(created.end_date.to_string(), "2024-03-06");
    }

    #[tokio::test]
    async fn list_is_scoped_and_newest_first() {
        let (repo, alice, bob) = setup().await;

        let older = repo
            .create(&alice, draft(TimeOffType::Vacation, (2024, 7, 1), (2024, 7, 5)))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let newer = repo
            .create(&alice, draft(TimeOffType::Other, (2024, 1, 2), (2024, 1, 2)))
            .await
            .unwrap();
        repo.create(&bob, draft(TimeOffType::Other, (2024, 1, 2), (2024, 1, 2)))
            .await
            .unwrap();

        let listed = repo.list_for_user(&alice).await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);
    }

    #[tokio::test]
    async fn update_and_delete_respect_ownership() {
        let (repo, alice, bob) = setup().await;
        let record = repo
            .create(&alice, draft(TimeOffType::Vacation, (2024, 7, 1), (2024, 7, 5)))
            .await
            .unwrap();

        let replacement = draft(TimeOffType::DayOff, (2024, 8, 1), (2024, 8, 1));
        assert!(repo
            .update(&bob, &record.id, replacement.clone())
            .await
            .unwrap()
            .is_none());
        assert!(!repo.delete(&bob, &record.id).await.unwrap());

        let updated = repo
            .update(&alice, &record.id, replacement)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.kind, TimeOffType::DayOff);
        assert_eq!(updated.status, TimeOffStatus::Pending);
        assert_eq!(updated.id, record.id);

        assert!(repo.delete(&alice, &record.id).await.unwrap());
        assert!(repo.list_for_user(&alice).await.unwrap().is_empty());
    }
}
