//! Time-off service: validation rules and owner-scoped CRUD

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, TimeOff, TimeOffDraft, TimeOffRepositoryInterface, TimeOffType,
};
use crate::shared::parse_date;

const NOT_FOUND: &str = "Time off request not found";

/// Raw create/update payload as received from the client.
#[derive(Debug, Clone, Default)]
pub struct TimeOffInput {
    pub kind: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

/// Checks presence, formats and date ordering, producing a storable draft.
///
/// For a day off the end date is forced to the start date and any client
/// value is ignored.
pub fn validate_time_off(input: TimeOffInput) -> DomainResult<TimeOffDraft> {
    if input.kind.is_empty() || input.start_date.is_empty() {
        return Err(DomainError::validation("Type and start date are required"));
    }

    let kind: TimeOffType = input
        .kind
        .parse()
        .map_err(|_| DomainError::validation("Invalid time off type"))?;

    let start_date = parse_date(&input.start_date)
        .ok_or_else(|| DomainError::validation("Invalid start date format. Use YYYY-MM-DD"))?;

    let end_date = if kind.is_single_day() {
        start_date
    } else {
        let raw = input
            .end_date
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                DomainError::validation("End date is required for this type of time off")
            })?;
        let end_date = parse_date(raw)
            .ok_or_else(|| DomainError::validation("Invalid end date format. Use YYYY-MM-DD"))?;
        if end_date < start_date {
            return Err(DomainError::validation("End date must be after start date"));
        }
        end_date
    };

    let description = input
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    Ok(TimeOffDraft {
        kind,
        start_date,
        end_date,
        description,
    })
}

pub struct TimeOffService<R: TimeOffRepositoryInterface> {
    repo: Arc<R>,
}

impl<R: TimeOffRepositoryInterface> TimeOffService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The caller's requests, newest first.
    pub async fn list(&self, user_id: &str) -> DomainResult<Vec<TimeOff>> {
        self.repo.list_for_user(user_id).await
    }

    pub async fn create(&self, user_id: &str, input: TimeOffInput) -> DomainResult<TimeOff> {
        let draft = validate_time_off(input)?;
        let created = self.repo.create(user_id, draft).await?;

        info!(user_id, time_off_id = %created.id, kind = %created.kind, "Time off request created");
        Ok(created)
    }

    /// Replaces type, dates and description. Status is never changed here.
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        input: TimeOffInput,
    ) -> DomainResult<TimeOff> {
        let draft = validate_time_off(input)?;
        let updated = self
            .repo
            .update(user_id, id, draft)
            .await?
            .ok_or_else(|| DomainError::NotFound(NOT_FOUND.into()))?;

        info!(user_id, time_off_id = %id, "Time off request updated");
        Ok(updated)
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> DomainResult<()> {
        if !self.repo.delete(user_id, id).await? {
            return Err(DomainError::NotFound(NOT_FOUND.into()));
        }

        info!(user_id, time_off_id = %id, "Time off request deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateUserDto, TimeOffStatus, UserRepositoryInterface};
    use crate::infrastructure::database::repositories::{TimeOffRepository, UserRepository};
    use crate::infrastructure::database::test_support::test_db;

    fn input(kind: &str, start: &str, end: Option<&str>) -> TimeOffInput {
        TimeOffInput {
            kind: kind.into(),
            start_date: start.into(),
            end_date: end.map(String::from),
            description: None,
        }
    }

    fn message(result: DomainResult<TimeOffDraft>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn day_off_end_date_follows_start_date() {
        let draft = validate_time_off(input("dayOff", "2024-05-01", None)).unwrap();
        assert_eq!(draft.end_date.to_string(), "2024-05-01");

        let draft = validate_time_off(input("dayOff", "2024-05-01", Some("2024-06-30"))).unwrap();
        assert_eq!(draft.end_date, draft.start_date);
    }

    #[test]
    fn ranged_request_must_not_end_before_start() {
        assert_eq!(
            message(validate_time_off(input("vacation", "2024-05-10", Some("2024-05-05")))),
            "End date must be after start date"
        );

        let same_day = validate_time_off(input("sickLeave", "2024-05-10", Some("2024-05-10")));
        assert!(same_day.is_ok());
    }

    #[test]
    fn rejects_missing_and_malformed_fields() {
        assert_eq!(
            message(validate_time_off(input("", "2024-05-10", None))),
            "Type and start date are required"
        );
        assert_eq!(
            message(validate_time_off(input("vacation", "", Some("2024-05-10")))),
            "Type and start date are required"
        );
        assert_eq!(
            message(validate_time_off(input("holiday", "2024-05-10", None))),
            "Invalid time off type"
        );
        assert_eq!(
            message(validate_time_off(input("vacation", "2024-02-30", Some("2024-03-01")))),
            "Invalid start date format. Use YYYY-MM-DD"
        );
        assert_eq!(
            message(validate_time_off(input("other", "2024-05-10", None))),
            "End date is required for this type of time off"
        );
        assert_eq!(
            message(validate_time_off(input("other", "2024-05-10", Some("2024-5-11")))),
            "Invalid end date format. Use YYYY-MM-DD"
        );
    }

    #[test]
    fn blank_description_is_dropped() {
        let mut raw = input("dayOff", "2024-05-01", None);
        raw.description = Some("   ".into());
        assert_eq!(validate_time_off(raw).unwrap().description, None);

        let mut raw = input("dayOff", "2024-05-01", None);
        raw.description = Some(" dentist ".into());
        assert_eq!(
            validate_time_off(raw).unwrap().description.as_deref(),
            Some("dentist")
        );
    }

    async fn setup() -> (TimeOffService<TimeOffRepository>, String, String) {
        let db = test_db().await;
        let users = UserRepository::new(db.clone());
        let alice = users
            .create_user(CreateUserDto {
                username: "alice".into(),
                email: "alice@example.com".into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap();
        let bob = users
            .create_user(CreateUserDto {
                username: "bob".into(),
                email: "bob@example.com".into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap();
        (
            TimeOffService::new(Arc::new(TimeOffRepository::new(db))),
            alice.id,
            bob.id,
        )
    }

    #[tokio::test]
    async fn create_day_off_without_end_date() {
        let (service, alice, _) = setup().await;

        let created = service
            .create(&alice, input("dayOff", "2024-05-01", None))
            .await
            .unwrap();

        assert_eq!(created.end_date.to_string(), "2024-05-01");
        assert_eq!(created.status, TimeOffStatus::Pending);
    }

    #[tokio::test]
    async fn other_users_records_are_not_found() {
        let (service, alice, bob) = setup().await;
        let record = service
            .create(&alice, input("vacation", "2024-07-01", Some("2024-07-10")))
            .await
            .unwrap();

        let update = service
            .update(&bob, &record.id, input("dayOff", "2024-07-02", None))
            .await
            .unwrap_err();
        let delete = service.delete(&bob, &record.id).await.unwrap_err();

        assert!(matches!(update, DomainError::NotFound(_)));
        assert!(matches!(delete, DomainError::NotFound(_)));
        assert_eq!(service.list(&alice).await.unwrap().len(), 1);
        assert!(service.list(&bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_validates_before_lookup() {
        let (service, alice, _) = setup().await;

        let err = service
            .update(&alice, "missing-id", input("vacation", "2024-05-10", Some("2024-05-01")))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let (service, alice, _) = setup().await;
        let record = service
            .create(&alice, input("other", "2024-09-01", Some("2024-09-02")))
            .await
            .unwrap();

        service.delete(&alice, &record.id).await.unwrap();

        assert!(service.list(&alice).await.unwrap().is_empty());
        assert!(matches!(
            service.delete(&alice, &record.id).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
