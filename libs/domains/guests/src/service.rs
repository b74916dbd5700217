//! Guest Service - Business logic layer

use axum_helpers::Pagination;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{GuestError, GuestResult};
use crate::models::{
    CreateGuest, Guest, GuestDeleted, GuestFilter, GuestMessage, GuestPage, UpdateGuest,
};
use crate::repository::GuestRepository;

pub struct GuestService<R: GuestRepository> {
    repository: Arc<R>,
}

impl<R: GuestRepository> GuestService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a guest; emails are unique
    #[instrument(skip(self, input))]
    pub async fn create_guest(&self, input: CreateGuest) -> GuestResult<GuestMessage> {
        let guest = input.normalize()?;
        guest
            .validate()
            .map_err(|e| GuestError::Validation(e.to_string()))?;

        if self.repository.email_taken(guest.email.clone(), None).await? {
            return Err(GuestError::DuplicateEmail(guest.email));
        }

        let guest = self.repository.create(guest).await?;
        Ok(GuestMessage {
            message: "Guest registered successfully".to_string(),
            guest,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_guests(&self, filter: GuestFilter) -> GuestResult<GuestPage> {
        let pagination = Pagination::from_query(
            filter.page.as_deref(),
            filter.limit.as_deref(),
            GuestFilter::DEFAULT_LIMIT,
        );

        let total = self.repository.count(filter.clone()).await?;
        let results = self.repository.list(filter, pagination).await?;

        Ok(GuestPage {
            count: results.len(),
            total,
            page: pagination.page,
            total_pages: pagination.total_pages(total),
            results,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_guest(&self, id: Uuid) -> GuestResult<Guest> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(GuestError::NotFound(id))
    }

    #[instrument(skip(self, input))]
    pub async fn update_guest(&self, id: Uuid, input: UpdateGuest) -> GuestResult<GuestMessage> {
        let input = input.normalize();
        input
            .validate()
            .map_err(|e| GuestError::Validation(e.to_string()))?;

        if let Some(ref email) = input.email {
            if self.repository.email_taken(email.clone(), Some(id)).await? {
                return Err(GuestError::EmailTaken(email.clone()));
            }
        }

        let guest = self.repository.update(id, input).await?;
        Ok(GuestMessage {
            message: "Guest updated successfully".to_string(),
            guest,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete_guest(&self, id: Uuid) -> GuestResult<GuestDeleted> {
        if !self.repository.delete(id).await? {
            return Err(GuestError::NotFound(id));
        }

        Ok(GuestDeleted {
            message: "Guest deleted successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentType, NewGuest};
    use crate::repository::MockGuestRepository;
    use mockall::predicate::*;

    fn create_body(email: &str) -> CreateGuest {
        CreateGuest {
            first_name: Some("María".to_string()),
            last_name: Some("Hernández".to_string()),
            email: Some(email.to_string()),
            phone: Some(" 744 555 0101 ".to_string()),
            document_type: Some(DocumentType::Ine),
            ..Default::default()
        }
    }

    fn stored(email: &str) -> Guest {
        Guest::new(NewGuest {
            first_name: "María".to_string(),
            last_name: "Hernández".to_string(),
            email: email.to_string(),
            phone: "744 555 0101".to_string(),
            document_type: DocumentType::Ine,
            document_number: String::new(),
            notes: String::new(),
        })
    }

    #[tokio::test]
    async fn test_create_guest_normalizes_before_checking_email() {
        let mut mock = MockGuestRepository::new();
        mock.expect_email_taken()
            .with(eq("maria@hotel.mx".to_string()), eq(None))
            .returning(|_, _| Ok(false));
        mock.expect_create()
            .withf(|guest| guest.phone == "744 555 0101")
            .returning(|guest| Ok(Guest::new(guest)));

        let service = GuestService::new(mock);
        let created = service
            .create_guest(create_body(" Maria@Hotel.MX "))
            .await
            .unwrap();
        assert_eq!(created.guest.email, "maria@hotel.mx");
        assert_eq!(created.message, "Guest registered successfully");
    }

    #[tokio::test]
    async fn test_create_guest_duplicate_email() {
        let mut mock = MockGuestRepository::new();
        mock.expect_email_taken().returning(|_, _| Ok(true));
        mock.expect_create().never();

        let service = GuestService::new(mock);
        let result = service.create_guest(create_body("maria@hotel.mx")).await;
        assert!(matches!(result, Err(GuestError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_create_guest_invalid_email() {
        let mut mock = MockGuestRepository::new();
        mock.expect_email_taken().never();

        let service = GuestService::new(mock);
        let result = service.create_guest(create_body("maria-at-hotel")).await;
        assert!(matches!(result, Err(GuestError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_guests_paginates() {
        let mut mock = MockGuestRepository::new();
        mock.expect_count().returning(|_| Ok(25));
        mock.expect_list()
            .withf(|_, pagination| pagination.page == 3 && pagination.limit == 10)
            .returning(|_, _| Ok(vec![stored("a@hotel.mx"), stored("b@hotel.mx")]));

        let service = GuestService::new(mock);
        let page = service
            .list_guests(GuestFilter {
                page: Some("3".to_string()),
                limit: Some("abc".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.count, 2);
        assert_eq!(page.total, 25);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_update_guest_email_taken_by_other() {
        let id = Uuid::now_v7();
        let mut mock = MockGuestRepository::new();
        mock.expect_email_taken()
            .with(eq("otro@hotel.mx".to_string()), eq(Some(id)))
            .returning(|_, _| Ok(true));
        mock.expect_update().never();

        let service = GuestService::new(mock);
        let result = service
            .update_guest(
                id,
                UpdateGuest {
                    email: Some("OTRO@hotel.mx".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(GuestError::EmailTaken(_))));
    }

    #[tokio::test]
    async fn test_update_guest_without_email_skips_check() {
        let existing = stored("maria@hotel.mx");
        let id = existing.id;
        let mut mock = MockGuestRepository::new();
        mock.expect_email_taken().never();
        mock.expect_update().returning(move |_, input| {
            let mut guest = existing.clone();
            guest.apply_update(input);
            Ok(guest)
        });

        let service = GuestService::new(mock);
        let updated = service
            .update_guest(
                id,
                UpdateGuest {
                    notes: Some("  VIP  ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.guest.notes, "VIP");
    }

    #[tokio::test]
    async fn test_delete_guest_not_found() {
        let mut mock = MockGuestRepository::new();
        mock.expect_delete().returning(|_| Ok(false));

        let service = GuestService::new(mock);
        let result = service.delete_guest(Uuid::now_v7()).await;
        assert!(matches!(result, Err(GuestError::NotFound(_))));
    }
}
