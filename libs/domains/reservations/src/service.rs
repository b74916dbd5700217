//! Reservation Service - booking rules and the room availability views

use axum_helpers::Pagination;
use chrono::{DateTime, Utc};
use domain_guests::GuestRepository;
use domain_rooms::RoomRepository;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ReservationError, ReservationResult};
use crate::models::{
    AllRooms, AvailabilityOverview, CreateReservation, NewReservation, Reservation,
    ReservationFilter, ReservationMessage, ReservationPage, ReservationStatus, RoomReservations,
    StatusUpdate, day_window, nights_between, round_cents,
};
use crate::repository::ReservationRepository;

/// Reservation service.
///
/// Bookings need the room inventory (capacity, price, availability flag) and
/// the guest registry (contact details), so it is generic over both.
pub struct ReservationService<R, M, G>
where
    R: ReservationRepository,
    M: RoomRepository,
    G: GuestRepository,
{
    repository: Arc<R>,
    rooms: Arc<M>,
    guests: Arc<G>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<R, M, G> ReservationService<R, M, G>
where
    R: ReservationRepository,
    M: RoomRepository,
    G: GuestRepository,
{
    pub fn new(repository: R, rooms: M, guests: G) -> Self {
        Self {
            repository: Arc::new(repository),
            rooms: Arc::new(rooms),
            guests: Arc::new(guests),
        }
    }

    /// Book a room for a date range
    #[instrument(skip(self, input), fields(room_number = input.room_number))]
    pub async fn create_reservation(
        &self,
        input: CreateReservation,
    ) -> ReservationResult<ReservationMessage> {
        let (check_in, check_out) = input.stay()?;

        let room = self
            .rooms
            .get_by_number(input.room_number)
            .await?
            .ok_or(ReservationError::RoomNotFound(input.room_number))?;

        let number_of_guests = input.number_of_guests.unwrap_or(1);
        if number_of_guests < 1 {
            return Err(ReservationError::Validation(
                "numberOfGuests must be at least 1".to_string(),
            ));
        }
        if number_of_guests > room.capacity {
            return Err(ReservationError::Validation(format!(
                "Room {} allows at most {} guests",
                room.number, room.capacity
            )));
        }

        let mut guest_name = non_blank(input.guest_name);
        let mut guest_email = non_blank(input.guest_email);
        let mut guest_phone = non_blank(input.guest_phone);

        if let Some(guest_id) = input.guest_id {
            let guest = self
                .guests
                .get_by_id(guest_id)
                .await?
                .ok_or(ReservationError::GuestNotFound(guest_id))?;

            guest_name.get_or_insert_with(|| guest.full_name());
            guest_email.get_or_insert_with(|| guest.email.clone());
            guest_phone.get_or_insert_with(|| guest.phone.clone());
        }

        let (Some(guest_name), Some(guest_email), Some(guest_phone)) =
            (guest_name, guest_email, guest_phone)
        else {
            return Err(ReservationError::Validation(
                "guestName, guestEmail and guestPhone are required".to_string(),
            ));
        };

        if self
            .repository
            .find_overlapping(room.number, check_in, check_out, None)
            .await?
            .is_some()
        {
            return Err(ReservationError::RoomBooked(room.number));
        }

        let total_price = match input.total_price {
            Some(price) if !price.is_finite() || price < 0.0 => {
                return Err(ReservationError::Validation(
                    "totalPrice must be a non-negative number".to_string(),
                ));
            }
            Some(price) => round_cents(price),
            None => {
                let nights = nights_between(check_in, check_out).max(1);
                round_cents(nights as f64 * room.price_per_night)
            }
        };

        let reservation = self
            .repository
            .create(NewReservation {
                guest_id: input.guest_id,
                room_number: room.number,
                guest_name,
                guest_email,
                guest_phone,
                check_in,
                check_out,
                number_of_guests,
                total_price,
                notes: input.notes.map(|n| n.trim().to_string()).unwrap_or_default(),
            })
            .await?;

        Ok(ReservationMessage {
            message: "Reservation created successfully".to_string(),
            reservation,
        })
    }

    /// Move a reservation to a new status and update the room flag to match
    #[instrument(skip(self, input))]
    pub async fn update_status(
        &self,
        id: Uuid,
        input: StatusUpdate,
    ) -> ReservationResult<ReservationMessage> {
        let status = input
            .status
            .as_deref()
            .and_then(|s| s.parse::<ReservationStatus>().ok())
            .ok_or(ReservationError::InvalidStatus)?;

        let current = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ReservationError::NotFound(id))?;

        if status.blocks_room()
            && !current.status.blocks_room()
            && self
                .repository
                .find_overlapping(
                    current.room_number,
                    current.check_in,
                    current.check_out,
                    Some(id),
                )
                .await?
                .is_some()
        {
            return Err(ReservationError::RoomBooked(current.room_number));
        }

        let reservation = self
            .repository
            .update_status(id, status)
            .await?
            .ok_or(ReservationError::NotFound(id))?;

        if let Some(is_available) = status.room_availability() {
            if !self
                .rooms
                .set_availability_by_number(reservation.room_number, is_available)
                .await?
            {
                tracing::warn!(
                    room_number = reservation.room_number,
                    "Reservation references a room that no longer exists"
                );
            }
        }

        Ok(ReservationMessage {
            message: "Reservation status updated successfully".to_string(),
            reservation,
        })
    }

    /// Rooms free during the UTC day containing `now`
    #[instrument(skip(self))]
    pub async fn availability_overview(
        &self,
        now: DateTime<Utc>,
    ) -> ReservationResult<AvailabilityOverview> {
        let (start, end) = day_window(now);
        let reserved_rooms = self.repository.find_active_between(start, end).await?;

        let mut numbers: Vec<i32> = reserved_rooms.iter().map(|r| r.room_number).collect();
        numbers.sort_unstable();
        numbers.dedup();

        let available_rooms = self.rooms.list_excluding_numbers(numbers).await?;

        Ok(AvailabilityOverview {
            available_rooms,
            reserved_rooms,
        })
    }

    #[instrument(skip(self))]
    pub async fn all_rooms(&self) -> ReservationResult<AllRooms> {
        let all_rooms = self.rooms.list().await?;
        Ok(AllRooms { all_rooms })
    }

    #[instrument(skip(self))]
    pub async fn reservations_for_room(
        &self,
        room_number: i32,
    ) -> ReservationResult<RoomReservations> {
        let reservations = self.repository.list_by_room(room_number).await?;
        Ok(RoomReservations { reservations })
    }

    #[instrument(skip(self))]
    pub async fn list_reservations(
        &self,
        filter: ReservationFilter,
    ) -> ReservationResult<ReservationPage> {
        let criteria = filter.criteria()?;
        let pagination = Pagination::from_query(
            filter.page.as_deref(),
            filter.limit.as_deref(),
            ReservationFilter::DEFAULT_LIMIT,
        );

        let total = self.repository.count(criteria.clone()).await?;
        let results = self.repository.list(criteria, pagination).await?;

        Ok(ReservationPage {
            count: results.len(),
            total,
            page: pagination.page,
            total_pages: pagination.total_pages(total),
            results,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_reservation(&self, id: Uuid) -> ReservationResult<Reservation> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ReservationError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockReservationRepository;
    use chrono::TimeZone;
    use domain_guests::{DocumentType, Guest, MockGuestRepository, NewGuest};
    use domain_rooms::{CreateRoom, MockRoomRepository, Room, RoomType};
    use mockall::predicate::*;

    type TestService =
        ReservationService<MockReservationRepository, MockRoomRepository, MockGuestRepository>;

    fn service(
        repository: MockReservationRepository,
        rooms: MockRoomRepository,
        guests: MockGuestRepository,
    ) -> TestService {
        ReservationService::new(repository, rooms, guests)
    }

    fn room(number: i32, capacity: i32, price: f64) -> Room {
        Room::new(CreateRoom {
            number,
            room_type: RoomType::Double,
            capacity,
            price_per_night: price,
            description: String::new(),
            amenities: vec![],
            is_available: true,
        })
    }

    fn guest() -> Guest {
        Guest::new(NewGuest {
            first_name: "Carlos".to_string(),
            last_name: "Núñez".to_string(),
            email: "carlos@correo.mx".to_string(),
            phone: "7441112233".to_string(),
            document_type: DocumentType::Passport,
            document_number: "G123".to_string(),
            notes: String::new(),
        })
    }

    fn booking(room_number: i32) -> CreateReservation {
        CreateReservation {
            room_number,
            check_in: Some("2024-07-10".to_string()),
            check_out: Some("2024-07-13".to_string()),
            guest_name: Some("Carlos Núñez".to_string()),
            guest_email: Some("carlos@correo.mx".to_string()),
            guest_phone: Some("7441112233".to_string()),
            ..Default::default()
        }
    }

    fn stored(input: &CreateReservation, status: ReservationStatus) -> Reservation {
        let (check_in, check_out) = input.stay().unwrap();
        let mut reservation = Reservation::new(NewReservation {
            guest_id: None,
            room_number: input.room_number,
            guest_name: "Carlos Núñez".to_string(),
            guest_email: "carlos@correo.mx".to_string(),
            guest_phone: "7441112233".to_string(),
            check_in,
            check_out,
            number_of_guests: 1,
            total_price: 3000.0,
            notes: String::new(),
        });
        reservation.status = status;
        reservation
    }

    #[tokio::test]
    async fn test_create_reservation_prices_nights() {
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_get_by_number()
            .with(eq(101))
            .returning(|_| Ok(Some(room(101, 2, 950.5))));

        let mut repository = MockReservationRepository::new();
        repository
            .expect_find_overlapping()
            .with(eq(101), always(), always(), eq(None))
            .returning(|_, _, _, _| Ok(None));
        repository
            .expect_create()
            .withf(|r| r.total_price == 2851.5 && r.number_of_guests == 1)
            .returning(|r| Ok(Reservation::new(r)));

        let created = service(repository, rooms, MockGuestRepository::new())
            .create_reservation(booking(101))
            .await
            .unwrap();

        assert_eq!(created.reservation.status, ReservationStatus::Pending);
        assert_eq!(created.reservation.balance_due, 2851.5);
        assert_eq!(created.message, "Reservation created successfully");
    }

    #[tokio::test]
    async fn test_create_reservation_rejects_reversed_dates() {
        let mut rooms = MockRoomRepository::new();
        rooms.expect_get_by_number().never();

        let mut input = booking(101);
        input.check_out = Some("2024-07-10".to_string());

        let result = service(MockReservationRepository::new(), rooms, MockGuestRepository::new())
            .create_reservation(input)
            .await;
        assert!(matches!(result, Err(ReservationError::InvalidDates)));
    }

    #[tokio::test]
    async fn test_create_reservation_unknown_room() {
        let mut rooms = MockRoomRepository::new();
        rooms.expect_get_by_number().returning(|_| Ok(None));

        let result = service(MockReservationRepository::new(), rooms, MockGuestRepository::new())
            .create_reservation(booking(999))
            .await;
        assert!(matches!(result, Err(ReservationError::RoomNotFound(999))));
    }

    #[tokio::test]
    async fn test_create_reservation_over_capacity() {
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_get_by_number()
            .returning(|_| Ok(Some(room(101, 2, 900.0))));

        let mut input = booking(101);
        input.number_of_guests = Some(3);

        let result = service(MockReservationRepository::new(), rooms, MockGuestRepository::new())
            .create_reservation(input)
            .await;
        assert!(matches!(result, Err(ReservationError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_reservation_fills_contact_from_guest() {
        let guest = guest();
        let guest_id = guest.id;

        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_get_by_number()
            .returning(|_| Ok(Some(room(101, 2, 1000.0))));

        let mut guests = MockGuestRepository::new();
        guests
            .expect_get_by_id()
            .with(eq(guest_id))
            .returning(move |_| Ok(Some(guest.clone())));

        let mut repository = MockReservationRepository::new();
        repository
            .expect_find_overlapping()
            .returning(|_, _, _, _| Ok(None));
        repository
            .expect_create()
            .withf(move |r| {
                r.guest_id == Some(guest_id)
                    && r.guest_name == "Carlos Núñez"
                    && r.guest_email == "carlos@correo.mx"
                    && r.guest_phone == "7441112233"
            })
            .returning(|r| Ok(Reservation::new(r)));

        let input = CreateReservation {
            room_number: 101,
            check_in: Some("2024-07-10".to_string()),
            check_out: Some("2024-07-11".to_string()),
            guest_id: Some(guest_id),
            ..Default::default()
        };

        let created = service(repository, rooms, guests)
            .create_reservation(input)
            .await
            .unwrap();
        assert_eq!(created.reservation.total_price, 1000.0);
    }

    #[tokio::test]
    async fn test_create_reservation_unknown_guest() {
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_get_by_number()
            .returning(|_| Ok(Some(room(101, 2, 1000.0))));
        let mut guests = MockGuestRepository::new();
        guests.expect_get_by_id().returning(|_| Ok(None));

        let mut input = booking(101);
        input.guest_id = Some(Uuid::now_v7());

        let result = service(MockReservationRepository::new(), rooms, guests)
            .create_reservation(input)
            .await;
        assert!(matches!(result, Err(ReservationError::GuestNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_reservation_requires_contact() {
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_get_by_number()
            .returning(|_| Ok(Some(room(101, 2, 1000.0))));

        let mut input = booking(101);
        input.guest_phone = Some("  ".to_string());

        let result = service(MockReservationRepository::new(), rooms, MockGuestRepository::new())
            .create_reservation(input)
            .await;
        assert!(matches!(result, Err(ReservationError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_reservation_overlap_conflict() {
        let existing = stored(&booking(101), ReservationStatus::Confirmed);

        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_get_by_number()
            .returning(|_| Ok(Some(room(101, 2, 1000.0))));
        let mut repository = MockReservationRepository::new();
        repository
            .expect_find_overlapping()
            .returning(move |_, _, _, _| Ok(Some(existing.clone())));
        repository.expect_create().never();

        let result = service(repository, rooms, MockGuestRepository::new())
            .create_reservation(booking(101))
            .await;
        assert!(matches!(result, Err(ReservationError::RoomBooked(101))));
    }

    #[tokio::test]
    async fn test_create_reservation_explicit_price() {
        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_get_by_number()
            .returning(|_| Ok(Some(room(101, 2, 1000.0))));
        let mut repository = MockReservationRepository::new();
        repository
            .expect_find_overlapping()
            .returning(|_, _, _, _| Ok(None));
        repository
            .expect_create()
            .withf(|r| r.total_price == 1500.0)
            .returning(|r| Ok(Reservation::new(r)));

        let mut input = booking(101);
        input.total_price = Some(1500.0);

        assert!(service(repository, rooms, MockGuestRepository::new())
            .create_reservation(input)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_update_status_rejects_unknown_status() {
        let mut repository = MockReservationRepository::new();
        repository.expect_get_by_id().never();

        let result = service(repository, MockRoomRepository::new(), MockGuestRepository::new())
            .update_status(
                Uuid::now_v7(),
                StatusUpdate {
                    status: Some("archived".to_string()),
                },
            )
            .await;
        assert!(matches!(result, Err(ReservationError::InvalidStatus)));
    }

    #[tokio::test]
    async fn test_check_in_marks_room_unavailable() {
        let current = stored(&booking(204), ReservationStatus::Confirmed);
        let id = current.id;
        let mut updated = current.clone();
        updated.status = ReservationStatus::CheckedIn;

        let mut repository = MockReservationRepository::new();
        repository
            .expect_get_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        repository.expect_find_overlapping().never();
        repository
            .expect_update_status()
            .with(eq(id), eq(ReservationStatus::CheckedIn))
            .returning(move |_, _| Ok(Some(updated.clone())));

        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_set_availability_by_number()
            .with(eq(204), eq(false))
            .times(1)
            .returning(|_, _| Ok(true));

        let result = service(repository, rooms, MockGuestRepository::new())
            .update_status(
                id,
                StatusUpdate {
                    status: Some("checked-in".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(result.reservation.status, ReservationStatus::CheckedIn);
    }

    #[tokio::test]
    async fn test_reactivating_cancelled_reservation_checks_overlap() {
        let current = stored(&booking(204), ReservationStatus::Cancelled);
        let id = current.id;
        let other = stored(&booking(204), ReservationStatus::Pending);

        let mut repository = MockReservationRepository::new();
        repository
            .expect_get_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        repository
            .expect_find_overlapping()
            .with(eq(204), always(), always(), eq(Some(id)))
            .returning(move |_, _, _, _| Ok(Some(other.clone())));
        repository.expect_update_status().never();

        let result = service(repository, MockRoomRepository::new(), MockGuestRepository::new())
            .update_status(
                id,
                StatusUpdate {
                    status: Some("confirmed".to_string()),
                },
            )
            .await;
        assert!(matches!(result, Err(ReservationError::RoomBooked(204))));
    }

    #[tokio::test]
    async fn test_confirming_pending_does_not_touch_room() {
        let current = stored(&booking(204), ReservationStatus::Pending);
        let id = current.id;
        let mut updated = current.clone();
        updated.status = ReservationStatus::Confirmed;

        let mut repository = MockReservationRepository::new();
        repository
            .expect_get_by_id()
            .returning(move |_| Ok(Some(current.clone())));
        repository.expect_find_overlapping().never();
        repository
            .expect_update_status()
            .returning(move |_, _| Ok(Some(updated.clone())));

        let mut rooms = MockRoomRepository::new();
        rooms.expect_set_availability_by_number().never();

        let result = service(repository, rooms, MockGuestRepository::new())
            .update_status(
                id,
                StatusUpdate {
                    status: Some("confirmed".to_string()),
                },
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_availability_overview_excludes_reserved_rooms() {
        let now = Utc.with_ymd_and_hms(2024, 7, 11, 18, 30, 0).unwrap();
        let held = stored(&booking(101), ReservationStatus::CheckedIn);
        let held_twice = held.clone();

        let mut repository = MockReservationRepository::new();
        repository
            .expect_find_active_between()
            .withf(move |start, end| {
                *start == Utc.with_ymd_and_hms(2024, 7, 11, 0, 0, 0).unwrap()
                    && *end == Utc.with_ymd_and_hms(2024, 7, 12, 0, 0, 0).unwrap()
            })
            .returning(move |_, _| Ok(vec![held.clone(), held_twice.clone()]));

        let mut rooms = MockRoomRepository::new();
        rooms
            .expect_list_excluding_numbers()
            .with(eq(vec![101]))
            .returning(|_| Ok(vec![room(102, 2, 900.0)]));

        let overview = service(repository, rooms, MockGuestRepository::new())
            .availability_overview(now)
            .await
            .unwrap();
        assert_eq!(overview.reserved_rooms.len(), 2);
        assert_eq!(overview.available_rooms[0].number, 102);
    }

    #[tokio::test]
    async fn test_list_reservations_rejects_bad_filter() {
        let mut repository = MockReservationRepository::new();
        repository.expect_count().never();

        let result = service(repository, MockRoomRepository::new(), MockGuestRepository::new())
            .list_reservations(ReservationFilter {
                room_number: Some("ten".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(ReservationError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_reservations_defaults_to_twenty() {
        let mut repository = MockReservationRepository::new();
        repository.expect_count().returning(|_| Ok(41));
        repository
            .expect_list()
            .withf(|_, pagination| pagination.limit == 20 && pagination.page == 1)
            .returning(|_, _| Ok(vec![]));

        let page = service(repository, MockRoomRepository::new(), MockGuestRepository::new())
            .list_reservations(ReservationFilter::default())
            .await
            .unwrap();
        assert_eq!(page.total, 41);
        assert_eq!(page.total_pages, 3);
    }
}
