use async_trait::async_trait;
use mockall::mock;
use roombook_core::{
    errors::BookingResult,
    models::reservation::{NewReservation, Reservation, ReservationPatch},
    repository::ReservationRepository,
};

// Mock store for handler tests
mock! {
    pub ReservationRepo {}

    #[async_trait]
    impl ReservationRepository for ReservationRepo {
        async fn create(&self, reservation: NewReservation) -> BookingResult<String>;

        async fn get(&self, id: &str) -> BookingResult<Reservation>;

        async fn list(&self, room_id: &str) -> BookingResult<Vec<Reservation>>;

        async fn update(&self, id: &str, patch: ReservationPatch) -> BookingResult<()>;

        async fn delete(&self, id: &str) -> BookingResult<()>;
    }
}
