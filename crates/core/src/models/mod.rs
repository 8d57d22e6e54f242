pub mod datetime;
pub mod request;
pub mod reservation;
