//! Repositorios sobre el almacén de registros

pub mod reservation_repository;
pub mod review_repository;
pub mod user_repository;

pub use reservation_repository::ReservationRepository;
pub use review_repository::ReviewRepository;
pub use user_repository::UserRepository;
