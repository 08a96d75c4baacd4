pub mod hotel_db;
pub mod queue_db;
pub mod remarks_db;
