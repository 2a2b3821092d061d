pub mod router;
pub mod setup;
