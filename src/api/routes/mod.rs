pub mod health;
pub mod invoice;
