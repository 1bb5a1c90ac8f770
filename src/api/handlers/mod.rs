pub mod accommodation;
pub mod activity;
pub mod availability;
pub mod booking;
pub mod health;
