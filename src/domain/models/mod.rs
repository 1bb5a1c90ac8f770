pub mod accommodation;
pub mod activity;
pub mod booking;
pub mod money;
