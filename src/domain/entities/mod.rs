pub mod booking;
pub mod email;
