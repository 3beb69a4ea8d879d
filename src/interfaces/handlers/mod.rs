pub mod booking;
pub mod system;
