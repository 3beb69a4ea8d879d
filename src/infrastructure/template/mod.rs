pub mod booking_email;
