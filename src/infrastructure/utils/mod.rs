pub mod client_key;
pub mod html;
