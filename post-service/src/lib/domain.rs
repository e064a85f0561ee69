pub mod account;
pub mod errors;
pub mod ports;
pub mod post;
