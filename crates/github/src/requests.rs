pub mod repos;
pub mod user;
