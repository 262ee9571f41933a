pub mod categories;
pub mod clients;
pub mod debug;
pub mod orders;
pub mod storage;
pub mod users;
