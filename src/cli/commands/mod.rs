pub mod calendar;
pub mod events;
pub mod init_db;
pub mod links;
pub mod seed;
pub mod settings;
