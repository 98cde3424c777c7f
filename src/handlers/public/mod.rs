// handlers/public/mod.rs - endpoints the website reads without a token
pub mod auth;
pub mod calendar;
pub mod events;
pub mod links;
pub mod settings;

pub use auth::login as auth_login;
pub use calendar::get as calendar_get;
pub use events::attend as event_attend;
pub use events::get as event_get;
pub use events::list as events_list;
pub use links::list as links_list;
pub use settings::get as settings_get;
