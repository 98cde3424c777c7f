// handlers/protected/mod.rs - dashboard endpoints behind jwt_auth_middleware
pub mod admin;
pub mod events;
pub mod links;
pub mod settings;

pub use admin::init_db as admin_init_db;
pub use admin::whoami as admin_whoami;
pub use events::delete as event_delete;
pub use events::post as event_post;
pub use events::put as event_put;
pub use events::toggle_status as event_toggle_status;
pub use links::delete as link_delete;
pub use links::post as link_post;
pub use links::put as link_put;
pub use settings::put as settings_put;
