pub mod gathering;
pub mod link;
pub mod serde_helpers;
pub mod settings;

pub use gathering::{Gathering, GatheringPatch, NewGathering};
pub use link::{Link, LinkPatch, NewLink};
pub use settings::Settings;
