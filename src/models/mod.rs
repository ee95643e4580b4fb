pub mod enums;
pub mod record;
pub mod reminder;
pub mod timeline_event;

pub use enums::*;
pub use record::*;
pub use reminder::*;
pub use timeline_event::*;
