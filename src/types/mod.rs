pub mod layout;
pub mod snapshot;
pub mod widget;

pub use layout::*;
pub use snapshot::*;
pub use widget::*;
