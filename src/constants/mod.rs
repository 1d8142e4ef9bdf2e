//! Arena constants organized by domain.
//!
//! Every tunable here is also the default for the matching `ArenaConfig` field.

mod animation;
mod board;
mod combat;
mod ui;

pub use animation::*;
pub use board::*;
pub use combat::*;
pub use ui::*;
