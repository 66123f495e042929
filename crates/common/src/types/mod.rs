//! Wire types shared between the inspector frontend and execution backends.

mod command;
mod event;
mod object;

pub use command::*;
pub use event::*;
pub use object::*;
