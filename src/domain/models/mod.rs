mod backend;
mod event;
pub mod media;
mod message;
mod request_state;
mod role;
mod slash_commands;
mod suggestions;
mod voice;

pub use backend::*;
pub use event::*;
pub use message::*;
pub use request_state::*;
pub use role::*;
pub use slash_commands::*;
pub use suggestions::*;
pub use voice::*;
