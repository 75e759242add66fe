pub mod clipboard;
mod conversation;
mod session_store;
mod voice;

pub use conversation::*;
pub use session_store::*;
pub use voice::*;
