pub mod backends;
pub mod voice;
