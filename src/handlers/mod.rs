mod conversation;
mod telegram;

pub use conversation::*;
pub use telegram::*;
