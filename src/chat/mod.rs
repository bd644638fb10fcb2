mod message;
mod traits;
mod usage;

pub use message::{ChatMessage, ChatMessageBuilder, ChatRole};
pub use traits::{ChatProvider, ChatResponse};
pub use usage::Usage;
