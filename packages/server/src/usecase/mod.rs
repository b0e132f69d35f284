//! UseCase layer: the relay's connection lifecycle operations.

mod error;
mod join_chat;
mod leave_chat;
mod relay_message;

pub use error::UseCaseError;
pub use join_chat::JoinChatUseCase;
pub use leave_chat::LeaveChatUseCase;
pub use relay_message::RelayMessageUseCase;
