//! Server state shared by connection handlers.

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    usecase::{JoinChatUseCase, LeaveChatUseCase, RelayMessageUseCase},
};

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
    /// JoinChatUseCase（参加のユースケース）
    pub join_chat: Arc<JoinChatUseCase>,
    /// RelayMessageUseCase（メッセージ中継のユースケース）
    pub relay_message: Arc<RelayMessageUseCase>,
    /// LeaveChatUseCase（退出のユースケース）
    pub leave_chat: Arc<LeaveChatUseCase>,
}
