//! UseCase: チャットメッセージの中継処理
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 送信者名のプレフィックス付与、送信者を除くブロードキャスト、配送失敗時の削除
//!
//! ### どのような状況を想定しているか
//! - 正常系：他の全参加者への中継
//! - エッジケース：送信者しかいない場合（中継先なし）
//! - 異常系：レジストリから削除済みの送信者

use std::sync::Arc;

use crate::domain::{ClientDirectory, ConnectionId, RelayMessage};

use super::{LeaveChatUseCase, UseCaseError};

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    directory: Arc<dyn ClientDirectory>,
    leave_chat: Arc<LeaveChatUseCase>,
}

impl RelayMessageUseCase {
    pub fn new(directory: Arc<dyn ClientDirectory>, leave_chat: Arc<LeaveChatUseCase>) -> Self {
        Self {
            directory,
            leave_chat,
        }
    }

    /// Relay `text` from `from` to every other client as `"<{name}> {text}"`.
    ///
    /// The sender's name is looked up in the registry; a sender that has been
    /// removed meanwhile (for example because its own outbox failed) is
    /// refused. Recipients the message could not be queued for are removed
    /// after the pass. Returns the number of recipients reached.
    pub async fn execute(&self, from: ConnectionId, text: String) -> Result<usize, UseCaseError> {
        let name = self
            .directory
            .name_of(from)
            .await
            .ok_or(UseCaseError::NotRegistered(from))?;

        let fan_out = self
            .directory
            .broadcast(RelayMessage::Chat { from: name, text }, Some(from))
            .await;

        if !fan_out.failed.is_empty() {
            self.leave_chat.evict_all(fan_out.failed).await;
        }

        Ok(fan_out.delivered)
    }
}
