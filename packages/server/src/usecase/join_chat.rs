//! UseCase: ハンドシェイク完了後の参加処理
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - 確認応答（welcome）の送信、レジストリへの登録、参加通知のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加と他の参加者への通知
//! - エッジケース：最初の参加者（通知対象なし）
//! - 異常系：同じ接続の二重登録、通知の配送に失敗した接続の削除

use std::{net::SocketAddr, sync::Arc};

use hiroba_shared::protocol::{WELCOME, frame_line};

use crate::domain::{ClientDirectory, ClientEntry, ConnectionId, DisplayName, Outbox, RelayMessage};

use super::{LeaveChatUseCase, UseCaseError};

/// 参加のユースケース
pub struct JoinChatUseCase {
    directory: Arc<dyn ClientDirectory>,
    leave_chat: Arc<LeaveChatUseCase>,
}

impl JoinChatUseCase {
    pub fn new(directory: Arc<dyn ClientDirectory>, leave_chat: Arc<LeaveChatUseCase>) -> Self {
        Self {
            directory,
            leave_chat,
        }
    }

    /// Admit a connection whose display name has been received.
    ///
    /// The acknowledgement is queued before the entry becomes visible to other
    /// handlers, so it is always the first payload the client receives. The
    /// join notice goes to everyone else; recipients it could not reach are
    /// removed afterwards.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 参加通知を受け取ったクライアント数
    /// * `Err(UseCaseError::Registry)` - 接続が既に登録されている
    pub async fn execute(
        &self,
        id: ConnectionId,
        name: DisplayName,
        peer: SocketAddr,
        outbox: Outbox,
    ) -> Result<usize, UseCaseError> {
        // 1. 確認応答をキューに積む
        if outbox.try_send(frame_line(WELCOME)).is_err() {
            tracing::warn!("Failed to queue acknowledgement for {}", peer);
        }

        // 2. レジストリに登録
        self.directory
            .register(id, ClientEntry::new(name.clone(), peer, outbox))
            .await?;
        tracing::info!("'{}' ({}) joined the chat", name, peer);

        // 3. 参加通知をブロードキャスト（本人を除く）
        let fan_out = self
            .directory
            .broadcast(RelayMessage::Joined(name), Some(id))
            .await;

        // 4. 配送に失敗した接続を削除
        if !fan_out.failed.is_empty() {
            self.leave_chat.evict_all(fan_out.failed).await;
        }

        Ok(fan_out.delivered)
    }
}
