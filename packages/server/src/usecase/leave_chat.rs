//! UseCase: 退出処理
//!
//! ### 何をテストしているか
//! - LeaveChatUseCase::execute() / evict_all()
//! - 退出通知、レジストリからの削除、冪等性、配送失敗した接続の連鎖的な削除
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の退出と通知
//! - エッジケース：未登録・削除済みの接続（何もしない）
//! - 異常系：退出通知の配送に失敗した接続も削除される

use std::sync::Arc;

use crate::domain::{ClientDirectory, ConnectionId, DisplayName};

/// 退出（Removal）のユースケース
pub struct LeaveChatUseCase {
    directory: Arc<dyn ClientDirectory>,
}

impl LeaveChatUseCase {
    pub fn new(directory: Arc<dyn ClientDirectory>) -> Self {
        Self { directory }
    }

    /// Remove one connection.
    ///
    /// Idempotent: removing a connection that never registered or that is
    /// already gone does nothing. Returns the names of every client that left
    /// as a result, including recipients the departure notice failed to reach.
    pub async fn execute(&self, id: ConnectionId) -> Vec<DisplayName> {
        self.evict_all(vec![id]).await
    }

    /// Remove every connection in `ids`, following failed departure notices.
    pub async fn evict_all(&self, ids: Vec<ConnectionId>) -> Vec<DisplayName> {
        let mut pending = ids;
        let mut departed = Vec::new();

        while let Some(id) = pending.pop() {
            let Some(departure) = self.directory.remove(id).await else {
                continue;
            };
            tracing::info!("'{}' left the chat", departure.name);
            pending.extend(departure.failed);
            departed.push(departure.name);
        }

        departed
    }

    /// 残りの参加者数を取得
    pub async fn count_remaining_participants(&self) -> usize {
        self.directory.count().await
    }
}
