//! Text the relay writes to clients.

use std::fmt;

use super::DisplayName;

/// A payload fanned out to the room.
///
/// Chat text carries its author's name as a prefix; system notices carry no
/// sender prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMessage {
    Chat { from: DisplayName, text: String },
    Joined(DisplayName),
    Left(DisplayName),
}

impl fmt::Display for RelayMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayMessage::Chat { from, text } => write!(f, "<{}> {}", from, text),
            RelayMessage::Joined(name) => write!(f, "{} joined", name),
            RelayMessage::Left(name) => write!(f, "{} left the chat", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value).unwrap()
    }

    #[test]
    fn test_chat_message_is_prefixed_with_sender() {
        // テスト項目: チャットメッセージに送信者名のプレフィックスが付く
        // given (前提条件):
        let message = RelayMessage::Chat {
            from: name("bob"),
            text: "hello".to_string(),
        };

        // when (操作):
        let rendered = message.to_string();

        // then (期待する結果):
        assert_eq!(rendered, "<bob> hello");
    }

    #[test]
    fn test_join_notice_has_no_sender_prefix() {
        // テスト項目: 参加通知は送信者プレフィックスなしで描画される
        // given (前提条件):
        let message = RelayMessage::Joined(name("alice"));

        // when (操作):
        let rendered = message.to_string();

        // then (期待する結果):
        assert_eq!(rendered, "alice joined");
    }

    #[test]
    fn test_leave_notice_has_no_sender_prefix() {
        // テスト項目: 退出通知は送信者プレフィックスなしで描画される
        // given (前提条件):
        let message = RelayMessage::Left(name("alice"));

        // when (操作):
        let rendered = message.to_string();

        // then (期待する結果):
        assert_eq!(rendered, "alice left the chat");
    }
}
