//! Value objects identifying a connection and the name it chats under.

use std::fmt;

use uuid::Uuid;

use super::DomainError;

/// Opaque handle of one accepted TCP connection.
///
/// Two connections never share an id, even when the same peer reconnects with
/// the same display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Self-declared name a client chats under.
///
/// Names are not unique; only the connection id identifies a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a display name from decoded handshake text.
    ///
    /// Surrounding whitespace is trimmed; a name that is empty afterwards is
    /// rejected.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyDisplayName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):
        let first = ConnectionId::generate();

        // when (操作):
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }

    #[test]
    fn test_display_name_is_trimmed() {
        // テスト項目: 表示名の前後の空白と改行が取り除かれる
        // given (前提条件):
        let raw = "  alice\n";

        // when (操作):
        let name = DisplayName::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(name.as_str(), "alice");
        assert_eq!(name.to_string(), "alice");
    }

    #[test]
    fn test_display_name_keeps_inner_spaces() {
        // テスト項目: 表示名の内部の空白は保持される
        // given (前提条件):
        let raw = "alice smith\r\n";

        // when (操作):
        let name = DisplayName::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(name.as_str(), "alice smith");
    }

    #[test]
    fn test_display_name_rejects_blank_input() {
        // テスト項目: 空白のみの表示名はエラーになる
        // given (前提条件):
        let raw = " \r\n";

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert!(matches!(result, Err(DomainError::EmptyDisplayName)));
    }
}
