//! Cache key builders for all Gatehouse cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

/// Cache key for a materialized session by its session identifier.
pub fn session(session_id: &str) -> String {
    format!("session:{session_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key() {
        assert_eq!(session("user_0123abcd"), "session:user_0123abcd");
    }
}
