//! Project-specific utilities live here.

/// Formats a shared log prefix for project logs.
pub fn log_prefix(module: &str) -> String {
    format!("libris::{module}")
}

#[cfg(test)]
mod tests {
    #[test]
    fn log_prefix_is_namespaced() {
        assert_eq!(super::log_prefix("books"), "libris::books");
    }
}
