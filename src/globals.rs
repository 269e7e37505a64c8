use std::sync::OnceLock;

/// Global HTTP client for all network requests
static HTTP_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get a reference to the global HTTP client
/// Lazily initialized on first access
pub fn http_client() -> &'static reqwest::Client {
    HTTP_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_singleton() {
        let client1 = http_client();
        let client2 = http_client();
        assert!(std::ptr::eq(client1, client2));
    }
}
