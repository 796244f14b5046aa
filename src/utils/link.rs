//! Slide link normalization.

/// Resolve a slide link into something a browser can open.
///
/// - Links with a scheme (`https://...`) are used as-is.
/// - `www.` hosts and bare domains get an `https://` prefix.
/// - Root-relative paths (`/about`) are left unchanged.
pub fn resolve_link(link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else if link.starts_with("www.") {
        format!("https://{}", link)
    } else if !link.contains("://") && !link.starts_with('/') {
        format!("https://{}", link)
    } else {
        link.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_domain_gets_https() {
        assert_eq!(resolve_link("example.com"), "https://example.com");
        assert_eq!(
            resolve_link("example.com/path?q=1"),
            "https://example.com/path?q=1"
        );
    }

    #[test]
    fn test_www_gets_https() {
        assert_eq!(resolve_link("www.example.com"), "https://www.example.com");
    }

    #[test]
    fn test_absolute_urls_unchanged() {
        assert_eq!(resolve_link("https://x.com"), "https://x.com");
        assert_eq!(resolve_link("http://x.com/a"), "http://x.com/a");
        assert_eq!(resolve_link("ftp://files.x.com"), "ftp://files.x.com");
    }

    #[test]
    fn test_root_relative_unchanged() {
        assert_eq!(resolve_link("/local/path"), "/local/path");
        assert_eq!(resolve_link("/"), "/");
    }
}
