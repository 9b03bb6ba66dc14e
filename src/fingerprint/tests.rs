//! Profile-level tests for the fingerprint module

#[cfg(test)]
mod tests {
    use super::super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_default_profile_has_a_known_shape() {
        let mut rng = seeded(1);
        for _ in 0..200 {
            let profile = generate_with(&GenerationOptions::default(), &mut rng);
            assert!(
                profile.len() == CHROME_HEADER_COUNT || profile.len() == FIREFOX_HEADER_COUNT,
                "unexpected header count {}",
                profile.len()
            );
            assert!(!profile.contains("Host"));
        }
    }

    #[test]
    fn test_unrestricted_produces_both_shapes() {
        let mut rng = seeded(2);
        let options = GenerationOptions::default();
        let sizes: std::collections::HashSet<usize> = (0..1000)
            .map(|_| generate_with(&options, &mut rng).len())
            .collect();
        assert!(sizes.contains(&CHROME_HEADER_COUNT));
        assert!(sizes.contains(&FIREFOX_HEADER_COUNT));
        assert_eq!(sizes.len(), 2);
    }

    #[test]
    fn test_chrome_only_always_chrome() {
        let options = GenerationOptions::default().with_browser(BrowserRestriction::Chrome);
        for _ in 0..100 {
            let profile = generate(&options);
            assert_eq!(profile.len(), CHROME_HEADER_COUNT);
            assert!(profile.contains("sec-ch-ua-platform"));
        }
    }

    #[test]
    fn test_firefox_only_never_sends_client_hints() {
        let options = GenerationOptions::default().with_browser(BrowserRestriction::Firefox);
        for _ in 0..100 {
            let profile = generate(&options);
            assert_eq!(profile.len(), FIREFOX_HEADER_COUNT);
            assert!(!profile.contains("sec-ch-ua-platform"));
        }
    }

    #[test]
    fn test_chrome_priority_when_both_flags_set() {
        let options =
            GenerationOptions::default().with_browser(BrowserRestriction::from_flags(true, true));
        assert!(generate(&options).contains("sec-ch-ua-platform"));
    }

    #[test]
    fn test_host_from_target_url() {
        let options = GenerationOptions::default().with_target_url("https://example.com/foo");
        let profile = generate(&options);
        assert_eq!(profile.get("Host"), Some("example.com"));
        assert_eq!(profile.names().next(), Some("Host"));
    }

    #[test]
    fn test_bad_target_url_sets_no_host() {
        let options = GenerationOptions::default().with_target_url("kl klsajdf; jkl");
        let profile = generate(&options);
        assert!(!profile.contains("Host"));
    }

    #[test]
    fn test_host_keeps_explicit_port() {
        assert_eq!(host_from_url("http://localhost:8080/x").as_deref(), Some("localhost:8080"));
        assert_eq!(host_from_url("mailto:someone@example.com"), None);
    }

    #[test]
    fn test_host_drops_default_port() {
        assert_eq!(host_from_url("https://example.com:443/").as_deref(), Some("example.com"));
        assert_eq!(host_from_url("http://example.com:80/").as_deref(), Some("example.com"));
        assert_eq!(host_from_url("http://example.com:443/").as_deref(), Some("example.com:443"));
    }

    #[test]
    fn test_macos_chrome_platform_hint() {
        let options = GenerationOptions::default()
            .with_os(OsTarget::parse_lenient("m"))
            .with_browser(BrowserRestriction::Chrome);
        assert_eq!(generate(&options).get("sec-ch-ua-platform"), Some("Macintosh"));
    }

    #[test]
    fn test_unknown_os_defaults_to_windows() {
        let options = GenerationOptions::default()
            .with_os(OsTarget::parse_lenient("foo"))
            .with_browser(BrowserRestriction::Chrome);
        assert_eq!(generate(&options).get("sec-ch-ua-platform"), Some("Windows"));
    }

    #[test]
    fn test_user_agent_matches_os() {
        let options = GenerationOptions::default()
            .with_os(OsTarget::MacOS)
            .with_browser(BrowserRestriction::Chrome);
        let pool = corpus::user_agents(Browser::Chrome, Platform::MacOS);
        for _ in 0..50 {
            let profile = generate(&options);
            let ua = profile.get("User-Agent").unwrap();
            assert!(pool.contains(&ua), "{ua} is not a macOS Chrome UA");
        }
    }

    #[test]
    fn test_custom_headers_are_not_overwritten() {
        let options = GenerationOptions::default()
            .with_custom_headers("Host=example.com User-Agent=foobar");
        let mut rng = seeded(3);
        for _ in 0..50 {
            let profile = generate_with(&options, &mut rng);
            assert_eq!(profile.get("Host"), Some("example.com"));
            assert_eq!(profile.get("User-Agent"), Some("foobar"));
            // template plus Host
            assert!(profile.len() == 12 || profile.len() == 14, "got {}", profile.len());
        }
    }

    #[test]
    fn test_custom_host_beats_target_url() {
        let options = GenerationOptions::default()
            .with_custom_headers("Host=override.test")
            .with_target_url("https://example.com/");
        assert_eq!(generate(&options).get("Host"), Some("override.test"));
    }

    #[test]
    fn test_suppress_headers() {
        let options = GenerationOptions::default().with_suppressed_headers("User-Agent Accept");
        let mut rng = seeded(4);
        for _ in 0..50 {
            let profile = generate_with(&options, &mut rng);
            assert!(!profile.contains("User-Agent"));
            assert!(!profile.contains("Accept"));
            assert!(profile.contains("Accept-Language"));
        }
    }

    #[test]
    fn test_suppressed_host() {
        let options = GenerationOptions::default()
            .with_target_url("https://example.com/")
            .with_suppressed_headers("Host");
        assert!(!generate(&options).contains("Host"));
    }

    #[test]
    fn test_override_beats_suppression() {
        let options = GenerationOptions::default()
            .with_custom_headers("User-Agent=mine")
            .with_suppressed_headers("User-Agent DNT");
        let mut rng = seeded(5);
        for _ in 0..50 {
            let profile = generate_with(&options, &mut rng);
            assert_eq!(profile.get("User-Agent"), Some("mine"));
            assert!(!profile.contains("DNT"));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let options = GenerationOptions::default().with_os(OsTarget::Random);
        let a: Vec<_> = (0..10)
            .scan(seeded(42), |rng, _| Some(generate_with(&options, rng)))
            .collect();
        let b: Vec<_> = (0..10)
            .scan(seeded(42), |rng, _| Some(generate_with(&options, rng)))
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_headers_has_no_host() {
        let profile = random_headers();
        assert!(!profile.is_empty());
        assert!(!profile.contains("Host"));
    }

    #[test]
    fn test_to_header_map_skips_invalid_entries() {
        let options = GenerationOptions::default()
            .with_browser(BrowserRestriction::Firefox)
            .with_custom_headers("bad\u{7f}name=1 X-Good=yes");
        let profile = generate(&options);
        let map = profile.to_header_map();
        assert_eq!(map.get("x-good").and_then(|v| v.to_str().ok()), Some("yes"));
        assert_eq!(map.len(), profile.len() - 1);
        assert!(map.contains_key("dnt"));
    }

    #[test]
    fn test_profile_serializes_in_insertion_order() {
        let options = GenerationOptions::default()
            .with_browser(BrowserRestriction::Firefox)
            .with_custom_headers("X-First=1");
        let json = serde_json::to_string(&generate(&options)).unwrap();
        assert!(json.starts_with("{\"X-First\":[\"1\"],\"User-Agent\":["));
    }
}
