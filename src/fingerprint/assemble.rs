//! Header templates per persona.
//! Chrome emits 13 names, Firefox 11; callers and tests rely on these counts.

use rand::Rng;

use super::corpus::pick_user_agent;
use super::{Browser, Persona, Platform};

/// Number of headers in a Chrome profile before `Host` and overrides.
pub const CHROME_HEADER_COUNT: usize = 13;
/// Number of headers in a Firefox profile before `Host` and overrides.
pub const FIREFOX_HEADER_COUNT: usize = 11;

const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
const FALLBACK_CHROME_MAJOR: &str = "99";

/// Build the canonical, ordered header list for a persona.
pub fn assemble<R: Rng + ?Sized>(persona: Persona, rng: &mut R) -> Vec<(&'static str, String)> {
    match persona {
        Persona::Chrome(platform) => chrome(platform, rng),
        Persona::Firefox(platform) => firefox(platform, rng),
    }
}

fn chrome<R: Rng + ?Sized>(platform: Platform, rng: &mut R) -> Vec<(&'static str, String)> {
    let user_agent = pick_user_agent(Browser::Chrome, platform, rng);
    let major = chrome_major(user_agent).unwrap_or(FALLBACK_CHROME_MAJOR);

    vec![
        ("Connection", "keep-alive".to_string()),
        ("Cache-Control", "max-age=0".to_string()),
        ("sec-ch-ua", sec_ch_ua(major)),
        ("sec-ch-ua-mobile", "?0".to_string()),
        ("Upgrade-Insecure-Requests", "1".to_string()),
        ("User-Agent", user_agent.to_string()),
        ("Accept", ACCEPT.to_string()),
        ("Sec-Fetch-Site", "none".to_string()),
        ("Sec-Fetch-Mode", "navigate".to_string()),
        ("Sec-Fetch-User", "?1".to_string()),
        ("Sec-Fetch-Dest", "document".to_string()),
        ("Accept-Language", ACCEPT_LANGUAGE.to_string()),
        ("sec-ch-ua-platform", platform.client_hint().to_string()),
    ]
}

fn firefox<R: Rng + ?Sized>(platform: Platform, rng: &mut R) -> Vec<(&'static str, String)> {
    let user_agent = pick_user_agent(Browser::Firefox, platform, rng);

    // Firefox sends no client hints
    vec![
        ("User-Agent", user_agent.to_string()),
        ("Accept", ACCEPT.to_string()),
        ("Accept-Language", ACCEPT_LANGUAGE.to_string()),
        ("DNT", "1".to_string()),
        ("Connection", "keep-alive".to_string()),
        ("Upgrade-Insecure-Requests", "1".to_string()),
        ("Sec-Fetch-Dest", "document".to_string()),
        ("Sec-Fetch-Mode", "navigate".to_string()),
        ("Sec-Fetch-Site", "none".to_string()),
        ("Sec-Fetch-User", "?1".to_string()),
        ("Sec-GPC", "1".to_string()),
    ]
}

/// Major version from a `Chrome/<major>.<...>` token.
fn chrome_major(user_agent: &str) -> Option<&str> {
    let version = user_agent.split("Chrome/").nth(1)?.split_whitespace().next()?;
    let major = version.split('.').next()?;
    (!major.is_empty() && major.bytes().all(|b| b.is_ascii_digit())).then_some(major)
}

fn sec_ch_ua(major: &str) -> String {
    format!(
        "\" Not A;Brand\";v=\"99\", \"Chromium\";v=\"{major}\", \"Google Chrome\";v=\"{major}\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn names(headers: &[(&'static str, String)]) -> HashSet<&'static str> {
        headers.iter().map(|(name, _)| *name).collect()
    }

    #[test]
    fn test_chrome_shape() {
        let mut rng = StdRng::seed_from_u64(11);
        for platform in [Platform::Windows, Platform::MacOS, Platform::Linux] {
            let headers = assemble(Persona::Chrome(platform), &mut rng);
            assert_eq!(headers.len(), CHROME_HEADER_COUNT);
            assert_eq!(names(&headers).len(), CHROME_HEADER_COUNT, "names are unique");
            assert!(names(&headers).contains("sec-ch-ua-platform"));
        }
    }

    #[test]
    fn test_firefox_shape() {
        let mut rng = StdRng::seed_from_u64(12);
        for platform in [Platform::Windows, Platform::MacOS, Platform::Linux] {
            let headers = assemble(Persona::Firefox(platform), &mut rng);
            assert_eq!(headers.len(), FIREFOX_HEADER_COUNT);
            assert_eq!(names(&headers).len(), FIREFOX_HEADER_COUNT, "names are unique");
            assert!(names(&headers).contains("DNT"));
            assert!(!names(&headers).iter().any(|n| n.starts_with("sec-ch-ua")));
        }
    }

    #[test]
    fn test_platform_client_hint() {
        let mut rng = StdRng::seed_from_u64(13);
        let platform_of = |headers: Vec<(&'static str, String)>| {
            headers
                .into_iter()
                .find(|(name, _)| *name == "sec-ch-ua-platform")
                .map(|(_, value)| value)
        };
        assert_eq!(
            platform_of(assemble(Persona::Chrome(Platform::MacOS), &mut rng)).as_deref(),
            Some("Macintosh")
        );
        assert_eq!(
            platform_of(assemble(Persona::Chrome(Platform::Linux), &mut rng)).as_deref(),
            Some("Linux")
        );
        assert_eq!(
            platform_of(assemble(Persona::Chrome(Platform::Windows), &mut rng)).as_deref(),
            Some("Windows")
        );
    }

    #[test]
    fn test_chrome_major_parsing() {
        assert_eq!(
            chrome_major("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/83.0.4103.106 Safari/537.36"),
            Some("83")
        );
        assert_eq!(chrome_major("Mozilla/5.0 Firefox/107.0"), None);
        assert_eq!(chrome_major("Chrome/"), None);
    }

    #[test]
    fn test_sec_ch_ua_tracks_user_agent() {
        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..20 {
            let headers = assemble(Persona::Chrome(Platform::Windows), &mut rng);
            let get = |key: &str| {
                headers
                    .iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, v)| v.clone())
                    .unwrap()
            };
            let major = chrome_major(&get("User-Agent")).unwrap().to_string();
            assert!(get("sec-ch-ua").contains(&format!("\"Google Chrome\";v=\"{major}\"")));
        }
    }
}
