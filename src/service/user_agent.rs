use crate::models::user_agent::ParsedUserAgent;
use regex::Regex;
use std::sync::LazyLock;

const UNKNOWN: &str = "Unknown";

// Patterns overlap (a Chrome-on-iOS agent carries both `crios` and `ios`), so each list is checked in order.
static BROWSERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile(&[
        (r"chrome|crios|crmo", "Chrome"),
        (r"firefox|fxios", "Firefox"),
        (r"safari", "Safari"),
        (r"msie|trident", "IE"),
        (r"edge", "Edge"),
    ])
});

static OPERATING_SYSTEMS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    compile(&[
        (r"windows", "Windows"),
        (r"macintosh|mac os x", "macOS"),
        (r"linux", "Linux"),
        (r"android", "Android"),
        (r"ios|iphone|ipad|ipod", "iOS"),
    ])
});

static DEVICES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| compile(&[(r"mobile", "Mobile"), (r"tablet", "Tablet")]));

fn compile(patterns: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    patterns
        .iter()
        .filter_map(|(pattern, label)| Regex::new(&format!("(?i){pattern}")).ok().map(|regex| (regex, *label)))
        .collect()
}

fn first_match(rules: &[(Regex, &'static str)], user_agent: &str, fallback: &'static str) -> String {
    rules
        .iter()
        .find(|(regex, _)| regex.is_match(user_agent))
        .map_or(fallback, |(_, label)| label)
        .to_string()
}

/// Map a raw `User-Agent` header to browser, OS and device class. Never fails.
pub fn classify(user_agent: &str) -> ParsedUserAgent {
    ParsedUserAgent {
        browser: first_match(&BROWSERS, user_agent, UNKNOWN),
        os: first_match(&OPERATING_SYSTEMS, user_agent, UNKNOWN),
        device_type: first_match(&DEVICES, user_agent, "Desktop"),
    }
}
