//! Issue page scraping
//!
//! The browse page is the only place the tracker exposes an issue's numeric
//! id to a cookie session. The markup contract lives entirely here.

use regex::Regex;
use std::sync::LazyLock;

/// Extracts data from an issue's browse page
pub trait IssuePageScraper: Send + Sync {
    /// First numeric issue id found on the page
    fn resolve_issue_id(&self, html: &str) -> Option<u64>;

    /// Minutes already logged by `display_user` (lower-cased), if shown
    fn read_logged_duration(&self, html: &str, display_user: &str) -> Option<u32>;
}

/// Scraper for the stock Jira issue view with the Tempo panel
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexScraper;

static ISSUE_ID_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r#"data-issue-id="(\d+)""#,
        r#"<meta\s+name="ajs-issue-id"\s+content="(\d+)""#,
        r#"id="key-val"[^>]*\brel="(\d+)""#,
    ]
    .map(hardcoded)
});

static DIV_WITH_CLASS: LazyLock<Regex> =
    LazyLock::new(|| hardcoded(r#"(?i)<div\b[^>]*\bclass\s*=\s*"([^"]*)"[^>]*>"#));

static DIV_TAG: LazyLock<Regex> = LazyLock::new(|| hardcoded(r"(?i)<(/?)div\b[^>]*>"));

static DL_BLOCK: LazyLock<Regex> = LazyLock::new(|| hardcoded(r"(?is)<dl\b[^>]*>(.*?)</dl>"));

static FIRST_DD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| hardcoded(r"(?is)<dd\b[^>]*>\s*<span\b[^>]*>([^<]*)</span>"));

static HOURS: LazyLock<Regex> = LazyLock::new(|| hardcoded(r"(\d+)h"));
static MINUTES: LazyLock<Regex> = LazyLock::new(|| hardcoded(r"(\d+)m"));

fn hardcoded(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hardcoded pattern is valid")
}

impl IssuePageScraper for RegexScraper {
    fn resolve_issue_id(&self, html: &str) -> Option<u64> {
        ISSUE_ID_PATTERNS.iter().find_map(|re| {
            re.captures(html)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok())
        })
    }

    fn read_logged_duration(&self, html: &str, display_user: &str) -> Option<u32> {
        let panel = tempo_panel(html)?;
        let block = DL_BLOCK
            .captures_iter(panel)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .find(|inner| inner.to_lowercase().contains(display_user))?;

        let text = FIRST_DD_SPAN.captures(block)?.get(1)?.as_str().trim();
        if text.is_empty() {
            return None;
        }
        parse_logged_duration(text)
    }
}

/// Inner markup of the Tempo panel (`<div class="tempo tt_inner">`)
///
/// Other page sections (People, Details) also use `<dl>` lists that mention
/// the user, so logged time is only read inside this container.
fn tempo_panel(html: &str) -> Option<&str> {
    let open = DIV_WITH_CLASS.captures_iter(html).find(|c| {
        c.get(1).is_some_and(|class| {
            let classes: Vec<&str> = class.as_str().split_whitespace().collect();
            classes.contains(&"tempo") && classes.contains(&"tt_inner")
        })
    })?;
    let start = open.get(0)?.end();

    let mut depth = 1usize;
    for tag in DIV_TAG.captures_iter(&html[start..]) {
        let closing = tag.get(1).is_some_and(|slash| !slash.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                let end = start + tag.get(0)?.start();
                return Some(&html[start..end]);
            }
        } else {
            depth += 1;
        }
    }
    Some(&html[start..])
}

/// Parse `Xh Ym` style text into minutes; missing parts count as zero
///
/// `None` when a number is too large for a minute count.
pub fn parse_logged_duration(text: &str) -> Option<u32> {
    let grab = |re: &Regex| match re.captures(text).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().parse::<u32>().ok(),
        None => Some(0),
    };
    grab(&HOURS)?.checked_mul(60)?.checked_add(grab(&MINUTES)?)
}
