//! Scroll- and time-driven effects: section reveal, skill counters, the
//! back-to-top/navbar chrome and anchor scrolling.

use crate::config::UiConfig;

pub const REVEAL_SELECTOR: &str = ".fade-in-section, section";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const VISIBLE_CLASS: &str = "is-visible";

pub const PROGRESS_BAR_SELECTOR: &str = ".progress-bar";
pub const SKILL_ITEM_SELECTOR: &str = ".skill-item";
pub const SKILL_LABEL_SELECTOR: &str = ".text-muted";
pub const BAR_REFILL_DELAY_MS: u32 = 200;
/// Set on a bar the first time it is refilled; holds the authored width.
pub const BAR_CLAIMED_ATTRIBUTE: &str = "data-counted";

pub const COUNTER_DURATION_MS: u32 = 2_000;
pub const COUNTER_STEPS: u32 = 50;

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const NAVBAR_SCROLLED_CLASS: &str = "scrolled";

/// Leading-integer parse in the manner of `parseInt`: optional leading
/// whitespace and sign, then digits; trailing text such as `px`/`%` is
/// ignored.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(rest.len(), |(index, _)| index);
    let value = rest[..digits_end].parse::<i64>().ok()?;

    Some(if negative { -value } else { value })
}

/// Counter target for a skill bar's authored width, if it has one.
pub fn counter_target(width: &str) -> Option<u32> {
    parse_leading_int(width).map(|value| value.clamp(0, i64::from(u32::MAX)) as u32)
}

/// Width a bar should animate back to, or `None` when an earlier reveal
/// (for instance of an enclosing section) already claimed it.
pub fn bar_refill_width(claimed: Option<&str>, inline_width: &str) -> Option<String> {
    match claimed {
        Some(_) => None,
        None => Some(inline_width.to_string()),
    }
}

pub fn counter_step_ms() -> u32 {
    COUNTER_DURATION_MS / COUNTER_STEPS
}

pub fn counter_label(value: u32) -> String {
    format!("{value}%")
}

/// Values shown by the percentage counter, one per tick.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: u32,
    step: u32,
    steps: u32,
}

impl CounterAnimation {
    pub fn new(target: u32) -> Self {
        let steps = if target == 0 { 1 } else { COUNTER_STEPS };
        Self {
            target,
            step: 0,
            steps,
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.step >= self.steps {
            return None;
        }
        self.step += 1;

        let progress = f64::from(self.target) * f64::from(self.step) / f64::from(self.steps);
        Some(progress.round() as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChromeState {
    pub back_to_top_visible: bool,
    pub navbar_scrolled: bool,
}

pub fn chrome_for_offset(offset: f64, config: &UiConfig) -> ChromeState {
    ChromeState {
        back_to_top_visible: offset > f64::from(config.back_to_top_threshold_px),
        navbar_scrolled: offset > f64::from(config.navbar_threshold_px),
    }
}

/// Id targeted by an in-page link, `None` for a bare `#`.
pub fn anchor_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn smooth_scroll_top(element_top: f64, page_offset: f64, header_offset: u32) -> f64 {
    element_top + page_offset - f64::from(header_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_follows_parse_int() {
        assert_eq!(parse_leading_int("85%"), Some(85));
        assert_eq!(parse_leading_int("  72.5%"), Some(72));
        assert_eq!(parse_leading_int("-3px"), Some(-3));
        assert_eq!(parse_leading_int("%"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(counter_target("-3px"), Some(0));
    }

    #[test]
    fn nested_reveal_does_not_refill_a_claimed_bar() {
        let first = bar_refill_width(None, "85%");
        assert_eq!(first.as_deref(), Some("85%"));

        // The outer reveal zeroed the inline width before the inner one ran.
        assert_eq!(bar_refill_width(first.as_deref(), "0%"), None);
        assert_eq!(bar_refill_width(Some("85%"), "85%"), None);
    }

    #[test]
    fn counter_reaches_target_in_fifty_ticks() {
        let frames: Vec<u32> = CounterAnimation::new(85).collect();

        assert_eq!(frames.len(), 50);
        assert_eq!(frames.first(), Some(&2));
        assert_eq!(frames.last(), Some(&85));
        assert!(frames.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(counter_step_ms(), 40);
        assert_eq!(counter_label(85), "85%");
    }

    #[test]
    fn zero_target_renders_once() {
        let frames: Vec<u32> = CounterAnimation::new(0).collect();

        assert_eq!(frames, vec![0]);
    }

    #[test]
    fn chrome_thresholds_are_strict() {
        let config = UiConfig::default();

        assert_eq!(
            chrome_for_offset(100.0, &config),
            ChromeState {
                back_to_top_visible: false,
                navbar_scrolled: false,
            }
        );
        assert!(chrome_for_offset(100.5, &config).navbar_scrolled);
        assert!(!chrome_for_offset(300.0, &config).back_to_top_visible);
        assert!(chrome_for_offset(301.0, &config).back_to_top_visible);
    }

    #[test]
    fn anchors_resolve_to_ids_with_header_clearance() {
        assert_eq!(anchor_fragment("#projects"), Some("projects"));
        assert_eq!(anchor_fragment("#"), None);
        assert_eq!(anchor_fragment("/about/#team"), None);
        assert_eq!(smooth_scroll_top(250.0, 1_000.0, 80), 1_170.0);
    }
}
