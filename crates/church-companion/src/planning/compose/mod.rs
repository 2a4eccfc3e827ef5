mod marketing;
mod plan;

pub use marketing::{compose_marketing_plan, MarketingPlanInput};
pub use plan::{compose_ministry_plan, MISSION_PLACEHOLDER};

pub(crate) const WRAP_WIDTH: usize = 100;

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub(crate) fn wrap(text: &str, width: usize) -> String {
    let mut wrapped = String::with_capacity(text.len());
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > width {
            wrapped.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            wrapped.push(' ');
            line_len += 1;
        }
        wrapped.push_str(word);
        line_len += word_len;
    }

    wrapped
}
