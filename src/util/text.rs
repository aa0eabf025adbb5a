use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal cells needed to draw `s`
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `max_cells` cells, ending with `…` when shortened.
/// Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let Some(budget) = max_cells.checked_sub(1) else {
        return String::new();
    };
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// `truncate_to_width`, then right-pad with spaces to exactly `cells`
pub fn fit_to_width(s: &str, cells: usize) -> String {
    let mut out = truncate_to_width(s, cells);
    let pad = cells.saturating_sub(display_width(&out));
    out.extend(std::iter::repeat_n(' ', pad));
    out
}

/// Byte offset of the grapheme after the one at `at`, if any
pub fn next_boundary(s: &str, at: usize) -> Option<usize> {
    let rest = s.get(at..)?;
    let first = rest.graphemes(true).next()?;
    Some(at + first.len())
}

/// Byte offset of the grapheme before `at`, if any
pub fn prev_boundary(s: &str, at: usize) -> Option<usize> {
    let head = s.get(..at)?;
    head.grapheme_indices(true).next_back().map(|(i, _)| i)
}

/// Start of the word left of `at`, skipping whitespace first
pub fn word_start_before(s: &str, at: usize) -> usize {
    let Some(head) = s.get(..at) else {
        return 0;
    };
    let trimmed = head.trim_end();
    trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}

/// Cells from the start of `s` to byte offset `at`
pub fn width_before(s: &str, at: usize) -> usize {
    s.get(..at).map(display_width).unwrap_or_else(|| display_width(s))
}

/// First line of `s`, for one-line previews
pub fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("grocery run", 20), "grocery run");
        assert_eq!(truncate_to_width("grocery run", 6), "groce…");
        assert_eq!(truncate_to_width("abc", 0), "");
        assert_eq!(truncate_to_width("abc", 1), "…");
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(display_width("日本"), 4);
        assert_eq!(truncate_to_width("日本語", 5), "日本…");
        assert_eq!(fit_to_width("日本語", 5), "日本…");
        assert_eq!(fit_to_width("ab", 4), "ab  ");
    }

    #[test]
    fn grapheme_boundaries() {
        let s = "ae\u{301}z";
        assert_eq!(next_boundary(s, 0), Some(1));
        assert_eq!(next_boundary(s, 1), Some(4));
        assert_eq!(prev_boundary(s, 4), Some(1));
        assert_eq!(prev_boundary(s, 0), None);
        assert_eq!(next_boundary(s, s.len()), None);
    }

    #[test]
    fn word_start() {
        assert_eq!(word_start_before("buy oat milk", 12), 8);
        assert_eq!(word_start_before("buy oat ", 8), 4);
        assert_eq!(word_start_before("buy", 3), 0);
    }

    #[test]
    fn width_and_first_line() {
        assert_eq!(width_before("日本語", 3), 2);
        assert_eq!(first_line("title\nbody"), "title");
        assert_eq!(first_line(""), "");
    }
}
