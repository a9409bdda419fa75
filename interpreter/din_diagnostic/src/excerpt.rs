//! Source-excerpt rendering for positioned errors.
//!
//! The excerpt shows the offending line between two dashed dividers with a
//! caret under the error column:
//!
//! ```text
//! --------------------------------
//! x = 10 / 0
//!          ^
//! --------------------------------
//! ```
//!
//! Tabs are expanded to 4 spaces in the displayed line; the caret line
//! compensates with 3 extra spaces per tab left of the error column (the
//! caret already gets 1 column per source character).

use din_ir::Position;

/// A dashed divider line of the given width. Empty when `len` is zero.
pub fn divider(len: usize) -> String {
    "-".repeat(len)
}

/// Render the divider/line/caret/divider excerpt for `pos` in `source`.
///
/// `divider_len` is the width of the dashed dividers; callers conventionally
/// pass the length of the error message that will follow the excerpt. Lines
/// are counted 1-based; an out-of-range position yields an excerpt with an
/// empty source line rather than panicking.
pub fn show_error_source(source: &str, pos: Position, divider_len: usize) -> String {
    let line = source
        .split('\n')
        .nth(pos.line.saturating_sub(1) as usize)
        .unwrap_or("")
        .trim_end_matches('\r');

    let col = pos.column.saturating_sub(1) as usize;
    let num_tabs = line.chars().take(col).filter(|&c| c == '\t').count();

    let mut out = String::new();
    out.push_str(&divider(divider_len));
    out.push('\n');
    out.push_str(&line.replace('\t', "    "));
    out.push('\n');
    out.push_str(&" ".repeat(col));
    out.push_str(&"   ".repeat(num_tabs));
    out.push('^');
    out.push('\n');
    out.push_str(&divider(divider_len));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divider_is_dashes() {
        assert_eq!(divider(4), "----");
        assert_eq!(divider(0), "");
    }

    #[test]
    fn caret_points_at_error_column() {
        let source = "x = 10 / 0\n";
        let excerpt = show_error_source(source, Position::new(1, 8), 10);
        let lines: Vec<&str> = excerpt.lines().collect();
        assert_eq!(lines[0], "----------");
        assert_eq!(lines[1], "x = 10 / 0");
        assert_eq!(lines[2], "       ^");
        assert_eq!(lines[3], "----------");
    }

    #[test]
    fn picks_the_right_line() {
        let source = "a = 1\nb = ?\nc = 3\n";
        let excerpt = show_error_source(source, Position::new(2, 5), 6);
        assert!(excerpt.contains("b = ?"));
        assert!(!excerpt.contains("a = 1"));
    }

    #[test]
    fn tabs_expand_and_caret_compensates() {
        // One tab before the error column: line shows 4 spaces, caret line
        // gets the column offset plus 3 extra spaces for the tab.
        let source = "\tx = !\n";
        let excerpt = show_error_source(source, Position::new(1, 6), 8);
        let lines: Vec<&str> = excerpt.lines().collect();
        assert_eq!(lines[1], "    x = !");
        assert_eq!(lines[2], "        ^");
    }

    #[test]
    fn out_of_range_line_does_not_panic() {
        let excerpt = show_error_source("only one line", Position::new(9, 1), 5);
        assert!(excerpt.contains('^'));
    }

    #[test]
    fn strips_carriage_return_from_crlf_sources() {
        let source = "x = 1\r\ny = !\r\n";
        let excerpt = show_error_source(source, Position::new(2, 5), 5);
        assert!(excerpt.contains("y = !\n"));
    }
}
