/*!
format.rs

Formatting primitives for the human output paths of `cmdpal`.

Goals:
  - Consistent banner / table rendering across list, show and run.
  - Centralized style detection (NO_COLOR, NO_EMOJI, COLUMNS).
  - No terminal crates; degrade to plain text when ANSI is off.

Public API Summary:
  - Style::detect() -> Style
  - paint(role, text, &Style) -> String
  - emoji(tag, &Style) -> &'static str
  - banner(title, subtitle_opt, &Style) -> String
  - table(headers, rows, TableOpts, &Style) -> String
  - truncate_ellipsis(s, max_chars) -> String

NOTE:
  - Helpers return strings; callers decide where to print them.
  - JSON output paths must not use these helpers so machine output
    stays clean.
*/

use std::borrow::Cow;

/* -------------------------------------------------------------------------- */
/* Style                                                                      */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct Style {
    pub color: bool,
    pub emoji: bool,
    pub width: usize,
}

impl Style {
    pub fn detect() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);
        Self {
            color: std::env::var_os("NO_COLOR").is_none(),
            emoji: std::env::var_os("NO_EMOJI").is_none(),
            width,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::detect()
    }
}

/* -------------------------------------------------------------------------- */
/* Color / Emoji                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Success,
    Warning,
    Error,
    Dim,
    Bold,
}

pub fn paint(role: Role, text: impl AsRef<str>, style: &Style) -> String {
    if !style.color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",    // cyan-ish
        Role::Secondary => "38;5;250", // gray
        Role::Accent => "38;5;213",    // magenta/pink
        Role::Success => "38;5;82",    // green
        Role::Warning => "38;5;214",   // orange
        Role::Error => "38;5;196",     // red
        Role::Dim => "2",              // faint
        Role::Bold => "1",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &Style) -> &'static str {
    if !style.emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        "info" => "ℹ",
        "list" => "📜",
        "run" => "🚀",
        _ => "",
    }
}

/* -------------------------------------------------------------------------- */
/* Banner                                                                     */
/* -------------------------------------------------------------------------- */

/// One-line boxed header: `┌─...─┐ │ title  subtitle │ └─...─┘`.
///
/// The subtitle is dropped when fewer than a few columns remain for it;
/// nothing here ever wraps.
pub fn banner(title: impl AsRef<str>, subtitle: Option<&str>, style: &Style) -> String {
    let max_inner = style.width.saturating_sub(4).max(16);
    let title = truncate_ellipsis(title.as_ref(), max_inner);

    let mut plain = title.clone();
    let mut inner = paint(Role::Primary, &title, style);
    if let Some(sub) = subtitle {
        let room = max_inner.saturating_sub(plain.chars().count() + 2);
        if room >= 4 {
            let sub = truncate_ellipsis(sub, room);
            plain.push_str("  ");
            plain.push_str(&sub);
            inner.push_str("  ");
            inner.push_str(&paint(Role::Secondary, &sub, style));
        }
    }

    let bar = "─".repeat(plain.chars().count() + 2);
    format!("┌{bar}┐\n│ {inner} │\n└{bar}┘")
}

/* -------------------------------------------------------------------------- */
/* Table Rendering                                                            */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct TableOpts {
    /// 0 means "use the detected terminal width".
    pub max_width: usize,
    pub truncate: bool,
    pub header_sep: bool,
    pub min_col_width: usize,
}

impl Default for TableOpts {
    fn default() -> Self {
        Self {
            max_width: 0,
            truncate: true,
            header_sep: true,
            min_col_width: 2,
        }
    }
}

pub fn table(headers: &[&str], rows: &[Vec<String>], opts: TableOpts, style: &Style) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let limit = if opts.max_width == 0 {
        style.width
    } else {
        opts.max_width.min(style.width)
    };
    let widths = column_widths(headers, rows, limit, opts.min_col_width);

    let mut lines = Vec::new();

    let mut header_line = String::new();
    for (i, h) in headers.iter().enumerate() {
        if i > 0 {
            header_line.push_str("  ");
        }
        header_line.push_str(&paint(Role::Accent, fit_cell(h, widths[i], opts.truncate), style));
    }
    lines.push(header_line);

    if opts.header_sep {
        let sep = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(paint(Role::Dim, sep, style));
    }

    for row in rows {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            let raw = row.get(i).map(String::as_str).unwrap_or("");
            line.push_str(&fit_cell(raw, *width, opts.truncate));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Column widths sized to content, then shaved from the widest column
/// down until the row fits the limit (or every column is at the minimum).
fn column_widths(headers: &[&str], rows: &[Vec<String>], limit: usize, min_col: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let gaps = (widths.len() - 1) * 2;
    let mut overflow = (widths.iter().sum::<usize>() + gaps).saturating_sub(limit);
    while overflow > 0 {
        let Some((idx, &widest)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if widest <= min_col {
            break;
        }
        let shave = (widest - min_col).min(overflow);
        widths[idx] -= shave;
        overflow -= shave;
    }
    widths
}

/// Pad with spaces up to `width`, or truncate with an ellipsis past it.
fn fit_cell(s: &str, width: usize, truncate: bool) -> String {
    let len = display_width(s);
    if len <= width {
        let mut out = s.to_string();
        out.push_str(&" ".repeat(width - len));
        return out;
    }
    if !truncate {
        return s.to_string();
    }
    let mut out = truncate_ellipsis(s, width);
    let final_len = out.chars().count();
    if final_len < width {
        out.push_str(&" ".repeat(width - final_len));
    }
    out
}

/* -------------------------------------------------------------------------- */
/* Text / ANSI Utilities                                                      */
/* -------------------------------------------------------------------------- */

pub fn truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            out.push(ch);
            continue;
        }
        // Skip a CSI sequence: ESC '[' ... up to the terminating letter.
        if chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
        }
    }
    Cow::Owned(out)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_style(width: usize) -> Style {
        Style {
            color: false,
            emoji: false,
            width,
        }
    }

    #[test]
    fn banner_contains_title_and_subtitle() {
        let style = plain_style(80);
        let b = banner("Commands (3)", Some("settings • 2ms"), &style);
        assert!(b.contains("Commands (3)"));
        assert!(b.contains("settings"));
        assert!(b.starts_with('┌'));
    }

    #[test]
    fn banner_drops_subtitle_when_cramped() {
        let style = plain_style(40);
        let b = banner(&"t".repeat(40), Some("subtitle"), &style);
        assert!(!b.contains("subtitle"));
    }

    #[test]
    fn table_renders_cells() {
        let style = plain_style(100);
        let t = table(
            &["A", "B"],
            &[
                vec!["x".into(), "y".into()],
                vec!["longer".into(), "val".into()],
            ],
            TableOpts::default(),
            &style,
        );
        assert!(t.contains('A'));
        assert!(t.contains("longer"));
    }

    #[test]
    fn table_rows_fit_the_width_limit() {
        let style = plain_style(40);
        let t = table(
            &["NAME", "DOC"],
            &[vec!["command".into(), "d".repeat(120)]],
            TableOpts::default(),
            &style,
        );
        for line in t.lines() {
            assert!(display_width(line) <= 40, "line too wide: {line}");
        }
    }

    #[test]
    fn fit_cell_pads_and_truncates() {
        assert_eq!(fit_cell("ab", 4, true), "ab  ");
        assert_eq!(fit_cell("abcdef", 4, true), "abc…");
        assert_eq!(fit_cell("abcdef", 4, false), "abcdef");
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_ellipsis("abc", 4), "abc");
        assert_eq!(truncate_ellipsis("abcdef", 4), "abc…");
    }

    #[test]
    fn strip_ansi_removes_codes() {
        let colored = "\x1b[38;5;45mNAME\x1b[0m";
        assert_eq!(strip_ansi(colored), "NAME");
        assert_eq!(display_width(colored), 4);
    }
}
