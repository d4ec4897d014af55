use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::path::Path;

use crate::error::ScanError;
use crate::nav::NavigationState;
use crate::scanner::Entry;

pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

const HEADER_FG: Color = Color::Indexed(226);
const HEADER_BG: Color = Color::Indexed(235);
const SELECTED_BG: Color = Color::Indexed(240);
const DIR_FG: Color = Color::Indexed(39);
const FILE_FG: Color = Color::Indexed(252);
const SIZE_FG: Color = Color::Indexed(248);
const PERCENT_FG: Color = Color::Indexed(214);

const NAME_MAX_CHARS: usize = 50;
const NAME_COLUMN_WIDTH: usize = 54;

pub fn spinner_frame(index: usize) -> &'static str {
    SPINNER_FRAMES[index % SPINNER_FRAMES.len()]
}

pub fn format_size(size: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = size as f64;
    let mut unit_index = 0;
    while value >= 1024.0 && unit_index < UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }
    format!("{:.1} {}", value, UNITS[unit_index])
}

/// Clip long names to 50 columns, counting chars rather than bytes.
fn truncate_name(name: &str) -> String {
    if name.chars().count() <= NAME_MAX_CHARS {
        return name.to_string();
    }
    let mut clipped: String = name.chars().take(NAME_MAX_CHARS - 3).collect();
    clipped.push_str("...");
    clipped
}

fn entry_row(entry: &Entry, selected: bool) -> Line<'static> {
    let marker = if selected { "> " } else { "  " };
    let indent = "  ".repeat(entry.depth);
    let prefix = if entry.is_dir { "▶ " } else { "· " };

    let mut name = truncate_name(&entry.name);
    if entry.is_dir {
        name.push('/');
    }
    let name_style = if entry.is_dir {
        Style::default().fg(DIR_FG).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(FILE_FG)
    };

    let spans = vec![
        Span::raw(format!("{}{}{}", marker, indent, prefix)),
        Span::styled(
            format!("{:<width$}", name, width = NAME_COLUMN_WIDTH),
            name_style,
        ),
        Span::styled(
            format!("{:>10}", format_size(entry.size)),
            Style::default().fg(SIZE_FG),
        ),
        Span::styled(
            format!("{:>7.1}%", entry.percent),
            Style::default().fg(PERCENT_FG),
        ),
    ];

    let line = Line::from(spans);
    if selected {
        line.style(Style::default().bg(SELECTED_BG))
    } else {
        line
    }
}

/// The browsing screen: path header, scrolled listing, status footer.
pub fn draw_browser(frame: &mut Frame, nav: &NavigationState, status: Option<&str>) {
    let rows_layout = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());
    let header_area = rows_layout[0];
    let list_area = rows_layout[1];
    let footer_area = rows_layout[2];

    let header = Paragraph::new(nav.root().path.display().to_string())
        .alignment(Alignment::Right)
        .style(Style::default().fg(HEADER_FG).bg(HEADER_BG));
    frame.render_widget(header, header_area);

    let cursor_row = nav.cursor().saturating_sub(nav.scroll());
    let rows: Vec<Line> = nav
        .window()
        .iter()
        .enumerate()
        .map(|(i, entry)| entry_row(entry, i == cursor_row))
        .collect();
    frame.render_widget(Paragraph::new(rows), list_area);

    let footer = status
        .map(str::to_string)
        .unwrap_or_else(|| "enter: open  backspace: up  g/G: top/bottom  q: quit".to_string());
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(SIZE_FG)),
        footer_area,
    );
}

pub fn draw_loading(frame: &mut Frame, path: &Path, spinner_index: usize) {
    let text = format!(
        "{} Loading {}...",
        spinner_frame(spinner_index),
        path.display()
    );
    frame.render_widget(Paragraph::new(text), frame.area());
}

pub fn draw_error(frame: &mut Frame, error: &ScanError) {
    let lines = vec![
        Line::styled(format!("Error: {error}"), Style::default().fg(Color::Red)),
        Line::raw(""),
        Line::styled(
            "backspace: go back  q: quit",
            Style::default().fg(SIZE_FG),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), frame.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn sizes_format_in_binary_units() {
        assert_eq!(format_size(0), "0.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0 GB");
        assert_eq!(format_size(2 * 1024 * 1024 * 1024 * 1024), "2.0 TB");
    }

    #[test]
    fn names_clip_at_fifty_chars() {
        let short = "a".repeat(50);
        assert_eq!(truncate_name(&short), short);

        let long = "b".repeat(51);
        let clipped = truncate_name(&long);
        assert_eq!(clipped.chars().count(), 50);
        assert!(clipped.ends_with("..."));
        assert!(clipped.starts_with(&"b".repeat(47)));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let accented = "é".repeat(60);
        let clipped = truncate_name(&accented);
        assert_eq!(clipped.chars().count(), 50);
        assert!(clipped.ends_with("..."));
    }

    #[test]
    fn directory_rows_carry_marker_prefix_and_columns() {
        let mut dir = Entry::directory(PathBuf::from("/data/src"), 2048);
        dir.percent = 75.0;

        let selected = line_text(&entry_row(&dir, true));
        assert!(selected.starts_with("> ▶ src/"));
        assert!(selected.contains("    2.0 KB"));
        assert!(selected.ends_with("   75.0%"));

        let unselected = line_text(&entry_row(&dir, false));
        assert!(unselected.starts_with("  ▶ src/"));
    }

    #[test]
    fn file_rows_use_the_dot_prefix() {
        let mut file = Entry::file(PathBuf::from("/data/big.iso"), 1024);
        file.percent = 100.0;
        let text = line_text(&entry_row(&file, false));
        assert!(text.starts_with("  · big.iso"));
        assert!(text.ends_with("  100.0%"));
    }

    #[test]
    fn selected_row_gets_the_highlight_background() {
        let dir = Entry::directory(PathBuf::from("/data/src"), 0);
        assert_eq!(entry_row(&dir, true).style.bg, Some(SELECTED_BG));
        assert_eq!(entry_row(&dir, false).style.bg, None);
    }

    #[test]
    fn spinner_cycles_through_its_frames() {
        assert_eq!(spinner_frame(0), "◐");
        assert_eq!(spinner_frame(3), "◒");
        assert_eq!(spinner_frame(4), "◐");
    }
}
