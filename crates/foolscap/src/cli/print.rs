use chrono::{DateTime, Utc};
use colored::Colorize;
use foolscapapp::commands::{CmdMessage, ListedNote, MessageLevel};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const NAME_WIDTH: usize = 24;
const TIME_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_contents(contents: &[String]) {
    for (i, text) in contents.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
    }
}

/// One line per note: name, description, tags, then the modified time.
pub(super) fn print_notes(notes: &[ListedNote]) {
    for note in notes {
        let component = &note.component;
        let name = pad_to_width(&truncate_to_width(&note.name, NAME_WIDTH), NAME_WIDTH);

        let tags = if component.tags.is_empty() {
            String::new()
        } else {
            let joined: Vec<&str> = component.tags.iter().map(String::as_str).collect();
            format!(" [{}]", joined.join(", "))
        };
        let available = LINE_WIDTH.saturating_sub(NAME_WIDTH + TIME_WIDTH + 1);
        let summary = truncate_to_width(&format!("{}{}", component.description, tags), available);
        let padding = available.saturating_sub(summary.width());

        println!(
            "{} {}{}{}",
            name.bold(),
            summary,
            " ".repeat(padding),
            format_time_ago(component.modified).dimmed()
        );
    }
}

pub(super) fn print_tags(tag_counts: &[(String, usize)]) {
    for (tag, count) in tag_counts {
        println!("{} {}", pad_to_width(tag, NAME_WIDTH).cyan(), count);
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
