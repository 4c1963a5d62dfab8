use colored::Colorize;
use enum_filter::descriptor::display_text;
use enum_filter::FilterListItem;
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

const GAP: usize = 2;

pub fn print_list(items: &[FilterListItem]) {
    if items.is_empty() {
        println!("No items.");
        return;
    }
    for line in list_lines(items) {
        println!("{}", line);
    }
}

pub fn print_label(label: &str) {
    println!("{}", label);
}

pub fn print_constants<'a>(constants: impl Iterator<Item = (&'a String, &'a Value)>) {
    let constants: Vec<_> = constants.collect();
    if constants.is_empty() {
        println!("No constants.");
        return;
    }
    let key_width = constants.iter().map(|(key, _)| key.width()).max().unwrap_or(0);
    for (key, alias) in constants {
        let padding = key_width.saturating_sub(key.width());
        println!(
            "{}{} = {}",
            key.bold(),
            " ".repeat(padding),
            alias.to_string().yellow()
        );
    }
}

pub fn print_json(value: &Value) -> enum_filter::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One aligned line per item: value, label, then dimmed `field=value` extras.
fn list_lines(items: &[FilterListItem]) -> Vec<String> {
    let value_width = items.iter().map(|item| item.value.width()).max().unwrap_or(0);
    let label_width = items.iter().map(|item| item.label.width()).max().unwrap_or(0);

    items
        .iter()
        .map(|item| {
            let value_pad = " ".repeat(value_width - item.value.width() + GAP);
            let extras = format_extras(item);
            if extras.is_empty() {
                format!("{}{}{}", item.value.yellow(), value_pad, item.label)
            } else {
                let label_pad = " ".repeat(label_width - item.label.width() + GAP);
                format!(
                    "{}{}{}{}{}",
                    item.value.yellow(),
                    value_pad,
                    item.label,
                    label_pad,
                    extras.dimmed()
                )
            }
        })
        .collect()
}

fn format_extras(item: &FilterListItem) -> String {
    item.extra
        .iter()
        .map(|(field, value)| format!("{}={}", field, display_text(value)))
        .collect::<Vec<_>>()
        .join(" ")
}
