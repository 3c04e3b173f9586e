use chrono::{DateTime, FixedOffset};

const VIETNAM_OFFSET_SECS: i32 = 7 * 60 * 60;

/// `1234567` -> `1,234,567`.
pub fn format_vnd(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// RFC 3339 timestamp shown as `dd-mm-yyyy HH:MM` in Vietnam time. Anything
/// unparsable is returned as given.
pub fn format_date_time(value: &str) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(value) else {
        return value.to_string();
    };
    let Some(offset) = FixedOffset::east_opt(VIETNAM_OFFSET_SECS) else {
        return value.to_string();
    };
    parsed
        .with_timezone(&offset)
        .format("%d-%m-%Y %H:%M")
        .to_string()
}

pub fn uppercase_first_letter(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
