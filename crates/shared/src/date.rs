use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Server-side calendar day, truncated from the current UTC instant.
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn format_date(date: Date) -> String {
    date.format(&DATE_FORMAT).unwrap_or_default()
}

pub fn unix_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
