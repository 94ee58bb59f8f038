use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime, Weekday};

/// `YYYY-MM-DD`, the only date shape used on the wire.
pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text.trim(), DATE_FORMAT)
}

/// Server calendar day. On Unix the local offset cannot be read once the
/// runtime has spawned worker threads, so inside the server this is the UTC
/// date; clients that care about their own day pass `today` explicitly.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Short English weekday label ("Mon", "Tue", ...).
pub fn day_label(date: Date) -> &'static str {
    match date.weekday() {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

/// Serde adapter for `Date` fields in `YYYY-MM-DD` form.
pub mod iso_date {
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(DATE_FORMAT).map_err(ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_date(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn today_is_the_utc_date_inside_the_runtime() {
        let before = OffsetDateTime::now_utc().date();
        let got = today();
        let after = OffsetDateTime::now_utc().date();
        assert!(got == before || got == after, "{got} not in [{before}, {after}]");
    }

    #[test]
    fn parses_and_labels_dates() {
        let d = parse_date("2024-03-11").unwrap();
        assert_eq!(d, date!(2024 - 03 - 11));
        assert_eq!(day_label(d), "Mon");
        assert_eq!(day_label(date!(2024 - 03 - 17)), "Sun");
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_date("2024/03/11").is_err());
        assert!(parse_date("yesterday").is_err());
    }
}
