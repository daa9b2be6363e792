//! Date helper functions

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use chrono_tz::Tz;

use crate::config::BlogConfig;
use crate::i18n::Locale;

/// Formats publication dates for display in a fixed locale and timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatter {
    locale: Locale,
    timezone: Tz,
}

impl Default for DateFormatter {
    /// Brazilian Portuguese, UTC
    fn default() -> Self {
        Self::new(Locale::default(), Tz::UTC)
    }
}

impl DateFormatter {
    pub fn new(locale: Locale, timezone: Tz) -> Self {
        Self { locale, timezone }
    }

    pub fn from_config(config: &BlogConfig) -> Self {
        Self::new(config.locale(), config.timezone())
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Day, abbreviated month and year
    ///
    /// # Examples
    /// ```ignore
    /// formatter.format_date(&date) // -> "15 mar 2021"
    /// ```
    pub fn format_date(&self, date: &DateTime<Utc>) -> String {
        let local = date.with_timezone(&self.timezone);
        format!(
            "{:02} {} {}",
            local.day(),
            self.locale.month_abbrev(local.month()),
            local.year()
        )
    }

    /// Date followed by the time of day
    ///
    /// # Examples
    /// ```ignore
    /// formatter.format_date_time(&date) // -> "15 mar 2021, às 19:25"
    /// ```
    pub fn format_date_time(&self, date: &DateTime<Utc>) -> String {
        let local = date.with_timezone(&self.timezone);
        format!(
            "{}, {} {:02}:{:02}",
            self.format_date(date),
            self.locale.time_connector(),
            local.hour(),
            local.minute()
        )
    }

    /// Format a date that may be missing; empty when absent
    pub fn format_optional(&self, date: Option<&DateTime<Utc>>) -> String {
        date.map(|d| self.format_date(d)).unwrap_or_default()
    }

    /// The "last edited" text, shown only when the last publication is at
    /// least a minute after the first one
    pub fn edited_annotation(
        &self,
        first: Option<&DateTime<Utc>>,
        last: Option<&DateTime<Utc>>,
    ) -> Option<String> {
        match (first, last) {
            (Some(first), Some(last)) if *last - *first >= Duration::minutes(1) => {
                Some(self.format_date_time(last))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 15, 19, 25, 28).unwrap()
    }

    #[test]
    fn test_format_date_pt_br() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.format_date(&date()), "15 mar 2021");
        assert_eq!(formatter.format_date_time(&date()), "15 mar 2021, às 19:25");
    }

    #[test]
    fn test_format_date_pads_day() {
        let formatter = DateFormatter::default();
        let date = Utc.with_ymd_and_hms(2021, 2, 5, 8, 3, 0).unwrap();
        assert_eq!(formatter.format_date(&date), "05 fev 2021");
        assert_eq!(formatter.format_date_time(&date), "05 fev 2021, às 08:03");
    }

    #[test]
    fn test_format_date_other_locale_and_timezone() {
        let formatter = DateFormatter::new(Locale::EnUs, chrono_tz::America::Sao_Paulo);
        // 19:25 UTC is 16:25 in São Paulo
        assert_eq!(formatter.format_date_time(&date()), "15 Mar 2021, at 16:25");

        let midnight = Utc.with_ymd_and_hms(2021, 1, 1, 1, 0, 0).unwrap();
        assert_eq!(formatter.format_date(&midnight), "31 Dec 2020");
    }

    #[test]
    fn test_format_optional() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.format_optional(None), "");
        assert_eq!(formatter.format_optional(Some(&date())), "15 mar 2021");
    }

    #[test]
    fn test_edited_annotation() {
        let formatter = DateFormatter::default();
        let first = date();
        let same_minute = first + Duration::seconds(20);
        let later = Utc.with_ymd_and_hms(2021, 3, 25, 19, 27, 35).unwrap();

        assert_eq!(formatter.edited_annotation(Some(&first), Some(&same_minute)), None);
        assert_eq!(
            formatter.edited_annotation(Some(&first), Some(&later)),
            Some("25 mar 2021, às 19:27".to_string())
        );
        assert_eq!(formatter.edited_annotation(None, Some(&later)), None);
        assert_eq!(formatter.edited_annotation(Some(&first), None), None);
    }
}
