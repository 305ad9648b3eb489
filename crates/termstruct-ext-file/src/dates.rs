//! Date cell parsing.

use termstruct_core::Date;

/// Date formats accepted in price files, tried in order.
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

/// Parses a date cell in any of the [`DATE_FORMATS`].
pub fn parse_date(value: &str) -> Option<Date> {
    DATE_FORMATS
        .iter()
        .find_map(|format| Date::parse_with_format(value, format).ok())
}
