use chrono::{DateTime, Local, Offset, TimeZone};

/// Format a timestamp as a PDF date string (PDF 32000-1:2008
/// Section 7.9.4), e.g. `D:20261015093000+02'00'`.
pub fn pdf_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    let offset = at.offset().fix().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let minutes = offset.abs() / 60;
    format!(
        "D:{}{}{:02}'{:02}'",
        at.naive_local().format("%Y%m%d%H%M%S"),
        sign,
        minutes / 60,
        minutes % 60,
    )
}

/// The current local time as a PDF date string.
pub fn pdf_now() -> String {
    pdf_date(&Local::now())
}
