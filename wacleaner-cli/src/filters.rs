use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use clap::ValueEnum;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use wacleaner_core::{DateRange, SortKey, SubView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Received,
    Sent,
    Private,
}

impl From<ViewArg> for SubView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Received => SubView::Received,
            ViewArg::Sent => SubView::Sent,
            ViewArg::Private => SubView::Private,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Date,
    Size,
    Name,
}

impl From<SortArg> for SortKey {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Date => SortKey::Date,
            SortArg::Size => SortKey::Size,
            SortArg::Name => SortKey::Name,
        }
    }
}

fn millis_in<Tz: TimeZone>(tz: &Tz, at: NaiveDateTime) -> Result<i64> {
    tz.from_local_datetime(&at)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| eyre!("{} does not exist in the local time zone", at))
}

/// Range from the start of `from` to the last millisecond of `to`, in `tz`
pub fn date_range<Tz: TimeZone>(
    tz: &Tz,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Option<DateRange>> {
    let (from, to) = match (from, to) {
        (Some(from), Some(to)) => (from, to),
        (None, None) => return Ok(None),
        _ => return Err(eyre!("--from and --to must be given together")),
    };

    let start = from
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| eyre!("Invalid start date {}", from))?;
    let end = to
        .and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| eyre!("Invalid end date {}", to))?;

    let range = DateRange::new(millis_in(tz, start)?, millis_in(tz, end)?)?;
    Ok(Some(range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_range_covers_whole_days() {
        let range = date_range(&Utc, Some(day("2024-01-01")), Some(day("2024-01-02")))
            .unwrap()
            .unwrap();
        assert_eq!(range.start_ms(), 1_704_067_200_000);
        assert_eq!(range.end_ms(), 1_704_067_200_000 + 2 * 86_400_000 - 1);
    }

    #[test]
    fn test_no_dates_no_range() {
        assert!(date_range(&Utc, None, None).unwrap().is_none());
        assert!(date_range(&Utc, Some(day("2024-01-01")), None).is_err());
    }

    #[test]
    fn test_reversed_dates_rejected() {
        assert!(date_range(&Utc, Some(day("2024-02-01")), Some(day("2024-01-01"))).is_err());
    }

    #[test]
    fn test_arg_conversions() {
        assert_eq!(SubView::from(ViewArg::Private), SubView::Private);
        assert_eq!(SortKey::from(SortArg::Size), SortKey::Size);
    }
}
