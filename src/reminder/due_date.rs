use time::Date;

use crate::Error;

/// Check that `due_date` is not before `today`.
///
/// Only calendar days are compared, so a reminder due today is always
/// accepted no matter the time of day.
///
/// # Errors
/// Returns [Error::PastDueDate] if `due_date` is before `today`.
pub fn validate_due_date(due_date: Date, today: Date) -> Result<(), Error> {
    if due_date < today {
        tracing::debug!("Rejected due date {due_date}, today is {today}");
        return Err(Error::PastDueDate(due_date));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use time::{Duration, macros::date};

    use crate::Error;

    use super::validate_due_date;

    #[test]
    fn today_is_accepted() {
        let today = date!(2025 - 06 - 30);

        assert_eq!(validate_due_date(today, today), Ok(()));
    }

    #[test]
    fn future_date_is_accepted() {
        let today = date!(2025 - 06 - 30);

        assert_eq!(validate_due_date(today + Duration::days(1), today), Ok(()));
    }

    #[test]
    fn yesterday_is_rejected() {
        let today = date!(2025 - 06 - 30);
        let yesterday = today - Duration::days(1);

        assert_eq!(
            validate_due_date(yesterday, today),
            Err(Error::PastDueDate(yesterday))
        );
    }

    #[test]
    fn last_year_is_rejected() {
        let today = date!(2025 - 01 - 01);
        let due_date = date!(2024 - 12 - 31);

        assert_eq!(
            validate_due_date(due_date, today),
            Err(Error::PastDueDate(due_date))
        );
    }
}
