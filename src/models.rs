use std::fmt;

use chrono::{DateTime, Duration, Months, NaiveTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::validation::{validate_non_empty_string, validate_not_future};

/// Age given to a person constructed without an explicit date of birth.
pub const DEFAULT_AGE_YEARS: u32 = 16;

/// Days per year used for age arithmetic. Leap years are ignored.
pub const DAYS_IN_YEAR: i64 = 365;

/// An immutable person record.
///
/// Equality is identity: every constructed person gets its own id, so two
/// people built from the same name and date of birth are still distinct.
#[derive(Debug, Clone)]
pub struct Person {
    id: Uuid,
    name: String,
    date_of_birth: DateTime<Utc>,
}

impl Person {
    pub fn new(name: impl Into<String>, date_of_birth: DateTime<Utc>) -> Result<Self> {
        Self::new_at(name, date_of_birth, Utc::now())
    }

    /// Builds a person, validating the date of birth against `now` instead of
    /// the wall clock.
    pub fn new_at(
        name: impl Into<String>,
        date_of_birth: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let name = name.into();
        validate_non_empty_string("name", &name)?;
        validate_not_future("date_of_birth", date_of_birth, now)?;

        Ok(Self {
            id: Uuid::now_v7(),
            name,
            date_of_birth,
        })
    }

    pub fn with_default_age(name: impl Into<String>) -> Result<Self> {
        Self::with_default_age_at(name, Utc::now())
    }

    /// Builds a person born at midnight UTC, [`DEFAULT_AGE_YEARS`] calendar
    /// years before `now`.
    pub fn with_default_age_at(name: impl Into<String>, now: DateTime<Utc>) -> Result<Self> {
        let date_of_birth = years_before(now, DEFAULT_AGE_YEARS)
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();
        Self::new_at(name, date_of_birth, now)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_of_birth(&self) -> DateTime<Utc> {
        self.date_of_birth
    }

    pub fn age_in_years(&self, now: DateTime<Utc>) -> i64 {
        (now - self.date_of_birth).num_days() / DAYS_IN_YEAR
    }

    /// True when the person was born on or before `threshold_years` 365-day
    /// years before `now`, i.e. `age_in_years(now) >= threshold_years`.
    pub fn is_older_than(&self, threshold_years: u32, now: DateTime<Utc>) -> bool {
        self.date_of_birth <= age_cutoff(now, threshold_years)
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Latest date of birth for someone at least `years` old by the 365-day rule.
pub fn age_cutoff(now: DateTime<Utc>, years: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(years) * DAYS_IN_YEAR)
        .and_then(|age| now.checked_sub_signed(age))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Subtracts whole calendar years, saturating at the earliest representable
/// instant.
pub fn years_before(now: DateTime<Utc>, years: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 13, 45, 30).unwrap()
    }

    #[test]
    fn test_new_preserves_name_and_date() {
        let now = fixed_now();
        let dob = Utc.with_ymd_and_hms(1990, 3, 1, 8, 0, 0).unwrap();

        let person = Person::new_at("Alice", dob, now).unwrap();
        assert_eq!(person.name(), "Alice");
        assert_eq!(person.date_of_birth(), dob);
        assert_eq!(person.to_string(), "Alice");
    }

    #[test]
    fn test_new_accepts_birth_at_now() {
        let now = fixed_now();
        assert!(Person::new_at("Alice", now, now).is_ok());
    }

    #[test]
    fn test_new_rejects_future_date() {
        let now = fixed_now();
        let err = Person::new_at("Alice", now + Duration::days(1), now).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = Person::new("Alice", Utc::now() + Duration::days(365)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let now = fixed_now();
        for name in ["", " ", "\t\n "] {
            let err = Person::new_at(name, now, now).unwrap_err();
            assert!(err.is_invalid_argument(), "name {:?} should be rejected", name);
        }
    }

    #[test]
    fn test_default_age_is_midnight_sixteen_years_back() {
        let now = fixed_now();
        let person = Person::with_default_age_at("Bob", now).unwrap();
        let dob = person.date_of_birth();

        assert_eq!((dob.year(), dob.month(), dob.day()), (2008, 6, 15));
        assert_eq!((dob.hour(), dob.minute(), dob.second()), (0, 0, 0));
        assert!(person.is_older_than(16, now));
    }

    #[test]
    fn test_default_age_from_leap_day() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let dob = Person::with_default_age_at("Bob", now).unwrap().date_of_birth();
        assert_eq!((dob.year(), dob.month(), dob.day()), (2008, 2, 29));
    }

    #[test]
    fn test_equality_is_identity() {
        let now = fixed_now();
        let a = Person::new_at("Bob", now, now).unwrap();
        let b = Person::new_at("Bob", now, now).unwrap();

        assert_eq!(a, a);
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_age_uses_365_day_years() {
        let now = fixed_now();
        let person = Person::new_at("Bob", now - Duration::days(30 * DAYS_IN_YEAR), now).unwrap();
        assert_eq!(person.age_in_years(now), 30);

        let person =
            Person::new_at("Bob", now - Duration::days(30 * DAYS_IN_YEAR - 1), now).unwrap();
        assert_eq!(person.age_in_years(now), 29);
    }

    #[test]
    fn test_is_older_than_boundary() {
        let now = fixed_now();
        let cutoff = age_cutoff(now, 30);

        let on_cutoff = Person::new_at("Bob", cutoff, now).unwrap();
        let just_after = Person::new_at("Bob", cutoff + Duration::seconds(1), now).unwrap();

        assert!(on_cutoff.is_older_than(30, now));
        assert_eq!(on_cutoff.age_in_years(now), 30);
        assert!(!just_after.is_older_than(30, now));
        assert_eq!(just_after.age_in_years(now), 29);
    }

    #[test]
    fn test_is_older_than_huge_threshold() {
        let now = fixed_now();
        let person = Person::new_at("Bob", now - Duration::days(100 * DAYS_IN_YEAR), now).unwrap();
        assert!(person.is_older_than(99, now));
        assert!(!person.is_older_than(u32::MAX, now));
    }
}
