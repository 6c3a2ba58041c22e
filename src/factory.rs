use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::{PersonError, Result};
use crate::models::{DAYS_IN_YEAR, Person};
use crate::validation::{validate_non_empty_string, validate_positive_count};

pub const POSSIBLE_NAMES: [&str; 2] = ["Bob", "Betty"];
pub const MIN_AGE_YEARS: i64 = 18;
/// Exclusive upper bound for generated ages.
pub const MAX_AGE_YEARS: i64 = 85;
pub const MAX_MARRIED_NAME_CHARS: usize = 255;

const BOB: &str = "Bob";
const BOB_AGE_THRESHOLD_YEARS: u32 = 30;
const TEST_MARKER: &str = "test";

/// Append-only collection of people with its own random generator.
///
/// Not synchronised: callers sharing a factory across threads must wrap it
/// in their own lock.
#[derive(Debug)]
pub struct PersonFactory<R = StdRng> {
    people: Vec<Person>,
    rng: R,
}

impl PersonFactory<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for PersonFactory<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PersonFactory<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            people: Vec::new(),
            rng,
        }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn generate(&mut self, count: i64) -> Result<&[Person]> {
        self.generate_at(count, Utc::now())
    }

    /// Appends `count` random people born relative to `now` and returns every
    /// person generated so far, not only the new ones.
    ///
    /// On error the people appended before the failure are kept.
    pub fn generate_at(&mut self, count: i64, now: DateTime<Utc>) -> Result<&[Person]> {
        let count = validate_positive_count("count", count)?;
        self.people.try_reserve(count).map_err(|e| {
            PersonError::invalid_argument("count", format!("Cannot hold {} people: {}", count, e))
        })?;

        for _ in 0..count {
            let name = POSSIBLE_NAMES[self.rng.random_range(0..POSSIBLE_NAMES.len())];
            let age_in_years = self.rng.random_range(MIN_AGE_YEARS..MAX_AGE_YEARS);

            let person = birth_date(now, age_in_years)
                .and_then(|date_of_birth| Person::new_at(name, date_of_birth, now))
                .map_err(|e| PersonError::operation_failed("Failed to create person", e))?;
            self.people.push(person);
        }

        tracing::debug!("Generated {} people, {} in total", count, self.people.len());

        Ok(&self.people)
    }

    pub fn filter_by_name_and_age<'a>(
        &'a self,
        name: &'a str,
        threshold_years: u32,
        older_than: bool,
    ) -> impl Iterator<Item = &'a Person> + 'a {
        self.filter_by_name_and_age_at(name, threshold_years, older_than, Utc::now())
    }

    /// Lazily yields people called `name` who are older than `threshold_years`
    /// (born on or before the cutoff) when `older_than` is set, or younger
    /// (born after it) otherwise.
    pub fn filter_by_name_and_age_at<'a>(
        &'a self,
        name: &'a str,
        threshold_years: u32,
        older_than: bool,
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = &'a Person> + 'a {
        tracing::debug!(
            "Filtering {} people by name {:?}, threshold {} years, older_than {}",
            self.people.len(),
            name,
            threshold_years,
            older_than
        );

        self.people.iter().filter(move |person| {
            person.name() == name && person.is_older_than(threshold_years, now) == older_than
        })
    }

    pub fn bobs_by_age(&self, older_than_30: bool) -> impl Iterator<Item = &Person> + '_ {
        self.bobs_by_age_at(older_than_30, Utc::now())
    }

    pub fn bobs_by_age_at(
        &self,
        older_than_30: bool,
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = &Person> + '_ {
        self.filter_by_name_and_age_at(BOB, BOB_AGE_THRESHOLD_YEARS, older_than_30, now)
    }

    /// Returns `"{name} {last_name}"` capped at 255 characters.
    ///
    /// A last name containing "test" in any case returns the person's name
    /// untouched, so fixtures can opt out of the concatenation.
    pub fn format_married_name(&self, person: Option<&Person>, last_name: &str) -> Result<String> {
        let person = person
            .ok_or_else(|| PersonError::invalid_argument("person", "Person cannot be absent"))?;
        validate_non_empty_string("last_name", last_name)?;

        if last_name.to_lowercase().contains(TEST_MARKER) {
            return Ok(person.name().to_string());
        }

        let full_name = format!("{} {}", person.name(), last_name);
        Ok(full_name.chars().take(MAX_MARRIED_NAME_CHARS).collect())
    }
}

fn birth_date(now: DateTime<Utc>, age_in_years: i64) -> Result<DateTime<Utc>> {
    Duration::try_days(age_in_years * DAYS_IN_YEAR)
        .and_then(|age| now.checked_sub_signed(age))
        .ok_or_else(|| {
            PersonError::invalid_argument(
                "now",
                format!("{} is too early for someone aged {} years", now, age_in_years),
            )
        })
}
