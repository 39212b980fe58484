//! Followers and the ordered roster
//!
//! A follower's position in the roster is their identity between rebuilds:
//! appends go to the end, removals shift later followers down by one.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::core::{Error, NameError, Result};

/// Minimum follower name length in UTF-16 code units, after trimming. The
/// same units feed the name hash.
pub const MIN_NAME_LEN: usize = 3;

/// Date format used for joined dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const FIRST_NAMES: &[&str] = &[
    "Emma", "Liam", "Olivia", "Noah", "Ava", "Ethan", "Sophia", "Mason", "Isabella", "Jacob",
    "Mia", "Lucas", "Charlotte", "Alexander", "Amelia", "Benjamin", "Harper", "William", "Evelyn",
    "James", "Abigail", "Elijah", "Emily", "Oliver", "Elizabeth", "Daniel", "Sofia", "Matthew",
    "Avery", "Jackson", "Aria", "David", "Zoe", "Joseph", "Camila", "Carter", "Penelope", "Owen",
    "Riley", "Henry", "Layla", "Wyatt", "Nora", "John", "Lily", "Luke", "Eleanor", "Gabriel",
    "Hannah",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Jones", "Brown", "Davis", "Miller", "Wilson", "Moore",
    "Taylor", "Anderson", "Thomas", "Jackson", "White", "Harris", "Martin", "Thompson", "Garcia",
    "Martinez", "Robinson", "Clark", "Rodriguez", "Lewis", "Lee", "Walker", "Hall", "Allen",
    "Young", "Hernandez", "King", "Wright", "Lopez", "Hill", "Scott", "Green", "Adams", "Baker",
    "Gonzalez", "Nelson", "Carter", "Mitchell", "Perez", "Roberts", "Turner", "Phillips",
    "Campbell", "Parker", "Evans", "Edwards",
];

/// Sample followers join within this many days before today
const SAMPLE_WINDOW_DAYS: i64 = 180;

/// A person represented by one tree
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follower {
    pub name: String,
    /// Joined date as `YYYY-MM-DD`; kept verbatim from imports
    pub date: String,
}

impl Follower {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self { name: name.into(), date: date.into() }
    }

    /// A follower joining today (UTC)
    pub fn joined_today(name: impl Into<String>) -> Self {
        Self::new(name, today())
    }

    /// Parsed joined date, if well formed
    pub fn joined(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

fn check_length(name: &str) -> std::result::Result<(), NameError> {
    if name.encode_utf16().count() < MIN_NAME_LEN {
        return Err(NameError::TooShort { min: MIN_NAME_LEN });
    }
    Ok(())
}

/// Today's date (UTC) as `YYYY-MM-DD`
pub fn today() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Ordering for roster listings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Name,
}

/// Ordered, name-unique follower list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    followers: Vec<Follower>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap followers as-is; imports are not re-validated
    pub fn from_followers(followers: Vec<Follower>) -> Self {
        Self { followers }
    }

    pub fn len(&self) -> usize {
        self.followers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.followers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Follower> {
        self.followers.get(index)
    }

    pub fn as_slice(&self) -> &[Follower] {
        &self.followers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Follower> {
        self.followers.iter()
    }

    /// Check a candidate name and return it trimmed.
    ///
    /// With `except == None` (adding) duplicates are reported before length.
    /// With `Some(index)` (renaming) length comes first and the follower at
    /// `index` is ignored in the duplicate check.
    pub fn validate_name(&self, name: &str, except: Option<usize>) -> std::result::Result<String, NameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        match except {
            None => {
                self.check_unique(name, None)?;
                check_length(name)?;
            }
            Some(index) => {
                check_length(name)?;
                self.check_unique(name, Some(index))?;
            }
        }
        Ok(name.to_string())
    }

    fn check_unique(&self, name: &str, except: Option<usize>) -> std::result::Result<(), NameError> {
        let lower = name.to_lowercase();
        let duplicate = self
            .followers
            .iter()
            .enumerate()
            .any(|(i, f)| Some(i) != except && f.name.to_lowercase() == lower);
        if duplicate {
            return Err(NameError::Duplicate);
        }
        Ok(())
    }

    /// Append a follower after validating the name. Returns the new index.
    pub fn add(&mut self, name: &str, date: impl Into<String>) -> Result<usize> {
        let name = self.validate_name(name, None)?;
        self.followers.push(Follower::new(name, date));
        Ok(self.followers.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Result<Follower> {
        self.check_index(index)?;
        Ok(self.followers.remove(index))
    }

    /// Rename in place; the follower keeps their index and date
    pub fn rename(&mut self, index: usize, name: &str) -> Result<()> {
        self.check_index(index)?;
        let name = self.validate_name(name, Some(index))?;
        self.followers[index].name = name;
        Ok(())
    }

    pub fn truncate(&mut self, len: usize) {
        self.followers.truncate(len);
    }

    /// Append `count` generated followers with unique names
    pub fn extend_with_samples<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        let today = Utc::now().date_naive();
        let mut taken: HashSet<String> =
            self.followers.iter().map(|f| f.name.to_lowercase()).collect();

        for _ in 0..count {
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Forest");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Friend");
            let base = format!("{} {}", first, last);

            let mut name = base.clone();
            let mut suffix = 2;
            while taken.contains(&name.to_lowercase()) {
                name = format!("{} {}", base, suffix);
                suffix += 1;
            }
            taken.insert(name.to_lowercase());

            let days_ago = rng.gen_range(0..SAMPLE_WINDOW_DAYS);
            let date = (today - Duration::days(days_ago)).format(DATE_FORMAT).to_string();
            self.followers.push(Follower::new(name, date));
        }
    }

    /// Followers whose name contains `term`, case-insensitively, with their
    /// roster indices. An empty term matches everyone.
    pub fn search(&self, term: &str) -> Vec<(usize, &Follower)> {
        let term = term.trim().to_lowercase();
        self.followers
            .iter()
            .enumerate()
            .filter(|(_, f)| term.is_empty() || f.name.to_lowercase().contains(&term))
            .collect()
    }

    /// All followers with their indices in the requested order. Unparseable
    /// dates sort after every valid date.
    pub fn sorted(&self, order: SortOrder) -> Vec<(usize, &Follower)> {
        let mut entries: Vec<(usize, &Follower)> = self.followers.iter().enumerate().collect();
        match order {
            SortOrder::Newest => entries.sort_by(|a, b| {
                match (a.1.joined(), b.1.joined()) {
                    (Some(x), Some(y)) => y.cmp(&x),
                    (x, y) => x.is_none().cmp(&y.is_none()),
                }
            }),
            SortOrder::Oldest => entries.sort_by(|a, b| {
                match (a.1.joined(), b.1.joined()) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (x, y) => x.is_none().cmp(&y.is_none()),
                }
            }),
            SortOrder::Name => entries.sort_by(|a, b| {
                a.1.name.to_lowercase().cmp(&b.1.name.to_lowercase())
            }),
        }
        entries
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.followers.len() {
            return Err(Error::FollowerIndex { index, len: self.followers.len() });
        }
        Ok(())
    }
}
