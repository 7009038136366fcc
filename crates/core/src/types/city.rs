//! City whitelist for pickup-point registration.

use std::collections::BTreeSet;

/// Cities accepted when no whitelist is configured.
pub const DEFAULT_CITIES: [&str; 3] = ["Москва", "Санкт-Петербург", "Казань"];

/// Errors from city validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CityError {
    /// The city is not in the configured whitelist.
    #[error("city not allowed: {0}")]
    NotAllowed(String),
    /// A whitelist was configured but contains no cities.
    #[error("allowed city list is empty")]
    EmptyWhitelist,
}

/// Immutable set of cities in which pickup points may be registered.
///
/// Built once at startup and handed to the registry; comparison is exact
/// (case-sensitive, no trimming beyond what the constructor does).
///
/// ```
/// use pvz_core::AllowedCities;
///
/// let cities = AllowedCities::parse_list("Казань, Москва").unwrap();
/// assert!(cities.check("Казань").is_ok());
/// assert!(cities.check("Новосибирск").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedCities(BTreeSet<String>);

impl AllowedCities {
    /// Build a whitelist from an iterator of city names.
    ///
    /// Names are trimmed and empty entries dropped.
    ///
    /// # Errors
    ///
    /// Returns `CityError::EmptyWhitelist` if no city remains.
    pub fn new<I, S>(cities: I) -> Result<Self, CityError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = cities
            .into_iter()
            .map(|c| c.as_ref().trim().to_owned())
            .filter(|c| !c.is_empty())
            .collect();

        if set.is_empty() {
            return Err(CityError::EmptyWhitelist);
        }
        Ok(Self(set))
    }

    /// Parse a comma-separated list, e.g. from an environment variable.
    ///
    /// # Errors
    ///
    /// Returns `CityError::EmptyWhitelist` if the list has no non-blank entry.
    pub fn parse_list(list: &str) -> Result<Self, CityError> {
        Self::new(list.split(','))
    }

    /// Check a city against the whitelist.
    ///
    /// # Errors
    ///
    /// Returns `CityError::NotAllowed` if the city is not a member.
    pub fn check(&self, city: &str) -> Result<(), CityError> {
        if self.0.contains(city) {
            Ok(())
        } else {
            Err(CityError::NotAllowed(city.to_owned()))
        }
    }

    /// Whether the city is a member.
    #[must_use]
    pub fn contains(&self, city: &str) -> bool {
        self.0.contains(city)
    }

    /// Iterate over the allowed cities in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for AllowedCities {
    fn default() -> Self {
        Self(DEFAULT_CITIES.iter().map(|c| (*c).to_owned()).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_whitelist() {
        let cities = AllowedCities::default();
        for city in DEFAULT_CITIES {
            assert!(cities.contains(city));
        }
        assert_eq!(cities.iter().count(), 3);
    }

    #[test]
    fn test_check_is_case_sensitive() {
        let cities = AllowedCities::default();
        assert_eq!(
            cities.check("москва"),
            Err(CityError::NotAllowed("москва".to_owned()))
        );
    }

    #[test]
    fn test_parse_list_trims_and_skips_blanks() {
        let cities = AllowedCities::parse_list(" Казань ,, Москва ").unwrap();
        assert!(cities.contains("Казань"));
        assert!(cities.contains("Москва"));
        assert!(!cities.contains("Санкт-Петербург"));
    }

    #[test]
    fn test_parse_list_empty() {
        assert_eq!(
            AllowedCities::parse_list(" , ,"),
            Err(CityError::EmptyWhitelist)
        );
    }
}
