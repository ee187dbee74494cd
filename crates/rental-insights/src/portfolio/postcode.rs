use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Outward code (one or two letters, a digit, optional letter or digit), a single space,
    /// then the inward code (digit and two letters). Case folding is ASCII only, so look-alikes
    /// such as the long s or the Kelvin sign never count as letters.
    static ref UK_POSTCODE_PATTERN: Regex =
        Regex::new(r"(?i-u)^[A-Z]{1,2}[0-9][A-Z0-9]? [0-9][A-Z]{2}$").unwrap();
}

pub fn is_valid_postcode(postcode: &str) -> bool {
    UK_POSTCODE_PATTERN.is_match(postcode)
}

/// Ids of properties whose postcode is missing or not a UK postcode, in input order.
pub fn invalid_postcode_ids<I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, Option<String>)>,
{
    entries
        .into_iter()
        .filter(|(_, postcode)| !postcode.as_deref().is_some_and(is_valid_postcode))
        .map(|(id, _)| id)
        .collect()
}
