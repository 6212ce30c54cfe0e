//! Filtering and sorting of person lists by field name.
//!
//! Field names arrive as strings (`"PersonName"`, `"DateOfBirth"`, ...). They
//! parse into [`PersonField`], and each field maps to a typed accessor in
//! [`SEARCHABLE`] and a comparer in [`SORTABLE`]. A name that does not parse,
//! or a field absent from the relevant table, leaves the list untouched.

use std::{borrow::Cow, cmp::Ordering, str::FromStr as _};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::person::PersonResponse;

/// How a birth date is rendered for text search, e.g. `05 March 1990`.
pub const DATE_OF_BIRTH_FORMAT: &str = "%d %B %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum PersonField {
  PersonName,
  Email,
  DateOfBirth,
  Age,
  Gender,
  #[strum(to_string = "Country", serialize = "CountryId")]
  Country,
  Address,
  ReceiveNewsLetters,
}

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SortOrder {
  #[default]
  #[serde(alias = "asc")]
  Asc,
  #[serde(alias = "desc")]
  Desc,
}

// ─── Dispatch tables ─────────────────────────────────────────────────────────

type TextOf = fn(&PersonResponse) -> Option<Cow<'_, str>>;
type Comparer = fn(&PersonResponse, &PersonResponse) -> Ordering;

/// Fields a text search can target, with the text each one is matched on.
pub static SEARCHABLE: &[(PersonField, TextOf)] = &[
  (PersonField::PersonName, person_name_text),
  (PersonField::Email, email_text),
  (PersonField::DateOfBirth, date_of_birth_text),
  (PersonField::Gender, gender_text),
  (PersonField::Country, country_text),
  (PersonField::Address, address_text),
];

/// Fields a list can be ordered by, with their ascending comparer.
pub static SORTABLE: &[(PersonField, Comparer)] = &[
  (PersonField::PersonName, |a: &PersonResponse, b: &PersonResponse| {
    cmp_ignore_case(Some(&a.person_name), Some(&b.person_name))
  }),
  (PersonField::Email, |a: &PersonResponse, b: &PersonResponse| {
    cmp_ignore_case(Some(&a.email), Some(&b.email))
  }),
  (PersonField::DateOfBirth, |a: &PersonResponse, b: &PersonResponse| {
    a.date_of_birth.cmp(&b.date_of_birth)
  }),
  (PersonField::Age, |a: &PersonResponse, b: &PersonResponse| a.age.cmp(&b.age)),
  (PersonField::Gender, |a: &PersonResponse, b: &PersonResponse| {
    cmp_ignore_case(a.gender.as_deref(), b.gender.as_deref())
  }),
  (PersonField::Country, |a: &PersonResponse, b: &PersonResponse| {
    cmp_ignore_case(a.country_name.as_deref(), b.country_name.as_deref())
  }),
  (PersonField::Address, |a: &PersonResponse, b: &PersonResponse| {
    cmp_ignore_case(a.address.as_deref(), b.address.as_deref())
  }),
  (PersonField::ReceiveNewsLetters, |a: &PersonResponse, b: &PersonResponse| {
    a.receive_news_letters.cmp(&b.receive_news_letters)
  }),
];

fn person_name_text(p: &PersonResponse) -> Option<Cow<'_, str>> {
  Some(Cow::Borrowed(&p.person_name))
}

fn email_text(p: &PersonResponse) -> Option<Cow<'_, str>> { Some(Cow::Borrowed(&p.email)) }

fn date_of_birth_text(p: &PersonResponse) -> Option<Cow<'_, str>> {
  p.date_of_birth
    .map(|d| Cow::Owned(d.format(DATE_OF_BIRTH_FORMAT).to_string()))
}

fn gender_text(p: &PersonResponse) -> Option<Cow<'_, str>> {
  p.gender.as_deref().map(Cow::Borrowed)
}

fn country_text(p: &PersonResponse) -> Option<Cow<'_, str>> {
  p.country_name.as_deref().map(Cow::Borrowed)
}

fn address_text(p: &PersonResponse) -> Option<Cow<'_, str>> {
  p.address.as_deref().map(Cow::Borrowed)
}

/// Case-insensitive ordering; `None` sorts before any value.
fn cmp_ignore_case(a: Option<&str>, b: Option<&str>) -> Ordering {
  match (a, b) {
    (None, None) => Ordering::Equal,
    (None, Some(_)) => Ordering::Less,
    (Some(_), None) => Ordering::Greater,
    (Some(a), Some(b)) => a
      .chars()
      .flat_map(char::to_uppercase)
      .cmp(b.chars().flat_map(char::to_uppercase)),
  }
}

fn text_of(field: PersonField) -> Option<TextOf> {
  SEARCHABLE.iter().find(|(f, _)| *f == field).map(|(_, t)| *t)
}

fn comparer(field: PersonField) -> Option<Comparer> {
  SORTABLE.iter().find(|(f, _)| *f == field).map(|(_, c)| *c)
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Keep persons whose `search_by` field contains `search_string`, ignoring
/// case.
///
/// An empty `search_by` or `search_string`, or a field that cannot be
/// searched, returns `persons` unchanged. A person with no value for the field
/// never matches.
pub fn filter_persons(
  persons: Vec<PersonResponse>,
  search_by: &str,
  search_string: &str,
) -> Vec<PersonResponse> {
  if search_by.is_empty() || search_string.is_empty() {
    return persons;
  }
  let Some(text) = PersonField::from_str(search_by).ok().and_then(text_of) else {
    return persons;
  };

  let needle = search_string.to_lowercase();
  persons
    .into_iter()
    .filter(|p| {
      text(p).is_some_and(|value| !value.is_empty() && value.to_lowercase().contains(&needle))
    })
    .collect()
}

/// Stable sort of `persons` by the `sort_by` field.
///
/// An empty or unrecognised `sort_by` returns `persons` unchanged.
pub fn sort_persons(
  mut persons: Vec<PersonResponse>,
  sort_by: &str,
  order: SortOrder,
) -> Vec<PersonResponse> {
  let Some(cmp) = PersonField::from_str(sort_by).ok().and_then(comparer) else {
    return persons;
  };
  match order {
    SortOrder::Asc => persons.sort_by(cmp),
    SortOrder::Desc => persons.sort_by(|a, b| cmp(b, a)),
  }
  persons
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use uuid::Uuid;

  use super::*;

  fn person(name: &str) -> PersonResponse {
    PersonResponse {
      person_id:            Uuid::new_v4(),
      person_name:          name.into(),
      email:                format!("{}@example.com", name.to_lowercase()),
      date_of_birth:        None,
      gender:               None,
      country_id:           None,
      country_name:         None,
      address:              None,
      age:                  None,
      receive_news_letters: false,
    }
  }

  fn names(persons: &[PersonResponse]) -> Vec<&str> {
    persons.iter().map(|p| p.person_name.as_str()).collect()
  }

  #[test]
  fn field_names_parse() {
    assert_eq!(PersonField::from_str("PersonName").unwrap(), PersonField::PersonName);
    assert_eq!(PersonField::from_str("CountryId").unwrap(), PersonField::Country);
    assert_eq!(PersonField::from_str("Country").unwrap(), PersonField::Country);
    assert_eq!(PersonField::Country.to_string(), "Country");
    assert!(PersonField::from_str("Shoe").is_err());
  }

  #[test]
  fn sort_order_wire_names() {
    assert_eq!(SortOrder::from_str("DESC").unwrap(), SortOrder::Desc);
    assert_eq!(SortOrder::from_str("asc").unwrap(), SortOrder::Asc);
    assert_eq!(serde_json::to_string(&SortOrder::Desc).unwrap(), "\"DESC\"");
    assert_eq!(serde_json::from_str::<SortOrder>("\"desc\"").unwrap(), SortOrder::Desc);
    assert_eq!(serde_json::from_str::<SortOrder>("\"ASC\"").unwrap(), SortOrder::Asc);
  }

  #[test]
  fn filter_by_name_is_case_insensitive_substring() {
    let all = vec![person("Rahman"), person("mary"), person("scott")];
    let found = filter_persons(all, "PersonName", "MA");
    assert_eq!(names(&found), ["Rahman", "mary"]);
  }

  #[test]
  fn empty_search_returns_everything() {
    let all = vec![person("a"), person("b")];
    assert_eq!(filter_persons(all.clone(), "PersonName", "").len(), 2);
    assert_eq!(filter_persons(all, "", "a").len(), 2);
  }

  #[test]
  fn unknown_or_unsearchable_field_returns_everything() {
    let all = vec![person("a"), person("b")];
    assert_eq!(filter_persons(all.clone(), "Shoe", "zzz").len(), 2);
    assert_eq!(filter_persons(all, "Age", "zzz").len(), 2);
  }

  #[test]
  fn null_field_never_matches() {
    let mut with_address = person("a");
    with_address.address = Some("12 Baker Street".into());
    let all = vec![with_address, person("b")];

    let found = filter_persons(all, "Address", "baker");
    assert_eq!(names(&found), ["a"]);
  }

  #[test]
  fn filter_by_date_of_birth_uses_long_format() {
    let mut p = person("a");
    p.date_of_birth = NaiveDate::from_ymd_opt(1990, 3, 5);
    let all = vec![p, person("b")];

    assert_eq!(filter_persons(all.clone(), "DateOfBirth", "05 march").len(), 1);
    assert_eq!(filter_persons(all, "DateOfBirth", "1990-03").len(), 0);
  }

  #[test]
  fn filter_by_country_matches_name_not_id() {
    let mut p = person("a");
    p.country_id = Some(Uuid::new_v4());
    p.country_name = Some("India".into());
    let all = vec![p, person("b")];

    assert_eq!(filter_persons(all, "CountryId", "ind").len(), 1);
  }

  #[test]
  fn sort_by_name_descending() {
    let all = vec![person("Smith"), person("Mary"), person("Rahman")];
    let sorted = sort_persons(all, "PersonName", SortOrder::Desc);
    assert_eq!(names(&sorted), ["Smith", "Rahman", "Mary"]);
  }

  #[test]
  fn sort_ignores_case() {
    let all = vec![person("bob"), person("Alice"), person("carol")];
    let sorted = sort_persons(all, "PersonName", SortOrder::Asc);
    assert_eq!(names(&sorted), ["Alice", "bob", "carol"]);
  }

  #[test]
  fn sort_is_stable_in_both_directions() {
    let mut a = person("a");
    let mut b = person("b");
    let mut c = person("c");
    a.receive_news_letters = true;
    b.receive_news_letters = false;
    c.receive_news_letters = true;
    let all = vec![a, b, c];

    let asc = sort_persons(all.clone(), "ReceiveNewsLetters", SortOrder::Asc);
    assert_eq!(names(&asc), ["b", "a", "c"]);
    let desc = sort_persons(all, "ReceiveNewsLetters", SortOrder::Desc);
    assert_eq!(names(&desc), ["a", "c", "b"]);
  }

  #[test]
  fn nulls_sort_first() {
    let mut a = person("a");
    a.age = Some(40);
    let b = person("b");
    let sorted = sort_persons(vec![a, b], "Age", SortOrder::Asc);
    assert_eq!(names(&sorted), ["b", "a"]);
  }

  #[test]
  fn filter_by_email() {
    let all = vec![person("Ann"), person("Bea")];
    let found = filter_persons(all, "Email", "ANN@");
    assert_eq!(names(&found), ["Ann"]);
  }

  #[test]
  fn filter_by_gender_is_a_substring_match() {
    let mut f = person("f");
    let mut m = person("m");
    f.gender = Some("Female".into());
    m.gender = Some("Male".into());
    let all = vec![f, m, person("unknown")];

    assert_eq!(names(&filter_persons(all.clone(), "Gender", "male")), ["f", "m"]);
    assert_eq!(names(&filter_persons(all, "Gender", "fem")), ["f"]);
  }

  #[test]
  fn sort_by_email() {
    let mut a = person("a");
    let mut b = person("b");
    a.email = "zed@example.com".into();
    b.email = "Amy@example.com".into();
    let sorted = sort_persons(vec![a, b], "Email", SortOrder::Asc);
    assert_eq!(names(&sorted), ["b", "a"]);
  }

  #[test]
  fn sort_by_date_of_birth() {
    let mut old = person("old");
    let mut young = person("young");
    old.date_of_birth = NaiveDate::from_ymd_opt(1950, 6, 1);
    young.date_of_birth = NaiveDate::from_ymd_opt(2001, 1, 1);
    let all = vec![young, person("unknown"), old];

    let sorted = sort_persons(all, "DateOfBirth", SortOrder::Asc);
    assert_eq!(names(&sorted), ["unknown", "old", "young"]);
  }

  #[test]
  fn sort_by_gender() {
    let mut f = person("f");
    let mut m = person("m");
    f.gender = Some("female".into());
    m.gender = Some("Male".into());
    let all = vec![m, f, person("unknown")];

    let sorted = sort_persons(all, "Gender", SortOrder::Asc);
    assert_eq!(names(&sorted), ["unknown", "f", "m"]);
  }

  #[test]
  fn sort_by_country_uses_name_not_id() {
    let mut z = person("z");
    let mut a = person("a");
    z.country_id = Some(Uuid::from_u128(1));
    z.country_name = Some("Zambia".into());
    a.country_id = Some(Uuid::from_u128(2));
    a.country_name = Some("austria".into());
    let all = vec![z, person("none"), a];

    let sorted = sort_persons(all.clone(), "Country", SortOrder::Asc);
    assert_eq!(names(&sorted), ["none", "a", "z"]);
    let sorted = sort_persons(all, "CountryId", SortOrder::Asc);
    assert_eq!(names(&sorted), ["none", "a", "z"]);
  }

  #[test]
  fn sort_by_address() {
    let mut x = person("x");
    let mut y = person("y");
    x.address = Some("9 Oak Lane".into());
    y.address = Some("12 baker street".into());
    let all = vec![x, y, person("none")];

    let sorted = sort_persons(all, "Address", SortOrder::Asc);
    assert_eq!(names(&sorted), ["none", "y", "x"]);
  }

  #[test]
  fn unknown_sort_field_is_a_no_op() {
    let all = vec![person("b"), person("a")];
    assert_eq!(names(&sort_persons(all.clone(), "", SortOrder::Asc)), ["b", "a"]);
    assert_eq!(names(&sort_persons(all, "Shoe", SortOrder::Desc)), ["b", "a"]);
  }
}
