//! Tests for configuration loading and seeding.

use std::{path::Path, sync::Arc};

use roster_core::{
  countries::CountryStore,
  country::Country,
  memory::MemoryRepository,
  person::{Person, PersonAddRequest},
  persons::PersonStore,
};
use uuid::Uuid;

use crate::{SeedReport, expand_tilde, load_config, read_seed_file, seed};

type Countries = CountryStore<MemoryRepository<Country>>;
type Persons = PersonStore<MemoryRepository<Person>, Countries>;

fn stores() -> (Countries, Persons) {
  let countries = CountryStore::new(Arc::new(MemoryRepository::new()));
  let persons = PersonStore::new(Arc::new(MemoryRepository::new()), countries.clone());
  (countries, persons)
}

fn country(name: &str) -> Country {
  Country { country_id: Uuid::new_v4(), country_name: name.into() }
}

fn person(name: &str) -> PersonAddRequest {
  PersonAddRequest {
    person_name: Some(name.into()),
    email: Some(format!("{}@example.com", name.to_lowercase())),
    ..Default::default()
  }
}

#[test]
fn missing_config_file_uses_defaults() {
  let cfg = load_config(Path::new("/nonexistent/roster.toml")).unwrap();
  assert!(!cfg.host.is_empty());
  assert!(cfg.seed_countries.is_none());
  assert!(cfg.seed_persons.is_none());
}

#[test]
fn config_file_overrides_defaults() {
  let path = std::env::temp_dir().join(format!("roster-{}.toml", Uuid::new_v4()));
  std::fs::write(
    &path,
    "port = 9090\nstore_path = \"/tmp/x.db\"\nseed_countries = \"countries.json\"\n",
  )
  .unwrap();

  let cfg = load_config(&path).unwrap();
  std::fs::remove_file(&path).ok();

  assert_eq!(cfg.port, 9090);
  assert_eq!(cfg.store_path, Path::new("/tmp/x.db"));
  assert_eq!(cfg.seed_countries.as_deref(), Some(Path::new("countries.json")));
}

#[test]
fn seed_file_is_json() {
  let path = std::env::temp_dir().join(format!("roster-{}.json", Uuid::new_v4()));
  std::fs::write(
    &path,
    r#"[{"country_id": "15889048-af93-412c-b8f3-22103e943a6d", "country_name": "Peru"}]"#,
  )
  .unwrap();

  let seeds: Vec<Country> = read_seed_file(&path).unwrap();
  std::fs::remove_file(&path).ok();
  assert_eq!(seeds.len(), 1);
  assert_eq!(seeds[0].country_name, "Peru");
  assert_eq!(seeds[0].country_id.to_string(), "15889048-af93-412c-b8f3-22103e943a6d");

  assert!(read_seed_file::<Vec<Country>>(Path::new("/nonexistent/seed.json")).is_err());
}

#[tokio::test]
async fn seed_populates_empty_stores() {
  let (countries, persons) = stores();
  let report = seed(
    &countries,
    &persons,
    vec![country("Peru"), country("Chile"), country("Peru")],
    vec![person("Ana"), person("Luis")],
  )
  .await
  .unwrap();

  assert_eq!(report, SeedReport { countries: 2, persons: 2 });
  assert_eq!(persons.get_all_persons().await.unwrap().len(), 2);
}

#[tokio::test]
async fn reseeding_is_idempotent() {
  let (countries, persons) = stores();
  let peru = country("Peru");
  seed(&countries, &persons, vec![peru.clone()], vec![person("Ana")]).await.unwrap();

  let report = seed(&countries, &persons, vec![peru], vec![person("Ana")])
    .await
    .unwrap();
  assert_eq!(report, SeedReport::default());
  assert_eq!(countries.get_all_countries().await.unwrap().len(), 1);
  assert_eq!(persons.get_all_persons().await.unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_seed_person_fails() {
  let (countries, persons) = stores();
  let bad = PersonAddRequest { email: None, ..person("Ana") };
  assert!(seed(&countries, &persons, Vec::new(), vec![bad]).await.is_err());
}

#[tokio::test]
async fn seeded_persons_resolve_their_country() {
  let (countries, persons) = stores();
  let seed_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../seed");
  let seed_countries: Vec<Country> = read_seed_file(&seed_dir.join("countries.json")).unwrap();
  let people: Vec<PersonAddRequest> = read_seed_file(&seed_dir.join("persons.json")).unwrap();

  let report = seed(&countries, &persons, seed_countries, people).await.unwrap();
  assert!(report.persons > 0);

  let all = persons.get_all_persons().await.unwrap();
  assert!(all.iter().all(|p| p.country_name.is_some()));

  let in_usa = persons.get_filtered_persons("Country", "USA").await.unwrap();
  assert!(!in_usa.is_empty());
  assert!(in_usa.iter().all(|p| p.country_name.as_deref() == Some("USA")));
}

#[test]
fn tilde_expands_to_home() {
  let plain = Path::new("/var/lib/roster.db");
  assert_eq!(expand_tilde(plain), plain);

  if let Ok(home) = std::env::var("HOME") {
    assert_eq!(expand_tilde(Path::new("~/roster.db")), Path::new(&home).join("roster.db"));
  }
}
