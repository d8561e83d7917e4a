//! Seed command - loads the reference data the forms depend on:
//! country, cities, subjects and school levels.

use chrono::Utc;
use uuid::Uuid;

use crate::cli::args::SeedArgs;
use crate::config::{
    Config, DEFAULT_CASIER_DELAY_WEEKS, DEFAULT_CONTACT_PRICE, DEFAULT_MIN_BUDGET_THRESHOLD,
    DEFAULT_REMINDER_DAYS, DEFAULT_SUBSCRIPTION_PRICE,
};
use crate::domain::{City, Country, Level, LevelCategory, Subject};
use crate::errors::AppResult;
use crate::infra::{Database, Persistence, UnitOfWork};

const CITIES: &[&str] = &[
    "Abidjan",
    "Bouaké",
    "Yamoussoukro",
    "San-Pédro",
    "Daloa",
    "Korhogo",
];

const SUBJECTS: &[(&str, bool)] = &[
    ("Mathématiques", true),
    ("Physique-Chimie", true),
    ("SVT", true),
    ("Français", true),
    ("Anglais", true),
    ("Philosophie", true),
    ("Histoire-Géographie", true),
    ("Informatique", true),
    ("Piano", false),
    ("Guitare", false),
];

const LEVELS: &[(&str, LevelCategory, i32)] = &[
    ("CP", LevelCategory::Primaire, 1),
    ("CE1", LevelCategory::Primaire, 2),
    ("CE2", LevelCategory::Primaire, 3),
    ("CM1", LevelCategory::Primaire, 4),
    ("CM2", LevelCategory::Primaire, 5),
    ("6ème", LevelCategory::College, 6),
    ("5ème", LevelCategory::College, 7),
    ("4ème", LevelCategory::College, 8),
    ("3ème", LevelCategory::College, 9),
    ("Seconde", LevelCategory::Lycee, 10),
    ("Première", LevelCategory::Lycee, 11),
    ("Terminale", LevelCategory::Lycee, 12),
    ("Supérieur", LevelCategory::Superieur, 13),
];

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    tracing::info!("Seeding reference data...");

    let db = Database::connect(&config).await;
    let store = Persistence::new(db.get_connection());

    let code = args.country_code.to_uppercase();
    let country = match store.countries().find_by_code(&code).await? {
        Some(existing) => {
            tracing::info!(code = %code, "Country already present");
            existing
        }
        None => {
            let now = Utc::now();
            let created = store
                .countries()
                .create(Country {
                    id: Uuid::new_v4(),
                    name: "Côte d'Ivoire".to_string(),
                    code,
                    currency_symbol: "F CFA".to_string(),
                    is_active: true,
                    min_budget_threshold: DEFAULT_MIN_BUDGET_THRESHOLD,
                    subscription_price: DEFAULT_SUBSCRIPTION_PRICE,
                    contact_price: DEFAULT_CONTACT_PRICE,
                    casier_delay_weeks: DEFAULT_CASIER_DELAY_WEEKS,
                    reminder_days: DEFAULT_REMINDER_DAYS,
                    created_at: now,
                    updated_at: now,
                })
                .await?;
            tracing::info!(name = %created.name, "Country created");
            created
        }
    };

    let existing_cities = store.catalog().cities().await?;
    let mut cities_added = 0;
    for name in CITIES {
        if existing_cities.iter().any(|c| c.name == *name) {
            continue;
        }
        store
            .catalog()
            .insert_city(City {
                id: Uuid::new_v4(),
                country_id: country.id,
                name: (*name).to_string(),
            })
            .await?;
        cities_added += 1;
    }
    tracing::info!(count = cities_added, "Cities added");

    let mut subjects_added = 0;
    for (name, is_academic) in SUBJECTS {
        if store.catalog().find_subject_by_name(name).await?.is_some() {
            continue;
        }
        store
            .catalog()
            .insert_subject(Subject {
                id: Uuid::new_v4(),
                name: (*name).to_string(),
                is_academic: *is_academic,
            })
            .await?;
        subjects_added += 1;
    }
    tracing::info!(count = subjects_added, "Subjects added");

    let existing_levels = store.catalog().levels().await?;
    let mut levels_added = 0;
    for (name, category, sort_order) in LEVELS {
        if existing_levels.iter().any(|l| l.name == *name) {
            continue;
        }
        store
            .catalog()
            .insert_level(Level {
                id: Uuid::new_v4(),
                name: (*name).to_string(),
                category: *category,
                sort_order: *sort_order,
            })
            .await?;
        levels_added += 1;
    }
    tracing::info!(count = levels_added, "Levels added");

    tracing::info!("Seed finished; the forms have their reference data");
    Ok(())
}
