//! Loading reference data from a nested JSON fixture.
//!
//! The fixture format mirrors the ownership chain:
//!
//! ```json
//! [
//!   {
//!     "name": "...", "short_name": "...", "slug": "ias-smo", "description": "...",
//!     "versions": [
//!       {
//!         "version": "101", "start_date": "2022-07-20", "slug": "101",
//!         "items": [{ "code": "125", "value": "..." }]
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! Loading is all-or-nothing (one transaction) and skips thesauruses whose
//! slug already exists, so the same fixture can be applied on every start.

use serde::Deserialize;
use sqlx::PgPool;
use thesaurus_core::types::Date;
use validator::Validate;

use crate::models::thesaurus::CreateThesaurus;
use crate::models::thesaurus_item::CreateThesaurusItem;
use crate::models::thesaurus_version::CreateThesaurusVersion;
use crate::repositories::{ThesaurusItemRepo, ThesaurusRepo, ThesaurusVersionRepo};

/// One thesaurus with all its versions.
#[derive(Debug, Clone, Deserialize)]
pub struct ThesaurusFixture {
    #[serde(flatten)]
    pub thesaurus: CreateThesaurus,
    #[serde(default)]
    pub versions: Vec<VersionFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionFixture {
    pub version: String,
    pub start_date: Date,
    pub slug: String,
    #[serde(default)]
    pub items: Vec<ItemFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemFixture {
    pub code: String,
    pub value: String,
}

/// Counts of rows written by [`load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureSummary {
    pub thesauruses: usize,
    pub versions: usize,
    pub items: usize,
    /// Thesauruses left untouched because their slug already existed.
    pub skipped: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid fixture entry '{entry}': {errors}")]
    Invalid {
        entry: String,
        errors: validator::ValidationErrors,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Parse a fixture document.
pub fn parse(json: &str) -> Result<Vec<ThesaurusFixture>, FixtureError> {
    Ok(serde_json::from_str(json)?)
}

/// Insert every thesaurus in `fixtures` with its versions and items.
pub async fn load(pool: &PgPool, fixtures: &[ThesaurusFixture]) -> Result<FixtureSummary, FixtureError> {
    let mut summary = FixtureSummary::default();
    let mut tx = pool.begin().await?;

    for fixture in fixtures {
        let input = &fixture.thesaurus;
        validate(&input.slug, input)?;

        if ThesaurusRepo::find_by_slug(&mut *tx, &input.slug).await?.is_some() {
            tracing::debug!(slug = %input.slug, "Thesaurus already present, skipping");
            summary.skipped += 1;
            continue;
        }

        let thesaurus = ThesaurusRepo::create(&mut *tx, input).await?;
        summary.thesauruses += 1;

        for version_fixture in &fixture.versions {
            let version_input = CreateThesaurusVersion {
                thesaurus_id: thesaurus.id,
                version: version_fixture.version.clone(),
                start_date: version_fixture.start_date,
                slug: version_fixture.slug.clone(),
            };
            let entry = format!("{}/{}", thesaurus.slug, version_input.slug);
            validate(&entry, &version_input)?;

            let version = ThesaurusVersionRepo::create(&mut *tx, &version_input).await?;
            summary.versions += 1;

            for item_fixture in &version_fixture.items {
                let item_input = CreateThesaurusItem {
                    thesaurus_version_id: version.id,
                    code: item_fixture.code.clone(),
                    value: item_fixture.value.clone(),
                };
                validate(&format!("{entry}/{}", item_input.code), &item_input)?;

                ThesaurusItemRepo::create(&mut *tx, &item_input).await?;
                summary.items += 1;
            }
        }
    }

    tx.commit().await?;
    tracing::info!(
        thesauruses = summary.thesauruses,
        versions = summary.versions,
        items = summary.items,
        skipped = summary.skipped,
        "Fixture loaded"
    );
    Ok(summary)
}

fn validate(entry: &str, input: &impl Validate) -> Result<(), FixtureError> {
    input.validate().map_err(|errors| FixtureError::Invalid {
        entry: entry.to_string(),
        errors,
    })
}
