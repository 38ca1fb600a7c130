//! Character display models

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use super::date_only;
use crate::browse::image_url;
use crate::client::models::Character;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::pretty::{DESCRIPTION_PREVIEW_CHARS, field, truncate};
use crate::output::{Formattable, Pretty, json, table};

/// One row of a character listing.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CharacterDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "COMICS")]
    pub comics: u32,

    #[tabled(rename = "SERIES")]
    pub series: u32,

    #[tabled(rename = "EVENTS")]
    pub events: u32,

    #[tabled(rename = "MODIFIED")]
    pub modified: String,

    #[tabled(skip)]
    pub description: String,
}

impl From<&Character> for CharacterDisplay {
    fn from(hero: &Character) -> Self {
        Self {
            id: hero.id,
            name: hero.name.clone(),
            comics: hero.comics.available,
            series: hero.series.available,
            events: hero.events.available,
            modified: date_only(&hero.modified),
            description: hero.description.trim().to_string(),
        }
    }
}

impl From<Character> for CharacterDisplay {
    fn from(hero: Character) -> Self {
        Self::from(&hero)
    }
}

impl Pretty for CharacterDisplay {
    fn pretty(&self) -> String {
        let mut out = format!(
            "{} {}",
            self.name.bold(),
            format!("#{}", self.id).dimmed()
        );
        if !self.description.is_empty() {
            out.push_str(&format!(
                "\n  {}",
                truncate(&self.description, DESCRIPTION_PREVIEW_CHARS)
            ));
        }
        out.push_str(&format!(
            "\n  {} comics · {} series · {} events",
            self.comics.to_string().cyan(),
            self.series.to_string().cyan(),
            self.events.to_string().cyan()
        ));
        out
    }
}

/// Full view of a single character.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterDetail {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub modified: String,
    /// Thumbnail URL at the default size
    pub image: Option<String>,
    pub comics: u32,
    pub series: u32,
    pub stories: u32,
    pub events: u32,
    /// Web links by type (detail, wiki, comiclink)
    pub links: Vec<(String, String)>,
}

impl From<&Character> for CharacterDetail {
    fn from(hero: &Character) -> Self {
        Self {
            id: hero.id,
            name: hero.name.clone(),
            description: hero.description.trim().to_string(),
            modified: date_only(&hero.modified),
            image: image_url(hero.thumbnail.as_ref(), None),
            comics: hero.comics.available,
            series: hero.series.available,
            stories: hero.stories.available,
            events: hero.events.available,
            links: hero
                .urls
                .iter()
                .map(|l| (l.kind.clone(), l.url.clone()))
                .collect(),
        }
    }
}

impl CharacterDetail {
    fn fields(&self) -> Vec<(&str, String)> {
        let mut fields = vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Description", or_dash(&self.description)),
            ("Modified", self.modified.clone()),
            ("Comics", self.comics.to_string()),
            ("Series", self.series.to_string()),
            ("Stories", self.stories.to_string()),
            ("Events", self.events.to_string()),
            ("Image", self.image.clone().unwrap_or_else(|| "-".to_string())),
        ];
        for (kind, url) in &self.links {
            fields.push((kind.as_str(), url.clone()));
        }
        fields
    }
}

impl Pretty for CharacterDetail {
    fn pretty(&self) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.name.bold().green(),
            format!("#{}", self.id).dimmed()
        )];

        if !self.description.is_empty() {
            lines.push(format!("\n  {}\n", self.description));
        }

        lines.push(field("Comics", self.comics));
        lines.push(field("Series", self.series));
        lines.push(field("Stories", self.stories));
        lines.push(field("Events", self.events));
        lines.push(field("Modified", &self.modified));
        if let Some(ref image) = self.image {
            lines.push(field("Image", image.cyan()));
        }
        for (kind, url) in &self.links {
            lines.push(field(kind, url.cyan()));
        }

        lines.join("\n")
    }
}

impl Formattable for CharacterDetail {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(self.pretty()),
            OutputFormat::Table => Ok(table::format_record(&self.fields())),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

fn or_dash(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}
