//! Comic, series and event display models

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use super::date_only;
use crate::client::models::{Comic, Event, Series};
use crate::output::Pretty;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ComicDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "ISSUE")]
    pub issue: String,

    #[tabled(rename = "PAGES")]
    pub pages: u32,
}

impl From<Comic> for ComicDisplay {
    fn from(comic: Comic) -> Self {
        Self {
            id: comic.id,
            title: comic.title,
            issue: format_issue(comic.issue_number),
            pages: comic.page_count,
        }
    }
}

impl Pretty for ComicDisplay {
    fn pretty(&self) -> String {
        format!(
            "{} {}\n  issue {} · {} pages",
            self.title.bold(),
            format!("#{}", self.id).dimmed(),
            self.issue,
            self.pages
        )
    }
}

/// Issue numbers are floats upstream; whole numbers print without a fraction.
fn format_issue(number: f64) -> String {
    if number.fract() == 0.0 {
        format!("{}", number as i64)
    } else {
        format!("{}", number)
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SeriesDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "YEARS")]
    pub years: String,

    #[tabled(rename = "RATING")]
    pub rating: String,
}

impl From<Series> for SeriesDisplay {
    fn from(series: Series) -> Self {
        let years = match (series.start_year, series.end_year) {
            (Some(start), Some(end)) if end >= 2099 => format!("{}-present", start),
            (Some(start), Some(end)) if end != start => format!("{}-{}", start, end),
            (Some(start), _) => start.to_string(),
            (None, _) => "-".to_string(),
        };

        Self {
            id: series.id,
            title: series.title,
            years,
            rating: if series.rating.is_empty() {
                "-".to_string()
            } else {
                series.rating
            },
        }
    }
}

impl Pretty for SeriesDisplay {
    fn pretty(&self) -> String {
        format!(
            "{} {}\n  {} · rated {}",
            self.title.bold(),
            format!("#{}", self.id).dimmed(),
            self.years,
            self.rating
        )
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EventDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "START")]
    pub start: String,

    #[tabled(rename = "END")]
    pub end: String,
}

impl From<Event> for EventDisplay {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            start: date_only(event.start.as_deref().unwrap_or_default()),
            end: date_only(event.end.as_deref().unwrap_or_default()),
        }
    }
}

impl Pretty for EventDisplay {
    fn pretty(&self) -> String {
        format!(
            "{} {}\n  {} → {}",
            self.title.bold(),
            format!("#{}", self.id).dimmed(),
            self.start,
            self.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comic_display() {
        let comic: Comic = serde_json::from_value(json!({
            "id": 82967,
            "title": "Marvel Previews (2017)",
            "issueNumber": 0,
            "pageCount": 112
        }))
        .unwrap();

        let display = ComicDisplay::from(comic);
        assert_eq!(display.issue, "0");
        assert_eq!(display.pages, 112);
        assert!(display.pretty().contains("112 pages"));
    }

    #[test]
    fn test_format_issue_fraction() {
        assert_eq!(format_issue(12.0), "12");
        assert_eq!(format_issue(0.5), "0.5");
    }

    #[test]
    fn test_series_years() {
        let ongoing: Series = serde_json::from_value(json!({
            "id": 1, "title": "Ongoing", "startYear": 2018, "endYear": 2099
        }))
        .unwrap();
        assert_eq!(SeriesDisplay::from(ongoing).years, "2018-present");

        let finished: Series = serde_json::from_value(json!({
            "id": 2, "title": "Finished", "startYear": 1963, "endYear": 1998, "rating": "T"
        }))
        .unwrap();
        let display = SeriesDisplay::from(finished);
        assert_eq!(display.years, "1963-1998");
        assert_eq!(display.rating, "T");

        let one_shot: Series = serde_json::from_value(json!({
            "id": 3, "title": "One-shot", "startYear": 2001, "endYear": 2001
        }))
        .unwrap();
        let display = SeriesDisplay::from(one_shot);
        assert_eq!(display.years, "2001");
        assert_eq!(display.rating, "-");
    }

    #[test]
    fn test_event_display() {
        let event: Event = serde_json::from_value(json!({
            "id": 116,
            "title": "Acts of Vengeance!",
            "start": "1989-12-10 00:00:00",
            "end": "2008-01-04 00:00:00"
        }))
        .unwrap();

        let display = EventDisplay::from(event);
        assert_eq!(display.start, "1989-12-10");
        assert_eq!(display.end, "2008-01-04");
    }
}
