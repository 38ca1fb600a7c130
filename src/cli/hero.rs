//! Character commands

use chrono::Local;
use colored::Colorize;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use log::debug;

use crate::browse::{HeroBrowser, HeroFilters, HeroPage, LocalSort, LocalView};
use crate::cli::args::GlobalOptions;
use crate::cli::progress::with_spinner;
use crate::cli::{CommandContext, LocalSortKey, OutputFormat, PaginationArgs, SortKey};
use crate::client::{MarvelApi, OrderBy};
use crate::error::{Error, Result};
use crate::models::{CharacterDetail, CharacterDisplay, ComicDisplay, EventDisplay, SeriesDisplay};
use crate::output::{Formattable, json};

/// Filters accepted by `hero list`
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub comic: Option<u64>,
    pub series: Option<u64>,
    pub event: Option<u64>,
    /// Client-side name/description filter
    pub filter: Option<String>,
    pub local_sort: LocalSortKey,
}

impl ListArgs {
    fn to_filters(&self) -> HeroFilters {
        HeroFilters {
            search: self.search.clone(),
            order_by: self.sort.map(OrderBy::from).unwrap_or_default(),
            comic: self.comic,
            series: self.series,
            event: self.event,
        }
    }

    fn to_local_view(&self) -> LocalView {
        LocalView::new(self.filter.as_deref(), self.local_sort.into())
    }
}

/// Run `hero list`
pub async fn list(
    opts: &GlobalOptions,
    args: &ListArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let per_page = pagination.page_size(ctx.page_size());

    let mut browser = HeroBrowser::new(ctx.client.clone())
        .with_page_size(per_page)
        .with_filters(args.to_filters());

    debug!("Listing heroes with {:?}", browser.filters());

    let page = with_spinner("Fetching heroes...", browser.fetch_heroes(pagination.page)).await?;
    print_page(&page, &args.to_local_view(), ctx.format)
}

fn print_page(page: &HeroPage, view: &LocalView, format: OutputFormat) -> Result<()> {
    let shown = view.apply(&page.heroes);
    let rows: Vec<CharacterDisplay> = shown.iter().map(CharacterDisplay::from).collect();
    let p = page.pagination;

    match format {
        OutputFormat::Json => println!("{}", json::format_json_page(&rows, p)?),
        OutputFormat::Table => {
            rows.print(format)?;
            println!(
                "Page {}/{} ({} total)",
                p.current_page, p.total_pages, p.total_items
            );
        }
        OutputFormat::Pretty => {
            rows.print(format)?;
            println!();
            let mut footer = format!(
                "Page {} of {} · {} heroes",
                p.current_page, p.total_pages, p.total_items
            );
            if p.has_previous() {
                footer.push_str(&format!(" · prev: --page {}", p.current_page - 1));
            }
            if p.has_next() {
                footer.push_str(&format!(" · next: --page {}", p.current_page + 1));
            }
            println!("{}", footer.dimmed());
        }
    }

    if format != OutputFormat::Json
        && let Some(term) = &view.term
    {
        println!(
            "{} of {} heroes on this page match \"{}\"",
            shown.len(),
            page.heroes.len(),
            term
        );
    }

    Ok(())
}

/// Actions offered by `hero browse` between pages
const BROWSE_ACTIONS: [&str; 9] = [
    "Next page",
    "Previous page",
    "Search",
    "Sort",
    "Filter this page",
    "Order this page",
    "Reset filters",
    "Refresh",
    "Quit",
];

/// Local orderings offered by `hero browse`, in menu order
const BROWSE_LOCAL_SORTS: [(&str, LocalSort); 3] = [
    ("Upstream order", LocalSort::Default),
    ("A - Z", LocalSort::Asc),
    ("Z - A", LocalSort::Desc),
];

/// Sort choices offered by `hero browse`, in menu order
const BROWSE_SORTS: [OrderBy; 4] = [
    OrderBy::Name,
    OrderBy::NameDesc,
    OrderBy::Modified,
    OrderBy::ModifiedDesc,
];

/// Run `hero browse`: page through characters interactively
pub async fn browse(
    opts: &GlobalOptions,
    args: &ListArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let per_page = pagination.page_size(ctx.page_size());
    let theme = ColorfulTheme::default();
    let mut blocks = ctx.client.backoff().subscribe();
    let mut view = args.to_local_view();

    let mut browser = HeroBrowser::new(ctx.client.clone())
        .with_page_size(per_page)
        .with_filters(args.to_filters());

    let mut page =
        with_spinner("Fetching heroes...", browser.fetch_heroes(pagination.page)).await;

    loop {
        match &page {
            Ok(page) => print_page(page, &view, OutputFormat::Pretty)?,
            Err(err) => eprintln!("{} {}", "✗".red(), err),
        }
        while let Ok(block) = blocks.try_recv() {
            eprintln!(
                "{} Requests paused until {}: {}",
                "⚠".yellow(),
                block.blocked_until.with_timezone(&Local).format("%H:%M:%S"),
                block.reason
            );
        }

        let choice = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&BROWSE_ACTIONS)
            .default(0)
            .interact_opt()?;

        let current = browser.pagination().current_page;
        page = match choice {
            Some(0) => {
                with_spinner("Fetching heroes...", browser.fetch_heroes(current + 1)).await
            }
            Some(1) => {
                with_spinner(
                    "Fetching heroes...",
                    browser.fetch_heroes(current.saturating_sub(1)),
                )
                .await
            }
            Some(2) => {
                let term: String = Input::with_theme(&theme)
                    .with_prompt("Name starts with (empty to clear)")
                    .allow_empty(true)
                    .interact_text()?;
                with_spinner("Searching...", browser.search_heroes(&term)).await
            }
            Some(3) => {
                let labels: Vec<&str> = BROWSE_SORTS.iter().map(OrderBy::as_str).collect();
                let current_sort = BROWSE_SORTS
                    .iter()
                    .position(|o| *o == browser.filters().order_by)
                    .unwrap_or(0);
                let Some(idx) = Select::with_theme(&theme)
                    .with_prompt("Sort by")
                    .items(&labels)
                    .default(current_sort)
                    .interact_opt()?
                else {
                    continue;
                };
                with_spinner("Sorting...", browser.sort_heroes(BROWSE_SORTS[idx])).await
            }
            Some(4) => {
                let term: String = Input::with_theme(&theme)
                    .with_prompt("Name or description contains (empty to clear)")
                    .allow_empty(true)
                    .interact_text()?;
                view = LocalView::new(Some(&term), view.sort);
                continue;
            }
            Some(5) => {
                let labels: Vec<&str> = BROWSE_LOCAL_SORTS.iter().map(|(l, _)| *l).collect();
                let current_sort = BROWSE_LOCAL_SORTS
                    .iter()
                    .position(|(_, o)| *o == view.sort)
                    .unwrap_or(0);
                let Some(idx) = Select::with_theme(&theme)
                    .with_prompt("Order this page by")
                    .items(&labels)
                    .default(current_sort)
                    .interact_opt()?
                else {
                    continue;
                };
                view.sort = BROWSE_LOCAL_SORTS[idx].1;
                continue;
            }
            Some(6) => {
                view = LocalView::default();
                with_spinner("Resetting...", browser.reset_filters()).await
            }
            Some(7) => {
                let dropped = ctx.client.clear_cache();
                debug!("Dropped {} cached responses", dropped);
                with_spinner("Refreshing...", browser.fetch_heroes(current)).await
            }
            _ => return Ok(()),
        };
    }
}

/// Run `hero get`
pub async fn get(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let hero = with_spinner("Fetching hero...", ctx.client.get_character(id))
        .await?
        .ok_or_else(|| Error::Other(format!("Character {} not found", id)))?;

    CharacterDetail::from(&hero).print(ctx.format)
}

/// Run `hero comics`
pub async fn comics(opts: &GlobalOptions, id: u64, limit: u32) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let page = with_spinner(
        "Fetching comics...",
        ctx.client.get_character_comics(id, clamp_limit(limit)),
    )
    .await?;

    if page.is_empty() {
        debug!("No comics returned for character {}", id);
    }
    let rows: Vec<ComicDisplay> = page.results.into_iter().map(ComicDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run `hero series`
pub async fn series(opts: &GlobalOptions, id: u64, limit: u32) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let page = with_spinner(
        "Fetching series...",
        ctx.client.get_character_series(id, clamp_limit(limit)),
    )
    .await?;

    if page.is_empty() {
        debug!("No series returned for character {}", id);
    }
    let rows: Vec<SeriesDisplay> = page.results.into_iter().map(SeriesDisplay::from).collect();
    rows.print(ctx.format)
}

/// Run `hero events`
pub async fn events(opts: &GlobalOptions, id: u64, limit: u32) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let page = with_spinner(
        "Fetching events...",
        ctx.client.get_character_events(id, clamp_limit(limit)),
    )
    .await?;

    if page.is_empty() {
        debug!("No events returned for character {}", id);
    }
    let rows: Vec<EventDisplay> = page.results.into_iter().map(EventDisplay::from).collect();
    rows.print(ctx.format)
}

/// Upstream rejects limits above 100 with an auth-class error, which would
/// block every later request.
fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, crate::client::MAX_PAGE_SIZE)
}
