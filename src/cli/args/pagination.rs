//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::MAX_PAGE_SIZE;

/// Shared pagination arguments for list commands.
///
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Page number (1-based)
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: u32,

    /// Results per page (1-100, defaults to the configured page size)
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,
}

impl PaginationArgs {
    /// Page size to request, falling back to `default` and clamped to the
    /// range upstream accepts.
    pub fn page_size(&self, default: u32) -> u32 {
        self.limit.unwrap_or(default).clamp(1, MAX_PAGE_SIZE)
    }
}
