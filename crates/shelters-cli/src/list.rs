//! Command handlers for `list` and `options`.
//!
//! Both load the full availability snapshot once through the view state
//! machine; `list` then applies the requested filters and ordering, and
//! optionally ranks by distance from a resolved address.

use std::io::Write;
use std::sync::Arc;

use clap::Args;
use shelters_client::{load_into, AvailabilityClient, PlaceResolver};
use shelters_core::{
    AppConfig, AvailabilityView, FilterDimension, SortColumn, SortDirection, SortState,
};

use crate::render;

/// Arguments for `shelters list`.
#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Only shelters with this service type (exact match)
    #[arg(long)]
    pub service_type: Option<String>,
    /// Only shelters with this capacity type (exact match)
    #[arg(long)]
    pub capacity_type: Option<String>,
    /// Only shelters serving this sector (exact match)
    #[arg(long)]
    pub sector: Option<String>,
    /// Column to order by: name, address, postal-code, service-type,
    /// capacity-type, sector, available-beds, total-beds, available-rooms,
    /// total-rooms
    #[arg(long, default_value = "name")]
    pub sort: SortColumn,
    /// Reverse the ordering
    #[arg(long)]
    pub desc: bool,
    /// Rank shelters by distance from this address
    #[arg(long)]
    pub near: Option<String>,
    /// Maximum number of rows to show
    #[arg(long)]
    pub limit: Option<usize>,
    /// Print rows as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    fn selections(&self) -> [(FilterDimension, Option<&String>); 3] {
        [
            (FilterDimension::ServiceType, self.service_type.as_ref()),
            (FilterDimension::CapacityType, self.capacity_type.as_ref()),
            (FilterDimension::Sector, self.sector.as_ref()),
        ]
    }

    fn sort_state(&self) -> SortState {
        let direction = if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        SortState::new(self.sort, direction)
    }
}

/// Loads the snapshot into a fresh view.
///
/// # Errors
///
/// Returns an error carrying the view's failure message if the load failed,
/// or if the availability client cannot be built.
pub(crate) async fn open_view(config: &AppConfig) -> anyhow::Result<AvailabilityView> {
    let client = Arc::new(AvailabilityClient::from_config(config)?);
    let mut view = AvailabilityView::from_config(config);
    load_into(client, &mut view).await;

    if let Some(failure) = view.error() {
        anyhow::bail!("{failure}");
    }
    Ok(view)
}

/// List shelters matching the requested filters.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or output cannot be
/// written. A failed address lookup is reported as a warning and the
/// unranked list is still printed.
pub(crate) async fn run_list(
    config: &AppConfig,
    args: &ListArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut view = open_view(config).await?;

    let capabilities = view.capabilities();
    for (dimension, value) in args.selections() {
        let Some(value) = value else { continue };
        if !capabilities.filtering {
            tracing::warn!(%dimension, %value, "filtering is disabled; ignoring filter");
            continue;
        }
        view.set_filter(dimension, Some(value.clone()));
    }

    if let Some(query) = args.near.as_deref() {
        resolve_reference(config, &mut view, query).await;
    }
    // Applied after resolution so an explicit --desc still reverses the ranking.
    view.set_sort(args.sort_state());

    let mut rows = view.rows();
    if let Some(limit) = args.limit {
        rows.truncate(limit);
    }

    if args.json {
        render::write_rows_json(out, &view, &rows)?;
    } else {
        render::write_table(out, &view, &rows)?;
    }
    Ok(())
}

/// Show distinct filter values across the loaded snapshot.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or output cannot be
/// written.
pub(crate) async fn run_options(
    config: &AppConfig,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let view = open_view(config).await?;
    let options = view.filter_options();
    if json {
        serde_json::to_writer_pretty(&mut *out, &options)?;
        writeln!(out)?;
    } else {
        render::write_options(out, &options)?;
    }
    Ok(())
}

/// Resolves `query` and commits the outcome to `view`.
///
/// Never fails. An empty query or a provider error ends up in the view's
/// resolution state, which the renderers report; a disabled capability is
/// only logged.
async fn resolve_reference(config: &AppConfig, view: &mut AvailabilityView, query: &str) {
    let ticket = match view.begin_resolve(query) {
        Ok(ticket) => ticket,
        Err(rejected) => {
            tracing::warn!(error = %rejected, "address search not started");
            return;
        }
    };

    let result = match PlaceResolver::from_config(config) {
        Ok(resolver) => resolver.resolve(query).await,
        Err(e) => Err(e),
    };
    view.commit_resolve(ticket, result.map_err(|e| e.to_string()));
}
