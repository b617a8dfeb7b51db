//! Route and agency tag mapping.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::BongoError;
use crate::fetch::HttpClient;
use crate::models::RouteListResponse;
use crate::services::BongoClient;

/// What the route list says about one route tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub name: String,
    pub agency_tag: String,
    pub agency_name: String,
}

/// Route tag → route details, and agency name → agency tag.
///
/// Both maps are ordered so listings come out sorted. Duplicate keys in the
/// route list are resolved last-write-wins.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TagTable {
    pub routes: BTreeMap<String, RouteEntry>,
    pub agencies: BTreeMap<String, String>,
}

/// A route resolved from a [`TagTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub tag: String,
    pub name: String,
    pub agency_tag: String,
    pub agency_name: String,
}

impl From<RouteListResponse> for TagTable {
    fn from(response: RouteListResponse) -> Self {
        let mut table = TagTable::default();
        for entry in response.routes {
            let route = entry.route;
            table
                .agencies
                .insert(route.agency_name.clone(), route.agency.clone());
            table.routes.insert(
                route.tag,
                RouteEntry {
                    name: route.name,
                    agency_tag: route.agency,
                    agency_name: route.agency_name,
                },
            );
        }
        table
    }
}

/// Fetches the full route list and builds a [`TagTable`] from it.
///
/// Either every route record decodes or the whole call fails; there are no
/// partial tables.
pub fn get_tag_mapping<C: HttpClient>(api: &BongoClient<C>) -> Result<TagTable, BongoError> {
    let table = TagTable::from(api.route_list()?);
    debug!(
        routes = table.routes.len(),
        agencies = table.agencies.len(),
        "Tag mapping built"
    );
    Ok(table)
}

/// Looks up `route_tag` in `table`.
pub fn resolve_route(table: &TagTable, route_tag: &str) -> Result<RouteInfo, BongoError> {
    let entry = table
        .routes
        .get(route_tag)
        .ok_or_else(|| BongoError::UnknownRoute(route_tag.to_string()))?;

    Ok(RouteInfo {
        tag: route_tag.to_string(),
        name: entry.name.clone(),
        agency_tag: entry.agency_tag.clone(),
        agency_name: entry.agency_name.clone(),
    })
}
