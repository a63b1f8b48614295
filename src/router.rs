//! Route table - deterministic mapping from path strings to views
//!
//! No guards and no async resolution; just the static table the views
//! are selected from.

/// Top-level views of the application
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Project,
    Table,
    Graph,
    Map,
    Calibration,
    Bmp,
    Tools,
    Help,
}

/// Static path -> route table
const ROUTES: &[(&str, Route)] = &[
    ("/", Route::Project),
    ("/project", Route::Project),
    ("/table", Route::Table),
    ("/graph", Route::Graph),
    ("/map", Route::Map),
    ("/calibration", Route::Calibration),
    ("/bmp", Route::Bmp),
    ("/tools", Route::Tools),
    ("/help", Route::Help),
];

impl Route {
    /// Resolve a path string to a route, if one is registered
    pub fn from_path(path: &str) -> Option<Route> {
        ROUTES
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, route)| *route)
    }

    /// Canonical path of this route
    pub fn path(&self) -> &'static str {
        match self {
            Route::Project => "/project",
            Route::Table => "/table",
            Route::Graph => "/graph",
            Route::Map => "/map",
            Route::Calibration => "/calibration",
            Route::Bmp => "/bmp",
            Route::Tools => "/tools",
            Route::Help => "/help",
        }
    }

    /// Display title for the tab bar
    pub fn title(&self) -> &'static str {
        match self {
            Route::Project => "Project",
            Route::Table => "Table",
            Route::Graph => "Graph",
            Route::Map => "Map",
            Route::Calibration => "Calibration",
            Route::Bmp => "BMP",
            Route::Tools => "Tools",
            Route::Help => "Help",
        }
    }

    /// All routes in tab order
    pub fn all() -> &'static [Route] {
        &[
            Route::Project,
            Route::Table,
            Route::Graph,
            Route::Map,
            Route::Calibration,
            Route::Bmp,
            Route::Tools,
            Route::Help,
        ]
    }

    pub fn next(&self) -> Route {
        let all = Route::all();
        let idx = all.iter().position(|r| r == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Route {
        let all = Route::all();
        let idx = all.iter().position(|r| r == self).unwrap_or(0);
        all[idx.checked_sub(1).unwrap_or(all.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_to_project() {
        assert_eq!(Route::from_path("/"), Some(Route::Project));
        assert_eq!(Route::from_path("/project"), Some(Route::Project));
    }

    #[test]
    fn unknown_path_maps_to_none() {
        assert_eq!(Route::from_path("/nope"), None);
        assert_eq!(Route::from_path(""), None);
    }

    #[test]
    fn every_route_round_trips_through_its_path() {
        for route in Route::all() {
            assert_eq!(Route::from_path(route.path()), Some(*route));
        }
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(Route::Help.next(), Route::Project);
        assert_eq!(Route::Project.prev(), Route::Help);
    }
}
