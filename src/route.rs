//! Report URL paths
//!
//! Reports are published per time period under
//! `/{period}/allocation/{user}.html`, with the leadership view at
//! `/{period}/allocation/` and the instance list at
//! `/{period}/public/allInstances.json`.

use serde::Serialize;

const ALLOCATION_SEGMENT: &str = "allocation";
const PAGE_SUFFIX: &str = ".html";

/// A parsed report location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub time_period: String,
    pub user: Option<String>,
}

impl Route {
    /// Parse a report path or full URL.
    ///
    /// Returns `None` when the path is not an allocation page.
    pub fn parse(input: &str) -> Option<Self> {
        let path = strip_origin(input);
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        let time_period = segments.next()?;
        if segments.next()? != ALLOCATION_SEGMENT {
            return None;
        }

        let user = match segments.next() {
            None | Some("index.html") => None,
            Some(page) => Some(page.strip_suffix(PAGE_SUFFIX).unwrap_or(page).to_string()),
        };

        if segments.next().is_some() {
            return None;
        }

        Some(Self {
            time_period: time_period.to_string(),
            user,
        })
    }

    pub fn path(&self) -> String {
        match &self.user {
            Some(user) => user_url(&self.time_period, user),
            None => home_url(&self.time_period),
        }
    }
}

fn strip_origin(input: &str) -> &str {
    match input.find("://") {
        Some(idx) => {
            let rest = &input[idx + 3..];
            rest.find('/').map_or("", |slash| &rest[slash..])
        }
        None => input,
    }
}

/// Leadership page for a period
pub fn home_url(time_period: &str) -> String {
    format!("/{}/{}/", time_period, ALLOCATION_SEGMENT)
}

/// Page for one user in a period
pub fn user_url(time_period: &str, user: &str) -> String {
    format!("/{}/{}/{}{}", time_period, ALLOCATION_SEGMENT, user, PAGE_SUFFIX)
}

/// Full instance list for a period
pub fn instances_path(time_period: &str) -> String {
    format!("/{}/public/allInstances.json", time_period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_page() {
        let route = Route::parse("/2018-10-01/allocation/alice.html").unwrap();
        assert_eq!(route.time_period, "2018-10-01");
        assert_eq!(route.user.as_deref(), Some("alice"));
    }

    #[test]
    fn test_parse_leadership_page() {
        let route = Route::parse("/2018-10-01/allocation/").unwrap();
        assert_eq!(route.time_period, "2018-10-01");
        assert!(route.user.is_none());

        let index = Route::parse("/2018-10-01/allocation/index.html").unwrap();
        assert!(index.user.is_none());
    }

    #[test]
    fn test_parse_full_url_with_query() {
        let route =
            Route::parse("https://cloudeff.example.com/2018-10-01/allocation/bob.html?ref=mail")
                .unwrap();
        assert_eq!(route.user.as_deref(), Some("bob"));
    }

    #[test]
    fn test_parse_rejects_other_paths() {
        assert!(Route::parse("/2018-10-01/public/allInstances.json").is_none());
        assert!(Route::parse("/2018-10-01").is_none());
        assert!(Route::parse("/").is_none());
        assert!(Route::parse("/2018-10-01/allocation/a/b.html").is_none());
    }

    #[test]
    fn test_path_matches_parse() {
        let route = Route {
            time_period: "2018-10-01".to_string(),
            user: Some("carol".to_string()),
        };
        assert_eq!(Route::parse(&route.path()), Some(route));
    }

    #[test]
    fn test_url_builders() {
        assert_eq!(home_url("p1"), "/p1/allocation/");
        assert_eq!(user_url("p1", "dave"), "/p1/allocation/dave.html");
        assert_eq!(instances_path("p1"), "/p1/public/allInstances.json");
    }
}
