//! Page frame: header, side navigation and the route table.

use super::components::escape;

/// The dashboard's routes, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Overview,
    Visualizations,
    Predictions,
    Dataset,
    Settings,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Self::Overview,
        Self::Visualizations,
        Self::Predictions,
        Self::Dataset,
        Self::Settings,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Overview => "/",
            Self::Visualizations => "/visualizations",
            Self::Predictions => "/predictions",
            Self::Dataset => "/dataset",
            Self::Settings => "/settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Dashboard",
            Self::Visualizations => "Visualizations",
            Self::Predictions => "Predictions",
            Self::Dataset => "Dataset",
            Self::Settings => "Settings",
        }
    }

    /// Exact-match lookup; anything else is not found.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

/// Wrap a page body in the full document: head, sidebar and header.
///
/// `active` highlights the matching navigation entry; `None` highlights
/// nothing (used by the not-found page).
pub fn render_shell(active: Option<Route>, title: &str, body: &str) -> String {
    let nav: String = Route::ALL
        .into_iter()
        .map(|r| {
            let class = if Some(r) == active { r#" class="active""# } else { "" };
            format!(r#"<li><a href="{}"{class}>{}</a></li>"#, r.path(), r.label())
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · EquipPred</title>
<link rel="stylesheet" href="/assets/style.css">
</head>
<body>
<div class="shell">
<aside class="sidebar"><h2>EquipPred</h2><nav><ul>{nav}</ul></nav></aside>
<div class="main">
<header class="topbar"><div><h1>{title}</h1><div class="subtitle">Equipment fault prediction</div></div></header>
<main class="content">
{body}
</main>
</div>
</div>
</body>
</html>
"#,
        title = escape(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_round_trip_through_paths() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/nope"), None);
        assert_eq!(Route::from_path("/settings/"), None);
    }

    #[test]
    fn shell_marks_active_entry() {
        let html = render_shell(Some(Route::Dataset), "Dataset", "<p>x</p>");
        assert!(html.contains(r#"<a href="/dataset" class="active">Dataset</a>"#));
        assert!(html.contains(r#"<a href="/">Dashboard</a>"#));
        assert!(html.contains("<p>x</p>"));
    }
}
