//! Server-rendered dashboard.
//!
//! A lightweight HTTP server (sync, via `tiny_http`) that renders every route
//! to HTML on request:
//! - `/`, `/visualizations`, `/dataset` load their data and render a page
//! - `/predictions` and `/settings` render a form and accept its POST
//! - `/assets/style.css` and `/dataset/export.csv` serve static and derived
//!   content
//!
//! Launched via `equipred serve` (default: `http://127.0.0.1:8080`).

pub mod assets;
pub mod components;
pub mod layout;
pub mod views;

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::api::PredictionApi;
use crate::config::schema::ServerConfig;
use crate::pages::predictions::PredictionForm;
use crate::pages::settings::SettingsForm;
use crate::pages::{PageState, dataset, overview, visualizations};

use layout::Route;

pub const HTML: &str = "text/html; charset=utf-8";
pub const CSS: &str = "text/css; charset=utf-8";
pub const CSV: &str = "text/csv; charset=utf-8";
pub const TEXT: &str = "text/plain; charset=utf-8";

// ---------------------------------------------------------------------------
// Rendered response
// ---------------------------------------------------------------------------

/// A fully rendered response, independent of the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Page {
    pub fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: HTML,
            body,
        }
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        Response::from_data(self.body.into_bytes())
            .with_header(content_type(self.content_type))
            .with_status_code(StatusCode(self.status))
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// The dashboard's routes bound to one prediction backend.
pub struct Dashboard {
    api: Box<dyn PredictionApi>,
    base_url: String,
}

impl Dashboard {
    /// `base_url` is only displayed (overview error, settings form); requests
    /// go through `api`.
    pub fn new(api: Box<dyn PredictionApi>, base_url: impl Into<String>) -> Self {
        Self {
            api,
            base_url: base_url.into(),
        }
    }

    /// Render the response for one request.
    ///
    /// Each call is a fresh mount: nothing is cached between requests. Fetch
    /// failures become the page's error state, so every request gets a page.
    pub fn dispatch(&self, method: &Method, url: &str, body: Option<&str>) -> Page {
        // Strip query string for path matching
        let path = url.split('?').next().unwrap_or(url);

        if *method == Method::Get
            && let Some(route) = Route::from_path(path)
        {
            return Page::html(self.render(route));
        }

        let api = self.api.as_ref();
        match (method, path) {
            (&Method::Post, "/predictions") => {
                let fields = form_fields(body);
                let mut form = PredictionForm::from_fields(
                    fields.iter().map(|(k, v)| (k.as_str(), v.as_str())),
                );
                form.submit(api);
                Page::html(views::predictions(&form))
            }
            (&Method::Post, "/settings") => {
                let fields = form_fields(body);
                let form = SettingsForm::from_fields(
                    &self.base_url,
                    fields.iter().map(|(k, v)| (k.as_str(), v.as_str())),
                );
                tracing::info!(theme = %form.theme, auto_refresh = form.auto_refresh, "settings saved");
                Page::html(views::settings(&form))
            }

            (&Method::Get, "/dataset/export.csv") => export_dataset(api),
            (&Method::Get, "/assets/style.css") => Page {
                status: 200,
                content_type: CSS,
                body: assets::STYLE_CSS.to_string(),
            },

            _ => Page {
                status: 404,
                content_type: HTML,
                body: views::not_found(path),
            },
        }
    }

    /// Mount a navigable route.
    fn render(&self, route: Route) -> String {
        let api = self.api.as_ref();
        match route {
            Route::Overview => views::overview(&overview::load(api, &self.base_url)),
            Route::Visualizations => views::visualizations(&visualizations::load(api)),
            Route::Predictions => views::predictions(&PredictionForm::mount(api)),
            Route::Dataset => views::dataset(&dataset::load(api)),
            Route::Settings => views::settings(&SettingsForm::new(&self.base_url)),
        }
    }
}

fn export_dataset(api: &dyn PredictionApi) -> Page {
    match dataset::load(api) {
        PageState::Ready(summary) => Page {
            status: 200,
            content_type: CSV,
            body: dataset::export_csv(&summary),
        },
        state => Page {
            status: 502,
            content_type: TEXT,
            body: state.error().unwrap_or(dataset::ERROR_MESSAGE).to_string(),
        },
    }
}

/// Read the body of methods that carry one; `None` for the rest.
fn read_body(method: &Method, reader: &mut dyn Read) -> Result<Option<String>> {
    if !matches!(method, Method::Put | Method::Post | Method::Patch) {
        return Ok(None);
    }
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .context("request body is not valid UTF-8")?;
    Ok(Some(buf))
}

/// Decode an `application/x-www-form-urlencoded` body.
fn form_fields(body: Option<&str>) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body.unwrap_or("").as_bytes())
        .into_owned()
        .collect()
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server.
///
/// Blocks the current thread. Handles requests sequentially (sufficient for
/// a local single-user dashboard). An unreadable request body answers 400
/// without stopping the server.
pub fn serve(dashboard: &Dashboard, config: &ServerConfig) -> Result<()> {
    let addr = config.addr.as_str();
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    tracing::info!(%addr, api = %dashboard.base_url, "dashboard listening");
    println!("equipred dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if config.open_browser {
        let url = format!("http://{addr}");
        if let Err(e) = open_browser(&url) {
            tracing::warn!(error = %format!("{e:#}"), "could not open browser");
        }
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        // Read body up-front for methods that carry one
        let page = match read_body(&method, request.as_reader()) {
            Ok(body) => dashboard.dispatch(&method, &url, body.as_deref()),
            Err(e) => {
                tracing::warn!(%method, %url, error = %format!("{e:#}"), "unreadable request body");
                Page {
                    status: 400,
                    content_type: TEXT,
                    body: format!("bad request: {e}"),
                }
            }
        };
        let status = page.status;
        if let Err(e) = request.respond(page.into_response()) {
            tracing::warn!(%url, error = %e, "failed to send response");
        }

        // Brief access log
        tracing::info!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn content_type(value: &str) -> Header {
    // Static ASCII header values are always valid.
    Header::from_bytes("Content-Type", value).unwrap()
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fields_decode_plus_and_percent() {
        let fields = form_fields(Some("location=San+Francisco&temperature=85.5&x=a%26b"));
        assert_eq!(
            fields,
            vec![
                ("location".to_string(), "San Francisco".to_string()),
                ("temperature".to_string(), "85.5".to_string()),
                ("x".to_string(), "a&b".to_string()),
            ]
        );
        assert!(form_fields(None).is_empty());
    }

    #[test]
    fn body_is_read_only_for_methods_that_carry_one() {
        let mut reader: &[u8] = b"equipment=Pump";
        assert_eq!(read_body(&Method::Get, &mut reader).unwrap(), None);
        assert_eq!(
            read_body(&Method::Post, &mut reader).unwrap().as_deref(),
            Some("equipment=Pump")
        );
    }

    #[test]
    fn non_utf8_body_is_rejected() {
        let mut reader: &[u8] = &[b'a', 0xff, 0xfe];
        let err = read_body(&Method::Post, &mut reader).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn html_page_defaults() {
        let page = Page::html("<p>hi</p>".to_string());
        assert_eq!(page.status, 200);
        assert_eq!(page.content_type, HTML);
    }
}
