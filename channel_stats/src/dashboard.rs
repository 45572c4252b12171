//! Small HTTP dashboard: an HTML page per channel plus JSON and CSV endpoints.

use std::fmt::Write;
use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use polars::prelude::{DataFrame, PolarsResult};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use tracing::{info, warn};

use crate::aggregator::StatsAggregator;
use crate::errors::{Error, ErrorKind, StatsError};
use crate::io::chart::{ChartPalette, render_metric_svg};
use crate::io::dataframe::{frame_to_csv, history_frame, summary_frame};
use crate::io::sink::{ConversionSnafu, SinkError, file_stem};
use crate::models::bundle::StatsBundle;
use crate::models::history::Metric;
use crate::report::{DESCRIPTION_PREVIEW_CHARS, format_date, format_number, guidance, truncate};
use crate::synthesizer::RandomVariation;

const RECENT_VIDEOS_SHOWN: usize = 10;

/// Shared state of all routes.
#[derive(Clone)]
pub struct DashboardState {
    pub aggregator: StatsAggregator,
    pub palette: ChartPalette,
    /// Fixed seed for the history generator; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl DashboardState {
    async fn bundle(&self, q: &str) -> Result<StatsBundle, StatsError> {
        let mut variation = RandomVariation::for_seed(self.seed);
        self.aggregator.get_comprehensive_stats(q, &mut variation).await
    }
}

#[derive(Debug, Deserialize)]
pub struct ChannelQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    guidance: &'static str,
}

/// A failed request, rendered as JSON or as an HTML page.
pub struct DashboardError {
    status: StatusCode,
    message: String,
    guidance: &'static str,
    html: bool,
}

impl DashboardError {
    fn from_error(err: Error, html: bool) -> Self {
        let (status, guidance) = match &err {
            Error::Stats(e) => (status_for(e.kind()), guidance(e.kind())),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected server-side failure. See the server log.",
            ),
        };
        if status.is_server_error() {
            warn!(error = %err, "dashboard request failed");
        }
        Self {
            status,
            message: err.to_string(),
            guidance,
            html,
        }
    }

    fn json(err: impl Into<Error>) -> Self {
        Self::from_error(err.into(), false)
    }

    fn page(err: impl Into<Error>) -> Self {
        Self::from_error(err.into(), true)
    }
}

/// HTTP status for a core failure kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Auth => StatusCode::UNAUTHORIZED,
        ErrorKind::Transient => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        if self.html {
            let body = page(
                "Error",
                &format!(
                    "<h2>{}</h2><p>{}</p><p><a href=\"/\">Back</a></p>",
                    escape_html(&self.message),
                    escape_html(self.guidance)
                ),
            );
            (self.status, Html(body)).into_response()
        } else {
            let body = ErrorBody {
                error: self.message,
                guidance: self.guidance,
            };
            (self.status, Json(body)).into_response()
        }
    }
}

pub fn create_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/channel", get(channel_page))
        .route("/api/stats", get(api_stats))
        .route("/api/statistics.csv", get(statistics_csv))
        .route("/api/history.csv", get(history_csv))
        .with_state(state)
}

/// Binds `addr` and serves the dashboard until the process is stopped.
pub async fn serve(addr: SocketAddr, state: DashboardState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "dashboard listening");
    axum::serve(listener, create_router(state)).await
}

async fn index() -> Html<String> {
    Html(page(
        "YouTube channel statistics",
        r#"<form action="/channel" method="get">
<input type="text" name="q" placeholder="Channel ID, @handle or name" autofocus>
<button type="submit">Analyse</button>
</form>
<p>Accepted: a channel ID (UC...), a handle (@name), a legacy username or a free-text name.</p>"#,
    ))
}

async fn channel_page(
    State(state): State<DashboardState>,
    Query(query): Query<ChannelQuery>,
) -> Result<Html<String>, DashboardError> {
    let bundle = state.bundle(&query.q).await.map_err(DashboardError::page)?;
    let body =
        render_channel_html(&bundle, &query.q, &state.palette).map_err(DashboardError::page)?;
    Ok(Html(page(&bundle.channel.title, &body)))
}

async fn api_stats(
    State(state): State<DashboardState>,
    Query(query): Query<ChannelQuery>,
) -> Result<Json<StatsBundle>, DashboardError> {
    let bundle = state.bundle(&query.q).await.map_err(DashboardError::json)?;
    Ok(Json(bundle))
}

async fn statistics_csv(
    State(state): State<DashboardState>,
    Query(query): Query<ChannelQuery>,
) -> Result<Response, DashboardError> {
    let bundle = state.bundle(&query.q).await.map_err(DashboardError::json)?;
    csv_download(summary_frame(&bundle.channel), &bundle, "statistics")
}

async fn history_csv(
    State(state): State<DashboardState>,
    Query(query): Query<ChannelQuery>,
) -> Result<Response, DashboardError> {
    let bundle = state.bundle(&query.q).await.map_err(DashboardError::json)?;
    csv_download(history_frame(&bundle.history), &bundle, "history")
}

/// Serves a frame as `{stem}_{suffix}.csv`, the same name `CsvSink` writes.
fn csv_download(
    frame: PolarsResult<DataFrame>,
    bundle: &StatsBundle,
    suffix: &str,
) -> Result<Response, DashboardError> {
    let csv = frame
        .and_then(|mut df| frame_to_csv(&mut df))
        .context(ConversionSnafu)
        .map_err(DashboardError::json)?;

    let disposition = format!(
        "attachment; filename=\"{}_{suffix}.csv\"",
        file_stem(&bundle.channel.title)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

fn render_channel_html(
    bundle: &StatsBundle,
    query: &str,
    palette: &ChartPalette,
) -> Result<String, SinkError> {
    let ch = &bundle.channel;
    let mut out = String::new();

    let _ = write!(
        out,
        "<h1>{}</h1><p><a href=\"{url}\">{url}</a> &middot; created {}</p>",
        escape_html(&ch.title),
        format_date(&ch.published_at),
        url = escape_html(&ch.url()),
    );

    let subscribers = if ch.hidden_subscriber_count {
        "hidden".to_string()
    } else {
        format_number(ch.subscriber_count)
    };
    let _ = write!(
        out,
        "<table class=\"metrics\"><tr><th>Subscribers</th><th>Views</th><th>Videos</th><th>Avg views/video</th></tr>\
         <tr><td>{subscribers}</td><td>{}</td><td>{}</td><td>{}</td></tr></table>",
        format_number(ch.view_count),
        format_number(ch.video_count),
        format_number(ch.average_views_per_video()),
    );

    if !ch.description.trim().is_empty() {
        let _ = write!(
            out,
            "<p class=\"description\">{}</p>",
            escape_html(&truncate(ch.description.trim(), DESCRIPTION_PREVIEW_CHARS))
        );
    }

    out.push_str("<h2>Recent videos</h2>");
    if bundle.videos.is_empty() {
        out.push_str("<p>No videos found.</p>");
    } else {
        out.push_str("<table><tr><th>Title</th><th>Published</th><th>Views</th><th>Likes</th><th>Comments</th></tr>");
        for v in bundle.videos.iter().take(RECENT_VIDEOS_SHOWN) {
            let _ = write!(
                out,
                "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&v.watch_url()),
                escape_html(&v.title),
                format_date(&v.published_at),
                format_number(v.view_count),
                format_number(v.like_count),
                format_number(v.comment_count),
            );
        }
        out.push_str("</table>");
    }

    out.push_str("<h2>Development</h2><p class=\"note\">Generated from current totals. Not real historical data.</p>");
    if !bundle.history.subscribers.is_empty() {
        for metric in Metric::ALL {
            out.push_str(&render_metric_svg(bundle.history.series(metric), &ch.title, palette)?);
        }
    }

    let q = escape_html(&encode_query(query));
    let _ = write!(
        out,
        "<h2>Downloads</h2><p><a href=\"/api/statistics.csv?q={q}\">Statistics (CSV)</a> &middot; \
         <a href=\"/api/history.csv?q={q}\">History (CSV)</a></p>"
    );

    Ok(out)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>body{{background:#0F0F0F;color:#EBEBEB;font-family:sans-serif;max-width:1240px;margin:auto}}\
         a{{color:#00D4AA}}td,th{{padding:4px 12px;text-align:left}}svg{{width:100%;height:auto}}</style>\
         </head><body>{}</body></html>",
        escape_html(title),
        body
    )
}

/// Percent-encodes a query value; unreserved characters pass through.
fn encode_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
