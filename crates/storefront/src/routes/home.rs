//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use tracing::instrument;

use super::notice::{NoticeQuery, Toast};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub toast: Option<Toast>,
}

/// Display the home page.
///
/// Checkout lands here, so the page shows whatever notice it was sent.
#[instrument(skip(query))]
pub async fn home(Query(query): Query<NoticeQuery>) -> HomeTemplate {
    HomeTemplate {
        toast: Toast::from_query(&query, None),
    }
}
