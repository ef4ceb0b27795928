//! Server-side page rendering

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::error::DashboardError;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("landing.html", include_str!("../templates/landing.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("register.html", include_str!("../templates/register.html")),
    ("placeholder.html", include_str!("../templates/placeholder.html")),
    ("analysis.html", include_str!("../templates/analysis.html")),
    ("alerts.html", include_str!("../templates/alerts.html")),
    ("drivers.html", include_str!("../templates/drivers.html")),
    ("driver_detail.html", include_str!("../templates/driver_detail.html")),
];

/// Compiled page templates
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(*name, *source)?;
        }
        Ok(Self { env })
    }

    pub fn render<C: Serialize>(&self, name: &str, ctx: C) -> Result<Html<String>, DashboardError> {
        let html = self.env.get_template(name)?.render(ctx)?;
        Ok(Html(html))
    }

    /// Neutral page shown while the session is still unknown
    pub fn placeholder(&self, message: &str) -> Result<Html<String>, DashboardError> {
        self.render("placeholder.html", minijinja::context! { message })
    }
}
