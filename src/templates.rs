// ABOUTME: Template rendering for the landing, data, and error pages
// ABOUTME: Fills compile-time embedded HTML templates with escaped values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::routes;
use crate::utils::html::escape_html_text;

/// Landing page embedded at compile time
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Data page embedded at compile time
const DATA_TEMPLATE: &str = include_str!("../templates/data.html");

/// Error page embedded at compile time
const ERROR_TEMPLATE: &str = include_str!("../templates/error.html");

/// Template renderer for the demo's pages
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// Render the landing page
    #[must_use]
    pub fn render_index() -> String {
        INDEX_TEMPLATE.replace("{{AUTH_PATH}}", routes::AUTH)
    }

    /// Render the data page around pretty-printed JSON text
    #[must_use]
    pub fn render_data(pretty_json: &str) -> String {
        DATA_TEMPLATE
            .replace("{{HOME_PATH}}", routes::HOME)
            .replace("{{DATA}}", &escape_html_text(pretty_json))
    }

    /// Render the error page with a title and preformatted detail
    #[must_use]
    pub fn render_error(title: &str, detail: &str) -> String {
        ERROR_TEMPLATE
            .replace("{{HOME_PATH}}", routes::HOME)
            .replace("{{ERROR}}", &escape_html_text(title))
            .replace("{{DESCRIPTION}}", &escape_html_text(detail))
    }
}
