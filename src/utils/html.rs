// ABOUTME: HTML escaping utilities to prevent XSS in server-rendered templates
// ABOUTME: Escapes text before it is placed into template bodies
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Escape a string for safe insertion into HTML text content, including `<pre>` blocks.
#[must_use]
pub fn escape_html_text(input: &str) -> String {
    html_escape::encode_text(input).into_owned()
}
