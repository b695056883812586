// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Small HTML-list builders for metric display values.

use crate::model::ProbDist;

/// Escapes text interpolated into metric markup.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn ul<I>(items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::from("<ul>");
    for item in items {
        out.push_str(&item);
    }
    out.push_str("</ul>");
    out
}

pub(crate) fn li(content: impl AsRef<str>) -> String {
    format!("<li>{}</li>", content.as_ref())
}

pub(crate) fn fmt_opt3(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_owned(), |v| format!("{v:.3}"))
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub(crate) fn fmt_dist(dist: &ProbDist) -> String {
    match *dist {
        ProbDist::Beta { a, b } => format!("β({a:.3}, {b:.3})"),
        ProbDist::Gaussian { m, kappa, nu, tau_square } => {
            format!("𝒩({m:.3}, σ²/{kappa:.3}), σ² ~ χ⁻²({nu:.3}, {tau_square:.3})")
        }
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}
