//! HTML rendering for the upload page.

use crate::catalog::{Language, Month, MushroomReport};
use crate::constants::confidence::DECIMAL_PLACES;
use crate::inference::Prediction;
use serde::Serialize;
use std::fmt::Write;

/// Everything the page (or the JSON API) shows for one request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageContext {
    /// Whether a model is available.
    pub model_loaded: bool,
    /// URL of the uploaded photo.
    pub image: Option<String>,
    /// Raw model prediction.
    pub prediction: Option<Prediction>,
    /// Catalog details for the prediction.
    pub result: Option<MushroomReport>,
    /// Message explaining why there is no result.
    pub error: Option<String>,
    /// Month selected for pricing.
    pub month: Option<String>,
    /// Language of the page.
    pub language: Language,
}

/// Static page strings per language.
struct Strings {
    title: &'static str,
    upload: &'static str,
    month: &'static str,
    language: &'static str,
    submit: &'static str,
    model_missing: &'static str,
    description: &'static str,
    cultivation: &'static str,
    nutrients: &'static str,
    price: &'static str,
    confidence: &'static str,
}

const EN: Strings = Strings {
    title: "Mushroom Identifier",
    upload: "Mushroom photo",
    month: "Month",
    language: "Language",
    submit: "Identify",
    model_missing: "The model is not loaded; predictions are unavailable.",
    description: "Description",
    cultivation: "Cultivation",
    nutrients: "Nutrients",
    price: "Price (₹/kg)",
    confidence: "Confidence",
};

const HI: Strings = Strings {
    title: "मशरूम पहचानकर्ता",
    upload: "मशरूम की फोटो",
    month: "महीना",
    language: "भाषा",
    submit: "पहचानें",
    model_missing: "मॉडल लोड नहीं हुआ है; पहचान उपलब्ध नहीं है।",
    description: "विवरण",
    cultivation: "खेती",
    nutrients: "पोषक तत्व",
    price: "कीमत (₹/किलो)",
    confidence: "विश्वास",
};

const fn strings(language: Language) -> &'static Strings {
    match language {
        Language::En => &EN,
        Language::Hi => &HI,
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Render the full page.
pub fn render_page(context: &PageContext) -> String {
    let s = strings(context.language);
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n\
         <h1>{title}</h1>\n",
        lang = context.language.code(),
        title = s.title,
    );

    if !context.model_loaded {
        let _ = writeln!(html, "<p class=\"warning\">{}</p>", s.model_missing);
    }

    render_form(&mut html, context, s);

    if let Some(error) = &context.error {
        let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(error));
    }

    if let Some(image) = &context.image {
        let _ = writeln!(
            html,
            "<img class=\"upload\" src=\"{}\" alt=\"uploaded mushroom\">",
            escape_html(image)
        );
    }

    if let Some(report) = &context.result {
        render_result(&mut html, report, context.prediction.as_ref(), s);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, context: &PageContext, s: &Strings) {
    let selected_month = context
        .month
        .as_deref()
        .and_then(|m| m.parse::<Month>().ok())
        .unwrap_or_else(Month::current);

    let _ = write!(
        html,
        "<form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n\
         <label>{upload} <input type=\"file\" name=\"file\" accept=\"image/*\"></label>\n\
         <label>{month} <select name=\"month\">\n",
        upload = s.upload,
        month = s.month,
    );

    for month in Month::ALL {
        let selected = if month == selected_month { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{m}\"{selected}>{m}</option>",
            m = month.abbrev()
        );
    }

    let _ = write!(
        html,
        "</select></label>\n<label>{language} <select name=\"lang\">\n",
        language = s.language
    );

    for (language, name) in [(Language::En, "English"), (Language::Hi, "हिन्दी")] {
        let selected = if language == context.language { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{selected}>{name}</option>",
            language.code()
        );
    }

    let _ = writeln!(
        html,
        "</select></label>\n<button type=\"submit\">{}</button>\n</form>",
        s.submit
    );
}

fn render_result(
    html: &mut String,
    report: &MushroomReport,
    prediction: Option<&Prediction>,
    s: &Strings,
) {
    let _ = writeln!(
        html,
        "<section class=\"result\">\n<h2>{}</h2>",
        escape_html(&report.display_name)
    );

    if report.display_name != report.canonical_name {
        let _ = writeln!(
            html,
            "<p class=\"canonical\">{}</p>",
            escape_html(&report.canonical_name)
        );
    }

    if let Some(prediction) = prediction {
        let _ = writeln!(
            html,
            "<p>{}: {:.*}</p>",
            s.confidence, DECIMAL_PLACES, prediction.confidence
        );
    }

    if let Some(description) = &report.description {
        let _ = writeln!(
            html,
            "<h3>{}</h3>\n<p>{}</p>",
            s.description,
            escape_html(description)
        );
    }

    if let Some(cultivation) = &report.cultivation {
        let _ = writeln!(
            html,
            "<h3>{}</h3>\n<p>{}</p>",
            s.cultivation,
            escape_html(cultivation)
        );
    }

    if !report.nutrients.is_empty() {
        let _ = writeln!(html, "<h3>{}</h3>\n<ul>", s.nutrients);
        for nutrient in &report.nutrients {
            let _ = writeln!(html, "<li>{}</li>", escape_html(nutrient));
        }
        html.push_str("</ul>\n");
    }

    let _ = writeln!(
        html,
        "<p class=\"price\">{} ({}): {}</p>\n</section>",
        s.price,
        escape_html(&report.month),
        escape_html(&report.price)
    );
}

const STYLE: &str = "body{font-family:sans-serif;background:#f6f3ee;margin:0}\
main{max-width:42rem;margin:2rem auto;padding:1.5rem;background:#fff;border-radius:8px}\
form{display:flex;flex-direction:column;gap:.75rem}\
.error{color:#a40000}.warning{color:#8a5a00}\
img.upload{max-width:100%;margin-top:1rem;border-radius:6px}\
.price{font-weight:bold}.canonical{color:#666}";
