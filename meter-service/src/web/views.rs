//! HTML for the two pages. Everything interpolated here is a date, a number
//! or a static label, so no escaping is done.

use crate::{
    acceptance::{BlankForms, FieldSpec, FormSpec},
    dashboard::{Dashboard, DashboardData},
};

pub const NO_DATA_MESSAGE: &str = "No data available.";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

fn field_html(field: &FieldSpec) -> String {
    let mut attrs = format!(
        "type=\"{kind}\" name=\"{name}\" id=\"id_{name}\" class=\"form-control\"",
        kind = field.kind.html_type(),
        name = field.name,
    );
    if let Some(min) = field.min {
        attrs.push_str(&format!(" min=\"{min}\""));
    }
    if let Some(step) = field.step {
        attrs.push_str(&format!(" step=\"{step}\""));
    }
    if field.required {
        attrs.push_str(" required");
    }

    let help = field
        .help_text
        .map(|help| format!("<span class=\"helptext\">{help}</span>\n"))
        .unwrap_or_default();

    format!(
        "<p>\n<label for=\"id_{name}\">{label}:</label>\n<input {attrs}>\n{help}</p>\n",
        name = field.name,
        label = field.label,
    )
}

fn fieldset_html(form: &FormSpec) -> String {
    let fields: String = form.fields.iter().map(field_html).collect();
    format!("<fieldset>\n<legend>{}</legend>\n{fields}</fieldset>\n", form.title)
}

/// Both blank forms inside one `<form>`, posted together to `/`.
pub fn input_page(forms: &BlankForms) -> String {
    let body = format!(
        "<h1>Enter meter data</h1>\n<form method=\"post\" action=\"/\">\n{reading}{tariff}<button type=\"submit\">Save</button>\n</form>\n<p><a href=\"/dashboard/\">View dashboard</a></p>\n",
        reading = fieldset_html(&forms.reading),
        tariff = fieldset_html(&forms.tariff),
    );
    page("Enter meter data", &body)
}

pub fn dashboard_page(dashboard: &Dashboard) -> String {
    match dashboard {
        Dashboard::NoData => page(
            "Dashboard",
            &format!("<h1>Dashboard</h1>\n<p class=\"error\">{NO_DATA_MESSAGE}</p>\n<p><a href=\"/\">Enter data</a></p>\n"),
        ),
        Dashboard::Ready(data) => page("Dashboard", &ready_body(data)),
    }
}

fn ready_body(data: &DashboardData) -> String {
    let rows: String = data
        .readings
        .iter()
        .map(|r| format!("<tr><td>{}</td><td>{}</td></tr>\n", r.date, r.kwh_used))
        .collect();

    format!(
        "<h1>Dashboard</h1>\n\
         <img src=\"{chart}\" alt=\"Energy cost over time\">\n\
         <p>Current tariff: <span id=\"tariff\">{price}</span>p per kWh</p>\n\
         <table>\n<thead><tr><th>Date</th><th>kWh used</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n\
         <p><a href=\"/\">Enter more data</a></p>\n",
        chart = data.chart.data_uri(),
        price = data.tariff.price_per_kwh,
    )
}
