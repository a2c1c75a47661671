//! Full-screen text layout: title bar, input panels, results, status bar.

use std::fmt::Write;

use colored::{Color, Colorize};
use medcalc_core::calculations::common::format_amount;

use crate::i18n::Translator;
use crate::state::AppState;
use crate::utils::percent_display;
use crate::views::status_bar::{build_status_bar, hints};
use crate::views::table::render_view;

/// Title bar on a background of the named color. Unknown names, or output
/// that is not a terminal, fall back to a plain banner.
fn title_bar(
    title: &str,
    color: &str,
    ansi: bool,
) -> String {
    match color.trim().parse::<Color>().ok().filter(|_| ansi) {
        Some(background) => format!(" {title} ")
            .bold()
            .bright_white()
            .on_color(background)
            .to_string(),
        None => format!("== {title} =="),
    }
}

/// Render the whole screen for the current state.
pub fn render_screen(
    state: &AppState,
    app_bar_color: &str,
    t: &Translator,
    ansi: bool,
) -> String {
    let inputs = state.store().inputs();
    let factors = state.store().factors();
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", title_bar(t.t("Medical Financial Calculator"), app_bar_color, ansi));
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", t.t("Projection Inputs"));
    let _ = writeln!(out, "  {}: {}", t.t("Year"), inputs.year);
    let _ = writeln!(out, "  {}: {}", t.t("Plan"), inputs.plan);
    let _ = writeln!(out, "  {}: {}", t.t("Age"), inputs.age);
    let _ = writeln!(out, "  {}: {}", t.t("Deductible"), format_amount(inputs.deductible));
    let _ = writeln!(out, "  {}: {}", t.t("Number of Years"), inputs.number_of_years);
    let _ = writeln!(out);

    let toggle = if factors.inflation_enabled { "on" } else { "off" };
    let _ = writeln!(out, "{}", t.t("Financial Adjustments"));
    let _ = writeln!(out, "  {}: {}", t.t("Use Inflation"), t.t(toggle));
    let _ = writeln!(out, "  {}: {}", t.t("Inflation Rate"), percent_display(factors.inflation_rate));
    let _ = writeln!(out, "  {}: {}", t.t("Currency Rate"), factors.currency_rate.normalize());
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", render_view(&state.view(), state.index_columns(), t));
    let _ = writeln!(out);
    let _ = write!(out, "{}", build_status_bar(hints::MAIN));

    out
}
