use crate::calendar::CalendarYear;
use crate::dashboard::{PageRegions, REGIONS, STAT_REGIONS};
use crate::dates;
use crate::form::{EntryForm, FormPhase, Redirect, ValidationError};
use crate::models::WorkoutType;
use maud::{html, Markup, PreEscaped};

pub fn render_dashboard(regions: &PageRegions) -> String {
    fill_template(DASHBOARD_HTML, |name| match name {
        "STYLE" => Some(STYLE),
        region if STAT_REGIONS.iter().any(|&stat| stat == region) => {
            Some(regions.get(region).unwrap_or("--"))
        }
        region if REGIONS.iter().any(|&known| known == region) => {
            Some(regions.get(region).unwrap_or(""))
        }
        _ => None,
    })
}

pub fn render_form_page(form: &EntryForm) -> String {
    let markup = render_entry_form(form).into_string();
    fill_template(FORM_HTML, |name| match name {
        "STYLE" => Some(STYLE),
        "FORM" => Some(markup.as_str()),
        _ => None,
    })
}

/// Substitutes `{{name}}` placeholders in one pass over `template`. Inserted
/// content is never scanned again; unknown placeholders are kept verbatim.
fn fill_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut page = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        page.push_str(&rest[..start]);
        match lookup(&after[..end]) {
            Some(content) => page.push_str(content),
            None => page.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }

    page.push_str(rest);
    page
}

pub fn render_calendar(calendar: &CalendarYear) -> Markup {
    html! {
        div class="calendar-year" data-year=(calendar.year) {
            @for month in &calendar.months {
                div.calendar-month.month-disabled[month.disabled] {
                    h3 class="month-name" { (month.name) }
                    div class="calendar-grid" {
                        @for label in calendar.weekday_labels {
                            div class="weekday" { (label) }
                        }
                        @for _ in 0..month.leading_blanks {
                            div class="day blank" {}
                        }
                        @for cell in &month.days {
                            @let class = format!("day {}", cell.status.css_class());
                            @if let Some(link) = &cell.link {
                                a class=(class) href=(link) title=[cell.tooltip.as_deref()]
                                    data-date=(dates::iso(cell.date)) { (cell.day()) }
                            } @else {
                                div class=(class) data-date=(dates::iso(cell.date)) { (cell.day()) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn render_entry_form(form: &EntryForm) -> Markup {
    let invalid = |field: &str| match &form.phase {
        FormPhase::Invalid(err) if err.field() == field => Some("true"),
        _ => None,
    };
    let custom_type = match WorkoutType::from(form.workout_type.as_str()) {
        WorkoutType::Other(label) if !label.is_empty() => Some(label),
        _ => None,
    };

    html! {
        form id="workout-form" hx-post="/form/submit" hx-target="#form-feedback" hx-swap="outerHTML" {
            label for="workout-date" { "Date" }
            input type="date" id="workout-date" name="date" value=(form.date)
                aria-invalid=[invalid("workout-date")];

            label for="workout-type" { "Workout type" }
            select id="workout-type" name="workout_type" aria-invalid=[invalid("workout-type")]
                hx-get="/form/duration" hx-trigger="change" hx-target="#duration-group"
                hx-swap="outerHTML" hx-include="#workout-duration" {
                option value="" selected[form.workout_type.is_empty()] { "Select a workout type" }
                @for kind in &WorkoutType::KNOWN {
                    option value=(kind.label()) selected[form.workout_type == kind.label()] { (kind.label()) }
                }
                @if let Some(label) = &custom_type {
                    option value=(label) selected { (label) }
                }
            }

            (render_duration_field(form))

            label for="workout-notes" { "Notes" }
            textarea id="workout-notes" name="notes" rows="3" { (form.notes) }

            div id="form-feedback" {}
            button type="submit" class="btn-primary" { "Save workout" }
        }
    }
}

/// Duration input for the current type; swapped in whenever the type changes.
pub fn render_duration_field(form: &EntryForm) -> Markup {
    html! {
        div.field.hidden[!form.duration_visible] id="duration-group" hidden[!form.duration_visible] {
            label for="workout-duration" { "Duration (minutes)" }
            input type="number" id="workout-duration" name="duration" min="1"
                value=(form.duration);
        }
    }
}

pub fn render_validation_alert(err: ValidationError) -> Markup {
    html! {
        div id="form-feedback" class="alert alert-danger" role="alert" data-field=(err.field()) {
            (err.to_string())
        }
    }
}

pub fn render_backend_unavailable() -> Markup {
    html! {
        div id="form-feedback" class="alert alert-danger" role="alert" {
            "The workout service could not be reached. Please try again."
        }
    }
}

/// Backend fragments are trusted and passed through; a pending redirect is
/// appended as a delayed HTMX request.
pub fn render_submission_result(fragment: &str, redirect: Option<Redirect>) -> Markup {
    html! {
        (PreEscaped(fragment))
        @if let Some(redirect) = redirect {
            div id="redirect" hx-get=(redirect.target) hx-target="body" hx-push-url="true"
                hx-trigger=(format!("load delay:{}s", redirect.delay.as_secs())) {}
        }
    }
}

const STYLE: &str = r#"
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
      --active: #4caf50;
      --rest: #9e9e9e;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      margin: 0;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat, .chart-card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .stat .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      display: block;
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .charts {
      display: grid;
      grid-template-columns: 2fr 1fr;
      gap: 16px;
    }

    .chart {
      width: 100%;
      display: block;
    }

    .chart-label, .chart-value {
      fill: #7a746d;
      font-size: 12px;
    }

    .calendar-year {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(210px, 1fr));
      gap: 18px;
    }

    .calendar-month.month-disabled {
      opacity: 0.45;
    }

    .month-name {
      margin: 0 0 8px;
      font-size: 1rem;
    }

    .calendar-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 3px;
    }

    .weekday {
      font-size: 0.7rem;
      color: #8b857d;
      text-align: center;
    }

    .day {
      font-size: 0.7rem;
      text-align: center;
      padding: 4px 0;
      border-radius: 6px;
      text-decoration: none;
      color: var(--ink);
    }

    .day.empty { background: rgba(47, 72, 88, 0.08); }
    .day.active { background: var(--active); color: white; }
    .day.rest { background: var(--rest); color: white; }
    .day.disabled { color: #c9c3bb; }

    .btn, .btn-primary {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
      text-decoration: none;
    }

    .btn-primary {
      background: var(--accent);
    }

    form {
      display: grid;
      gap: 10px;
      max-width: 480px;
    }

    input, select, textarea {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    .field {
      display: grid;
      gap: 10px;
    }

    .hidden {
      display: none;
    }

    .alert {
      padding: 12px 16px;
      border-radius: 12px;
    }

    .alert-danger { background: #fde2dd; color: #c63b2b; }
    .alert-success { background: #dcf1e3; color: #2d7a4b; }
"#;

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Workout Tracker</title>
  <script src="https://unpkg.com/htmx.org@1.9.12"></script>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Workout Tracker</h1>
      <nav>
        <a class="btn-primary" href="/form">Log workout</a>
        <a class="btn" id="export-data-btn" href="/export">Export CSV</a>
      </nav>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Workouts this year</span>
        <span id="total-workouts-ytd" class="value">{{total-workouts-ytd}}</span>
      </div>
      <div class="stat">
        <span class="label">This week</span>
        <span id="workouts-this-week" class="value">{{workouts-this-week}}</span>
      </div>
      <div class="stat">
        <span class="label">Current streak</span>
        <span id="current-streak" class="value">{{current-streak}}</span>
      </div>
      <div class="stat">
        <span class="label">Total hours</span>
        <span id="total-hours" class="value">{{total-hours}}</span>
      </div>
    </section>

    <section class="charts">
      <div class="chart-card">
        <h2>Workouts by type</h2>
        <div id="workout-type-chart">{{workout-type-chart}}</div>
      </div>
      <div class="chart-card">
        <h2>Active vs rest</h2>
        <div id="activity-pie-chart">{{activity-pie-chart}}</div>
      </div>
    </section>

    <section class="chart-card">
      <h2>Calendar</h2>
      <div id="calendar-heatmap">{{calendar-heatmap}}</div>
    </section>
  </main>
</body>
</html>
"#;

const FORM_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Log Workout</title>
  <script src="https://unpkg.com/htmx.org@1.9.12"></script>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Log Workout</h1>
      <nav>
        <a class="btn" href="/">Dashboard</a>
      </nav>
    </header>
    {{FORM}}
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{DisplaySink, CURRENT_STREAK};
    use crate::models::{FormFields, FormParams};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
    }

    #[test]
    fn dashboard_without_data_keeps_placeholders_out() {
        let page = render_dashboard(&PageRegions::default());
        assert!(!page.contains("{{"));
        assert!(page.contains(r#"<span id="current-streak" class="value">--</span>"#));
        assert!(page.contains(r#"id="export-data-btn""#));
    }

    #[test]
    fn dashboard_fills_regions() {
        let mut regions = PageRegions::default();
        regions.set_text(CURRENT_STREAK, "4").unwrap();
        let page = render_dashboard(&regions);
        assert!(page.contains(r#"<span id="current-streak" class="value">4</span>"#));
    }

    #[test]
    fn user_text_that_looks_like_a_placeholder_is_kept() {
        use crate::charts::SvgChartService;
        use crate::dashboard::DashboardView;
        use crate::models::{WorkoutRecord, WorkoutType};

        let records = vec![WorkoutRecord {
            date: today(),
            workout_type: WorkoutType::from("{{calendar-heatmap}}"),
            duration: 30,
            notes: Some("see {{current-streak}} here".to_string()),
        }];
        let mut regions = PageRegions::default();
        DashboardView::build_at(today(), &records)
            .apply(&mut regions, &SvgChartService)
            .unwrap();

        let page = render_dashboard(&regions);
        assert!(page.contains("Notes: see {{current-streak}} here"));
        assert!(!page.contains("Notes: see 1 here"));
        assert!(page.contains(r#"<span id="current-streak" class="value">1</span>"#));
        assert_eq!(page.matches(r#"class="calendar-year""#).count(), 1);
    }

    #[test]
    fn unknown_placeholders_survive() {
        let page = fill_template("a {{X}} b {{Y}} c {{", |name| (name == "X").then_some("x"));
        assert_eq!(page, "a x b {{Y}} c {{");
    }

    #[test]
    fn calendar_renders_links_and_disabled_days() {
        let calendar = crate::calendar::build_calendar_at(today(), &[]);
        let markup = render_calendar(&calendar).into_string();
        assert!(markup.contains(r#"href="/form?date=2024-03-06""#));
        assert!(markup.contains(r#"<div class="day disabled" data-date="2024-03-07">7</div>"#));
        assert!(markup.contains("calendar-month month-disabled"));
    }

    #[test]
    fn rest_form_hides_duration() {
        let params = FormParams {
            workout_type: Some("Rest".to_string()),
            ..FormParams::default()
        };
        let form = EntryForm::load(&params, today());
        let markup = render_duration_field(&form).into_string();
        assert!(markup.contains("hidden"));
        assert!(markup.contains(r#"value="0""#));
    }

    #[test]
    fn form_selects_prefilled_type() {
        let params = FormParams {
            date: Some("2024-03-01".to_string()),
            workout_type: Some("Yoga".to_string()),
            duration: Some("30".to_string()),
            notes: Some("slow flow".to_string()),
        };
        let page = render_form_page(&EntryForm::load(&params, today()));
        assert!(page.contains(r#"<option value="Yoga" selected>Yoga</option>"#));
        assert!(page.contains(r#"value="2024-03-01""#));
        assert!(page.contains("slow flow"));
    }

    #[test]
    fn validation_alert_names_problem() {
        let mut form = EntryForm::from_fields(FormFields::default());
        let err = form.validate().unwrap_err();
        let markup = render_validation_alert(err).into_string();
        assert!(markup.contains("Please select a date"));
        assert!(markup.contains("alert-danger"));
    }

    #[test]
    fn submission_result_appends_redirect() {
        let fragment = r#"<div id="form-feedback" class="alert alert-success success-message">Saved</div>"#;
        let markup = render_submission_result(fragment, Some(Redirect::to_dashboard())).into_string();
        assert!(markup.starts_with(fragment));
        assert!(markup.contains(r#"hx-trigger="load delay:2s""#));

        let plain = render_submission_result(fragment, None).into_string();
        assert_eq!(plain, fragment);
    }
}
