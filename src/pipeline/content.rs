//! Content rendering: the user template against the data environment.
//!
//! Templates use Jinja2 syntax via MiniJinja. The environment is set up to
//! fail loudly: any reference to a key the data does not define is an
//! error, never an empty string. Output is not HTML-escaped because the
//! template *is* the document body.
//!
//! Besides the data keys, every template can call:
//!
//! | Function | Alias | Result |
//! |----------|-------|--------|
//! | `current_datetime()` | `now()` | the injected clock's current [`Moment`] |
//! | `format_datetime(moment, pattern)` | `strftime(moment, pattern)` | `moment` formatted with a strftime pattern |
//!
//! `moment` may be a [`Moment`] or a date string from the data file.

use crate::clock::{Clock, Moment};
use crate::data::DataEnvironment;
use crate::error::SheetgenError;
use minijinja::value::Value;
use minijinja::{AutoEscape, Environment, Error, ErrorKind, UndefinedBehavior};
use std::sync::Arc;
use tracing::debug;

/// Renders content templates with the date/time helpers installed.
pub struct ContentRenderer {
    env: Environment<'static>,
}

impl ContentRenderer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_name: &str| AutoEscape::None);
        env.set_keep_trailing_newline(false);

        let now = {
            let clock = Arc::clone(&clock);
            move || -> Result<Value, Error> { Ok(Value::from_object(clock.now())) }
        };
        env.add_function("current_datetime", now.clone());
        env.add_function("now", now);
        env.add_function("format_datetime", format_datetime);
        env.add_function("strftime", format_datetime);

        Self { env }
    }

    /// Render `source` with the top-level keys of `data` as variables.
    ///
    /// `name` identifies the template in error messages.
    pub fn render(
        &self,
        name: &str,
        source: &str,
        data: &DataEnvironment,
    ) -> Result<String, SheetgenError> {
        let rendered = self
            .env
            .render_named_str(name, source, data)
            .map_err(|e| SheetgenError::from_template(name, &e))?;
        debug!(
            "Rendered template '{}' ({} bytes → {} bytes)",
            name,
            source.len(),
            rendered.len()
        );
        Ok(rendered)
    }
}

/// Template function: format a moment (or a date string) with a pattern.
fn format_datetime(moment: &Value, pattern: &str) -> Result<String, Error> {
    let moment = to_moment(moment)?;
    moment
        .format(pattern)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}

fn to_moment(value: &Value) -> Result<Moment, Error> {
    if let Some(moment) = value.downcast_object_ref::<Moment>() {
        return Ok(*moment);
    }
    if let Some(text) = value.as_str() {
        return Moment::parse(text).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("cannot interpret '{text}' as a date/time"),
            )
        });
    }
    Err(Error::new(
        ErrorKind::InvalidOperation,
        format!("expected a date/time, got {}", value.kind()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::DateTime;
    use std::path::Path;

    fn renderer() -> ContentRenderer {
        let moment = DateTime::parse_from_rfc3339("2024-03-05T14:30:09+01:00").unwrap();
        ContentRenderer::new(Arc::new(FixedClock::new(moment)))
    }

    fn data(yaml: &str) -> DataEnvironment {
        DataEnvironment::from_yaml_str(yaml, Path::new("test.yaml")).unwrap()
    }

    #[test]
    fn substitutes_variables() {
        let out = renderer()
            .render("content", "<p>Hello {{ title }}</p>", &data("title: Invoice"))
            .unwrap();
        assert_eq!(out, "<p>Hello Invoice</p>");
    }

    #[test]
    fn nested_paths_and_loops() {
        let yaml = "customer:\n  name: ACME\nitems:\n  - a\n  - b\n";
        let out = renderer()
            .render(
                "content",
                "{{ customer.name }}:{% for i in items %}[{{ i }}]{% endfor %}",
                &data(yaml),
            )
            .unwrap();
        assert_eq!(out, "ACME:[a][b]");
    }

    #[test]
    fn html_is_not_escaped() {
        let out = renderer()
            .render("content", "{{ body }}", &data("body: '<b>bold</b> & co'"))
            .unwrap();
        assert_eq!(out, "<b>bold</b> & co");
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let err = renderer()
            .render("content", "{{ missing }}", &data("title: x"))
            .unwrap_err();
        assert!(matches!(err, SheetgenError::RenderFailed { .. }), "got: {err:?}");
    }

    #[test]
    fn undefined_nested_path_is_an_error() {
        let err = renderer()
            .render("content", "{{ customer.address.street }}", &data("customer:\n  name: x\n"))
            .unwrap_err();
        assert!(matches!(err, SheetgenError::RenderFailed { .. }), "got: {err:?}");
    }

    #[test]
    fn malformed_template_is_a_syntax_error() {
        let err = renderer()
            .render("content", "{% for x in %}", &data("title: x"))
            .unwrap_err();
        assert!(matches!(err, SheetgenError::TemplateSyntax { .. }), "got: {err:?}");
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn helpers_use_the_injected_clock() {
        let r = renderer();
        let d = data("title: x");
        assert_eq!(
            r.render("content", "{{ format_datetime(current_datetime(), '%Y-%m-%d') }}", &d)
                .unwrap(),
            "2024-03-05"
        );
        assert_eq!(
            r.render("content", "{{ strftime(now(), '%H:%M') }}", &d).unwrap(),
            "14:30"
        );
        assert_eq!(r.render("content", "{{ now() }}", &d).unwrap(), "2024-03-05 14:30:09");
        assert_eq!(r.render("content", "{{ now().year }}", &d).unwrap(), "2024");
    }

    #[test]
    fn format_datetime_accepts_yaml_dates() {
        let out = renderer()
            .render(
                "content",
                "{{ format_datetime(issued, '%d.%m.%Y') }}",
                &data("issued: 2023-12-24\n"),
            )
            .unwrap();
        assert_eq!(out, "24.12.2023");
    }

    #[test]
    fn format_datetime_accepts_yaml_timestamps_with_offsets() {
        let out = renderer()
            .render(
                "content",
                "{{ format_datetime(when, '%Y-%m-%d %H:%M %z') }}",
                &data("when: 2001-12-14 21:59:43.10 -5\n"),
            )
            .unwrap();
        assert_eq!(out, "2001-12-14 21:59 -0500");
    }

    #[test]
    fn merged_keys_are_visible_to_templates() {
        let out = renderer()
            .render(
                "content",
                "{{ sender.name }} / {{ sender.city }}",
                &data("base: &b {city: Paris}\nsender: {<<: *b, name: Ann}\n"),
            )
            .unwrap();
        assert_eq!(out, "Ann / Paris");
    }

    #[test]
    fn format_datetime_rejects_garbage() {
        let r = renderer();
        let err = r
            .render("content", "{{ format_datetime(when, '%Y') }}", &data("when: soon\n"))
            .unwrap_err();
        assert!(err.to_string().contains("soon"), "got: {err}");

        let err = r
            .render("content", "{{ format_datetime(now(), '%Q') }}", &data("title: x"))
            .unwrap_err();
        assert!(matches!(err, SheetgenError::RenderFailed { .. }));
    }

    #[test]
    fn single_trailing_newline_is_dropped() {
        let out = renderer()
            .render("content", "<p>{{ title }}</p>\n", &data("title: x"))
            .unwrap();
        assert_eq!(out, "<p>x</p>");
    }

    #[test]
    fn same_input_renders_identically() {
        let r = renderer();
        let d = data("title: x\nrows: [1, 2, 3]\n");
        let tpl = "{% for r in rows %}<td>{{ r }}</td>{% endfor %}{{ title }}";
        assert_eq!(r.render("c", tpl, &d).unwrap(), r.render("c", tpl, &d).unwrap());
    }
}
