use askama::Template;

#[derive(Template)]
#[template(path = "fragments/failure.html")]
struct FailureTemplate<'a> {
    message: &'a str,
}

/// Error message plus the static troubleshooting hints.
pub fn render(message: &str) -> String {
    FailureTemplate { message }.render().unwrap_or_else(|err| {
        tracing::warn!("Could not render failure fragment: {err}");
        String::new()
    })
}
