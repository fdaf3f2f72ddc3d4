use super::*;

fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |name| {
        pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }
}

#[test]
fn test_log_format_parse() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
}

#[test]
fn test_filter_directives_precedence() {
    assert_eq!(filter_directives(vars(&[])), None);
    assert_eq!(
        filter_directives(vars(&[("RUST_LOG", "warn")])),
        Some("warn".to_string())
    );
    assert_eq!(
        filter_directives(vars(&[("RUST_LOG", "warn"), (LOG_ENV, "specimen_solver=trace")])),
        Some("specimen_solver=trace".to_string())
    );
}
