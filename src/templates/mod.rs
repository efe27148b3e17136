//! Message templates: compiled-in catalog and placeholder rendering

pub mod catalog;
pub mod handlers;

/// Fill a template body's numbered placeholders with positional values:
/// the first value replaces `{{1}}`, the second `{{2}}`, and so on.
/// Missing values leave their placeholder in place.
pub fn render(content: &str, parameters: &[String]) -> String {
    let mut rendered = content.to_string();
    for (i, value) in parameters.iter().enumerate() {
        let placeholder = format!("{{{{{}}}}}", i + 1);
        rendered = rendered.replace(&placeholder, value);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fills_placeholders_in_order() {
        let out = render(
            "Hi {{1}}, your payment of ₹{{2}} is due on {{3}}.",
            &["Priya".to_string(), "5000".to_string(), "25th Dec".to_string()],
        );
        assert_eq!(out, "Hi Priya, your payment of ₹5000 is due on 25th Dec.");
    }

    #[test]
    fn missing_values_leave_placeholder() {
        let out = render("Hello {{1}} and {{2}}", &["Amit".to_string()]);
        assert_eq!(out, "Hello Amit and {{2}}");
    }

    #[test]
    fn extra_values_are_ignored() {
        let out = render("Hello {{1}}", &["A".to_string(), "B".to_string()]);
        assert_eq!(out, "Hello A");
    }

    #[test]
    fn repeated_placeholder_fills_every_occurrence() {
        let out = render("{{1}}, yes {{1}}!", &["go".to_string()]);
        assert_eq!(out, "go, yes go!");
    }
}
