use crate::appointment::Appointment;
use regex::{Captures, Regex};
use std::sync::OnceLock;

const DEFAULT_CUSTOMER_NAME: &str = "Customer";
const DEFAULT_SHOP_NAME: &str = "Shop";
const DEFAULT_SERVICE_NAME: &str = "Service";
const DEFAULT_STAFF_NAME: &str = "Staff";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("Placeholder regex to be valid"))
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

fn resolve<'a>(placeholder: &str, appointment: &'a Appointment) -> Option<&'a str> {
    let value: &'a str = match placeholder {
        "name" | "nome" => or_default(&appointment.customer_name, DEFAULT_CUSTOMER_NAME),
        "date" | "data" => appointment.date.as_str(),
        "time" | "hora" => appointment.time.as_str(),
        "shopName" | "barbearia" => or_default(
            appointment.shop_name.as_deref().unwrap_or_default(),
            DEFAULT_SHOP_NAME,
        ),
        "service" | "servico" => or_default(&appointment.service_name, DEFAULT_SERVICE_NAME),
        "staff" | "barbeiro" => or_default(&appointment.staff_name, DEFAULT_STAFF_NAME),
        _ => return None,
    };
    Some(value)
}

/// Renders a reminder message for the given `Appointment`.
///
/// Every occurrence of a known `{{placeholder}}` is replaced in a single
/// pass, so values containing placeholders are inserted as is. Unknown
/// placeholders are kept verbatim.
pub fn render(template: &str, appointment: &Appointment) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| match resolve(&caps[1], appointment) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenant::DEFAULT_MESSAGE_TEMPLATE;

    fn appointment() -> Appointment {
        Appointment {
            id: 1,
            tenant_id: "1".into(),
            date: "2024-01-10".into(),
            time: "15:00".into(),
            customer_name: "Ana".into(),
            customer_phone: "5511999999999".into(),
            service_name: "Beard trim".into(),
            staff_name: "Rafa".into(),
            shop_name: Some("Barba Negra".into()),
            reminder_sent_at: None,
            status: None,
        }
    }

    #[test]
    fn it_replaces_all_known_placeholders() {
        let msg = render(
            "{{name}} {{date}} {{time}} {{shopName}} {{service}} {{staff}}",
            &appointment(),
        );
        assert_eq!(msg, "Ana 2024-01-10 15:00 Barba Negra Beard trim Rafa");
    }

    #[test]
    fn it_uses_fallbacks_for_empty_fields() {
        let mut a = appointment();
        a.customer_name = "".into();
        a.service_name = " ".into();
        a.staff_name = "".into();
        a.shop_name = None;
        assert_eq!(
            render("Hi {{name}}, see you {{date}} at {{time}}", &a),
            "Hi Customer, see you 2024-01-10 at 15:00"
        );
        assert_eq!(
            render("{{shopName}}/{{service}}/{{staff}}", &a),
            "Shop/Service/Staff"
        );
    }

    #[test]
    fn it_replaces_every_occurrence() {
        assert_eq!(render("{{name}} {{name}}{{name}}", &appointment()), "Ana AnaAna");
    }

    #[test]
    fn it_keeps_unknown_placeholders() {
        assert_eq!(
            render("Hi {{name}}, {{unknown}} {{ name }} {name}", &appointment()),
            "Hi Ana, {{unknown}} {{ name }} {name}"
        );
    }

    #[test]
    fn it_does_not_substitute_recursively() {
        let mut a = appointment();
        a.customer_name = "{{date}}".into();
        assert_eq!(render("Hi {{name}}", &a), "Hi {{date}}");
    }

    #[test]
    fn it_supports_legacy_placeholders() {
        assert_eq!(
            render(
                "{{nome}} {{data}} {{hora}} {{barbearia}} {{servico}} {{barbeiro}}",
                &appointment()
            ),
            "Ana 2024-01-10 15:00 Barba Negra Beard trim Rafa"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = appointment();
        assert_eq!(
            render(DEFAULT_MESSAGE_TEMPLATE, &a),
            render(DEFAULT_MESSAGE_TEMPLATE, &a)
        );
        assert_eq!(
            render(DEFAULT_MESSAGE_TEMPLATE, &a),
            "Hi Ana 👋\nYour appointment is booked for 2024-01-10 at 15:00 at Barba Negra.\nIf anything comes up just let us know 😉"
        );
    }
}
