//! Approved message-template catalog
//!
//! The demo ships a fixed set of pre-approved templates compiled into the
//! binary; there is no template CRUD. Template bodies carry numbered
//! `{{1}}`, `{{2}}`, ... placeholders filled at send time.

use std::sync::OnceLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Marketing,
    Utility,
    Authentication,
    Transactional,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateParameter {
    pub name: &'static str,
    pub example: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub category: TemplateCategory,
    pub content: &'static str,
    pub parameters: Vec<TemplateParameter>,
    pub status: &'static str,
}

fn build_catalog() -> Vec<Template> {
    vec![
        Template {
            id: "tmpl_diwali_offer",
            name: "Diwali Offer",
            category: TemplateCategory::Marketing,
            content: "🎉 Happy Diwali {{1}}! Get {{2}}% OFF on all products. Use code: DIWALI2024. Valid till {{3}}. Shop now!",
            parameters: vec![
                TemplateParameter { name: "customer_name", example: "Rahul" },
                TemplateParameter { name: "discount", example: "30" },
                TemplateParameter { name: "validity", example: "31st Oct" },
            ],
            status: "approved",
        },
        Template {
            id: "tmpl_payment_reminder",
            name: "Payment Reminder",
            category: TemplateCategory::Utility,
            content: "Hi {{1}}, your payment of ₹{{2}} is due on {{3}}. Please pay to avoid late fees. Thank you!",
            parameters: vec![
                TemplateParameter { name: "customer_name", example: "Priya" },
                TemplateParameter { name: "amount", example: "5000" },
                TemplateParameter { name: "due_date", example: "25th Dec" },
            ],
            status: "approved",
        },
        Template {
            id: "tmpl_order_confirmation",
            name: "Order Confirmation",
            category: TemplateCategory::Transactional,
            content: "Thank you {{1}}! Your order #{{2}} has been confirmed. Estimated delivery: {{3}}. Track your order: {{4}}",
            parameters: vec![
                TemplateParameter { name: "customer_name", example: "Amit" },
                TemplateParameter { name: "order_id", example: "ORD123456" },
                TemplateParameter { name: "delivery_date", example: "20th Dec" },
                TemplateParameter { name: "tracking_link", example: "track.example.com/123" },
            ],
            status: "approved",
        },
        Template {
            id: "tmpl_appointment_reminder",
            name: "Appointment Reminder",
            category: TemplateCategory::Utility,
            content: "Hello {{1}}! This is a reminder for your appointment on {{2}} at {{3}}. Location: {{4}}. See you soon!",
            parameters: vec![
                TemplateParameter { name: "customer_name", example: "Sneha" },
                TemplateParameter { name: "date", example: "15th Dec" },
                TemplateParameter { name: "time", example: "3:00 PM" },
                TemplateParameter { name: "location", example: "Green Park Clinic" },
            ],
            status: "approved",
        },
        Template {
            id: "tmpl_welcome_message",
            name: "Welcome Message",
            category: TemplateCategory::Marketing,
            content: "Welcome to {{1}}, {{2}}! 🎊 We're excited to have you. Get {{3}}% OFF on your first purchase with code: WELCOME. Happy shopping!",
            parameters: vec![
                TemplateParameter { name: "company_name", example: "ShopHub" },
                TemplateParameter { name: "customer_name", example: "Vikram" },
                TemplateParameter { name: "discount", example: "20" },
            ],
            status: "approved",
        },
    ]
}

/// All templates in the catalog.
pub fn all() -> &'static [Template] {
    static CATALOG: OnceLock<Vec<Template>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

/// Look up a template by id.
pub fn get(template_id: &str) -> Option<&'static Template> {
    all().iter().find(|t| t.id == template_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_five_approved_templates() {
        assert_eq!(all().len(), 5);
        assert!(all().iter().all(|t| t.status == "approved"));
    }

    #[test]
    fn lookup_by_id() {
        let template = get("tmpl_payment_reminder").unwrap();
        assert_eq!(template.name, "Payment Reminder");
        assert_eq!(template.category, TemplateCategory::Utility);
        assert!(get("tmpl_unknown").is_none());
    }

    #[test]
    fn parameter_count_matches_placeholders() {
        for template in all() {
            for i in 1..=template.parameters.len() {
                assert!(
                    template.content.contains(&format!("{{{{{i}}}}}")),
                    "template {} is missing placeholder {{{{{i}}}}}",
                    template.id
                );
            }
        }
    }
}
