//! Reply strategies for the chat assistant

/// Produces a reply for a user message
pub trait Responder: Send + Sync {
    fn respond(&self, message: &str) -> String;
}

const GREETING: &str = "Hello! How can I help you today?";
const PRODUCT_HELP: &str = "I can help you search for products. What are you looking for?";
const PRICE_HELP: &str = "I can show you our current prices. Which product are you interested in?";
const CAPABILITIES: &str = "I can help you with:\n- Product search\n- Price information\n- Order status\n- General inquiries";
const FALLBACK: &str = "I'm not sure I understand. Could you please rephrase your question?";

/// Ordered keyword rules; the first rule with a matching keyword wins
const RULES: &[(&[&str], &str)] = &[
    (&["hello", "hi"], GREETING),
    (&["product", "search"], PRODUCT_HELP),
    (&["price"], PRICE_HELP),
    (&["help"], CAPABILITIES),
];

/// Fixed keyword matching over the lowercased message.
///
/// Matching is plain substring containment, so "hi" also fires inside
/// words like "shipping".
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResponder;

impl Responder for KeywordResponder {
    fn respond(&self, message: &str) -> String {
        let message = message.to_lowercase();

        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| message.contains(k)))
            .map_or(FALLBACK, |&(_, reply)| reply)
            .to_string()
    }
}
