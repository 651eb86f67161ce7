//! Urgency classification — case-insensitive substring match against the
//! configured keyword set.

pub fn is_urgent(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
}
