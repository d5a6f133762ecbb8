//! Field-level validation rules.
//!
//! Stateless and deterministic: same input, same outcome, no side effects.

use reel_api::Objective;

/// Campaign name: at least 3 characters after trimming.
pub fn campaign_name(name: &str) -> Result<(), &'static str> {
    if name.trim().chars().count() < 3 {
        return Err("Campaign name must be at least 3 characters long.");
    }
    Ok(())
}

/// Objective: exactly `Traffic` or `Conversions`, case-sensitive.
pub fn objective(raw: &str) -> Result<Objective, &'static str> {
    raw.parse()
        .map_err(|_| "Objective must be either 'Traffic' or 'Conversions'.")
}

/// Ad text: non-empty after trimming, at most 100 characters raw.
pub fn ad_text(text: &str) -> Result<(), &'static str> {
    if text.trim().is_empty() {
        return Err("Ad text is required.");
    }
    if text.chars().count() > 100 {
        return Err("Ad text must be 100 characters or fewer.");
    }
    Ok(())
}

/// CTA: non-empty after trimming.
pub fn cta(text: &str) -> Result<(), &'static str> {
    if text.trim().is_empty() {
        return Err("CTA is required.");
    }
    Ok(())
}
