//! Prompt templates for field extraction and error explanation.
//!
//! Every call the engine makes to the language model goes through one of
//! these. Extraction output is treated as untrusted and re-validated;
//! explanation output is shown to the user verbatim.

use reel_api::ApiError;

/// Instruction for pulling a campaign name out of a free-text message.
pub const CAMPAIGN_NAME: &str =
    "Extract the campaign name from the user's message. Return only the name, nothing else.";

/// Instruction for normalizing an objective answer to the two wire values.
pub const OBJECTIVE: &str = "\
The user wants to set an ad objective.
Valid options: 'Traffic' or 'Conversions'

User might say things like:
- 'sales' -> Conversions
- 'traffic' -> Traffic
- 'clicks' -> Traffic
- 'purchases' -> Conversions
- 'i want sales' -> Conversions

Return ONLY 'Traffic' or 'Conversions'";

/// Wrap a field instruction around the user's raw message.
pub fn extract(instruction: &str, user_input: &str) -> String {
    format!(
        "{instruction}\n\nUser said: \"{user_input}\"\n\nReturn ONLY the extracted value, nothing else."
    )
}

/// Ask for a short explanation of a music rejection.
pub fn explain_music_error(error: &ApiError) -> String {
    format!(
        "The ads platform rejected a music selection with this error:\n\
         \"{}\"\n\n\
         Explain to the user in simple, friendly terms:\n\
         1. What this error means\n\
         2. Why it might have happened\n\
         3. What they should do next\n\n\
         Keep it under 3 sentences.",
        error.message
    )
}

/// Ask for a short explanation of an authorization failure.
pub fn explain_oauth_error(error: &ApiError) -> String {
    format!(
        "OAuth authorization failed with this error:\n\
         \"{}\"\n\n\
         Explain to the user:\n\
         1. What this means\n\
         2. How to fix it (check credentials, scopes, etc.)\n\n\
         Keep it under 3 sentences.",
        error.message
    )
}

/// Ask for a short explanation of an ads submission error.
pub fn explain_ads_error(error: &ApiError) -> String {
    format!(
        "The ads platform returned an error:\n\
         Code: {}\n\
         Message: {}\n\n\
         Explain to the user:\n\
         1. What went wrong in simple terms\n\
         2. What specifically they need to fix\n\
         3. Whether they can retry or need to start over\n\n\
         Be helpful and specific. Keep it under 4 sentences.",
        error.code, error.message
    )
}
