//! Messaging links and default outreach copy for guests.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

const THREAD_LINK_PREFIX: &str = "https://www.facebook.com/messages/t/";
const THREAD_LINK_MARKER: &str = "facebook.com/messages/t/";
const PROFILE_ID_MARKER: &str = "profile.php?id=";
const MESSAGES_HOME: &str = "https://www.facebook.com/messages/";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    Bride,
    Groom,
    #[default]
    Both,
}

/// Who is asking, used to sign generated messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeddingDetails {
    pub bride_name: String,
    pub groom_name: String,
    pub wedding_date: Option<String>,
    pub message_sender: MessageSender,
}

impl Default for WeddingDetails {
    fn default() -> Self {
        Self {
            bride_name: "Jessica".to_string(),
            groom_name: "Charles".to_string(),
            wedding_date: None,
            message_sender: MessageSender::Both,
        }
    }
}

impl WeddingDetails {
    pub fn couple_name(&self) -> String {
        match self.message_sender {
            MessageSender::Bride => self.bride_name.clone(),
            MessageSender::Groom => self.groom_name.clone(),
            MessageSender::Both => format!("{} & {}", self.groom_name, self.bride_name),
        }
    }
}

/// Builds a Messenger link for a guest.
///
/// A usable profile field (`profile.php?id=NNN`, `facebook.com/<user>`, a bare
/// username, or an existing thread link) yields a direct thread link; anything
/// else falls back to [`messenger_search_link`]. A non-empty `prefill` is
/// appended as a `text` parameter.
pub fn messenger_link(
    profile: Option<&str>,
    guest_name: Option<&str>,
    prefill: Option<&str>,
) -> String {
    let Some(profile) = profile.map(str::trim).filter(|p| !p.is_empty()) else {
        return messenger_search_link(guest_name, prefill);
    };

    let base = if profile.contains(THREAD_LINK_MARKER) {
        profile.to_string()
    } else {
        match profile_identifier(profile) {
            Some(identifier) => format!("{THREAD_LINK_PREFIX}{identifier}"),
            None => return messenger_search_link(guest_name, prefill),
        }
    };

    with_text(base, prefill)
}

fn profile_identifier(profile: &str) -> Option<String> {
    if let Some(idx) = profile.find(PROFILE_ID_MARKER) {
        let digits: String = profile[idx + PROFILE_ID_MARKER.len()..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        return (!digits.is_empty()).then_some(digits);
    }

    if profile.contains("facebook.com/") {
        let candidate = if profile.starts_with("http") {
            profile.to_string()
        } else {
            format!("https://{profile}")
        };
        let parsed = Url::parse(&candidate).ok()?;
        let path = parsed.path().trim_matches('/');
        if path.is_empty() || path.starts_with("profile.php") {
            return None;
        }
        return Some(path.to_string());
    }

    let bare = profile
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    bare.then(|| profile.to_string())
}

/// Best-effort link when no profile is known: an `m.me` short link guessed from
/// the name, else the compose page, else the inbox.
pub fn messenger_search_link(guest_name: Option<&str>, prefill: Option<&str>) -> String {
    if let Some(name) = guest_name {
        let clean: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        if clean.chars().count() > 3 {
            return with_text(format!("https://m.me/{clean}"), prefill);
        }
    }

    match prefill.filter(|m| !m.is_empty()) {
        Some(message) => format!(
            "https://www.facebook.com/messages/compose?text={}",
            urlencoding::encode(message)
        ),
        None => MESSAGES_HOME.to_string(),
    }
}

fn with_text(base: String, prefill: Option<&str>) -> String {
    match prefill.filter(|m| !m.is_empty()) {
        Some(message) => {
            let separator = if base.contains('?') { '&' } else { '?' };
            format!("{base}{separator}text={}", urlencoding::encode(message))
        }
        None => base,
    }
}

pub fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("there")
}

const MESSAGE_TEMPLATES: &[&str] = &[
    "Hey {first}! Need your address for our save the date, or it'll show up late! Where should it go?",
    "Yo {first}! The save the date needs somewhere to land. Drop your address so we know!",
    "{first}! Frantically finding fabulous forwarding facts for our save the date festivities!",
    "{first}, we're assembling a team of carrier pigeons for the save the date. Save them the trip: what's your address?",
    "Listen {first}, there's a save the date with your name on it. Where do we aim this thing?",
    "URGENT {first}! Save the date emergency! Deploy your mailing address immediately!",
    "{first}, the fate of our save the date rests in your hands! Address, please!",
    "Breaking news {first}: address needed for a top secret save the date mission!",
    "{first}, our save the date is feeling lonely without your address on it!",
    "Psst {first}... got any addresses? Asking for a save the date card.",
    "Quick {first}, where should this fancy save the date paper find you?",
    "{first}, if a save the date were to magically appear, where would it go?",
];

/// Deterministic, per-name outreach message used when no drafted message exists.
pub fn fallback_message(first_name: &str, wedding: &WeddingDetails) -> String {
    let digest = Sha256::digest(first_name.to_lowercase().as_bytes());
    let seed = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let template = MESSAGE_TEMPLATES[seed as usize % MESSAGE_TEMPLATES.len()];

    let mut message = template.replace("{first}", first_name);
    message.push_str(" - ");
    message.push_str(&wedding.couple_name());
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_profile_becomes_thread_link() {
        assert_eq!(
            messenger_link(
                Some("https://www.facebook.com/profile.php?id=100012345&ref=x"),
                None,
                None
            ),
            "https://www.facebook.com/messages/t/100012345"
        );
    }

    #[test]
    fn vanity_url_and_bare_username_become_thread_links() {
        assert_eq!(
            messenger_link(Some("facebook.com/jane.doe/"), None, None),
            "https://www.facebook.com/messages/t/jane.doe"
        );
        assert_eq!(
            messenger_link(Some("  jane.doe "), None, None),
            "https://www.facebook.com/messages/t/jane.doe"
        );
    }

    #[test]
    fn existing_thread_link_is_kept_and_gets_prefill() {
        assert_eq!(
            messenger_link(
                Some("https://www.facebook.com/messages/t/jane.doe"),
                None,
                Some("Hi there!")
            ),
            "https://www.facebook.com/messages/t/jane.doe?text=Hi%20there%21"
        );
    }

    #[test]
    fn prefill_extends_existing_query() {
        assert_eq!(
            messenger_link(
                Some("https://www.facebook.com/messages/t/jane?ref=x"),
                None,
                Some("Hi")
            ),
            "https://www.facebook.com/messages/t/jane?ref=x&text=Hi"
        );
    }

    #[test]
    fn unusable_profile_falls_back_to_name_guess() {
        assert_eq!(
            messenger_link(Some("not a profile"), Some("Mary O'Brien"), None),
            "https://m.me/maryobrien"
        );
        assert_eq!(
            messenger_link(None, Some("Al"), None),
            "https://www.facebook.com/messages/"
        );
        assert_eq!(
            messenger_link(None, Some("Al"), Some("hello")),
            "https://www.facebook.com/messages/compose?text=hello"
        );
    }

    #[test]
    fn first_name_defaults_to_there() {
        assert_eq!(first_name("Ada Lovelace"), "Ada");
        assert_eq!(first_name("   "), "there");
    }

    #[test]
    fn fallback_message_is_stable_and_signed() {
        let wedding = WeddingDetails::default();
        let first = fallback_message("Ada", &wedding);
        let second = fallback_message("ada", &wedding);

        assert!(first.contains("Ada"));
        assert!(first.ends_with(" - Charles & Jessica"));
        assert_eq!(
            first.replace("Ada", "ada"),
            second,
            "same name in any case picks the same template"
        );
    }

    #[test]
    fn couple_name_follows_sender() {
        let wedding = WeddingDetails {
            message_sender: MessageSender::Bride,
            ..WeddingDetails::default()
        };
        assert_eq!(wedding.couple_name(), "Jessica");
    }
}
