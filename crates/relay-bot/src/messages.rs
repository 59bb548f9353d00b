//! User-facing message templates.
//!
//! Pure string producers; handlers decide which chat each one goes to.

use pairing_directory::Role;

pub fn register_reminder() -> String {
    "You're not paired up yet. Send `/register <token>` (or `/r <token>`) \
     with the token from your welcome note to get started."
        .into()
}

pub fn register_failed(token: &str) -> String {
    format!(
        "Sorry, \"{token}\" didn't work. Check the token and try again, \
         or ask the organizers for help."
    )
}

pub fn already_registered(name: &str) -> String {
    format!(
        "You're already registered as {name}. \
         Send /deregister first if you need to switch accounts."
    )
}

pub fn register_success(name: &str, counterpart: Role) -> String {
    format!("Welcome, {name}! You're now connected with your {counterpart}.")
}

pub fn refer_to_bot(counterpart: Role) -> String {
    format!(
        "Anything you send in this chat goes straight to your {counterpart} \
         — text, photos, stickers, voice notes, all of it. \
         They'll never see who you are."
    )
}

pub fn status_hint() -> String {
    "Tip: send /status any time to see who you're paired with.".into()
}

pub fn pair_registered(registered: Role) -> String {
    format!("Your {registered} just joined! Say hi.")
}

pub fn deregister_success() -> String {
    "You've been unpaired. Your token can be registered again from another account.".into()
}

pub fn not_registered() -> String {
    "You're not registered, so there's nothing to undo.".into()
}

pub fn unregistered_counterpart(counterpart: Role) -> String {
    format!(
        "Your {counterpart} hasn't joined yet, so this message wasn't delivered. \
         Hang tight!"
    )
}

pub fn status_message(own_name: &str, counterpart_name: &str) -> String {
    format!("You're registered as {own_name}, paired with {counterpart_name}.")
}

pub fn help_message() -> String {
    r#"*Angel & Mortal relay*

Everything you send here is forwarded anonymously to your pair.

*Commands:*
/register <token> - claim your pairing token (short form: /r)
/status - show who you're paired with
/deregister - release your token
/help - show this message"#
        .into()
}

pub fn welcome(name: Option<&str>, counterpart: Role) -> String {
    match name {
        Some(name) => format!("Hello {name}! This is your anonymous line to your {counterpart}."),
        None => format!("Hello! This is your anonymous line to your {counterpart}."),
    }
}

pub fn internal_error() -> String {
    "Sorry, something went wrong on our side. Please try again.".into()
}
