//! Integration tests for the relay router.

mod common;

use common::{Sent, TestBed};
use pairing_directory::Role;
use relay_bot::messages;
use telegram_client::MessageContent;

/// Both sides registered: Alice (angel) at chat 100, Bob (mortal) at 200.
async fn registered_bed() -> TestBed {
    let bed = TestBed::new();
    bed.directory.register("a1", 100).await.unwrap();
    bed.directory.register("m1", 200).await.unwrap();
    bed
}

#[tokio::test]
async fn test_text_relays_verbatim() {
    let bed = registered_bed().await;

    bed.handle_text(Role::Angel, 100, "hello").await;

    assert_eq!(
        bed.mortal.sent(),
        vec![Sent::Text {
            chat_id: 200,
            text: "hello".into(),
        }]
    );
    assert!(bed.angel.sent().is_empty());
}

#[tokio::test]
async fn test_text_relays_in_both_directions() {
    let bed = registered_bed().await;

    bed.handle_text(Role::Mortal, 200, "thanks angel!").await;

    assert_eq!(
        bed.angel.sent(),
        vec![Sent::Text {
            chat_id: 100,
            text: "thanks angel!".into(),
        }]
    );
    assert!(bed.mortal.sent().is_empty());
}

#[tokio::test]
async fn test_photo_relays_with_caption_via_link() {
    let bed = registered_bed().await;

    bed.handle(
        Role::Angel,
        100,
        MessageContent::Photo {
            file_id: "p1".into(),
            caption: "look!".into(),
        },
    )
    .await;

    assert_eq!(
        bed.mortal.sent(),
        vec![Sent::Photo {
            chat_id: 200,
            url: "https://files.test/p1".into(),
            caption: "look!".into(),
        }]
    );
}

#[tokio::test]
async fn test_document_relay_preserves_file_name() {
    let bed = registered_bed().await;

    bed.handle(
        Role::Mortal,
        200,
        MessageContent::Document {
            file_id: "d1".into(),
            file_name: Some("notes.pdf".into()),
        },
    )
    .await;

    assert_eq!(
        bed.angel.sent(),
        vec![Sent::Document {
            chat_id: 100,
            url: "https://files.test/d1".into(),
            file_name: Some("notes.pdf".into()),
        }]
    );
}

#[tokio::test]
async fn test_sticker_relays_through_link() {
    let bed = registered_bed().await;

    bed.handle(
        Role::Angel,
        100,
        MessageContent::Sticker {
            file_id: "s1".into(),
        },
    )
    .await;

    assert_eq!(
        bed.mortal.sent(),
        vec![Sent::Sticker {
            chat_id: 200,
            url: "https://files.test/s1".into(),
        }]
    );
}

#[tokio::test]
async fn test_voice_and_video_note_route_to_matching_sends() {
    let bed = registered_bed().await;

    bed.handle(
        Role::Angel,
        100,
        MessageContent::Voice {
            file_id: "v1".into(),
        },
    )
    .await;
    bed.handle(
        Role::Angel,
        100,
        MessageContent::VideoNote {
            file_id: "n1".into(),
        },
    )
    .await;

    assert_eq!(
        bed.mortal.sent(),
        vec![
            Sent::Voice {
                chat_id: 200,
                url: "https://files.test/v1".into(),
            },
            Sent::VideoNote {
                chat_id: 200,
                url: "https://files.test/n1".into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_photo_from_unregistered_party_is_not_forwarded() {
    let bed = TestBed::new();

    bed.handle(
        Role::Angel,
        999,
        MessageContent::Photo {
            file_id: "p1".into(),
            caption: "look!".into(),
        },
    )
    .await;

    assert_eq!(
        bed.angel.sent(),
        vec![Sent::Text {
            chat_id: 999,
            text: messages::unregistered_counterpart(Role::Mortal),
        }]
    );
    assert!(bed.mortal.sent().is_empty());
}

#[tokio::test]
async fn test_text_to_unregistered_counterpart_gets_notice() {
    let bed = TestBed::new();
    bed.directory.register("a1", 100).await.unwrap();

    bed.handle_text(Role::Angel, 100, "anyone there?").await;

    assert_eq!(
        bed.angel.sent(),
        vec![Sent::Text {
            chat_id: 100,
            text: messages::unregistered_counterpart(Role::Mortal),
        }]
    );
    assert!(bed.mortal.sent().is_empty());
}

#[tokio::test]
async fn test_malformed_register_attempt_gets_reminder() {
    let bed = TestBed::new();

    // Not parseable as a command, but clearly a registration attempt.
    bed.handle_text(Role::Mortal, 555, "/regster m1").await;

    assert_eq!(
        bed.mortal.sent(),
        vec![Sent::Markdown {
            chat_id: 555,
            text: messages::register_reminder(),
        }]
    );
}

#[tokio::test]
async fn test_relay_failure_surfaces_generic_reply() {
    let bed = registered_bed().await;
    bed.mortal.fail_sends();

    bed.handle_text(Role::Angel, 100, "hello").await;

    // The failed forward never reaches Bob; Alice hears a generic failure.
    assert!(bed.mortal.sent().is_empty());
    assert_eq!(
        bed.angel.sent(),
        vec![Sent::Text {
            chat_id: 100,
            text: messages::internal_error(),
        }]
    );
}
