use super::types::*;

#[test]
fn test_parse_update_with_text() {
    let json = r#"{
        "ok": true,
        "result": [{
            "update_id": 1001,
            "message": {
                "message_id": 55,
                "from": {"id": 42, "first_name": "Alice", "username": "alice"},
                "chat": {"id": 42, "type": "private"},
                "text": "hello"
            }
        }]
    }"#;
    let resp: TgResponse<Vec<TgUpdate>> = serde_json::from_str(json).unwrap();
    assert!(resp.ok);
    let updates = resp.result.unwrap();
    assert_eq!(updates.len(), 1);
    let msg = updates[0].message.as_ref().unwrap();
    assert_eq!(msg.message_id, 55);
    assert_eq!(msg.chat.chat_type, "private");
    assert_eq!(msg.text.as_deref(), Some("hello"));
    assert!(msg.reply_to_message.is_none());
}

#[test]
fn test_parse_group_reply() {
    let json = r#"{
        "message_id": 90,
        "from": {"id": 7, "first_name": "Op"},
        "chat": {"id": -100123, "type": "supergroup"},
        "text": "we're on it",
        "reply_to_message": {
            "message_id": 88,
            "chat": {"id": -100123, "type": "supergroup"},
            "text": "relayed customer message"
        }
    }"#;
    let msg: TgMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.chat.chat_type, "supergroup");
    assert_eq!(msg.reply_to_message.unwrap().message_id, 88);
}

#[test]
fn test_parse_update_without_message() {
    // Edited messages, channel posts etc. arrive without a "message" key.
    let json = r#"{"update_id": 1002}"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    assert!(update.message.is_none());
}

#[test]
fn test_display_name_prefers_username() {
    let user = TgUser {
        id: 1,
        first_name: "Alice".into(),
        last_name: Some("Smith".into()),
        username: Some("alice".into()),
    };
    assert_eq!(display_name(&user), "@alice");
}

#[test]
fn test_display_name_falls_back_to_full_name() {
    let user = TgUser {
        id: 1,
        first_name: "Alice".into(),
        last_name: Some("Smith".into()),
        username: None,
    };
    assert_eq!(display_name(&user), "Alice Smith");

    let bare = TgUser {
        id: 2,
        first_name: "Bob".into(),
        last_name: None,
        username: None,
    };
    assert_eq!(display_name(&bare), "Bob");
}

#[test]
fn test_parse_send_message_result() {
    let json = r#"{"ok": true, "result": {"message_id": 777, "chat": {"id": -100123, "type": "supergroup"}}}"#;
    let resp: TgResponse<TgMessage> = serde_json::from_str(json).unwrap();
    assert!(resp.ok);
    assert_eq!(resp.result.unwrap().message_id, 777);
}

#[test]
fn test_parse_api_error() {
    let json = r#"{"ok": false, "description": "Forbidden: bot was blocked by the user"}"#;
    let resp: TgResponse<TgMessage> = serde_json::from_str(json).unwrap();
    assert!(!resp.ok);
    assert!(resp.description.unwrap().contains("blocked"));
}
