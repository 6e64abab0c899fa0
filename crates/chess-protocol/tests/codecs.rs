// crates/chess-protocol/tests/codecs.rs
use chess_core::{InputMessage, MoveRequest, OutputMessage, PromotionPiece, Role, Seat};
use chess_protocol::wire_types::{
    EVENT_BOARD_STATE, EVENT_GAME_OVER, EVENT_INVALID_MOVE, EVENT_MOVE, EVENT_PLAYER_ROLE,
};
use chess_protocol::{
    decode_input, decode_output, encode_input, encode_output, json_codec, text_codec,
    ProtocolError, WireFormat, MAX_LINE_LEN,
};

fn move_of(msg: Option<InputMessage>) -> MoveRequest {
    match msg {
        Some(InputMessage::Move(m)) => m,
        None => panic!("expected a move"),
    }
}

#[test]
fn json_move_with_and_without_promotion() {
    let m = move_of(decode_input(WireFormat::Json, r#"{"event":"move","data":{"from":"e2","to":"e4"}}"#).unwrap());
    assert_eq!(m.to_string(), "e2e4");
    assert_eq!(m.promotion, None);

    let m = move_of(
        decode_input(
            WireFormat::Json,
            r#"{"event":"move","data":{"from":"b7","to":"b8","promotion":"n"}}"#,
        )
        .unwrap(),
    );
    assert_eq!(m.promotion, Some(PromotionPiece::Knight));
}

#[test]
fn json_rejects_malformed_input() {
    let cases = [
        r#"{"event":"move","data":{"from":"e9","to":"e4"}}"#,
        r#"{"event":"move","data":{"from":"e2"}}"#,
        r#"{"event":"resign"}"#,
        r#"{"event":"move","data":{"from":"e7","to":"e8","promotion":"k"}}"#,
        "not json",
    ];
    for line in cases {
        assert!(decode_input(WireFormat::Json, line).is_err(), "{} should fail", line);
    }

    assert!(matches!(
        decode_input(WireFormat::Json, r#"{"event":"move","data":{"from":"z1","to":"e4"}}"#),
        Err(ProtocolError::InvalidMove(_))
    ));
    assert!(decode_input(WireFormat::Json, "   ").unwrap().is_none());
}

#[test]
fn json_output_matches_event_names() {
    let role = encode_output(WireFormat::Json, &OutputMessage::PlayerRole(Role::Spectator)).unwrap();
    assert_eq!(role, r#"{"event":"playerRole","data":"Spectator"}"#);

    let invalid = encode_output(WireFormat::Json, &OutputMessage::InvalidMove("Not your turn".into())).unwrap();
    assert_eq!(invalid, r#"{"event":"invalidMove","data":"Not your turn"}"#);

    let over = OutputMessage::GameOver("Checkmate! White wins!".into());
    let line = encode_output(WireFormat::Json, &over).unwrap();
    assert_eq!(line, r#"{"event":"gameOver","data":"Checkmate! White wins!"}"#);
    assert_eq!(decode_output(WireFormat::Json, &line).unwrap(), over);

    assert!(json_codec::decode_output(r#"{"event":"playerRole","data":"X"}"#).is_err());
}

#[test]
fn json_events_use_shared_names() {
    let outputs = [
        (OutputMessage::PlayerRole(Role::Player(Seat::Black)), EVENT_PLAYER_ROLE),
        (OutputMessage::BoardState("8/8/8/8/8/8/8/K6k w - - 0 1".into()), EVENT_BOARD_STATE),
        (OutputMessage::InvalidMove("Invalid move".into()), EVENT_INVALID_MOVE),
        (OutputMessage::GameOver("Game drawn!".into()), EVENT_GAME_OVER),
    ];
    for (msg, event) in outputs {
        let line = json_codec::encode_output(&msg).unwrap();
        assert!(line.starts_with(&format!(r#"{{"event":"{}","#, event)), "{}", line);
        assert_eq!(json_codec::decode_output(&line).unwrap(), msg);
    }

    let request = InputMessage::Move(MoveRequest::from_coordinate("g1f3").unwrap());
    let line = json_codec::encode_input(&request).unwrap();
    assert!(line.starts_with(&format!(r#"{{"event":"{}","#, EVENT_MOVE)), "{}", line);

    assert!(matches!(
        json_codec::decode_input(r#"{"event":"resign","data":{}}"#),
        Err(ProtocolError::UnknownCommand(event)) if event == "resign"
    ));
    assert!(matches!(
        json_codec::decode_output(r#"{"event":"chat","data":"hi"}"#),
        Err(ProtocolError::UnknownCommand(_))
    ));
}

#[test]
fn json_client_encoding_is_accepted_by_server_decoding() {
    let request = MoveRequest::from_coordinate("a7a8q").unwrap();
    let line = encode_input(WireFormat::Json, &InputMessage::Move(request)).unwrap();
    assert_eq!(line, r#"{"event":"move","data":{"from":"a7","to":"a8","promotion":"q"}}"#);
    assert_eq!(move_of(decode_input(WireFormat::Json, &line).unwrap()), request);
}

#[test]
fn text_input_forms() {
    assert!(text_codec::parse_input_line("").unwrap().is_none());
    assert!(text_codec::parse_input_line("# comment").unwrap().is_none());

    let m = move_of(text_codec::parse_input_line("move e2 e4").unwrap());
    assert_eq!(m.to_string(), "e2e4");

    let m = move_of(text_codec::parse_input_line("MOVE e7 e8 Q").unwrap());
    assert_eq!(m.promotion, Some(PromotionPiece::Queen));

    let m = move_of(text_codec::parse_input_line("  g1f3  ").unwrap());
    assert_eq!(m.to_string(), "g1f3");

    assert!(matches!(
        text_codec::parse_input_line("resign"),
        Err(ProtocolError::UnknownCommand(_))
    ));
    assert!(matches!(
        text_codec::parse_input_line("move e2"),
        Err(ProtocolError::InvalidField(_))
    ));
    assert!(matches!(
        text_codec::parse_input_line("e2e9"),
        Err(ProtocolError::InvalidMove(_))
    ));
}

#[test]
fn text_output_lines() {
    let lines = [
        (OutputMessage::PlayerRole(Role::Player(Seat::White)), "role W"),
        (OutputMessage::BoardState("8/8/8/8/8/8/8/K6k w - - 0 1".into()), "board 8/8/8/8/8/8/8/K6k w - - 0 1"),
        (OutputMessage::InvalidMove("Spectators cannot move".into()), "invalid Spectators cannot move"),
        (OutputMessage::GameOver("Game drawn!".into()), "gameover Game drawn!"),
    ];
    for (msg, expected) in lines {
        let line = encode_output(WireFormat::Text, &msg).unwrap();
        assert_eq!(line, expected);
        assert_eq!(decode_output(WireFormat::Text, &line).unwrap(), msg);
    }

    assert!(text_codec::parse_output_line("board").is_err());
    assert!(text_codec::parse_output_line("hello there").is_err());
}

#[test]
fn overlong_lines_are_rejected_before_decoding() {
    let line = "a".repeat(MAX_LINE_LEN + 1);
    for format in [WireFormat::Json, WireFormat::Text] {
        assert!(matches!(
            decode_input(format, &line),
            Err(ProtocolError::LineTooLong(n)) if n == MAX_LINE_LEN + 1
        ));
    }
}

#[test]
fn wire_format_names() {
    assert_eq!("json".parse::<WireFormat>().unwrap(), WireFormat::Json);
    assert_eq!(" TEXT ".parse::<WireFormat>().unwrap(), WireFormat::Text);
    assert!("binary".parse::<WireFormat>().is_err());
    assert_eq!(WireFormat::default().to_string(), "json");
}
