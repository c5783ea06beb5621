use rfc_http_validate::{
    Event, FieldKind, FieldTypeRegistry, GrammarChecker, NullReporter, Recorder, RegistryBuilder,
    Session, format_location,
};

fn location(pinpoint: Option<&str>) -> String {
    format_location("test.md", 1, pinpoint)
}

/// Validate `message` against `registry`; return (errors, events).
fn validate_with(registry: &FieldTypeRegistry, message: &str) -> (usize, Recorder) {
    let mut recorder = Recorder::new();
    let mut session = Session::new(registry, &mut recorder);
    let errors = session.validate(message, &location);
    assert_eq!(errors, session.error_count());
    (errors, recorder)
}

fn validate(message: &str) -> (usize, Recorder) {
    validate_with(&FieldTypeRegistry::baseline(), message)
}

// =========================================================================
// Whole messages
// =========================================================================

#[test]
fn clean_request() {
    let (errors, recorder) = validate(
        "GET /resource HTTP/1.1\n\
         Host: www.example.com\n\
         Accept: text/html;q=0.9, application/json\n\
         User-Agent: curl/8.0\n",
    );
    assert_eq!(errors, 0);
    assert_eq!(
        recorder.successes(),
        [
            "test.md:1 'host: www.example.com'",
            "test.md:1 'accept: text/html;q=0.9, application/json'",
        ]
    );
    assert_eq!(recorder.skips(), ["test.md:1 'user-agent'"]);
}

#[test]
fn clean_response_with_body() {
    let (errors, recorder) = validate(
        "HTTP/1.1 200 OK\n\
         Content-Type: application/json\n\
         Cache-Control: max-age=3600, must-revalidate\n\
         \n\
         {\"hello\": \"world\"}\n",
    );
    assert_eq!(errors, 0);
    assert_eq!(recorder.successes().len(), 2);
    assert!(recorder.events.contains(&Event::Status {
        message: "ignoring HTTP message body".into()
    }));
}

#[test]
fn headers_only_block() {
    let (errors, recorder) = validate("Example-Field: 1\nOther: ?0\n");
    assert_eq!(errors, 0);
    assert_eq!(recorder.skips().len(), 2);
}

#[test]
fn blank_edges_are_ignored() {
    let (errors, _) = validate("\n\n\nGET / HTTP/1.1\nHost: example.com\n\n\n");
    assert_eq!(errors, 0);
}

#[test]
fn crlf_text_is_accepted() {
    let (errors, recorder) = validate("GET / HTTP/1.1\r\nHost: example.com\r\n\r\n");
    assert_eq!(errors, 0);
    assert_eq!(recorder.successes(), ["test.md:1 'host: example.com'"]);
}

#[test]
fn empty_message() {
    for raw in ["", "\n\n", "  \n"] {
        let (errors, recorder) = validate(raw);
        assert_eq!(errors, 1, "{raw:?}");
        assert_eq!(recorder.errors(), ["Empty http-message"]);
    }
}

// =========================================================================
// Start line
// =========================================================================

#[test]
fn status_code_out_of_range() {
    let (errors, recorder) = validate("HTTP/1.1 999 Nope\nAge: 1\n");
    assert_eq!(errors, 1);
    assert_eq!(
        recorder.events[0],
        Event::Error {
            subject: "test.md:1 '999'".into(),
            message: "Status code out of range".into(),
        }
    );
    // Fields are still checked.
    assert_eq!(recorder.successes(), ["test.md:1 'age: 1'"]);
}

#[test]
fn unknown_method_is_not_fatal() {
    let (errors, recorder) = validate("FOO / HTTP/1.1\nAge: 1\n");
    assert_eq!(errors, 1);
    assert_eq!(recorder.errors(), ["Method not recognised"]);
    assert_eq!(recorder.successes().len(), 1);
}

#[test]
fn indented_start_line() {
    let (errors, recorder) = validate("  GET / HTTP/1.1\nHost: a\n");
    // The indented line is left for the field stage, which cannot fold it.
    assert_eq!(errors, 2);
    assert_eq!(
        recorder.errors(),
        [
            "Start line starts with whitespace",
            "First header field line '  GET / HTTP/1.1' starts with whitespace",
        ]
    );
}

// =========================================================================
// Field lines
// =========================================================================

#[test]
fn repeated_fields_are_checked_once_combined() {
    let (errors, recorder) = validate("GET / HTTP/1.1\nVary: accept\nVary: accept-encoding\n");
    assert_eq!(errors, 0);
    assert_eq!(recorder.successes(), ["test.md:1 'vary: accept, accept-encoding'"]);
}

#[test]
fn folded_fields_are_checked_once_joined() {
    let (errors, recorder) = validate("GET / HTTP/1.1\nCache-Control: max-age=60,\n  private\n");
    assert_eq!(errors, 0);
    assert_eq!(recorder.successes(), ["test.md:1 'cache-control: max-age=60, private'"]);
}

#[test]
fn body_without_headers() {
    let (errors, recorder) = validate("HTTP/1.1 204 No Content\n\nbody\n");
    assert_eq!(errors, 1);
    assert_eq!(
        recorder.events,
        [Event::Error {
            subject: "test.md:1".into(),
            message: "Body without headers".into(),
        }]
    );
}

#[test]
fn non_field_line_stops_the_message() {
    let (errors, recorder) = validate("GET / HTTP/1.1\nHost: example.com\noops\nAge: x y\n");
    assert_eq!(errors, 1);
    assert_eq!(recorder.errors(), ["Non-field line 'oops' in content"]);
    assert!(recorder.successes().is_empty());
}

#[test]
fn whitespace_before_colon_is_reported_and_checked() {
    let (errors, recorder) = validate("GET / HTTP/1.1\nAge : 10\n");
    assert_eq!(errors, 1);
    assert_eq!(
        recorder.events[0],
        Event::Error {
            subject: "test.md:1 'Age'".into(),
            message: "Whitespace between field name and colon".into(),
        }
    );
    assert_eq!(recorder.successes(), ["test.md:1 'age: 10'"]);
}

#[test]
fn whitespace_inside_field_name_is_reported() {
    let (errors, recorder) = validate("GET / HTTP/1.1\nFoo Bar: x\nAge: 1\n");
    assert_eq!(errors, 1);
    assert_eq!(
        recorder.events[0],
        Event::Error {
            subject: "test.md:1 'Foo Bar'".into(),
            message: "Whitespace in field name".into(),
        }
    );
    assert_eq!(recorder.skips(), ["test.md:1 'foo bar'"]);
    assert_eq!(recorder.successes(), ["test.md:1 'age: 1'"]);
}

// =========================================================================
// Field values
// =========================================================================

#[test]
fn bad_value_does_not_stop_later_fields() {
    let (errors, recorder) = validate(
        "HTTP/1.1 200 OK\nAge: one two\nCache-Control: max-age=60\nPriority: u=9000000000000000\n",
    );
    assert_eq!(errors, 2);
    assert_eq!(recorder.successes(), ["test.md:1 'cache-control: max-age=60'"]);
}

#[test]
fn non_ascii_item_is_an_error() {
    let registry = RegistryBuilder::empty().item("X-Name").build();
    let (errors, recorder) = validate_with(&registry, "X-Name: \"Jos\u{e9}\"\n");
    assert_eq!(errors, 1);
    assert!(recorder.successes().is_empty());
    assert!(recorder.errors()[0].starts_with("non-ASCII byte"));
}

#[test]
fn user_types_override_baseline() {
    let message = "HTTP/1.1 200 OK\nCache-Control: max-age=60\nX-Flags: a, b\n";

    let (errors, _) = validate(message);
    assert_eq!(errors, 0);

    let registry = RegistryBuilder::new()
        .item("cache-control")
        .list("x-flags")
        .build();
    let (errors, recorder) = validate_with(&registry, message);
    assert_eq!(errors, 1);
    assert_eq!(recorder.events.len(), 2);
}

#[test]
fn registry_build_is_repeatable() {
    let json = br#"{"Cache-Control": "list", "X-A": "item"}"#;
    let build = || {
        RegistryBuilder::new()
            .load_json(&json[..])
            .unwrap()
            .dictionary("X-A")
            .build()
    };
    let first = build();
    assert_eq!(first, build());
    assert_eq!(first.get("cache-control"), Some(FieldKind::List));
    assert_eq!(first.get("x-a"), Some(FieldKind::Dictionary));
}

// =========================================================================
// RFC 8792 wrapping
// =========================================================================

#[test]
fn wrapped_message_is_unwrapped_first() {
    let (errors, recorder) = validate(
        "NOTE: '\\' line wrapping per RFC 8792\n\
         \n\
         HTTP/1.1 200 OK\n\
         Cache-Control: max-age=60, \\\n\
         \x20   private\n",
    );
    assert_eq!(errors, 0);
    assert_eq!(recorder.successes(), ["test.md:1 'cache-control: max-age=60, private'"]);
}

// =========================================================================
// Session
// =========================================================================

#[test]
fn errors_accumulate_across_messages() {
    let registry = FieldTypeRegistry::baseline();
    let mut sink = NullReporter;
    let mut session = Session::new(&registry, &mut sink);
    assert_eq!(session.validate("GET / HTTP/1.1\nAge: 1\n", &location), 0);
    assert_eq!(session.validate("HTTP/1.1 42 Odd\n", &location), 1);
    assert_eq!(session.validate("", &location), 1);
    assert_eq!(session.validate("BREW / HTTP/1.0 x\n", &location), 3);
    assert_eq!(session.error_count(), 5);
}

#[test]
fn structured_fields_block() {
    let registry = FieldTypeRegistry::baseline();
    let mut recorder = Recorder::new();
    let mut session = Session::new(&registry, &mut recorder);
    let errors = session.validate_fields(
        "Priority: u=2\n\nPriority: i\nCache-Status: ExampleCache; hit\n",
        &location,
    );
    assert_eq!(errors, 0);
    assert_eq!(
        recorder.successes(),
        [
            "test.md:1 'priority: u=2, i'",
            "test.md:1 'cache-status: ExampleCache; hit'",
        ]
    );
}

struct RejectAll;

impl GrammarChecker for RejectAll {
    fn check(&self, kind: FieldKind, _value: &[u8]) -> Result<(), String> {
        Err(format!("{kind} rejected"))
    }
}

#[test]
fn custom_grammar_checker() {
    let registry = RegistryBuilder::empty().list("x").build();
    let mut recorder = Recorder::new();
    let mut session = Session::with_checker(&registry, &RejectAll, &mut recorder);
    assert_eq!(session.validate("X: a\nY: b\n", &location), 1);
    assert_eq!(recorder.errors(), ["list rejected"]);
    assert_eq!(recorder.skips(), ["test.md:1 'y'"]);
}
