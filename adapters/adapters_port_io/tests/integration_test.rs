//! Integration tests for adapters_port_io
//!
//! Runs the bundled handlers end to end over in-memory byte streams.

use std::io::Cursor;

use adapters_port_io::{PortError, PortReader, PortWriter, TermPort};
use entities_data_handling::Term;
use infrastructure_external_format::{decode, encode, CodecConfig};
use usecases_port_server::{serve, Calculator, Echo, HandlerError, ServerError};

fn frames(terms: &[Term], config: &CodecConfig) -> Vec<u8> {
    let mut writer = PortWriter::new(Vec::new());
    for term in terms {
        writer.write_message(&encode(term, config).unwrap()).unwrap();
    }
    writer.into_inner()
}

fn replies(output: Vec<u8>, config: &CodecConfig) -> Vec<Term> {
    let mut reader = PortReader::new(Cursor::new(output), config.buffer_capacity);
    let mut terms = Vec::new();
    while let Some(frame) = reader.read_message().unwrap() {
        terms.push(decode(&frame, config).unwrap());
    }
    terms
}

fn call(command: &str, argument: Term) -> Term {
    Term::tuple(vec![Term::atom(command), argument])
}

#[test]
fn test_calculator_over_frames() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = CodecConfig::default();
    let input = frames(
        &[
            Term::from(0),
            call("add", Term::from(300)),
            call("rem", Term::from(1)),
            call("get", Term::Nil),
            call("pow", Term::from(2)),
        ],
        &config,
    );

    let mut port = TermPort::new(Cursor::new(input), Vec::new(), config.clone());
    serve(&mut port, &mut Calculator).unwrap();
    let (_, output) = port.into_inner();

    let replies = replies(output, &config);
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0], Term::from(299));

    let error = replies[1].as_tuple().unwrap();
    assert_eq!(error[0], Term::atom("error"));
    let details = error[1].as_tuple().unwrap();
    assert_eq!(details[0], Term::atom("user"));
    assert_eq!(details[1], Term::from(0));
    assert_eq!(details[3], Term::binary(b"unexpected request".to_vec()));
    assert_eq!(details[4], Term::atom("nil"));
}

#[test]
fn test_error_reply_under_erlang_convention() {
    let config = CodecConfig::default()
        .with_convention(infrastructure_external_format::Convention::Erlang)
        .with_null_values(true);
    let input = frames(&[Term::Nil, Term::atom("what")], &config);

    let mut port = TermPort::new(Cursor::new(input), Vec::new(), config.clone());
    serve(&mut port, &mut Calculator).unwrap();
    let (_, output) = port.into_inner();

    let replies = replies(output, &config);
    assert_eq!(replies, vec![HandlerError::new("unexpected request").to_term()]);
}

#[test]
fn test_echo_preserves_terms() {
    let config = CodecConfig::default();
    let sent = vec![
        Term::tuple(vec![Term::atom("ping"), Term::from(-5)]),
        Term::list(vec![Term::Float64(1.25), Term::binary(vec![0, 255])]),
    ];
    let mut input_terms = vec![Term::Nil];
    input_terms.extend(sent.iter().cloned());
    let input = frames(&input_terms, &config);

    let mut port = TermPort::new(Cursor::new(input), Vec::new(), config.clone());
    serve(&mut port, &mut Echo).unwrap();
    let (_, output) = port.into_inner();
    assert_eq!(replies(output, &config), sent);
}

#[test]
fn test_truncated_stream_is_a_port_error() {
    let config = CodecConfig::default();
    let mut input = frames(&[Term::Nil], &config);
    input.extend_from_slice(&[0, 0, 0, 10, 131]);

    let mut port = TermPort::new(Cursor::new(input), Vec::new(), config);
    let err = serve(&mut port, &mut Echo).unwrap_err();
    assert!(matches!(
        err,
        ServerError::Port(PortError::TruncatedFrame { expected: 10, received: 1 })
    ));
}
