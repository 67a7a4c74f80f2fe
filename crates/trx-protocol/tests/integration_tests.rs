//! End-to-end tests for the TRX codec: request bytes in, response XML out

use anyhow::{bail, Context};
use trx_protocol::{
    decode_local, decode_request, encode_response, encode_response_with, exception_message,
    run_transform, EncodeOptions, ProtocolError, Request, Response, UiMessageType,
    GENERIC_ERROR_MESSAGE,
};

fn request_xml(entity_type: &str, value: &str, extra: &str) -> String {
    format!(
        r#"<MaltegoMessage>
  <MaltegoTransformRequestMessage>
    <Entities>
      <Entity Type="{}">
        <Value>{}</Value>
        <Weight>100</Weight>
        {}
      </Entity>
    </Entities>
    <Limits SoftLimit="12" HardLimit="12"/>
  </MaltegoTransformRequestMessage>
</MaltegoMessage>"#,
        entity_type, value, extra
    )
}

fn greet(request: &Request, response: &mut Response) -> anyhow::Result<()> {
    response.add_entity("maltego.Phrase", format!("Hello {}!", request.value));
    Ok(())
}

#[test]
fn test_hello_round_trip() {
    let request = decode_request(request_xml("maltego.Person", "Spencer", "").as_bytes()).unwrap();
    let xml = run_transform(&greet, &request);

    assert_eq!(
        xml,
        "<MaltegoMessage><MaltegoTransformResponseMessage><Entities>\
         <Entity Type=\"maltego.Phrase\"><Value>Hello Spencer!</Value><Weight>100</Weight></Entity>\
         </Entities><UIMessages></UIMessages>\
         </MaltegoTransformResponseMessage></MaltegoMessage>"
    );
}

#[test]
fn test_legacy_property_visible_under_both_names() {
    let extra = r#"<Genealogy><Type Name="maltego.Domain"/></Genealogy>
        <AdditionalFields><Field Name="whois" DisplayName="Whois">X</Field></AdditionalFields>"#;
    let request = decode_request(request_xml("maltego.Domain", "paterva.com", extra).as_bytes())
        .unwrap();

    assert_eq!(request.property("whois"), Some("X"));
    assert_eq!(request.property("whois-info"), Some("X"));
}

#[test]
fn test_legacy_translation_follows_genealogy() {
    // Inherited type: the legacy name of the parent still resolves
    let extra = r#"<Genealogy>
          <Type Name="acme.CorporateDomain"/>
          <Type Name="maltego.Domain"/>
        </Genealogy>
        <AdditionalFields><Field Name="whois">X</Field></AdditionalFields>"#;
    let request =
        decode_request(request_xml("acme.CorporateDomain", "acme.com", extra).as_bytes()).unwrap();

    assert_eq!(request.property("whois-info"), Some("X"));
    assert_eq!(request.genealogy.len(), 2);
}

#[test]
fn test_local_args_pairs() {
    let request = decode_local(&["v", "a=1#b=2"]).unwrap();
    assert_eq!(request.properties.len(), 2);
    assert_eq!(request.property("a"), Some("1"));
    assert_eq!(request.property("b"), Some("2"));

    let request = decode_local(&["v", r"a=va\#lue"]).unwrap();
    assert_eq!(request.property("a"), Some("va#lue"));
}

#[test]
fn test_local_invocation_runs_transform() {
    let request = decode_local(&["Spencer"]).unwrap();
    assert!(run_transform(&greet, &request).contains("<Value>Hello Spencer!</Value>"));
}

#[test]
fn test_failing_transform_yields_generic_message() {
    let failing = |request: &Request, _: &mut Response| -> anyhow::Result<()> {
        let n: i32 = request.value.parse().context("value is not a number")?;
        if n < 0 {
            bail!("negative");
        }
        Ok(())
    };
    let panicking = |_: &Request, _: &mut Response| -> anyhow::Result<()> {
        let empty: Vec<u8> = Vec::new();
        let _ = empty[3];
        Ok(())
    };

    let request = decode_local(&["not-a-number"]).unwrap();
    let expected = exception_message(GENERIC_ERROR_MESSAGE);

    assert_eq!(run_transform(&failing, &request), expected);
    assert_eq!(run_transform(&panicking, &request), expected);
    assert!(expected.contains(r#"<UIMessage MessageType="PartialError">"#));
    assert!(!expected.contains("<Entity "));
}

#[test]
fn test_malformed_weight_does_not_abort() {
    let xml = r#"<MaltegoMessage><MaltegoTransformRequestMessage><Entities>
        <Entity Type="maltego.Phrase"><Value>x</Value><Weight>abc</Weight></Entity>
        </Entities><Limits SoftLimit="3"/></MaltegoTransformRequestMessage></MaltegoMessage>"#;

    let request = decode_request(xml.as_bytes()).unwrap();
    assert_eq!(request.weight, 0);
    assert_eq!(request.slider, 3);
}

#[test]
fn test_garbage_is_malformed() {
    assert!(matches!(
        decode_request(b"<MaltegoMessage><Entity>"),
        Err(ProtocolError::MalformedMessage(_))
    ));
    assert_eq!(
        decode_request(b"<MaltegoMessage/>"),
        Err(ProtocolError::MissingNode("Entity"))
    );
}

#[test]
fn test_response_output_reparses() {
    let mut response = Response::new();
    response
        .add_entity("maltego.Phrase", "tricky & <value> \u{1}")
        .add_display_information("HTML", "<p>a]]>b</p>")
        .add_property("k", "K", "strict", "\"quoted\"");
    response.add_ui_message("note", UiMessageType::Debug);

    for xml in [
        encode_response(&response),
        encode_response_with(&response, EncodeOptions::canonical()),
    ] {
        let mut reader = quick_xml::Reader::from_str(&xml);
        loop {
            match reader.read_event() {
                Ok(quick_xml::events::Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("response is not well-formed: {}\n{}", e, xml),
            }
        }
        assert!(xml.contains("tricky &amp; &lt;value&gt; ?"));
    }
}
