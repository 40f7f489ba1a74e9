//! Encode joined records as OpenRosa XML submissions.
//!
//! Document shape follows the target form: per-submission timestamps, an
//! intro acknowledgement, one parent group with the household fields, one
//! repeating child group per attached row, and the OpenRosa meta block.
//! Column names are written verbatim as element names; nothing is
//! validated against the form locally, a field the form does not know is
//! the server's to reject.

use std::io;

use chrono::Local;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use uuid::Uuid;

use crate::config::FormLayout;
use crate::error::EncodeError;
use crate::join::JoinedRecord;

const OPENROSA_XFORMS_NS: &str = "http://openrosa.org/xforms";
const JAVAROSA_NS: &str = "http://openrosa.org/javarosa";

/// Encode one joined record into a submission document.
pub fn encode_submission(
    record: &JoinedRecord<'_>,
    project_uuid: &str,
    form: &FormLayout,
) -> Result<String, EncodeError> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    let instance_id = format!("uuid:{}", Uuid::new_v4());
    encode_with(record, project_uuid, form, &today, &instance_id)
}

/// Encoder core with the date and instance id injected, so tests can pin
/// both and compare documents exactly.
fn encode_with(
    record: &JoinedRecord<'_>,
    project_uuid: &str,
    form: &FormLayout,
    today: &str,
    instance_id: &str,
) -> Result<String, EncodeError> {
    let mut writer = Writer::new(Vec::new());

    let mut root = BytesStart::new("data");
    root.push_attribute(("id", project_uuid));
    root.push_attribute(("xmlns:orx", OPENROSA_XFORMS_NS));
    root.push_attribute(("xmlns:jr", JAVAROSA_NS));
    writer.write_event(Event::Start(root))?;

    text_element(&mut writer, "start", today)?;
    text_element(&mut writer, "end", today)?;
    text_element(&mut writer, "today", today)?;

    writer.write_event(Event::Start(BytesStart::new("intro")))?;
    text_element(&mut writer, "acknowledgement", "OK")?;
    writer.write_event(Event::End(BytesEnd::new("intro")))?;

    writer.write_event(Event::Start(BytesStart::new(form.parent_group.as_str())))?;
    for (column, value) in record.parent.cells() {
        text_element(&mut writer, column, &value.to_string())?;
    }
    // Derived fields the form expects: whether any members were attached,
    // and the household size counting the head
    let other_members = if record.children.is_empty() { "No" } else { "Yes" };
    text_element(&mut writer, "other_members", other_members)?;
    text_element(&mut writer, "HHSize", &(record.children.len() + 1).to_string())?;
    writer.write_event(Event::End(BytesEnd::new(form.parent_group.as_str())))?;

    for child in &record.children {
        writer.write_event(Event::Start(BytesStart::new(form.child_group.as_str())))?;
        for (column, value) in child.cells() {
            text_element(&mut writer, column, &value.to_string())?;
        }
        writer.write_event(Event::End(BytesEnd::new(form.child_group.as_str())))?;
    }

    writer.write_event(Event::Start(BytesStart::new("meta")))?;
    text_element(&mut writer, "instanceID", instance_id)?;
    writer.write_event(Event::End(BytesEnd::new("meta")))?;

    writer.write_event(Event::End(BytesEnd::new("data")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn text_element<W: io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), EncodeError> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}
