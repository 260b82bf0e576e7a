//! Event-driven parser for `.osm` XML extracts
//!
//! Only `<node>` and `<way>` elements matter for routing; relations
//! and metadata are skipped. Malformed records (missing or non-numeric
//! `id`/`lat`/`lon`/`ref`) abort the load before anything is built
//! from them.

use std::io::BufRead;
use std::path::Path;

use hashbrown::HashMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::raw_types::{OsmExtract, OsmNode, OsmWay};
use crate::Error;

enum OpenElement {
    Node(OsmNode),
    Way(OsmWay),
}

pub(crate) fn parse_osm_file(path: &Path) -> Result<OsmExtract, Error> {
    let reader = Reader::from_file(path)?;
    parse_events(reader)
}

#[cfg(test)]
pub(crate) fn parse_osm_str(xml: &str) -> Result<OsmExtract, Error> {
    parse_events(Reader::from_str(xml))
}

fn parse_events<R: BufRead>(mut reader: Reader<R>) -> Result<OsmExtract, Error> {
    let mut extract = OsmExtract::default();
    let mut open: Option<OpenElement> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => handle_open(&e, &mut extract, &mut open, false)?,
            Event::Empty(e) => handle_open(&e, &mut extract, &mut open, true)?,
            Event::End(e) => {
                if matches!(e.name().as_ref(), b"node" | b"way") {
                    close_element(&mut extract, &mut open);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(extract)
}

fn handle_open(
    element: &BytesStart<'_>,
    extract: &mut OsmExtract,
    open: &mut Option<OpenElement>,
    self_closing: bool,
) -> Result<(), Error> {
    match element.name().as_ref() {
        b"node" => {
            let attrs = collect_attributes(element)?;
            let node = OsmNode {
                id: required(&attrs, "id")?,
                lat: required(&attrs, "lat")?,
                lon: required(&attrs, "lon")?,
                tags: HashMap::new(),
            };
            if self_closing {
                extract.nodes.push(node);
            } else {
                *open = Some(OpenElement::Node(node));
            }
        }
        b"way" => {
            let attrs = collect_attributes(element)?;
            let way = OsmWay {
                id: required(&attrs, "id")?,
                node_refs: Vec::new(),
                tags: HashMap::new(),
            };
            if self_closing {
                extract.ways.push(way);
            } else {
                *open = Some(OpenElement::Way(way));
            }
        }
        b"nd" => {
            if let Some(OpenElement::Way(way)) = open {
                let attrs = collect_attributes(element)?;
                way.node_refs.push(required(&attrs, "ref")?);
            }
        }
        b"tag" => {
            if let Some(current) = open {
                let attrs = collect_attributes(element)?;
                if let (Some(k), Some(v)) = (attrs.get("k"), attrs.get("v")) {
                    let tags = match current {
                        OpenElement::Node(node) => &mut node.tags,
                        OpenElement::Way(way) => &mut way.tags,
                    };
                    tags.insert(k.clone(), v.clone());
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn close_element(extract: &mut OsmExtract, open: &mut Option<OpenElement>) {
    match open.take() {
        Some(OpenElement::Node(node)) => extract.nodes.push(node),
        Some(OpenElement::Way(way)) => extract.ways.push(way),
        None => {}
    }
}

fn collect_attributes(element: &BytesStart<'_>) -> Result<HashMap<String, String>, Error> {
    let mut attrs = HashMap::new();
    for attr in element.attributes() {
        let attr =
            attr.map_err(|err| Error::InvalidData(format!("malformed XML attribute: {err}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| Error::InvalidData(format!("bad XML attribute value: {err}")))?
            .into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn required<T: std::str::FromStr>(
    attrs: &HashMap<String, String>,
    key: &str,
) -> Result<T, Error> {
    let raw = attrs
        .get(key)
        .ok_or_else(|| Error::InvalidData(format!("OSM element missing `{key}` attribute")))?;
    raw.parse()
        .map_err(|_| Error::InvalidData(format!("OSM attribute `{key}` has invalid value `{raw}`")))
}
