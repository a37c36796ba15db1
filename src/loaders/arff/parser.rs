use crate::core::attributes::{Attribute, AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use crate::utils::file_parsing::{split_csv_preserving_quotes, strip_surrounding_quotes};
use std::io::{BufRead, Error, ErrorKind};
use std::sync::Arc;

/// A non-blank, non-comment header line.
enum Directive {
    Relation(String),
    Attribute(AttributeRef),
    Data,
}

pub(super) fn is_comment_or_empty(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || t.starts_with('%')
}

fn invalid(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::InvalidData, message.into())
}

/// Strips quotes and undoes the `\'` escape written by `quote_if_needed`.
fn unquote(raw: &str) -> String {
    strip_surrounding_quotes(raw.trim()).replace("\\'", "'")
}

/// Reads everything up to and including `@data`. A `class_index` of `None`
/// selects the last attribute.
pub(super) fn parse_header<R: BufRead>(
    reader: &mut R,
    class_index: Option<usize>,
) -> Result<InstanceHeader, Error> {
    let mut relation = None;
    let mut attributes: Vec<AttributeRef> = Vec::new();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(Error::new(
                ErrorKind::UnexpectedEof,
                "ARFF file ended before @data",
            ));
        }
        if is_comment_or_empty(&line) {
            continue;
        }
        match parse_directive(&line)? {
            Directive::Relation(name) => relation = Some(name),
            Directive::Attribute(attribute) => attributes.push(attribute),
            Directive::Data => break,
        }
    }

    let class_index = class_index.unwrap_or(attributes.len().saturating_sub(1));
    Ok(InstanceHeader::new(
        relation.unwrap_or_else(|| "unnamed".to_string()),
        attributes,
        class_index,
    ))
}

fn parse_directive(line: &str) -> Result<Directive, Error> {
    let line = line.trim();
    let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match keyword.to_ascii_lowercase().as_str() {
        "@relation" => Ok(Directive::Relation(unquote(rest))),
        "@attribute" => parse_attribute(rest.trim()).map(Directive::Attribute),
        "@data" => Ok(Directive::Data),
        _ => Err(invalid(format!("Unsupported header directive: {line}"))),
    }
}

/// `name type` or `name {label, ...}`, with the `@attribute` keyword removed.
fn parse_attribute(declaration: &str) -> Result<AttributeRef, Error> {
    let (name, kind) = split_attribute_name(declaration)?;

    if kind.starts_with('{') {
        let labels = parse_nominal_domain(kind)?;
        return Ok(Arc::new(NominalAttribute::from_labels(name, labels)));
    }

    match kind
        .split_whitespace()
        .next()
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("numeric" | "real" | "integer") => Ok(Arc::new(NumericAttribute::new(name))),
        Some(_) => Err(invalid(format!(
            "Attribute '{name}' has an unsupported type: {kind}"
        ))),
        None => Err(invalid(format!("Attribute '{name}' has no type"))),
    }
}

fn split_attribute_name(declaration: &str) -> Result<(String, &str), Error> {
    match declaration.chars().next() {
        Some(quote @ ('\'' | '"')) => {
            let close = declaration
                .char_indices()
                .skip(1)
                .find(|&(i, c)| c == quote && !declaration[..i].ends_with('\\'))
                .map(|(i, _)| i)
                .ok_or_else(|| invalid("Attribute name without closing quote"))?;
            Ok((
                unquote(&declaration[..=close]),
                declaration[close + 1..].trim(),
            ))
        }
        Some(_) => {
            let (name, kind) = declaration
                .split_once(char::is_whitespace)
                .unwrap_or((declaration, ""));
            Ok((name.to_string(), kind.trim()))
        }
        None => Err(invalid("Attribute declaration without a name")),
    }
}

fn parse_nominal_domain(domain: &str) -> Result<Vec<String>, Error> {
    let inner = domain
        .strip_prefix('{')
        .and_then(|s| s.rfind('}').map(|close| &s[..close]))
        .ok_or_else(|| invalid("Nominal domain without closing '}'"))?;

    let labels: Vec<String> = split_csv_preserving_quotes(inner)
        .iter()
        .map(|s| unquote(s))
        .filter(|s| !s.is_empty())
        .collect();
    if labels.is_empty() {
        return Err(invalid("Empty nominal domain"));
    }
    Ok(labels)
}

/// Splits a trailing `{weight}` off a data row. Rows without one weigh 1.
pub(super) fn split_instance_weight(line: &str) -> Result<(&str, f64), Error> {
    let trimmed = line.trim_end();
    if !trimmed.ends_with('}') {
        return Ok((trimmed, 1.0));
    }
    let open = trimmed
        .rfind('{')
        .ok_or_else(|| invalid("Instance weight without '{'"))?;

    let raw = trimmed[open + 1..trimmed.len() - 1].trim();
    let weight: f64 = raw
        .parse()
        .map_err(|_| invalid(format!("Invalid instance weight '{raw}'")))?;
    if weight < 0.0 || weight.is_nan() {
        return Err(invalid(format!("Negative instance weight {weight}")));
    }

    let values = trimmed[..open].trim_end();
    Ok((values.strip_suffix(',').unwrap_or(values), weight))
}

/// Decodes one data row into stored values: label indices for nominal
/// columns, `NaN` for `?`.
pub(super) fn parse_instance_values(
    header: &InstanceHeader,
    line: &str,
) -> Result<Vec<f64>, Error> {
    let tokens = split_csv_preserving_quotes(line);
    let expected = header.number_of_attributes();
    if tokens.len() != expected {
        return Err(invalid(format!(
            "Row has {} values but the header declares {expected} attributes",
            tokens.len()
        )));
    }

    tokens
        .iter()
        .zip(&header.attributes)
        .map(|(raw, attribute)| parse_value(attribute, raw.trim()))
        .collect()
}

fn parse_value(attribute: &AttributeRef, raw: &str) -> Result<f64, Error> {
    if raw == "?" {
        return Ok(f64::NAN);
    }

    if let Some(nominal) = attribute.as_nominal() {
        let label = unquote(raw);
        return nominal
            .index_of_value(&label)
            .map(|i| i as f64)
            .ok_or_else(|| {
                invalid(format!(
                    "'{label}' is not a value of attribute '{}'",
                    attribute.name()
                ))
            });
    }

    if attribute.is_numeric() {
        return raw.parse::<f64>().map_err(|_| {
            invalid(format!(
                "'{raw}' is not a number (attribute '{}')",
                attribute.name()
            ))
        });
    }

    Err(invalid(format!(
        "Attribute '{}' has an unsupported type",
        attribute.name()
    )))
}
