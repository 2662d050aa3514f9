//! Composition: reshape the flat `<slot><sep><label>` namespace into a
//! slot-name → section-data mapping for one variant.

use crate::error::StrictconfError;
use crate::schema::Compose;
use crate::validate::compose_key;
use crate::value::{Mapping, Value};

/// Build the composed configuration for `variant`.
///
/// Meant to run on data that already passed [`validate`](crate::validate());
/// on anything else it fails with [`StrictconfError::MissingEntry`] naming the
/// first entry it could not find. Slots come out in the compose table's order.
pub fn compose(data: &Value, variant: &str, sep: &str) -> Result<Mapping, StrictconfError> {
    let entrypoint = compose_key(variant, sep);
    let compose_table = compose_table(data, &entrypoint)?;

    let mut composed = Mapping::new();
    for (slot, label) in compose_table.iter() {
        let (Some(slot), Some(label)) = (slot.as_str(), label.as_str()) else {
            return Err(StrictconfError::MissingEntry(format!(
                "{entrypoint}[{}]",
                slot.repr()
            )));
        };
        composed.insert(slot, section_data(data, slot, label, sep)?.clone());
    }
    Ok(composed)
}

/// Like [`compose`], restricted to the slots `schema` declares.
///
/// Compose-table entries that no section of `schema` refers to are left out,
/// whatever their label, so data accepted by [`validate`](crate::validate())
/// for the same schema always composes. Slots come out in declaration order.
pub fn compose_declared(
    schema: &Compose,
    data: &Value,
    variant: &str,
    sep: &str,
) -> Result<Mapping, StrictconfError> {
    let entrypoint = compose_key(variant, sep);
    let compose_table = compose_table(data, &entrypoint)?;

    let mut composed = Mapping::new();
    for (_, section) in schema.sections() {
        let slot = section.name();
        let label = compose_table
            .get(slot)
            .and_then(Value::as_str)
            .ok_or_else(|| StrictconfError::MissingEntry(format!("{entrypoint}[{slot}]")))?;
        composed.insert(slot, section_data(data, slot, label, sep)?.clone());
    }
    Ok(composed)
}

fn compose_table<'a>(data: &'a Value, entrypoint: &str) -> Result<&'a Mapping, StrictconfError> {
    data.as_mapping()
        .and_then(|root| root.get(entrypoint))
        .and_then(Value::as_mapping)
        .ok_or_else(|| StrictconfError::MissingEntry(entrypoint.to_string()))
}

fn section_data<'a>(
    data: &'a Value,
    slot: &str,
    label: &str,
    sep: &str,
) -> Result<&'a Value, StrictconfError> {
    let section_name = format!("{slot}{sep}{label}");
    data.as_mapping()
        .and_then(|root| root.get(&section_name))
        .ok_or(StrictconfError::MissingEntry(section_name))
}
