//! Proptest generators for property-based testing.

use std::collections::BTreeMap;

use proptest::prelude::*;

use datashare_core::{AllowList, PartyId, Record, RecordId};

/// Generate a party identifier from a small alphabet, so collisions happen.
pub fn party_id() -> impl Strategy<Value = PartyId> {
    prop_oneof![
        Just("HospA"),
        Just("HospB"),
        Just("HospC"),
        Just("HospD"),
        Just("hospb"),
        Just("Lab-7"),
    ]
    .prop_map(PartyId::from)
}

/// Generate a record identifier.
pub fn record_id() -> impl Strategy<Value = RecordId> {
    "[a-z][a-z0-9-]{0,11}".prop_map(RecordId::from)
}

/// Padding around an allow-list entry.
fn padding() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just(" "), Just("  "), Just("\t")]
}

/// Generate a delimited allow-list: padded entries, occasional blanks and
/// duplicates.
pub fn allow_list() -> impl Strategy<Value = AllowList> {
    prop::collection::vec(
        (
            padding(),
            prop::option::weighted(0.85, party_id()),
            padding(),
        ),
        0..5,
    )
    .prop_map(|entries| {
        let raw = entries
            .into_iter()
            .map(|(left, party, right)| {
                let name = party.as_ref().map(PartyId::as_str).unwrap_or("");
                format!("{left}{name}{right}")
            })
            .collect::<Vec<_>>()
            .join(",");
        AllowList::parse(raw)
    })
}

/// Generate a single record.
pub fn record() -> impl Strategy<Value = Record> {
    (
        record_id(),
        party_id(),
        "[a-f0-9]{8,16}",
        "[ -~]{0,24}",
        allow_list(),
    )
        .prop_map(|(id, owner, pointer, description, allowed)| Record {
            id,
            owner,
            pointer,
            description,
            allowed,
        })
}

/// Generate up to `max` records with distinct ids.
pub fn record_set(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(record(), 0..=max).prop_map(|records| {
        records
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect::<BTreeMap<_, _>>()
            .into_values()
            .collect()
    })
}
