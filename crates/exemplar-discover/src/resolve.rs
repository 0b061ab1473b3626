// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Address resolution for cases.

use std::path::PathBuf;

use exemplar_source::{address_of, Address, Namespace, ResolveError};
use tracing::trace;

use crate::case::Case;

/// Address of the code `case` was found on.
///
/// Cases that kept their entity use it directly. Otherwise the block name is
/// resolved through `namespace`; properties, which carry no owner, are
/// addressed through their declaring class.
pub fn address(case: &Case, namespace: &Namespace) -> Result<Address, ResolveError> {
    let block = case.block();
    if case.is_file() {
        let filename = block
            .filename
            .clone()
            .unwrap_or_else(|| PathBuf::from(&block.name));
        return Ok(Address::file(filename));
    }
    if let Some(entity) = case.entity() {
        return address_of(entity);
    }

    let obj = namespace.resolve_name(&block.name)?;
    if obj.is_property() {
        trace!(name = %block.name, "addressing property through its class");
        property_address(&block.name, namespace)
    } else {
        address_of(&obj)
    }
}

fn property_address(name: &str, namespace: &Namespace) -> Result<Address, ResolveError> {
    let (class_name, attr) = name.rsplit_once('.').ok_or_else(|| ResolveError::Unaddressable {
        name: name.to_string(),
    })?;
    let class = namespace.resolve_name(class_name)?;
    let base = address_of(&class)?;
    let call_path = match &base.call_path {
        Some(path) => format!("{path}.{attr}"),
        None => attr.to_string(),
    };
    Ok(Address {
        call_path: Some(call_path),
        ..base
    })
}
