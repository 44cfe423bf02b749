// PatchSpec construction from indexed config declarations

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::patcher::types::{MemberKind, PatchFields, PatchSpec};

fn non_empty<'a>(data: &'a BTreeMap<String, String>, field: &str) -> Option<&'a str> {
    data.get(field).map(String::as_str).filter(|v| !v.is_empty())
}

/// Build PatchSpecs from `patch.<n>.<field>` declarations.
///
/// Each index needs `class` and `action`, plus exactly one of `method` or
/// `property`. Entries that fail are logged and dropped. Output is ordered by
/// ascending index.
pub fn build_patch_specs(fields: &PatchFields) -> Vec<PatchSpec> {
    let mut specs = Vec::with_capacity(fields.len());

    for (index, data) in fields {
        let (Some(class), Some(action)) = (non_empty(data, "class"), non_empty(data, "action"))
        else {
            warn!(
                "[runtime_patcher] RuntimePatch {} missing required fields (class, action)",
                index
            );
            continue;
        };

        let member = match (non_empty(data, "method"), non_empty(data, "property")) {
            (Some(method), None) => MemberKind::Method(method.to_string()),
            (None, Some(property)) => MemberKind::PropertyGetter(property.to_string()),
            (None, None) => {
                warn!(
                    "[runtime_patcher] RuntimePatch {} needs either method or property",
                    index
                );
                continue;
            }
            (Some(_), Some(_)) => {
                warn!(
                    "[runtime_patcher] RuntimePatch {} sets both method and property",
                    index
                );
                continue;
            }
        };

        let spec = PatchSpec {
            target_type: class.to_string(),
            member,
            action: action.to_string(),
        };
        debug!("[runtime_patcher] Loaded RuntimePatch {}: {}", index, spec);
        specs.push(spec);
    }

    specs
}
